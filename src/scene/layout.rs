//! Deterministic placement of content slots on a sphere or along a ring.

use std::f32::consts::PI;

use glam::Vec3;
use log::debug;

use super::types::Node;

/// Converts spherical coordinates (polar angle `phi` from +Y, azimuth `theta`) to
/// cartesian, using the same convention as three.js `setFromSpherical`.
pub fn spherical_to_cartesian(radius: f32, phi: f32, theta: f32) -> Vec3 {
	let sin_phi = phi.sin();
	Vec3::new(
		radius * sin_phi * theta.sin(),
		radius * phi.cos(),
		radius * sin_phi * theta.cos(),
	)
}

/// Non-finite or negative radii collapse to zero (all nodes coincident at the origin).
fn sanitize_radius(radius: f32) -> f32 {
	if radius.is_finite() && radius > 0.0 {
		radius
	} else {
		0.0
	}
}

/// Places `rows × per_row` nodes: rows at evenly spaced polar angles strictly
/// between the poles, each row split into `per_row` evenly spaced azimuths.
pub fn sphere_grid(rows: usize, per_row: usize, radius: f32) -> Vec<Node> {
	let radius = sanitize_radius(radius);
	let phi_span = PI / (rows + 1) as f32;
	let theta_span = if per_row == 0 {
		0.0
	} else {
		(PI * 2.0) / per_row as f32
	};

	(1..=rows)
		.flat_map(|i| (0..per_row).map(move |j| (i, j)))
		.enumerate()
		.map(|(index, (i, j))| Node {
			index,
			item: index,
			position: spherical_to_cartesian(radius, phi_span * i as f32, theta_span * j as f32),
		})
		.collect()
}

/// Grid shape used for `count` nodes: `rows = ceil(sqrt(count))`, `per_row = ceil(count / rows)`.
pub fn grid_shape(count: usize) -> (usize, usize) {
	if count == 0 {
		return (0, 0);
	}
	let mut rows = count.isqrt();
	if rows * rows < count {
		rows += 1;
	}
	(rows, count.div_ceil(rows))
}

/// Lays `count` nodes on a sphere of `radius`. Pure: identical inputs give
/// bit-identical positions.
pub fn sphere_layout(count: usize, radius: f32) -> Vec<Node> {
	let (rows, per_row) = grid_shape(count);
	let mut nodes = sphere_grid(rows, per_row, radius);
	nodes.truncate(count);
	nodes
}

/// Lays `count` slots along +X, `spacing` apart.
pub fn ring_layout(count: usize, spacing: f32) -> Vec<Node> {
	(0..count)
		.map(|i| Node {
			index: i,
			item: i,
			position: Vec3::new(i as f32 * spacing, 0.0, 0.0),
		})
		.collect()
}

/// Memoizes `sphere_layout` on `(count, radius)`.
#[derive(Debug, Default)]
pub struct LayoutCache {
	key: Option<(usize, u32)>,
	nodes: Vec<Node>,
	rebuilds: usize,
}

impl LayoutCache {
	/// Empty cache; the first `get` computes.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached layout, recomputing only when `count` or `radius` changed.
	pub fn get(&mut self, count: usize, radius: f32) -> &[Node] {
		let key = (count, radius.to_bits());
		if self.key != Some(key) {
			debug!("layout rebuild: {} nodes, radius {}", count, radius);
			self.nodes = sphere_layout(count, radius);
			self.key = Some(key);
			self.rebuilds += 1;
		}
		&self.nodes
	}

	/// Number of times the layout was actually computed.
	pub fn rebuilds(&self) -> usize {
		self.rebuilds
	}

	/// Drops the cached nodes.
	pub fn clear(&mut self) {
		self.key = None;
		self.nodes = Vec::new();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn returns_exactly_count_nodes_on_the_sphere() {
		for count in [0usize, 1, 2, 5, 12, 25, 37] {
			for radius in [0.5f32, 18.0, 100.0] {
				let nodes = sphere_layout(count, radius);
				assert_eq!(nodes.len(), count);
				for node in &nodes {
					assert!((node.position.length() - radius).abs() < radius * 1e-4);
				}
			}
		}
	}

	#[test]
	fn layout_is_deterministic() {
		let a = sphere_layout(12, 18.0);
		let b = sphere_layout(12, 18.0);
		for (x, y) in a.iter().zip(&b) {
			assert_eq!(x.position.to_array().map(f32::to_bits), y.position.to_array().map(f32::to_bits));
		}
	}

	#[test]
	fn no_two_nodes_coincide_and_poles_are_excluded() {
		let nodes = sphere_layout(25, 18.0);
		for (i, a) in nodes.iter().enumerate() {
			assert!(a.position.y.abs() < 18.0 - 1e-3);
			for b in &nodes[i + 1..] {
				assert!(a.position.distance(b.position) > 1e-3);
			}
		}
	}

	#[test]
	fn grid_shape_covers_count() {
		assert_eq!(grid_shape(0), (0, 0));
		assert_eq!(grid_shape(1), (1, 1));
		assert_eq!(grid_shape(12), (4, 3));
		assert_eq!(grid_shape(25), (5, 5));
		assert_eq!(grid_shape(26), (6, 5));
		for count in 1..100 {
			let (rows, per_row) = grid_shape(count);
			assert!(rows * per_row >= count);
		}
	}

	#[test]
	fn degenerate_radius_collapses_to_origin() {
		for radius in [0.0f32, -3.0, f32::NAN] {
			let nodes = sphere_layout(4, radius);
			assert_eq!(nodes.len(), 4);
			assert!(nodes.iter().all(|n| n.position == Vec3::ZERO));
		}
	}

	#[test]
	fn ring_layout_spaces_along_x() {
		let nodes = ring_layout(3, 8.0);
		let xs: Vec<f32> = nodes.iter().map(|n| n.position.x).collect();
		assert_eq!(xs, vec![0.0, 8.0, 16.0]);
	}

	#[test]
	fn cache_recomputes_only_on_input_change() {
		let mut cache = LayoutCache::new();
		cache.get(12, 18.0);
		cache.get(12, 18.0);
		assert_eq!(cache.rebuilds(), 1);
		cache.get(13, 18.0);
		cache.get(13, 20.0);
		assert_eq!(cache.rebuilds(), 3);
		cache.clear();
		assert_eq!(cache.get(13, 20.0).len(), 13);
		assert_eq!(cache.rebuilds(), 4);
	}
}
