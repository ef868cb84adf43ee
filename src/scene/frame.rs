//! Per-frame draw description handed to the canvas adapters. All positions are
//! in world space.

use glam::Vec3;

use super::camera::Camera;

/// One node or panel, fully transformed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeDraw {
	/// Layout slot.
	pub index: usize,
	/// Index into the content list.
	pub item: usize,
	/// World position including group rotation, scroll and float.
	pub position: Vec3,
	/// Euler angles (x, y, z) in radians.
	pub rotation: Vec3,
	/// Uniform scale, 1 when idle.
	pub scale: f32,
	/// Fill opacity in `[0, 1]`.
	pub opacity: f32,
	/// Whether this is the active item.
	pub active: bool,
	/// Extra highlight strength, 0 when idle.
	pub glow: f32,
}

/// A connection line between two rotated node positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeDraw {
	/// Start point, world space.
	pub from: Vec3,
	/// End point, world space.
	pub to: Vec3,
}

/// A pulse particle part way along its edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseDraw {
	/// World position.
	pub position: Vec3,
	/// Fade in `[0, 1]`.
	pub opacity: f32,
}

/// Everything a renderer needs to draw one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	/// Nodes that transformed cleanly this frame.
	pub nodes: Vec<NodeDraw>,
	/// Connection lines.
	pub edges: Vec<EdgeDraw>,
	/// Pulse particles.
	pub pulses: Vec<PulseDraw>,
}

impl Frame {
	/// Node under a canvas point, treating each node as a disc of `radius`
	/// world units. The closest to the camera wins.
	pub fn pick_disc(&self, camera: &Camera, width: f64, height: f64, x: f64, y: f64, radius: f32) -> Option<usize> {
		self.pick(camera, width, height, |node, p| {
			let r = (radius * node.scale) as f64 * p.scale;
			let (dx, dy) = (p.x - x, p.y - y);
			dx * dx + dy * dy < r * r
		})
	}

	/// Node under a canvas point, treating each node as an upright rectangle
	/// of `half_width × half_height` world units (narrowed by its yaw).
	pub fn pick_rect(
		&self,
		camera: &Camera,
		width: f64,
		height: f64,
		x: f64,
		y: f64,
		half_width: f32,
		half_height: f32,
	) -> Option<usize> {
		self.pick(camera, width, height, |node, p| {
			let hw = (half_width * node.scale * node.rotation.y.cos().abs()) as f64 * p.scale;
			let hh = (half_height * node.scale) as f64 * p.scale;
			(p.x - x).abs() < hw && (p.y - y).abs() < hh
		})
	}

	fn pick(
		&self,
		camera: &Camera,
		width: f64,
		height: f64,
		hit: impl Fn(&NodeDraw, &super::camera::ScreenPoint) -> bool,
	) -> Option<usize> {
		self.nodes
			.iter()
			.filter_map(|node| {
				let p = camera.project(node.position, width, height)?;
				hit(node, &p).then_some((node.index, p.depth))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(index, _)| index)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn node(index: usize, position: Vec3) -> NodeDraw {
		NodeDraw {
			index,
			item: index,
			position,
			rotation: Vec3::ZERO,
			scale: 1.0,
			opacity: 1.0,
			active: false,
			glow: 0.0,
		}
	}

	#[test]
	fn picks_nearest_overlapping_node() {
		let camera = Camera::new(Vec3::new(0.0, 0.0, 35.0), 60.0);
		let frame = Frame {
			nodes: vec![node(0, Vec3::new(0.0, 0.0, -5.0)), node(1, Vec3::new(0.0, 0.0, 5.0))],
			..Frame::default()
		};
		assert_eq!(frame.pick_disc(&camera, 800.0, 600.0, 400.0, 300.0, 2.5), Some(1));
		assert_eq!(frame.pick_disc(&camera, 800.0, 600.0, 10.0, 10.0, 2.5), None);
	}

	#[test]
	fn rect_pick_respects_extents() {
		let camera = Camera::new(Vec3::new(0.0, 0.0, 14.0), 45.0);
		let frame = Frame {
			nodes: vec![node(0, Vec3::ZERO)],
			..Frame::default()
		};
		assert_eq!(frame.pick_rect(&camera, 800.0, 600.0, 400.0, 300.0, 2.25, 1.6), Some(0));
		assert_eq!(frame.pick_rect(&camera, 800.0, 600.0, 790.0, 300.0, 2.25, 1.6), None);
	}
}
