//! Distance-threshold connections between laid-out nodes, plus the pulse subset.
//!
//! Edge derivation compares every unordered pair, so cost grows with the square
//! of the node count. Fine for a few dozen nodes; a spatial index would be
//! needed well before the thousands.

use std::ops::Range;

use log::debug;
use rand::Rng;

use super::types::{Edge, Node, Pulse};

/// Parameters for building a connection graph.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphParams {
	/// Nodes strictly closer than this are connected.
	pub threshold_distance: f32,
	/// Chance that an edge carries a pulse.
	pub pulse_probability: f64,
	/// Range pulse speeds are drawn from.
	pub pulse_speed: Range<f32>,
	/// Range pulse phase offsets are drawn from.
	pub pulse_phase: Range<f32>,
}

impl Default for GraphParams {
	fn default() -> Self {
		Self {
			threshold_distance: 15.0,
			pulse_probability: 0.3,
			pulse_speed: 0.5..1.5,
			pulse_phase: 0.0..2.0,
		}
	}
}

/// Edges of a layout and the subset of them that carry pulses.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConnectionGraph {
	/// Normalized, duplicate-free edges in pair order.
	pub edges: Vec<Edge>,
	/// Pulses, each on an edge from `edges`.
	pub pulses: Vec<Pulse>,
}

/// Euclidean distance that never yields NaN for finite input; coincident points are 0 apart.
fn distance(a: glam::Vec3, b: glam::Vec3) -> f32 {
	let d = (a - b).length();
	if d.is_nan() { 0.0 } else { d }
}

/// Every unordered pair `(i, j)`, `i < j`, closer than `threshold`.
pub fn build_edges(nodes: &[Node], threshold: f32) -> Vec<Edge> {
	let mut edges = Vec::new();
	for (i, a) in nodes.iter().enumerate() {
		for (j, b) in nodes.iter().enumerate().skip(i + 1) {
			if distance(a.position, b.position) < threshold {
				edges.extend(Edge::new(i, j));
			}
		}
	}
	edges
}

/// Uniform draw from `range`. Empty ranges yield `start`; non-finite bounds yield 0.
fn sample(rng: &mut (impl Rng + ?Sized), range: &Range<f32>) -> f32 {
	if !range.start.is_finite() || !range.end.is_finite() {
		0.0
	} else if range.start < range.end {
		rng.gen_range(range.clone())
	} else {
		range.start
	}
}

/// Selects each edge into the pulse set independently with `pulse_probability`,
/// drawing its speed and phase once.
pub fn select_pulses(edges: &[Edge], params: &GraphParams, rng: &mut (impl Rng + ?Sized)) -> Vec<Pulse> {
	let p = if params.pulse_probability.is_nan() {
		0.0
	} else {
		params.pulse_probability.clamp(0.0, 1.0)
	};
	edges
		.iter()
		.filter_map(|&edge| {
			if !rng.gen_bool(p) {
				return None;
			}
			Some(Pulse {
				edge,
				speed: sample(&mut *rng, &params.pulse_speed),
				phase_offset: sample(&mut *rng, &params.pulse_phase),
			})
		})
		.collect()
}

/// Edges for `nodes` plus the pulses selected from them.
pub fn build_graph(nodes: &[Node], params: &GraphParams, rng: &mut (impl Rng + ?Sized)) -> ConnectionGraph {
	let edges = build_edges(nodes, params.threshold_distance);
	let pulses = select_pulses(&edges, params, rng);
	debug!(
		"graph rebuild: {} nodes, {} edges, {} pulses",
		nodes.len(),
		edges.len(),
		pulses.len()
	);
	ConnectionGraph { edges, pulses }
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::scene::layout::sphere_layout;

	#[test]
	fn no_self_loops_or_duplicate_pairs() {
		let nodes = sphere_layout(25, 18.0);
		let edges = build_edges(&nodes, 15.0);
		let mut seen = HashSet::new();
		for edge in &edges {
			assert!(edge.a < edge.b);
			assert!(seen.insert((edge.a, edge.b)));
			assert!(!seen.contains(&(edge.b, edge.a)));
		}
	}

	#[test]
	fn twelve_nodes_radius_eighteen_links_adjacent_rows() {
		// 4 rows of 3: only same-azimuth neighbours in adjacent rows are within 15.
		let nodes = sphere_layout(12, 18.0);
		let first = build_edges(&nodes, 15.0);
		let second = build_edges(&sphere_layout(12, 18.0), 15.0);
		assert_eq!(first, second);
		assert_eq!(first.len(), 9);
		for edge in &first {
			assert_eq!(edge.b - edge.a, 3);
		}
	}

	#[test]
	fn coincident_nodes_connect_without_nan() {
		let nodes = sphere_layout(4, 0.0);
		let edges = build_edges(&nodes, 15.0);
		assert_eq!(edges.len(), 6);
	}

	#[test]
	fn pulses_reproducible_with_seeded_rng() {
		let nodes = sphere_layout(25, 18.0);
		let params = GraphParams::default();
		let a = build_graph(&nodes, &params, &mut StdRng::seed_from_u64(7));
		let b = build_graph(&nodes, &params, &mut StdRng::seed_from_u64(7));
		assert_eq!(a, b);
		for pulse in &a.pulses {
			assert!(a.edges.contains(&pulse.edge));
			assert!(params.pulse_speed.contains(&pulse.speed));
			assert!(params.pulse_phase.contains(&pulse.phase_offset));
		}
	}

	#[test]
	fn pulse_probability_bounds() {
		let nodes = sphere_layout(25, 18.0);
		let mut rng = StdRng::seed_from_u64(1);
		let none = GraphParams { pulse_probability: 0.0, ..GraphParams::default() };
		assert!(build_graph(&nodes, &none, &mut rng).pulses.is_empty());

		let all = GraphParams { pulse_probability: 1.0, ..GraphParams::default() };
		let graph = build_graph(&nodes, &all, &mut rng);
		assert_eq!(graph.pulses.len(), graph.edges.len());
	}

	#[test]
	fn non_finite_pulse_ranges_do_not_panic() {
		let nodes = sphere_layout(12, 18.0);
		let params = GraphParams {
			pulse_probability: 1.0,
			pulse_speed: f32::NAN..1.0,
			pulse_phase: 0.0..f32::INFINITY,
			..GraphParams::default()
		};
		let graph = build_graph(&nodes, &params, &mut StdRng::seed_from_u64(3));
		assert_eq!(graph.pulses.len(), graph.edges.len());
		for pulse in &graph.pulses {
			assert_eq!(pulse.speed, 0.0);
			assert_eq!(pulse.phase_offset, 0.0);
		}
	}

	#[test]
	fn empty_input_yields_empty_graph() {
		let graph = build_graph(&[], &GraphParams::default(), &mut StdRng::seed_from_u64(0));
		assert_eq!(graph, ConnectionGraph::default());
	}
}
