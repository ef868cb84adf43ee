//! The spherical technology network: cached layout and graph, hover state, and
//! per-frame assembly of node, edge and pulse draws.

use glam::{EulerRot, Quat, Vec3};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::camera::Camera;
use super::clock::FrameTime;
use super::config::NetworkConfig;
use super::error::SceneResult;
use super::frame::{EdgeDraw, Frame, NodeDraw, PulseDraw};
use super::graph::{ConnectionGraph, build_graph};
use super::interaction::{InteractionState, Transition};
use super::layout::LayoutCache;
use super::motion::{damp, group_rotation, node_float, pulse_state};
use super::types::Node;

type GraphKey = (usize, u32, u32);

/// Layout, graph and interaction for the technology network, owned by one canvas.
pub struct NetworkScene {
	config: NetworkConfig,
	item_count: usize,
	seed: u64,
	layout: LayoutCache,
	graph: Option<(GraphKey, ConnectionGraph)>,
	interaction: InteractionState,
	scales: Vec<f32>,
	user_yaw: f32,
	user_pitch: f32,
}

impl NetworkScene {
	/// Builds a scene for `item_count` content records. Pulse selection is
	/// seeded from `seed`.
	pub fn new(config: NetworkConfig, item_count: usize, seed: u64) -> SceneResult<Self> {
		config.validate()?;
		let mut scene = Self {
			config,
			item_count,
			seed,
			layout: LayoutCache::new(),
			graph: None,
			interaction: InteractionState::default(),
			scales: Vec::new(),
			user_yaw: 0.0,
			user_pitch: 0.0,
		};
		scene.sync_len();
		Ok(scene)
	}

	/// Settings in effect, including any [`resize`](Self::resize).
	pub fn config(&self) -> &NetworkConfig {
		&self.config
	}

	/// Camera the frame is meant to be viewed through.
	pub fn camera(&self) -> Camera {
		Camera::new(self.config.camera_position, self.config.camera_fov_deg)
	}

	/// Nodes actually shown: none without content, otherwise the configured count.
	pub fn node_count(&self) -> usize {
		if self.item_count == 0 { 0 } else { self.config.node_count }
	}

	/// Follows a change in the number of content records.
	pub fn set_item_count(&mut self, item_count: usize) {
		self.item_count = item_count;
		self.sync_len();
	}

	/// Changes node count or radius; the layout and graph rebuild lazily.
	pub fn resize(&mut self, node_count: usize, radius: f32) {
		self.config.node_count = node_count;
		self.config.radius = radius;
		self.sync_len();
	}

	fn sync_len(&mut self) {
		let len = self.node_count();
		self.interaction.set_len(len);
		self.scales.resize(len, 1.0);
	}

	/// Cached layout with content indices cycling over the records.
	pub fn nodes(&mut self) -> Vec<Node> {
		let items = self.item_count;
		let count = self.node_count();
		self.layout
			.get(count, self.config.radius)
			.iter()
			.map(|node| Node {
				item: node.index % items.max(1),
				..*node
			})
			.collect()
	}

	/// Cached graph; rebuilt from the seed when node count, radius or threshold changed.
	pub fn graph(&mut self) -> &ConnectionGraph {
		let mut rng = StdRng::seed_from_u64(self.seed);
		self.graph_with(&mut rng)
	}

	/// Like [`graph`](Self::graph) but draws pulse randomness from `rng` when a
	/// rebuild is needed.
	pub fn graph_with(&mut self, rng: &mut impl Rng) -> &ConnectionGraph {
		let key = (
			self.node_count(),
			self.config.radius.to_bits(),
			self.config.threshold_distance.to_bits(),
		);
		if self.graph.as_ref().is_none_or(|(k, _)| *k != key) {
			let nodes = self.nodes();
			let graph = build_graph(&nodes, &self.config.graph_params(), rng);
			self.graph = Some((key, graph));
		}
		&self.graph.get_or_insert_with(|| (key, ConnectionGraph::default())).1
	}

	/// Current active node, for presentation.
	pub fn interaction(&self) -> &InteractionState {
		&self.interaction
	}

	/// Pointer moved onto node `index`.
	pub fn pointer_enter(&mut self, index: usize) -> Transition {
		self.interaction.pointer_enter(index)
	}

	/// Pointer moved off node `index`.
	pub fn pointer_leave(&mut self, index: usize) -> Transition {
		self.interaction.pointer_leave(index)
	}

	/// Toggles node `index`.
	pub fn click(&mut self, index: usize) -> Transition {
		self.interaction.click(index)
	}

	/// Deactivates whatever is active.
	pub fn close(&mut self) -> Transition {
		self.interaction.close()
	}

	/// Adds a user drag (in pixels) to the group orientation.
	pub fn drag_rotate(&mut self, dx: f64, dy: f64) {
		let speed = self.config.drag_rotate_speed;
		self.user_yaw += dx as f32 * speed;
		self.user_pitch = (self.user_pitch + dy as f32 * speed)
			.clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
	}

	/// Group orientation: user drag on top of the automatic spin. Falls back to
	/// identity if the time input is unusable.
	pub fn orientation(&self, elapsed: f32) -> Quat {
		let user = Quat::from_euler(EulerRot::YXZ, self.user_yaw, self.user_pitch, 0.0);
		let rotation = user * group_rotation(elapsed, &self.config);
		if rotation.is_finite() {
			rotation
		} else {
			warn!("non-finite group rotation at t={}", elapsed);
			Quat::IDENTITY
		}
	}

	/// Assembles the draw description for one frame. A node or pulse whose
	/// transform fails is logged and left out; the rest of the frame still draws.
	pub fn frame(&mut self, time: FrameTime) -> Frame {
		let nodes = self.nodes();
		self.graph();
		let rotation = self.orientation(time.elapsed);
		let mut frame = Frame::default();

		for node in &nodes {
			let motion = match node_float(node.index, time.elapsed, &self.config) {
				Ok(motion) => motion,
				Err(err) => {
					warn!("skipping node {}: {}", node.index, err);
					continue;
				}
			};
			let active = self.interaction.is_active_index(node.index);
			let target = if active { self.config.active_scale } else { 1.0 };
			let scale = damp(self.scales[node.index], target, self.config.scale_damping, time.delta);
			self.scales[node.index] = scale;

			frame.nodes.push(NodeDraw {
				index: node.index,
				item: node.item,
				position: rotation * (node.position + motion.offset),
				rotation: motion.rotation,
				scale,
				opacity: if active { 1.0 } else { 0.8 },
				active,
				glow: (scale - 1.0) / (self.config.active_scale - 1.0).max(f32::EPSILON),
			});
		}

		let Some((_, graph)) = &self.graph else {
			return frame;
		};
		let base = |i: usize| nodes.get(i).map(|n| n.position).unwrap_or(Vec3::ZERO);

		frame.edges = graph
			.edges
			.iter()
			.map(|edge| EdgeDraw {
				from: rotation * base(edge.a),
				to: rotation * base(edge.b),
			})
			.collect();

		frame.pulses = graph
			.pulses
			.iter()
			.filter_map(|pulse| match pulse_state(pulse, base(pulse.edge.a), base(pulse.edge.b), time.elapsed) {
				Ok(state) => Some(PulseDraw {
					position: rotation * state.position,
					opacity: state.opacity,
				}),
				Err(err) => {
					warn!("skipping pulse: {}", err);
					None
				}
			})
			.collect();

		frame
	}

	/// Drops cached layout and graph and returns to idle.
	pub fn release(&mut self) {
		self.layout.clear();
		self.graph = None;
		self.interaction.reset();
		self.scales.iter_mut().for_each(|s| *s = 1.0);
		debug!("network scene released");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn scene(items: usize) -> NetworkScene {
		NetworkScene::new(NetworkConfig::default(), items, 42).unwrap()
	}

	fn at(elapsed: f32, delta: f32) -> FrameTime {
		FrameTime { elapsed, delta }
	}

	#[test]
	fn items_cycle_over_nodes() {
		let mut scene = scene(12);
		let nodes = scene.nodes();
		assert_eq!(nodes.len(), 25);
		assert_eq!(nodes[12].item, 0);
		assert_eq!(nodes[24].item, 0);
		assert_eq!(nodes[13].item, 1);
	}

	#[test]
	fn empty_content_renders_nothing() {
		let mut scene = scene(0);
		let frame = scene.frame(at(1.0, 0.016));
		assert_eq!(frame, Frame::default());
		assert_eq!(scene.click(0), Transition::Ignored);
	}

	#[test]
	fn graph_is_cached_until_inputs_change() {
		let mut scene = scene(12);
		let first = scene.graph().clone();
		let second = scene.graph().clone();
		assert_eq!(first, second);

		scene.resize(12, 18.0);
		let small = scene.graph().clone();
		assert_eq!(small.edges.len(), 9);
	}

	#[test]
	fn frame_contains_all_elements() {
		let mut scene = scene(12);
		let graph = scene.graph().clone();
		let frame = scene.frame(at(2.0, 0.016));
		assert_eq!(frame.nodes.len(), 25);
		assert_eq!(frame.edges.len(), graph.edges.len());
		assert_eq!(frame.pulses.len(), graph.pulses.len());
		for pulse in &frame.pulses {
			assert!((0.0..=1.0).contains(&pulse.opacity));
		}
	}

	#[test]
	fn group_rotation_preserves_radius_of_edges() {
		let mut scene = scene(12);
		let frame = scene.frame(at(100.0, 0.016));
		for edge in &frame.edges {
			assert!((edge.from.length() - 18.0).abs() < 1e-3);
		}
	}

	#[test]
	fn hovered_node_scales_up_smoothly_and_back() {
		let mut scene = scene(12);
		scene.pointer_enter(3);
		let first = scene.frame(at(0.0, 0.016));
		let hovered = first.nodes.iter().find(|n| n.index == 3).unwrap();
		assert!(hovered.active);
		assert!(hovered.scale > 1.0 && hovered.scale < 1.2);

		for i in 0..100 {
			scene.frame(at(i as f32 * 0.016, 0.016));
		}
		let settled = scene.frame(at(2.0, 0.016));
		assert!((settled.nodes[3].scale - 1.2).abs() < 1e-3);

		scene.pointer_leave(3);
		for i in 0..100 {
			scene.frame(at(2.0 + i as f32 * 0.016, 0.016));
		}
		let idle = scene.frame(at(4.0, 0.016));
		assert!(!idle.nodes[3].active);
		assert!((idle.nodes[3].scale - 1.0).abs() < 1e-3);
	}

	#[test]
	fn non_finite_time_skips_nodes_without_panicking() {
		let mut scene = scene(12);
		let frame = scene.frame(at(f32::NAN, 0.016));
		assert!(frame.nodes.is_empty());
		assert!(frame.pulses.is_empty());
		assert!(frame.edges.iter().all(|e| e.from.is_finite() && e.to.is_finite()));
	}

	#[test]
	fn injected_rng_drives_pulse_selection() {
		let mut scene = scene(12);
		let injected = scene.graph_with(&mut StdRng::seed_from_u64(9)).clone();
		let nodes = scene.nodes();
		let direct = build_graph(&nodes, &scene.config().graph_params(), &mut StdRng::seed_from_u64(9));
		assert_eq!(injected, direct);
	}

	#[test]
	fn click_toggles_and_close_returns_to_idle() {
		let mut scene = scene(12);
		assert_eq!(scene.click(5), Transition::Activated(5));
		assert_eq!(scene.click(5), Transition::Deactivated(5));
		scene.click(6);
		assert_eq!(scene.close(), Transition::Deactivated(6));
		assert_eq!(scene.interaction().active(), None);
	}

	#[test]
	fn release_clears_state() {
		let mut scene = scene(12);
		scene.pointer_enter(2);
		scene.frame(at(0.0, 0.016));
		scene.release();
		assert_eq!(scene.interaction().active(), None);
		assert_eq!(scene.frame(at(0.0, 0.016)).nodes.len(), 25);
	}
}
