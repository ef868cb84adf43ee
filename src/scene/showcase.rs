//! The auto-scrolling row of project panels. Clicking a panel expands it; the
//! row stops scrolling while any panel is expanded.

use glam::Vec3;
use log::{debug, warn};

use super::camera::Camera;
use super::clock::FrameTime;
use super::config::ShowcaseConfig;
use super::error::SceneResult;
use super::frame::{Frame, NodeDraw};
use super::interaction::{InteractionState, Transition};
use super::layout::ring_layout;
use super::motion::{RingScroll, damp, facing_yaw, panel_float, screen_glow};
use super::types::Node;

/// Smoothed per-panel presentation values, driven toward targets each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PanelPose {
	scale: f32,
	yaw: f32,
}

impl Default for PanelPose {
	fn default() -> Self {
		Self { scale: 1.0, yaw: 0.0 }
	}
}

/// Scroll, interaction and smoothed panel poses for the project showcase.
pub struct ShowcaseScene {
	config: ShowcaseConfig,
	slots: Vec<Node>,
	ring: RingScroll,
	interaction: InteractionState,
	poses: Vec<PanelPose>,
}

impl ShowcaseScene {
	/// One panel per content record, parked at the start offset.
	pub fn new(config: ShowcaseConfig, item_count: usize) -> SceneResult<Self> {
		config.validate()?;
		Ok(Self {
			slots: ring_layout(item_count, config.spacing),
			ring: RingScroll::new(item_count, &config),
			interaction: InteractionState::new(item_count),
			poses: vec![PanelPose::default(); item_count],
			config,
		})
	}

	/// Settings in effect.
	pub fn config(&self) -> &ShowcaseConfig {
		&self.config
	}

	/// Camera the frame is meant to be viewed through.
	pub fn camera(&self) -> Camera {
		Camera::new(self.config.camera_position, self.config.camera_fov_deg)
	}

	/// Number of panels.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// True without any panels.
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Current X offset of the whole row.
	pub fn offset(&self) -> f32 {
		self.ring.offset()
	}

	/// True while the row is auto-scrolling.
	pub fn autoplay(&self) -> bool {
		!self.interaction.is_active()
	}

	/// Current expanded panel, for the overlay.
	pub fn interaction(&self) -> &InteractionState {
		&self.interaction
	}

	/// Expands panel `index`, or collapses it if already expanded.
	pub fn click(&mut self, index: usize) -> Transition {
		self.interaction.click(index)
	}

	/// Hover event, same toggle table as [`click`](Self::click).
	pub fn hover(&mut self, index: usize) -> Transition {
		self.interaction.hover(index)
	}

	/// Collapses the expanded panel, if any.
	pub fn close(&mut self) -> Transition {
		self.interaction.close()
	}

	/// Advances the scroll (unless a panel is expanded) and assembles the frame.
	pub fn frame(&mut self, time: FrameTime) -> Frame {
		self.ring.advance(time.delta, self.interaction.is_active());
		let offset = self.ring.offset();
		let viewer = self.config.camera_position;
		let mut frame = Frame::default();

		for slot in &self.slots {
			let active = self.interaction.is_active_index(slot.index);
			let motion = match panel_float(slot.index, time.elapsed, active, &self.config) {
				Ok(motion) => motion,
				Err(err) => {
					warn!("skipping panel {}: {}", slot.index, err);
					continue;
				}
			};
			let position = slot.position + Vec3::new(offset, 0.0, 0.0) + motion.offset;

			let (target_scale, target_yaw) = if active {
				(self.config.active_scale, facing_yaw(viewer, position))
			} else {
				(1.0, 0.0)
			};
			let pose = &mut self.poses[slot.index];
			pose.scale = damp(pose.scale, target_scale, self.config.damping, time.delta);
			pose.yaw = damp(pose.yaw, target_yaw, self.config.damping, time.delta);

			frame.nodes.push(NodeDraw {
				index: slot.index,
				item: slot.item,
				position,
				rotation: motion.rotation + Vec3::new(0.0, pose.yaw, 0.0),
				scale: pose.scale,
				opacity: 1.0,
				active,
				glow: if active { screen_glow(time.elapsed, &self.config) } else { 0.0 },
			});
		}
		frame
	}

	/// Returns to idle, rewinds the scroll and resets every panel pose.
	pub fn release(&mut self) {
		self.interaction.reset();
		self.ring.restart();
		self.poses.iter_mut().for_each(|p| *p = PanelPose::default());
		debug!("showcase scene released");
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn at(elapsed: f32, delta: f32) -> FrameTime {
		FrameTime { elapsed, delta }
	}

	fn three_panels() -> ShowcaseScene {
		let config = ShowcaseConfig {
			spacing: 8.0,
			start_offset: 8.0,
			scroll_speed: 1.0,
			..ShowcaseConfig::default()
		};
		ShowcaseScene::new(config, 3).unwrap()
	}

	/// Advances in 0.1s frames (the clock's delta cap).
	fn run(scene: &mut ShowcaseScene, seconds: f32) {
		let steps = (seconds / 0.1).round() as usize;
		for i in 0..steps {
			scene.frame(at(i as f32 * 0.1, 0.1));
		}
	}

	#[test]
	fn scroll_wraps_once_past_far_bound() {
		let mut scene = three_panels();
		run(&mut scene, 26.0);
		assert!((scene.offset() - 6.0).abs() < 1e-2, "offset {}", scene.offset());
	}

	#[test]
	fn expanded_panel_pauses_scroll() {
		let mut scene = three_panels();
		run(&mut scene, 1.0);
		let before = scene.offset();
		scene.click(1);
		assert!(!scene.autoplay());
		run(&mut scene, 5.0);
		assert_eq!(scene.offset(), before);
	}

	#[test]
	fn clicking_active_panel_closes_and_resumes_next_frame() {
		let mut scene = three_panels();
		scene.click(2);
		run(&mut scene, 1.0);
		let paused_at = scene.offset();
		assert_eq!(scene.click(2), Transition::Deactivated(2));
		assert_eq!(scene.interaction().active(), None);
		scene.frame(at(1.1, 0.1));
		assert!(scene.offset() < paused_at);
	}

	#[test]
	fn active_panel_grows_and_turns_toward_viewer() {
		let mut scene = three_panels();
		scene.click(2);
		let mut frame = Frame::default();
		for i in 0..60 {
			frame = scene.frame(at(i as f32 * 0.05, 0.05));
		}
		let panel = frame.nodes[2];
		assert!(panel.active);
		assert!((panel.scale - 1.2).abs() < 1e-3);
		let expected = facing_yaw(scene.config().camera_position, panel.position);
		assert!(expected < 0.0);
		assert!((panel.rotation.y - expected).abs() < 1e-3);
		assert!(panel.glow > 0.0);

		scene.close();
		for i in 0..60 {
			frame = scene.frame(at(3.0 + i as f32 * 0.05, 0.05));
		}
		let idle = frame.nodes[2];
		assert!(!idle.active);
		assert!((idle.scale - 1.0).abs() < 1e-3);
		// Only the idle sway remains, at most float_rotation_intensity / 8.
		assert!(idle.rotation.y.abs() < 0.03, "yaw {}", idle.rotation.y);
	}

	#[test]
	fn non_finite_time_skips_panels_without_panicking() {
		let mut scene = three_panels();
		scene.click(1);
		let frame = scene.frame(at(f32::NAN, 0.1));
		assert!(frame.nodes.is_empty());

		let frame = scene.frame(at(1.0, 0.1));
		assert_eq!(frame.nodes.len(), 3);
		assert!(frame.nodes.iter().all(|n| n.position.is_finite() && n.scale.is_finite()));
	}

	#[test]
	fn switching_panels_never_observes_idle() {
		let mut scene = three_panels();
		scene.hover(0);
		assert_eq!(scene.hover(1), Transition::Replaced { from: 0, to: 1 });
		assert!(!scene.autoplay());
	}

	#[test]
	fn empty_showcase_is_inert() {
		let mut scene = ShowcaseScene::new(ShowcaseConfig::default(), 0).unwrap();
		assert!(scene.is_empty());
		assert_eq!(scene.frame(at(1.0, 0.1)), Frame::default());
		assert_eq!(scene.click(0), Transition::Ignored);
	}

	#[test]
	fn release_rewinds() {
		let mut scene = three_panels();
		run(&mut scene, 2.0);
		scene.click(0);
		scene.release();
		assert!(scene.autoplay());
		assert_eq!(scene.offset(), 8.0);
	}
}
