use log::debug;

use crate::scene::{AnimationClock, ContentItem, Frame, NetworkConfig, NetworkScene, SceneResult};

/// Pixels a press may travel before it counts as a drag instead of a click.
const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub last_x: f64,
	pub last_y: f64,
	pub travelled: f64,
}

pub struct NetworkState {
	pub scene: NetworkScene,
	pub items: Vec<ContentItem>,
	pub clock: AnimationClock,
	/// Last frame drawn; pointer hit tests run against it.
	pub frame: Frame,
	pub drag: DragState,
	pub hovered: Option<usize>,
	pub width: f64,
	pub height: f64,
}

impl NetworkState {
	pub fn new(items: Vec<ContentItem>, config: NetworkConfig, width: f64, height: f64, seed: u64) -> SceneResult<Self> {
		let scene = NetworkScene::new(config, items.len(), seed)?;
		debug!("network state: {} items, {} nodes", items.len(), scene.node_count());
		Ok(Self {
			scene,
			items,
			clock: AnimationClock::new(),
			frame: Frame::default(),
			drag: DragState::default(),
			hovered: None,
			width,
			height,
		})
	}

	pub fn tick(&mut self, now_ms: f64) {
		let time = self.clock.tick(now_ms);
		self.frame = self.scene.frame(time);
	}

	pub fn node_at_position(&self, x: f64, y: f64) -> Option<usize> {
		let camera = self.scene.camera();
		self.frame
			.pick_disc(&camera, self.width, self.height, x, y, self.scene.config().node_size)
	}

	/// Feeds enter/leave events for a change of the node under the pointer.
	pub fn set_hover(&mut self, node: Option<usize>) {
		if self.hovered == node {
			return;
		}
		if let Some(prev) = self.hovered.take() {
			self.scene.pointer_leave(prev);
		}
		if let Some(idx) = node {
			self.scene.pointer_enter(idx);
		}
		self.hovered = node;
	}

	pub fn begin_drag(&mut self, x: f64, y: f64) {
		self.drag = DragState {
			active: true,
			last_x: x,
			last_y: y,
			travelled: 0.0,
		};
	}

	pub fn drag_to(&mut self, x: f64, y: f64) {
		let (dx, dy) = (x - self.drag.last_x, y - self.drag.last_y);
		self.drag.travelled += (dx * dx + dy * dy).sqrt();
		self.drag.last_x = x;
		self.drag.last_y = y;
		self.scene.drag_rotate(dx, dy);
	}

	/// Ends a drag. Returns true when the press barely moved, i.e. it was a click.
	pub fn end_drag(&mut self) -> bool {
		let was_click = self.drag.active && self.drag.travelled < CLICK_SLOP;
		self.drag.active = false;
		was_click
	}

	/// A click highlights the node under the pointer the same way hovering
	/// does. It never switches off the node the pointer is resting on.
	pub fn click(&mut self, x: f64, y: f64) {
		if let Some(idx) = self.node_at_position(x, y) {
			self.click_node(idx);
		}
	}

	fn click_node(&mut self, idx: usize) {
		self.set_hover(Some(idx));
	}

	pub fn set_items(&mut self, items: Vec<ContentItem>) {
		self.scene.set_item_count(items.len());
		self.items = items;
		if self.hovered.is_some_and(|i| i >= self.scene.node_count()) {
			self.hovered = None;
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn item(&self, item: usize) -> Option<&ContentItem> {
		self.items.get(item)
	}
}

impl Drop for NetworkState {
	fn drop(&mut self) {
		self.scene.release();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn state() -> NetworkState {
		let items = (0..12)
			.map(|i| ContentItem::new(&format!("t{i}"), &format!("Tech {i}"), "language"))
			.collect();
		NetworkState::new(items, NetworkConfig::default(), 800.0, 600.0, 1).unwrap()
	}

	fn active(state: &NetworkState) -> Option<usize> {
		state.scene.interaction().active()
	}

	#[test]
	fn click_on_hovered_node_keeps_it_highlighted() {
		let mut state = state();
		state.set_hover(Some(3));
		assert_eq!(active(&state), Some(3));

		state.click_node(3);
		assert_eq!(active(&state), Some(3));
		state.set_hover(Some(3));
		assert_eq!(active(&state), Some(3));

		state.set_hover(None);
		assert_eq!(active(&state), None);
	}

	#[test]
	fn click_without_hover_activates_and_leave_clears() {
		let mut state = state();
		state.click_node(5);
		assert_eq!(active(&state), Some(5));
		state.click_node(7);
		assert_eq!(active(&state), Some(7));
		state.set_hover(None);
		assert_eq!(active(&state), None);
	}

	#[test]
	fn resize_updates_hit_test_viewport() {
		let mut state = state();
		state.resize(1024.0, 300.0);
		assert_eq!((state.width, state.height), (1024.0, 300.0));
	}

	#[test]
	fn quick_press_is_a_click_long_drag_is_not() {
		let mut state = state();
		state.begin_drag(10.0, 10.0);
		state.drag_to(11.0, 11.0);
		assert!(state.end_drag());

		state.begin_drag(10.0, 10.0);
		state.drag_to(60.0, 10.0);
		assert!(!state.end_drag());
	}
}
