use log::{debug, warn};

use crate::scene::{AnimationClock, ContentItem, Frame, SceneResult, ShowcaseConfig, ShowcaseScene, Transition};

pub struct ShowcaseState {
	pub scene: ShowcaseScene,
	pub items: Vec<ContentItem>,
	pub clock: AnimationClock,
	/// Last frame drawn; clicks hit-test against it.
	pub frame: Frame,
	pub width: f64,
	pub height: f64,
}

impl ShowcaseState {
	pub fn new(items: Vec<ContentItem>, config: ShowcaseConfig, width: f64, height: f64) -> SceneResult<Self> {
		let scene = ShowcaseScene::new(config, items.len())?;
		debug!("showcase state: {} panels", items.len());
		Ok(Self {
			scene,
			items,
			clock: AnimationClock::new(),
			frame: Frame::default(),
			width,
			height,
		})
	}

	pub fn tick(&mut self, now_ms: f64) {
		let time = self.clock.tick(now_ms);
		self.frame = self.scene.frame(time);
	}

	pub fn panel_at_position(&self, x: f64, y: f64) -> Option<usize> {
		let config = self.scene.config();
		self.frame.pick_rect(
			&self.scene.camera(),
			self.width,
			self.height,
			x,
			y,
			config.panel_width / 2.0,
			config.panel_height / 2.0,
		)
	}

	/// Toggles the panel under the pointer, if any.
	pub fn click(&mut self, x: f64, y: f64) -> Transition {
		match self.panel_at_position(x, y) {
			Some(idx) => self.scene.click(idx),
			None => Transition::Ignored,
		}
	}

	pub fn close(&mut self) -> Transition {
		self.scene.close()
	}

	pub fn active(&self) -> Option<usize> {
		self.scene.interaction().active()
	}

	/// A different number of records rebuilds the row; same count keeps scroll and state.
	pub fn set_items(&mut self, items: Vec<ContentItem>) {
		if items.len() != self.scene.len() {
			match ShowcaseScene::new(self.scene.config().clone(), items.len()) {
				Ok(scene) => self.scene = scene,
				Err(err) => warn!("showcase not rebuilt: {}", err),
			}
		}
		self.items = items;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn item(&self, item: usize) -> Option<&ContentItem> {
		self.items.get(item)
	}
}

impl Drop for ShowcaseState {
	fn drop(&mut self) {
		self.scene.release();
	}
}
