//! Browser plumbing shared by the canvas components: sizing and resize
//! tracking, 2D context, pointer coordinates and a cancellable
//! `requestAnimationFrame` loop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use crate::scene::{SceneError, SceneResult};

fn window() -> SceneResult<Window> {
	web_sys::window().ok_or_else(|| SceneError::Canvas("no window".into()))
}

/// Size the canvas from explicit dimensions, falling back to its parent's.
pub fn fit_canvas(canvas: &HtmlCanvasElement, width: Option<f64>, height: Option<f64>) -> (f64, f64) {
	let parent = canvas.parent_element();
	let w = width.unwrap_or_else(|| parent.as_ref().map(|p| p.client_width() as f64).unwrap_or(800.0));
	let h = height.unwrap_or_else(|| parent.as_ref().map(|p| p.client_height() as f64).unwrap_or(600.0));
	canvas.set_width(w as u32);
	canvas.set_height(h as u32);
	(w, h)
}

/// Window `resize` subscription; the listener is removed on drop.
pub struct ResizeListener {
	callback: Closure<dyn FnMut()>,
}

impl ResizeListener {
	pub fn attach(on_resize: impl FnMut() + 'static) -> SceneResult<Self> {
		let callback = Closure::<dyn FnMut()>::new(on_resize);
		window()?
			.add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
			.map_err(|e| SceneError::Canvas(format!("resize listener failed: {:?}", e)))?;
		Ok(Self { callback })
	}
}

impl Drop for ResizeListener {
	fn drop(&mut self) {
		if let Ok(window) = window() {
			let _ = window.remove_event_listener_with_callback("resize", self.callback.as_ref().unchecked_ref());
		}
	}
}

pub fn context_2d(canvas: &HtmlCanvasElement) -> SceneResult<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.map_err(|e| SceneError::Canvas(format!("{:?}", e)))?
		.ok_or_else(|| SceneError::Canvas("2d context unavailable".into()))?
		.dyn_into()
		.map_err(|_| SceneError::Canvas("context is not 2d".into()))
}

/// Pointer position relative to the canvas' top-left corner.
pub fn pointer_position(canvas: &HtmlCanvasElement, ev: &MouseEvent) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}

/// Stop switch for a [`FrameLoop`]. `Send + Sync`, so it can be handed to
/// `on_cleanup`.
#[derive(Clone, Debug, Default)]
pub struct LoopHandle {
	stopped: Arc<AtomicBool>,
	pending: Arc<AtomicI32>,
}

impl LoopHandle {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_stopped(&self) -> bool {
		self.stopped.load(Ordering::Relaxed)
	}

	/// Stops rescheduling and cancels the frame already requested.
	pub fn stop(&self) {
		if self.stopped.swap(true, Ordering::Relaxed) {
			return;
		}
		if let Ok(window) = window() {
			let _ = window.cancel_animation_frame(self.pending.load(Ordering::Relaxed));
		}
		debug!("frame loop stopped");
	}
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Runs `tick(timestamp_ms)` once per animation frame until stopped or dropped.
pub struct FrameLoop {
	_callback: FrameCallback,
	handle: LoopHandle,
}

impl FrameLoop {
	pub fn start(handle: LoopHandle, mut tick: impl FnMut(f64) + 'static) -> SceneResult<Self> {
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let (weak, handle_inner) = (Rc::downgrade(&callback), handle.clone());

		*callback.borrow_mut() = Some(Closure::new(move |now: f64| {
			if handle_inner.is_stopped() {
				return;
			}
			tick(now);
			if let Err(err) = request_frame(&weak, &handle_inner) {
				warn!("animation stopped: {}", err);
			}
		}));
		request_frame(&Rc::downgrade(&callback), &handle)?;

		Ok(Self {
			_callback: callback,
			handle,
		})
	}
}

fn request_frame(callback: &Weak<RefCell<Option<Closure<dyn FnMut(f64)>>>>, handle: &LoopHandle) -> SceneResult<()> {
	let Some(callback) = callback.upgrade() else {
		return Ok(());
	};
	let callback = callback.borrow();
	let Some(cb) = callback.as_ref() else {
		return Ok(());
	};
	let id = window()?
		.request_animation_frame(cb.as_ref().unchecked_ref())
		.map_err(|e| SceneError::Canvas(format!("requestAnimationFrame failed: {:?}", e)))?;
	handle.pending.store(id, Ordering::Relaxed);
	Ok(())
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.handle.stop();
	}
}
