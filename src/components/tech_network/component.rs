use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::NetworkState;
use crate::components::canvas::{FrameLoop, LoopHandle, ResizeListener, context_2d, fit_canvas, pointer_position};
use crate::scene::{ContentItem, NetworkConfig};

/// Rotating sphere of technology nodes joined by pulsing connections.
/// Hover a node to highlight it, drag to turn the sphere.
#[component]
pub fn TechNetworkCanvas(
	#[prop(into)] data: Signal<Vec<ContentItem>>,
	#[prop(optional)] config: NetworkConfig,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<NetworkState>>> = Rc::new(RefCell::new(None));
	let frame_loop: Rc<RefCell<Option<FrameLoop>>> = Rc::new(RefCell::new(None));
	let resize_listener: Rc<RefCell<Option<ResizeListener>>> = Rc::new(RefCell::new(None));
	let handle = LoopHandle::new();
	let (state_init, loop_init, resize_init, handle_init) =
		(state.clone(), frame_loop, resize_listener, handle.clone());

	Effect::new(move |_| {
		let items = data.get();
		if let Some(ref mut s) = *state_init.borrow_mut() {
			s.set_items(items);
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let (w, h) = fit_canvas(&canvas, width, height);
		let ctx = match context_2d(&canvas) {
			Ok(ctx) => ctx,
			Err(err) => {
				warn!("tech network disabled: {}", err);
				return;
			}
		};
		match NetworkState::new(items, config.clone(), w, h, js_sys::Date::now() as u64) {
			Ok(s) => *state_init.borrow_mut() = Some(s),
			Err(err) => {
				warn!("tech network disabled: {}", err);
				return;
			}
		}

		let (state_resize, canvas_resize, handle_resize) = (state_init.clone(), canvas.clone(), handle_init.clone());
		match ResizeListener::attach(move || {
			if handle_resize.is_stopped() {
				return;
			}
			let (w, h) = fit_canvas(&canvas_resize, width, height);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(w, h);
			}
		}) {
			Ok(listener) => *resize_init.borrow_mut() = Some(listener),
			Err(err) => warn!("tech network will not follow resizes: {}", err),
		}

		let state_anim = state_init.clone();
		let started = FrameLoop::start(handle_init.clone(), move |now| {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				s.tick(now);
				render::render(s, &ctx);
			}
		});
		match started {
			Ok(running) => *loop_init.borrow_mut() = Some(running),
			Err(err) => warn!("tech network animation not started: {}", err),
		}
	});

	on_cleanup(move || handle.stop());

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.begin_drag(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				s.drag_to(x, y);
			} else {
				let hovered = s.node_at_position(x, y);
				s.set_hover(hovered);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.end_drag() {
				s.click(x, y);
			}
		}
	};

	let state_ml = state;
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.end_drag();
			s.set_hover(None);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="tech-network-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			style="display: block; width: 100%; height: 100%; cursor: grab;"
		/>
	}
}
