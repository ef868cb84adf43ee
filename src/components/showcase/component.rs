use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use web_sys::{HtmlCanvasElement, MouseEvent};

use super::render;
use super::state::ShowcaseState;
use crate::components::canvas::{FrameLoop, LoopHandle, ResizeListener, context_2d, fit_canvas, pointer_position};
use crate::scene::{ContentItem, ShowcaseConfig};

/// Endless row of project panels. Clicking one stops the row, enlarges the
/// panel and opens an overlay with its details; closing resumes scrolling.
#[component]
pub fn ShowcaseCanvas(
	#[prop(into)] data: Signal<Vec<ContentItem>>,
	#[prop(optional)] config: ShowcaseConfig,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<ShowcaseState>>> = Rc::new(RefCell::new(None));
	let (active, set_active) = signal(None::<usize>);
	let handle = LoopHandle::new();
	let (state_init, loop_init, resize_init, handle_init) = (
		state.clone(),
		Rc::new(RefCell::new(None::<FrameLoop>)),
		Rc::new(RefCell::new(None::<ResizeListener>)),
		handle.clone(),
	);

	Effect::new(move |_| {
		let items = data.get();
		if let Some(ref mut s) = *state_init.borrow_mut() {
			s.set_items(items);
			set_active.set(s.active());
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
				warn!("showcase disabled: {}", err);
				return;
			}
		};
		match ShowcaseState::new(items, config.clone(), w, h) {
			Ok(s) => *state_init.borrow_mut() = Some(s),
			Err(err) => {
				warn!("showcase disabled: {}", err);
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
			Err(err) => warn!("showcase will not follow resizes: {}", err),
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
			Err(err) => warn!("showcase animation not started: {}", err),
		}
	});

	on_cleanup(move || handle.stop());

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let (x, y) = pointer_position(&canvas, &ev);
		if let Some(ref mut s) = *state_click.borrow_mut() {
			s.click(x, y);
			set_active.set(s.active());
		}
	};

	let state_close = state;
	let on_close = move |ev: MouseEvent| {
		ev.stop_propagation();
		if let Some(ref mut s) = *state_close.borrow_mut() {
			s.close();
		}
		set_active.set(None);
	};

	let item = move || active.get().and_then(|i| data.with(|items| items.get(i).cloned()));

	view! {
		<div class="showcase" style="position: relative; width: 100%; height: 100%;">
			<canvas
				node_ref=canvas_ref
				class="showcase-canvas"
				on:click=on_click
				style="display: block; width: 100%; height: 100%; cursor: pointer;"
			/>
			<div
				class="showcase-overlay"
				style:display=move || if active.get().is_some() { "flex" } else { "none" }
			>
				<button class="showcase-close" on:click=on_close>
					"✕"
				</button>
				<h3>{move || item().map(|i| i.display_name).unwrap_or_default()}</h3>
				<p>{move || item().and_then(|i| i.summary).unwrap_or_default()}</p>
				<div class="showcase-links">
					{move || {
						item()
							.map(|i| {
								i.links
									.into_iter()
									.map(|link| {
										view! {
											<a href=link.href target="_blank" rel="noopener noreferrer">
												{link.label}
											</a>
										}
									})
									.collect_view()
							})
					}}
				</div>
				<div class="showcase-tags">
					{move || {
						item()
							.map(|i| {
								i.tags
									.into_iter()
									.map(|tag| view! { <span class="tag">{format!("#{}", tag)}</span> })
									.collect_view()
							})
					}}
				</div>
			</div>
		</div>
	}
}
