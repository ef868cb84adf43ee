use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::NetworkState;
use crate::scene::NodeDraw;

const ACCENT: (u8, u8, u8) = (145, 94, 255);

fn rgba((r, g, b): (u8, u8, u8), a: f64) -> String {
	format!("rgba({}, {}, {}, {})", r, g, b, a)
}

pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.clear_rect(0.0, 0.0, state.width, state.height);
	draw_edges(state, ctx);
	draw_pulses(state, ctx);
	draw_nodes(state, ctx);
}

fn draw_edges(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let camera = state.scene.camera();
	ctx.set_stroke_style_str(&rgba(ACCENT, 0.15));
	ctx.set_line_width(1.0);
	ctx.begin_path();
	for edge in &state.frame.edges {
		let (Some(a), Some(b)) = (
			camera.project(edge.from, state.width, state.height),
			camera.project(edge.to, state.width, state.height),
		) else {
			continue;
		};
		ctx.move_to(a.x, a.y);
		ctx.line_to(b.x, b.y);
	}
	ctx.stroke();
}

fn draw_pulses(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let camera = state.scene.camera();
	let size = state.scene.config().pulse_size as f64;
	for pulse in &state.frame.pulses {
		let Some(p) = camera.project(pulse.position, state.width, state.height) else {
			continue;
		};
		ctx.set_fill_style_str(&rgba(ACCENT, pulse.opacity as f64));
		ctx.begin_path();
		let _ = ctx.arc(p.x, p.y, (size * p.scale).max(1.0), 0.0, 2.0 * PI);
		ctx.fill();
	}
}

fn draw_nodes(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let camera = state.scene.camera();
	let size = state.scene.config().node_size as f64;

	// Painter's order: farthest first.
	let mut nodes: Vec<(&NodeDraw, _)> = state
		.frame
		.nodes
		.iter()
		.filter_map(|n| Some((n, camera.project(n.position, state.width, state.height)?)))
		.collect();
	nodes.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

	for (node, p) in nodes {
		let radius = size * node.scale as f64 * p.scale;
		let glow = node.glow.clamp(0.0, 1.0) as f64;

		if glow > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(p.x, p.y, radius * 0.3, p.x, p.y, radius * 2.2) {
				let _ = gradient.add_color_stop(0.0, &rgba(ACCENT, 0.45 * glow));
				let _ = gradient.add_color_stop(1.0, &rgba(ACCENT, 0.0));
				ctx.begin_path();
				let _ = ctx.arc(p.x, p.y, radius * 2.2, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		// Icosahedron silhouette: a hexagon, tilted by the node's jitter.
		let spin = (node.rotation.x + node.rotation.y) as f64;
		ctx.begin_path();
		for k in 0..6 {
			let a = spin + k as f64 * PI / 3.0;
			let (x, y) = (p.x + radius * a.cos(), p.y + radius * a.sin());
			if k == 0 {
				ctx.move_to(x, y);
			} else {
				ctx.line_to(x, y);
			}
		}
		ctx.close_path();
		let fill = if node.active {
			rgba(ACCENT, 0.35)
		} else {
			rgba((255, 255, 255), 0.08)
		};
		ctx.set_fill_style_str(&fill);
		ctx.fill();
		ctx.set_stroke_style_str(&rgba((255, 255, 255), 0.4 + 0.4 * glow));
		ctx.set_line_width(1.0);
		ctx.stroke();

		if let Some(item) = state.item(node.item) {
			let alpha = node.opacity as f64;
			ctx.set_text_align("center");
			ctx.set_font(&format!("bold {}px sans-serif", (0.55 * radius).clamp(9.0, 18.0)));
			if node.active {
				ctx.set_fill_style_str(&rgba(ACCENT, alpha));
			} else {
				ctx.set_fill_style_str(&rgba((255, 255, 255), 0.7 * alpha));
			}
			let _ = ctx.fill_text(&item.display_name, p.x, p.y + radius + 14.0);
			if node.active {
				ctx.set_font("11px sans-serif");
				ctx.set_fill_style_str(&rgba((255, 255, 255), 0.6));
				let _ = ctx.fill_text(&item.category_tag, p.x, p.y + radius + 28.0);
			}
		}
	}
}
