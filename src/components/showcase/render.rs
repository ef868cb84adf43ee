use web_sys::CanvasRenderingContext2d;

use super::state::ShowcaseState;
use crate::scene::NodeDraw;

const BACKGROUND: &str = "#030014";

fn rounded_rect(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
	let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
	ctx.begin_path();
	ctx.move_to(x + r, y);
	let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
	let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
	let _ = ctx.arc_to(x, y + h, x, y, r);
	let _ = ctx.arc_to(x, y, x + w, y, r);
	ctx.close_path();
}

pub fn render(state: &ShowcaseState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);

	let camera = state.scene.camera();
	let mut panels: Vec<(&NodeDraw, _)> = state
		.frame
		.nodes
		.iter()
		.filter_map(|n| Some((n, camera.project(n.position, state.width, state.height)?)))
		.collect();
	panels.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));

	for (panel, p) in panels {
		ctx.save();
		let _ = ctx.translate(p.x, p.y);
		let _ = ctx.rotate(-panel.rotation.z as f64);
		draw_panel(state, ctx, panel, p.scale);
		ctx.restore();
	}
}

fn draw_panel(state: &ShowcaseState, ctx: &CanvasRenderingContext2d, panel: &NodeDraw, px: f64) {
	let config = state.scene.config();
	let unit = px * panel.scale as f64;
	let turn = (panel.rotation.y as f64).cos().abs();
	let (w, h) = (config.panel_width as f64 * unit * turn, config.panel_height as f64 * unit);

	// Antennas
	ctx.set_stroke_style_str("#888");
	ctx.set_line_width((0.05 * unit).max(1.0));
	ctx.begin_path();
	ctx.move_to(0.0, -h / 2.0);
	ctx.line_to(-0.9 * unit * turn, -h / 2.0 - 1.6 * unit);
	ctx.move_to(0.0, -h / 2.0);
	ctx.line_to(0.9 * unit * turn, -h / 2.0 - 1.6 * unit);
	ctx.stroke();

	rounded_rect(ctx, -w / 2.0, -h / 2.0, w, h, 0.2 * unit);
	ctx.set_fill_style_str("#2a2a2a");
	ctx.fill();

	let (sw, sh) = (w * 4.2 / 4.5, h * 2.8 / 3.2);
	ctx.set_fill_style_str("#111");
	ctx.fill_rect(-sw / 2.0, -sh / 2.0, sw, sh);

	if panel.glow > 0.0 {
		ctx.set_fill_style_str(&format!("rgba(124, 58, 237, {})", panel.glow));
		ctx.fill_rect(-sw / 2.0, -sh / 2.0, sw, sh);
	}

	let Some(item) = state.item(panel.item) else {
		return;
	};
	ctx.set_text_align("center");
	ctx.set_fill_style_str("white");
	ctx.set_font(&format!("900 {}px sans-serif", (0.32 * unit).max(8.0)));
	let _ = ctx.fill_text_with_max_width(&item.display_name.to_uppercase(), 0.0, -0.1 * unit, sw * 0.9);
	if !panel.active {
		ctx.set_fill_style_str("rgba(139, 92, 246, 1)");
		ctx.set_font(&format!("bold {}px sans-serif", (0.18 * unit).max(7.0)));
		let _ = ctx.fill_text("CLICK TO OPEN", 0.0, 0.45 * unit);
	}
}
