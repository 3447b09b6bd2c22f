use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{ForceGraphState, NODE_RADIUS, ease_out_cubic};
use crate::explorer::{LinkStyle, NodeId};

/// Scale above which every node is labelled, not just highlighted ones.
const LABEL_SCALE: f64 = 1.5;
const SELECTED_COLOR: &str = "#ffd166";

pub fn render(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str("#1a1a2e");
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let (line_width, dash, gap, arrow_size) = (1.5 / k, 8.0 / k, 4.0 / k, 8.0 / k);
	let dash_offset = -(state.flow_time * 30.0) % (dash + gap);
	let t = ease_out_cubic(state.hover.highlight_t);
	let selecting = state.has_selection();

	for (i, &(src, tgt)) in state.edges.iter().enumerate() {
		let ((x1, y1), (x2, y2)) = (state.positions[src.index()], state.positions[tgt.index()]);
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}

		let hovered = state.is_highlighted(src) && state.is_highlighted(tgt);
		let style = state.link_styles[i];

		// Hover eases highlighted edges up and the rest down; a selection
		// dims every link it does not touch.
		let (mut edge_alpha, mut arrow_alpha, mut width) = if hovered {
			(0.6 + 0.3 * t, 0.8 + 0.1 * t, line_width * (1.0 + 0.3 * t))
		} else {
			(0.6 - 0.45 * t, 0.8 - 0.45 * t, line_width * (1.0 - 0.3 * t))
		};
		if selecting && style.is_none() && !hovered {
			(edge_alpha, arrow_alpha) = (edge_alpha * 0.35, arrow_alpha * 0.35);
		}
		let rgb = match style {
			Some(LinkStyle::Outgoing) => {
				(edge_alpha, arrow_alpha, width) = (0.95, 1.0, line_width * 1.8);
				"255, 209, 102"
			}
			_ => "100, 180, 255",
		};

		ctx.set_stroke_style_str(&format!("rgba({}, {})", rgb, edge_alpha));
		ctx.set_line_width(width);
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(dash),
			&JsValue::from_f64(gap),
		));
		ctx.set_line_dash_offset(dash_offset);

		let (ux, uy) = (dx / dist, dy / dist);
		ctx.begin_path();
		ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
		ctx.line_to(
			x2 - ux * (NODE_RADIUS + arrow_size),
			y2 - uy * (NODE_RADIUS + arrow_size),
		);
		ctx.stroke();

		let _ = ctx.set_line_dash(&js_sys::Array::new());
		ctx.set_fill_style_str(&format!("rgba({}, {})", rgb, arrow_alpha));
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn is_emphasised(state: &ForceGraphState, id: NodeId, has_hover: bool) -> bool {
	state.is_selected(id) || (has_hover && state.is_highlighted(id))
}

fn draw_label(ctx: &CanvasRenderingContext2d, label: &str, x: f64, y: f64, radius: f64, k: f64) {
	ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));
	let _ = ctx.fill_text(label, x + radius + 3.0, y + 3.0);
}

fn draw_nodes(state: &ForceGraphState, ctx: &CanvasRenderingContext2d) {
	let (has_hover, t, k) = (
		state.has_active_highlight(),
		ease_out_cubic(state.hover.highlight_t),
		state.transform.k,
	);
	let selecting = state.has_selection();

	state.graph.visit_nodes(|node| {
		let id = node.data.user_data.id;
		if is_emphasised(state, id, has_hover) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let (mut alpha, radius) = (1.0 - 0.7 * t, NODE_RADIUS * (1.0 - 0.15 * t));
		if selecting {
			alpha *= 0.5;
		}

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.data.user_data.color);
		ctx.fill();
		ctx.set_global_alpha(1.0);

		if k >= LABEL_SCALE {
			ctx.set_fill_style_str(&format!("rgba(255, 255, 255, {})", alpha * 0.8));
			draw_label(ctx, &node.data.user_data.label, x, y, radius, k);
		}
	});

	if !has_hover && !selecting {
		return;
	}

	state.graph.visit_nodes(|node| {
		let id = node.data.user_data.id;
		if !is_emphasised(state, id, has_hover) {
			return;
		}
		let (x, y) = (node.x() as f64, node.y() as f64);
		let is_hovered = state.is_hovered(id);
		let is_selected = state.is_selected(id);
		let is_neighbor =
			state.hover.neighbors.contains(&id) || state.hover.prev_neighbors.contains(&id);

		let (radius, glow_radius, glow_alpha) = if is_hovered {
			(
				NODE_RADIUS * (1.0 + 0.35 * t),
				NODE_RADIUS * (1.8 + 1.2 * t),
				0.35 * t,
			)
		} else if is_selected {
			(NODE_RADIUS * 1.3, NODE_RADIUS * 2.6, 0.35)
		} else if is_neighbor {
			(
				NODE_RADIUS * (1.0 + 0.2 * t),
				NODE_RADIUS * (1.4 + 0.6 * t),
				0.2 * t,
			)
		} else {
			(NODE_RADIUS, 0.0, 0.0)
		};

		if glow_radius > 0.0 && glow_alpha > 0.01 {
			if let Ok(gradient) = ctx.create_radial_gradient(x, y, radius * 0.3, x, y, glow_radius) {
				let _ = gradient.add_color_stop(0.0, &format!("rgba(255, 255, 255, {})", glow_alpha));
				let _ = gradient.add_color_stop(
					0.6,
					&format!("rgba(200, 220, 255, {})", glow_alpha * 0.3),
				);
				let _ = gradient.add_color_stop(1.0, "rgba(255, 255, 255, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, glow_radius, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(node.data.user_data.color);
		ctx.fill();

		if is_selected || (is_hovered && t > 0.01) {
			ctx.begin_path();
			let _ = ctx.arc(x, y, radius + 2.0 / k, 0.0, 2.0 * PI);
			if is_selected {
				ctx.set_stroke_style_str(SELECTED_COLOR);
			} else {
				ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", 0.7 * t));
			}
			ctx.set_line_width(1.5 / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		draw_label(ctx, &node.data.user_data.label, x, y, radius, k);
	});
}
