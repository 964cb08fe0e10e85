use web_sys::CanvasRenderingContext2d;

use super::state::NetworkState;
use super::viewport::border_offset;
use crate::model::network::{EdgeClasses, NodeClasses};

const BACKGROUND: &str = "#ffffff";
const EDGE_COLOR: &str = "#ccc";
const INCOMING_COLOR: &str = "#FF0000";
const OUTGOING_COLOR: &str = "#0000FF";
const HIGHLIGHT_COLOR: &str = "#FF8C00";
const LABEL_COLOR: &str = "#000";
const ARROW_SCALE: f64 = 0.7;

/// Edge width: weight clamped to [0, 10] mapped linearly onto [0.5, 2].
pub fn edge_width(weight: f64) -> f64 {
	let w = if weight.is_finite() { weight } else { 0.0 };
	0.5 + w.clamp(0.0, 10.0) / 10.0 * 1.5
}

/// Stroke color of an edge; outgoing wins on a self-loop.
pub fn edge_color(classes: EdgeClasses) -> &'static str {
	if classes.outgoing {
		OUTGOING_COLOR
	} else if classes.incoming {
		INCOMING_COLOR
	} else {
		EDGE_COLOR
	}
}

pub fn render(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let model = &state.model;
	for (e, edge) in model.edges().iter().enumerate() {
		if !model.is_edge_visible(e) {
			continue;
		}
		let (s, t) = model.endpoints(e);
		if s == t {
			continue;
		}
		let ((x1, y1), (x2, y2)) = (state.position(s), state.position(t));
		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let (src, tgt) = (&model.nodes()[s], &model.nodes()[t]);
		let start = border_offset(ux, uy, src.width / 2.0, src.height / 2.0);
		let end = border_offset(ux, uy, tgt.width / 2.0, tgt.height / 2.0);
		if start + end >= dist {
			continue;
		}

		let width = edge_width(edge.weight);
		let arrow = (width * 6.0).max(6.0) * ARROW_SCALE;
		let color = edge_color(model.edge_classes(e));
		let (tip_x, tip_y) = (x2 - ux * end, y2 - uy * end);
		let (back_x, back_y) = (tip_x - ux * arrow, tip_y - uy * arrow);

		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);
		ctx.begin_path();
		ctx.move_to(x1 + ux * start, y1 + uy * start);
		ctx.line_to(back_x, back_y);
		ctx.stroke();

		let (px, py) = (-uy * arrow * 0.5, ux * arrow * 0.5);
		ctx.set_fill_style_str(color);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_node(state: &NetworkState, ctx: &CanvasRenderingContext2d, i: usize, classes: NodeClasses) {
	let node = &state.model.nodes()[i];
	let bounds = state.node_bounds(i);
	let fill = if classes.highlighted {
		HIGHLIGHT_COLOR
	} else {
		node.color.as_str()
	};
	ctx.set_fill_style_str(fill);
	ctx.fill_rect(bounds.min_x, bounds.min_y, node.width, node.height);

	let border = if classes.outgoing {
		Some(OUTGOING_COLOR)
	} else if classes.incoming {
		Some(INCOMING_COLOR)
	} else {
		None
	};
	if let Some(border) = border {
		ctx.set_stroke_style_str(border);
		ctx.set_line_width(2.0);
		ctx.stroke_rect(bounds.min_x, bounds.min_y, node.width, node.height);
	}

	let (x, y) = state.position(i);
	ctx.set_fill_style_str(LABEL_COLOR);
	ctx.set_font("15px sans-serif");
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	let _ = ctx.fill_text(&node.id, x, y);
}

fn draw_nodes(state: &NetworkState, ctx: &CanvasRenderingContext2d) {
	let model = &state.model;
	let highlighted = model.highlighted();
	for i in 0..model.nodes().len() {
		if model.is_node_visible(i) && Some(i) != highlighted {
			draw_node(state, ctx, i, model.node_classes(i));
		}
	}
	// z-index: the highlighted node is drawn last.
	if let Some(i) = highlighted.filter(|&i| model.is_node_visible(i)) {
		draw_node(state, ctx, i, model.node_classes(i));
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn edge_width_maps_clamped_weight() {
		assert_eq!(edge_width(0.0), 0.5);
		assert_eq!(edge_width(10.0), 2.0);
		assert_eq!(edge_width(5.0), 1.25);
		assert_eq!(edge_width(-3.0), 0.5);
		assert_eq!(edge_width(42.0), 2.0);
		assert_eq!(edge_width(f64::NAN), 0.5);
	}

	#[test]
	fn outgoing_color_wins() {
		assert_eq!(edge_color(EdgeClasses::default()), EDGE_COLOR);
		assert_eq!(
			edge_color(EdgeClasses {
				incoming: true,
				outgoing: false
			}),
			INCOMING_COLOR
		);
		assert_eq!(
			edge_color(EdgeClasses {
				incoming: true,
				outgoing: true
			}),
			OUTGOING_COLOR
		);
	}
}
