//! Small canvas charts for the detail sidebar.

use std::f64::consts::PI;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::model::detail::{ChartKind, ChartSpec};

const CHART_WIDTH: u32 = 320;
const CHART_HEIGHT: u32 = 220;
const LEGEND_HEIGHT: f64 = 22.0;
const AXIS_COLOR: &str = "#999";
const GRID_COLOR: &str = "#eee";
const TEXT_COLOR: &str = "#333";
const TICKS: usize = 5;

/// Smallest "round" number (1, 2, 2.5 or 5 times a power of ten) not below `v`.
pub fn nice_ceiling(v: f64) -> f64 {
	if !v.is_finite() || v <= 0.0 {
		return 1.0;
	}
	let magnitude = 10f64.powi(v.log10().floor() as i32);
	[1.0, 2.0, 2.5, 5.0, 10.0]
		.into_iter()
		.map(|step| step * magnitude)
		.find(|&candidate| candidate >= v)
		.unwrap_or(10.0 * magnitude)
}

pub fn format_tick(v: f64) -> String {
	if v.fract() == 0.0 {
		format!("{}", v as i64)
	} else {
		format!("{v:.1}")
	}
}

fn color_at(colors: &[&'static str], i: usize) -> &'static str {
	if colors.is_empty() {
		AXIS_COLOR
	} else {
		colors[i % colors.len()]
	}
}

pub fn draw_chart(canvas: &HtmlCanvasElement, spec: &ChartSpec) -> Result<(), String> {
	let ctx = canvas
		.get_context("2d")
		.map_err(|_| "get_context failed")?
		.ok_or("no 2d context")?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| "context cast failed")?;
	let (w, h) = (canvas.width() as f64, canvas.height() as f64);
	ctx.clear_rect(0.0, 0.0, w, h);
	ctx.set_font("11px sans-serif");
	match spec.kind {
		ChartKind::Pie => draw_pie(&ctx, spec, w, h),
		ChartKind::Bar => draw_bars(&ctx, spec, w, h),
	}
	Ok(())
}

fn draw_legend(ctx: &CanvasRenderingContext2d, entries: &[(&str, &str)], w: f64) {
	let mut x = 8.0;
	ctx.set_text_align("left");
	ctx.set_text_baseline("middle");
	for (label, color) in entries {
		let advance = 24.0 + label.chars().count() as f64 * 7.0;
		if x + advance > w && x > 8.0 {
			break;
		}
		ctx.set_fill_style_str(color);
		ctx.fill_rect(x, 6.0, 10.0, 10.0);
		ctx.set_fill_style_str(TEXT_COLOR);
		let _ = ctx.fill_text(label, x + 14.0, 11.0);
		x += advance;
	}
}

fn draw_pie(ctx: &CanvasRenderingContext2d, spec: &ChartSpec, w: f64, h: f64) {
	let Some(dataset) = spec.datasets.first() else {
		return;
	};
	let legend: Vec<_> = spec
		.labels
		.iter()
		.enumerate()
		.map(|(i, label)| (label.as_str(), color_at(&dataset.colors, i)))
		.collect();
	draw_legend(ctx, &legend, w);

	let (cx, cy) = (w / 2.0, LEGEND_HEIGHT + (h - LEGEND_HEIGHT) / 2.0);
	let r = (w.min(h - LEGEND_HEIGHT) / 2.0 - 8.0).max(1.0);
	let total: f64 = dataset.values.iter().filter(|v| **v > 0.0).sum();
	if total <= 0.0 {
		ctx.set_stroke_style_str(AXIS_COLOR);
		ctx.begin_path();
		let _ = ctx.arc(cx, cy, r, 0.0, 2.0 * PI);
		ctx.stroke();
		return;
	}

	let mut start = -PI / 2.0;
	for (i, value) in dataset.values.iter().enumerate() {
		if *value <= 0.0 {
			continue;
		}
		let sweep = value / total * 2.0 * PI;
		ctx.set_fill_style_str(color_at(&dataset.colors, i));
		ctx.begin_path();
		ctx.move_to(cx, cy);
		let _ = ctx.arc(cx, cy, r, start, start + sweep);
		ctx.close_path();
		ctx.fill();
		ctx.set_stroke_style_str("#fff");
		ctx.set_line_width(1.0);
		ctx.stroke();
		start += sweep;
	}
}

fn draw_bars(ctx: &CanvasRenderingContext2d, spec: &ChartSpec, w: f64, h: f64) {
	let legend: Vec<_> = spec
		.datasets
		.iter()
		.map(|d| (d.label.as_str(), color_at(&d.colors, 0)))
		.collect();
	draw_legend(ctx, &legend, w);

	let (left, right, top, bottom) = (36.0, w - 8.0, LEGEND_HEIGHT + 6.0, h - 24.0);
	let (plot_w, plot_h) = (right - left, bottom - top);
	if plot_w <= 0.0 || plot_h <= 0.0 {
		return;
	}
	let max = nice_ceiling(
		spec.datasets
			.iter()
			.flat_map(|d| d.values.iter().copied())
			.fold(0.0, f64::max),
	);

	ctx.set_line_width(1.0);
	ctx.set_text_align("right");
	ctx.set_text_baseline("middle");
	for tick in 0..=TICKS {
		let value = max * tick as f64 / TICKS as f64;
		let y = bottom - plot_h * tick as f64 / TICKS as f64;
		ctx.set_stroke_style_str(if tick == 0 { AXIS_COLOR } else { GRID_COLOR });
		ctx.begin_path();
		ctx.move_to(left, y);
		ctx.line_to(right, y);
		ctx.stroke();
		ctx.set_fill_style_str(TEXT_COLOR);
		let _ = ctx.fill_text(&format_tick(value), left - 4.0, y);
	}

	let n = spec.labels.len();
	let m = spec.datasets.len();
	if n == 0 || m == 0 {
		return;
	}
	let group_w = plot_w / n as f64;
	let bar_w = group_w * 0.8 / m as f64;
	for (j, dataset) in spec.datasets.iter().enumerate() {
		ctx.set_fill_style_str(color_at(&dataset.colors, 0));
		for (i, value) in dataset.values.iter().enumerate().take(n) {
			let bar_h = value.max(0.0) / max * plot_h;
			let x = left + i as f64 * group_w + group_w * 0.1 + j as f64 * bar_w;
			ctx.fill_rect(x, bottom - bar_h, (bar_w - 1.0).max(1.0), bar_h);
		}
	}

	ctx.set_fill_style_str(TEXT_COLOR);
	ctx.set_text_align("center");
	ctx.set_text_baseline("top");
	ctx.set_font("10px sans-serif");
	for (i, label) in spec.labels.iter().enumerate() {
		let _ = ctx.fill_text(label, left + (i as f64 + 0.5) * group_w, bottom + 4.0);
	}
}

/// One chart drawn into its own canvas once mounted.
#[component]
pub fn ChartCanvas(spec: ChartSpec) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let canvas_id = spec.canvas_id;

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		canvas.set_width(CHART_WIDTH);
		canvas.set_height(CHART_HEIGHT);
		if let Err(err) = draw_chart(&canvas, &spec) {
			warn!("chart {} not drawn: {err}", spec.canvas_id);
		}
	});

	view! { <canvas id=canvas_id node_ref=canvas_ref class="chart-canvas" /> }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn ceiling_rounds_up_to_a_round_step() {
		assert_eq!(nice_ceiling(0.0), 1.0);
		assert_eq!(nice_ceiling(7.0), 10.0);
		assert_eq!(nice_ceiling(10.0), 10.0);
		assert_eq!(nice_ceiling(18.0), 20.0);
		assert_eq!(nice_ceiling(230.0), 250.0);
		assert_eq!(nice_ceiling(4100.0), 5000.0);
	}

	#[test]
	fn ticks_drop_zero_fractions() {
		assert_eq!(format_tick(4.0), "4");
		assert_eq!(format_tick(0.5), "0.5");
	}
}
