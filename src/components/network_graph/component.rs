use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use crate::controller::NetworkController;

const FRAME_DT: f64 = 0.016;
/// Pointer travel, in pixels, after which a press stops counting as a click.
const CLICK_SLOP: f64 = 4.0;

fn viewport_size(window: &Window) -> Option<(f64, f64)> {
	Some((
		window.inner_width().ok()?.as_f64()?,
		window.inner_height().ok()?.as_f64()?,
	))
}

fn pointer_position(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Window-sized canvas view of the comorbidity network.
#[component]
pub fn NetworkCanvas(controller: NetworkController) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = viewport_size(&window).unwrap_or((800.0, 600.0));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx = match canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		{
			Some(ctx) => ctx,
			None => {
				warn!("network canvas has no 2d context");
				return;
			}
		};
		controller.update_state(|s| s.resize(w, h));

		let canvas_resize = canvas.clone();
		*resize_cb.borrow_mut() = Some(Closure::new(move || {
			let Some((nw, nh)) = web_sys::window().as_ref().and_then(viewport_size) else {
				return;
			};
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			controller.update_state(|s| s.resize(nw, nh));
		}));
		if let Some(ref cb) = *resize_cb.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let animate_inner = animate.clone();
		*animate.borrow_mut() = Some(Closure::new(move || {
			controller.update_state(|s| {
				s.tick(FRAME_DT);
				render::render(s, &ctx);
			});
			if let (Some(cb), Some(win)) = (&*animate_inner.borrow(), web_sys::window()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		controller.update_state(|s| {
			s.drag.start_x = x;
			s.drag.start_y = y;
			s.drag.moved = false;
			if let Some(i) = s.node_at_position(x, y) {
				let (nx, ny) = s.position(i);
				s.drag.active = true;
				s.drag.node = Some(i);
				s.drag.node_start_x = nx;
				s.drag.node_start_y = ny;
			} else {
				s.pan.active = true;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		});
	};

	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let hover_change = controller.update_state(|s| {
			if (s.drag.active || s.pan.active)
				&& ((x - s.drag.start_x).abs() > CLICK_SLOP || (y - s.drag.start_y).abs() > CLICK_SLOP)
			{
				s.drag.moved = true;
			}

			if s.drag.active {
				if let (Some(i), true) = (s.drag.node, s.drag.moved) {
					let k = s.transform.k;
					let nx = s.drag.node_start_x + (x - s.drag.start_x) / k;
					let ny = s.drag.node_start_y + (y - s.drag.start_y) / k;
					s.move_node(i, nx, ny);
				}
				return None;
			}
			if s.pan.active && s.drag.moved {
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
			}
			let hovered = s.node_at_position(x, y);
			s.set_hover(hovered).then_some(hovered)
		});
		if let Some(hovered) = hover_change.flatten() {
			controller.hover_changed(hovered);
		}
	};

	let on_mouseup = move |ev: MouseEvent| {
		let clicked = controller.update_state(|s| {
			let clicked = (s.drag.active || s.pan.active) && !s.drag.moved;
			s.drag.active = false;
			s.drag.node = None;
			s.drag.moved = false;
			s.pan.active = false;
			clicked
		});
		if clicked == Some(true) {
			if let Some((x, y)) = pointer_position(canvas_ref, &ev) {
				controller.tap_at(x, y);
			}
		}
	};

	let on_mouseleave = move |_: MouseEvent| {
		let changed = controller.update_state(|s| {
			s.drag.active = false;
			s.drag.node = None;
			s.pan.active = false;
			s.set_hover(None)
		});
		if changed == Some(true) {
			controller.hover_changed(None);
		}
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = pointer_position(canvas_ref, &ev) else {
			return;
		};
		let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
		controller.update_state(|s| s.zoom_at(x, y, factor));
	};

	view! {
		<canvas
			id="cy"
			node_ref=canvas_ref
			class="network-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
