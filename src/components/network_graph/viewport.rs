//! Pan/zoom transform, fitting, and hit-test geometry.

/// Zoom limits shared by wheel zoom and fitting.
pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

pub fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Maps graph coordinates to screen: `screen = graph * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// Zoom by `factor` keeping the screen point `(sx, sy)` fixed.
	pub fn zoom_at(&self, sx: f64, sy: f64, factor: f64) -> Self {
		let k = (self.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = k / self.k;
		Self {
			x: sx - (sx - self.x) * ratio,
			y: sy - (sy - self.y) * ratio,
			k,
		}
	}

	fn lerp(&self, to: &Self, t: f64) -> Self {
		Self {
			x: self.x + (to.x - self.x) * t,
			y: self.y + (to.y - self.y) * t,
			k: self.k + (to.k - self.k) * t,
		}
	}
}

/// Axis-aligned box in graph coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	pub min_x: f64,
	pub min_y: f64,
	pub max_x: f64,
	pub max_y: f64,
}

impl Bounds {
	/// Box of a `w`×`h` rectangle centered on `(x, y)`.
	pub fn around(x: f64, y: f64, w: f64, h: f64) -> Self {
		Self {
			min_x: x - w / 2.0,
			min_y: y - h / 2.0,
			max_x: x + w / 2.0,
			max_y: y + h / 2.0,
		}
	}

	pub fn union(self, other: Self) -> Self {
		Self {
			min_x: self.min_x.min(other.min_x),
			min_y: self.min_y.min(other.min_y),
			max_x: self.max_x.max(other.max_x),
			max_y: self.max_y.max(other.max_y),
		}
	}

	pub fn width(&self) -> f64 {
		self.max_x - self.min_x
	}

	pub fn height(&self) -> f64 {
		self.max_y - self.min_y
	}

	pub fn center(&self) -> (f64, f64) {
		(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
		)
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
	}
}

/// Transform with zoom `k` placing the center of `bounds` at the center of
/// a `width`×`height` viewport.
pub fn center(bounds: &Bounds, k: f64, width: f64, height: f64) -> ViewTransform {
	let (cx, cy) = bounds.center();
	ViewTransform {
		x: width / 2.0 - cx * k,
		y: height / 2.0 - cy * k,
		k,
	}
}

/// Largest zoom showing `bounds` inside the viewport minus `padding` on each
/// side, centered. `None` when the padded viewport is empty.
pub fn fit(bounds: &Bounds, width: f64, height: f64, padding: f64) -> Option<ViewTransform> {
	let (w, h) = (width - 2.0 * padding, height - 2.0 * padding);
	if w <= 0.0 || h <= 0.0 {
		return None;
	}
	let k = (w / bounds.width().max(1.0))
		.min(h / bounds.height().max(1.0))
		.clamp(MIN_ZOOM, MAX_ZOOM);
	Some(center(bounds, k, width, height))
}

/// Distance from a rectangle's center to its border along `(ux, uy)`
/// (a unit vector).
pub fn border_offset(ux: f64, uy: f64, half_w: f64, half_h: f64) -> f64 {
	let tx = if ux.abs() > 1e-9 {
		half_w / ux.abs()
	} else {
		f64::INFINITY
	};
	let ty = if uy.abs() > 1e-9 {
		half_h / uy.abs()
	} else {
		f64::INFINITY
	};
	tx.min(ty)
}

/// Distance from `(px, py)` to the segment `(x1, y1)–(x2, y2)`.
pub fn segment_distance(px: f64, py: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let len_sq = dx * dx + dy * dy;
	let t = if len_sq < 1e-12 {
		0.0
	} else {
		(((px - x1) * dx + (py - y1) * dy) / len_sq).clamp(0.0, 1.0)
	};
	let (cx, cy) = (x1 + t * dx, y1 + t * dy);
	((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Timed transition between two transforms.
#[derive(Clone, Debug)]
pub struct ViewportAnimation {
	from: ViewTransform,
	to: ViewTransform,
	elapsed: f64,
	duration: f64,
}

impl ViewportAnimation {
	pub fn new(from: ViewTransform, to: ViewTransform, duration: f64) -> Self {
		Self {
			from,
			to,
			elapsed: 0.0,
			duration,
		}
	}

	/// Advance by `dt` seconds and return the transform to show.
	pub fn step(&mut self, dt: f64) -> ViewTransform {
		self.elapsed += dt;
		if self.is_done() {
			return self.to;
		}
		self.from
			.lerp(&self.to, ease_out_cubic(self.elapsed / self.duration))
	}

	pub fn is_done(&self) -> bool {
		self.elapsed >= self.duration
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn close(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn fit_centers_bounds() {
		let bounds = Bounds {
			min_x: -50.0,
			min_y: 0.0,
			max_x: 150.0,
			max_y: 100.0,
		};
		let t = fit(&bounds, 800.0, 600.0, 20.0).unwrap();
		// Width limits: (800 - 40) / 200 = 3.8; height: 560 / 100 = 5.6.
		assert!(close(t.k, 3.8));
		let (cx, cy) = bounds.center();
		assert!(close(cx * t.k + t.x, 400.0));
		assert!(close(cy * t.k + t.y, 300.0));
	}

	#[test]
	fn fit_clamps_zoom_and_rejects_oversized_padding() {
		let node = Bounds::around(10.0, 10.0, 30.0, 30.0);
		let t = fit(&node, 1200.0, 1000.0, 430.0).unwrap();
		assert!(close(t.k, 140.0 / 30.0));
		let tiny = Bounds::around(0.0, 0.0, 0.5, 0.5);
		assert_eq!(fit(&tiny, 1200.0, 1000.0, 0.0).unwrap().k, MAX_ZOOM);
		assert!(fit(&node, 800.0, 600.0, 430.0).is_none());
	}

	#[test]
	fn zoom_keeps_anchor_point() {
		let t = ViewTransform {
			x: 30.0,
			y: -20.0,
			k: 2.0,
		};
		let before = t.screen_to_graph(200.0, 150.0);
		let zoomed = t.zoom_at(200.0, 150.0, 1.1);
		let after = zoomed.screen_to_graph(200.0, 150.0);
		assert!(close(before.0, after.0) && close(before.1, after.1));
		assert_eq!(t.zoom_at(0.0, 0.0, 100.0).k, MAX_ZOOM);
	}

	#[test]
	fn border_offset_of_rectangle() {
		assert!(close(border_offset(1.0, 0.0, 20.0, 10.0), 20.0));
		assert!(close(border_offset(0.0, -1.0, 20.0, 10.0), 10.0));
		let d = std::f64::consts::FRAC_1_SQRT_2;
		assert!(close(border_offset(d, d, 20.0, 10.0), 10.0 / d));
	}

	#[test]
	fn segment_distance_clamps_to_ends() {
		assert!(close(segment_distance(5.0, 3.0, 0.0, 0.0, 10.0, 0.0), 3.0));
		assert!(close(segment_distance(-4.0, 3.0, 0.0, 0.0, 10.0, 0.0), 5.0));
		assert!(close(segment_distance(1.0, 1.0, 0.0, 0.0, 0.0, 0.0), 2f64.sqrt()));
	}

	#[test]
	fn animation_ends_on_target() {
		let from = ViewTransform::default();
		let to = ViewTransform {
			x: 100.0,
			y: 50.0,
			k: 2.0,
		};
		let mut anim = ViewportAnimation::new(from, to, 0.5);
		let mid = anim.step(0.25);
		assert!(mid.k > 1.0 && mid.k < 2.0);
		assert!(!anim.is_done());
		assert_eq!(anim.step(0.3), to);
		assert!(anim.is_done());
	}
}
