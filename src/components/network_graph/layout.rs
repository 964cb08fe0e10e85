use std::f64::consts::PI;

use force_graph::SimulationParameters;

/// Tuning of one force-layout run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutOptions {
	/// Node repulsion strength.
	pub repulsion: f32,
	/// Edge length the springs aim for.
	pub ideal_edge_length: f32,
	/// Spring stiffness relative to the ideal length.
	pub edge_elasticity: f32,
	/// Pull toward the origin.
	pub gravity: f32,
	/// Simulation steps before the layout stops.
	pub iterations: u32,
	/// Simulation steps per animation frame.
	pub steps_per_frame: u32,
	/// Scatter nodes before the first step instead of placing them on a circle.
	pub randomize: bool,
	/// Padding of the fit applied when the layout stops.
	pub fit_padding: f64,
	/// Zoom applied (then re-centered) after the fit.
	pub settle_zoom: Option<f64>,
}

impl LayoutOptions {
	/// Main network page.
	pub const fn overview() -> Self {
		Self {
			repulsion: 80_000.0,
			ideal_edge_length: 150.0,
			edge_elasticity: 0.45,
			gravity: 1.0,
			iterations: 2_500,
			steps_per_frame: 25,
			randomize: false,
			fit_padding: 20.0,
			settle_zoom: Some(1.4),
		}
	}

	/// Multi-disease page: denser repulsion, longer edges, bigger budget.
	pub const fn proof() -> Self {
		Self {
			repulsion: 150_000.0,
			ideal_edge_length: 300.0,
			edge_elasticity: 0.2,
			gravity: 1.5,
			iterations: 8_000,
			steps_per_frame: 40,
			randomize: true,
			fit_padding: 30.0,
			settle_zoom: None,
		}
	}

	pub fn simulation(&self) -> SimulationParameters {
		SimulationParameters {
			force_charge: self.repulsion / 500.0,
			force_spring: self.edge_elasticity * 0.1 * (150.0 / self.ideal_edge_length),
			force_max: 100.0,
			node_speed: 3000.0,
			damping_factor: 0.9,
		}
	}

	/// Starting position of node `i` of `n`.
	pub fn initial_position(&self, i: usize, n: usize) -> (f32, f32) {
		let spread = self.ideal_edge_length as f64 * (n.max(1) as f64).sqrt();
		if self.randomize {
			let (rx, ry) = (rand_simple(2 * i), rand_simple(2 * i + 1));
			(
				((rx - 0.5) * spread) as f32,
				((ry - 0.5) * spread) as f32,
			)
		} else {
			let angle = (i as f64) * 2.0 * PI / n.max(1) as f64;
			let radius = spread / 2.0;
			((radius * angle.cos()) as f32, (radius * angle.sin()) as f32)
		}
	}
}

/// Simple pseudo-random number generator (deterministic for consistency).
fn rand_simple(seed: usize) -> f64 {
	let x = ((seed + 1) * 9301 + 49297) % 233280;
	(x as f64) / 233280.0
}
