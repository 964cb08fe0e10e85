use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData};
use log::info;

use super::layout::LayoutOptions;
use super::viewport::{self, Bounds, ViewTransform, ViewportAnimation};
use crate::error::LookupError;
use crate::model::elements::GraphElements;
use crate::model::network::NetworkModel;

/// Edge hit tolerance in screen pixels.
pub const EDGE_HIT_TOLERANCE: f64 = 6.0;
/// Padding of the viewport fit when a node is focused from the list.
pub const FOCUS_PADDING: f64 = 430.0;
/// Duration of the focus animation, in seconds.
pub const FOCUS_DURATION: f64 = 0.5;

const STEP_DT: f32 = 0.016;
const GRAVITY_SCALE: f32 = 0.002;
const NODE_MASS: f32 = 10.0;

/// What a click without movement landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TapTarget {
	Node(usize),
	Edge(usize),
	Background,
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub active: bool,
	pub node: Option<usize>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start_x: f64,
	pub node_start_y: f64,
	/// Pointer moved since the button went down.
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

#[derive(Clone, Debug)]
struct LayoutRun {
	options: LayoutOptions,
	steps_done: u32,
	running: bool,
}

impl LayoutRun {
	fn start(options: LayoutOptions) -> Self {
		Self {
			options,
			steps_done: 0,
			running: true,
		}
	}
}

/// Everything the canvas draws: element model, physics, and view.
pub struct NetworkState {
	pub graph: ForceGraph<usize, ()>,
	pub model: NetworkModel,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub hovered: Option<usize>,
	pub width: f64,
	pub height: f64,
	layout: LayoutRun,
	handles: Vec<DefaultNodeIdx>,
	positions: Vec<(f64, f64)>,
	animation: Option<ViewportAnimation>,
}

fn build_graph(
	model: &NetworkModel,
	options: &LayoutOptions,
) -> (ForceGraph<usize, ()>, Vec<DefaultNodeIdx>) {
	let mut graph = ForceGraph::new(options.simulation());
	let n = model.nodes().len();
	let handles: Vec<_> = model
		.nodes()
		.iter()
		.enumerate()
		.map(|(i, node)| {
			let (x, y) = node
				.position
				.map(|(x, y)| (x as f32, y as f32))
				.unwrap_or_else(|| options.initial_position(i, n));
			graph.add_node(NodeData {
				x,
				y,
				mass: NODE_MASS,
				is_anchor: node.locked,
				user_data: i,
			})
		})
		.collect();

	for e in 0..model.edges().len() {
		let (s, t) = model.endpoints(e);
		// Self-loops carry no layout force.
		if s != t {
			graph.add_edge(handles[s], handles[t], EdgeData::default());
		}
	}
	(graph, handles)
}

impl NetworkState {
	pub fn new(elements: GraphElements, options: LayoutOptions, width: f64, height: f64) -> Self {
		let model = NetworkModel::new(elements);
		let (graph, handles) = build_graph(&model, &options);
		let mut state = Self {
			positions: vec![(0.0, 0.0); model.nodes().len()],
			graph,
			model,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			hovered: None,
			width,
			height,
			layout: LayoutRun::start(options),
			handles,
			animation: None,
		};
		state.refresh_positions();
		state
	}

	/// Swap in a new element set and restart the layout with `options`.
	pub fn replace(&mut self, elements: GraphElements, options: LayoutOptions) {
		let (width, height) = (self.width, self.height);
		*self = Self::new(elements, options, width, height);
	}

	pub fn is_layout_running(&self) -> bool {
		self.layout.running
	}

	/// Cached position of node `i`.
	pub fn position(&self, i: usize) -> (f64, f64) {
		self.positions[i]
	}

	fn refresh_positions(&mut self) {
		let positions = &mut self.positions;
		self.graph.visit_nodes(|node| {
			positions[node.data.user_data] = (node.x() as f64, node.y() as f64);
		});
	}

	/// Advance animations by `dt` seconds. Returns `true` on the frame the
	/// layout stops.
	pub fn tick(&mut self, dt: f64) -> bool {
		if let Some(anim) = self.animation.as_mut() {
			self.transform = anim.step(dt);
			if anim.is_done() {
				self.animation = None;
			}
		}

		if !self.layout.running {
			return false;
		}
		let pull = (self.layout.options.gravity * GRAVITY_SCALE).min(0.5);
		for _ in 0..self.layout.options.steps_per_frame {
			self.graph.update(STEP_DT);
			self.graph.visit_nodes_mut(|node| {
				if !node.data.is_anchor {
					node.data.x -= node.data.x * pull;
					node.data.y -= node.data.y * pull;
				}
			});
		}
		self.layout.steps_done += self.layout.options.steps_per_frame;
		self.refresh_positions();

		if self.layout.steps_done < self.layout.options.iterations {
			return false;
		}
		self.layout.running = false;
		info!("layout stopped after {} steps", self.layout.steps_done);
		self.settle_view();
		true
	}

	/// Fit the visible nodes, then apply the preset's settle zoom.
	fn settle_view(&mut self) {
		let Some(bounds) = self.visible_bounds() else {
			return;
		};
		let options = self.layout.options;
		if let Some(t) = viewport::fit(&bounds, self.width, self.height, options.fit_padding) {
			self.transform = t;
		}
		if let Some(k) = options.settle_zoom {
			self.transform = viewport::center(&bounds, k, self.width, self.height);
		}
	}

	pub fn node_bounds(&self, i: usize) -> Bounds {
		let (x, y) = self.positions[i];
		let node = &self.model.nodes()[i];
		Bounds::around(x, y, node.width, node.height)
	}

	fn visible_bounds(&self) -> Option<Bounds> {
		(0..self.model.nodes().len())
			.filter(|&i| self.model.is_node_visible(i))
			.map(|i| self.node_bounds(i))
			.reduce(Bounds::union)
	}

	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let hit = |i: usize| self.model.is_node_visible(i) && self.node_bounds(i).contains(gx, gy);
		// The highlighted node is drawn on top.
		if let Some(i) = self.model.highlighted().filter(|&i| hit(i)) {
			return Some(i);
		}
		(0..self.model.nodes().len()).rev().find(|&i| hit(i))
	}

	pub fn edge_at_position(&self, sx: f64, sy: f64) -> Option<usize> {
		let (gx, gy) = self.transform.screen_to_graph(sx, sy);
		let tolerance = EDGE_HIT_TOLERANCE / self.transform.k;
		(0..self.model.edges().len())
			.filter(|&e| self.model.is_edge_visible(e))
			.map(|e| {
				let (s, t) = self.model.endpoints(e);
				let ((x1, y1), (x2, y2)) = (self.positions[s], self.positions[t]);
				(e, viewport::segment_distance(gx, gy, x1, y1, x2, y2))
			})
			.filter(|(_, d)| *d <= tolerance)
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(e, _)| e)
	}

	pub fn tap_target(&self, sx: f64, sy: f64) -> TapTarget {
		if let Some(i) = self.node_at_position(sx, sy) {
			TapTarget::Node(i)
		} else if let Some(e) = self.edge_at_position(sx, sy) {
			TapTarget::Edge(e)
		} else {
			TapTarget::Background
		}
	}

	/// Hover `node`. Returns `true` when the hovered node changed.
	pub fn set_hover(&mut self, node: Option<usize>) -> bool {
		if self.hovered == node {
			return false;
		}
		self.hovered = node;
		match node {
			Some(i) => self.model.highlight(i),
			None => self.model.clear_highlight(),
		}
		true
	}

	/// Highlight the node with code `id` and animate the view onto it.
	pub fn focus(&mut self, id: &str) -> Result<usize, LookupError> {
		let i = self.model.highlight_id(id)?;
		let bounds = self.node_bounds(i);
		let target = viewport::fit(&bounds, self.width, self.height, FOCUS_PADDING)
			.unwrap_or_else(|| viewport::center(&bounds, self.transform.k, self.width, self.height));
		self.animation = Some(ViewportAnimation::new(
			self.transform,
			target,
			FOCUS_DURATION,
		));
		Ok(i)
	}

	/// Move node `i` to `(x, y)` and pin it there.
	pub fn move_node(&mut self, i: usize, x: f64, y: f64) {
		let Some(&handle) = self.handles.get(i) else {
			return;
		};
		self.graph.visit_nodes_mut(|node| {
			if node.index() == handle {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = true;
			}
		});
		self.positions[i] = (x, y);
	}

	/// Zoom around a screen point; cancels a running focus animation.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		self.animation = None;
		self.transform = self.transform.zoom_at(sx, sy, factor);
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::elements::{ComorbidityEdge, DiseaseNode};

	fn elements() -> GraphElements {
		let mut locked = DiseaseNode::new("E11");
		locked.position = Some((100.0, 300.0));
		locked.locked = true;
		GraphElements {
			nodes: vec![locked, DiseaseNode::new("I10"), DiseaseNode::new("N18")],
			edges: vec![
				ComorbidityEdge::new("E11", "I10", 1.2),
				ComorbidityEdge::new("I10", "N18", 3.0),
			],
		}
	}

	fn quick() -> LayoutOptions {
		LayoutOptions {
			iterations: 20,
			steps_per_frame: 10,
			..LayoutOptions::overview()
		}
	}

	#[test]
	fn layout_stops_after_budget_and_settles_zoom() {
		let mut state = NetworkState::new(elements(), quick(), 800.0, 600.0);
		assert!(!state.tick(0.016));
		assert!(state.tick(0.016));
		assert!(!state.is_layout_running());
		assert!(!state.tick(0.016));
		assert_eq!(state.transform.k, 1.4);
	}

	#[test]
	fn locked_nodes_stay_put() {
		let mut state = NetworkState::new(elements(), quick(), 800.0, 600.0);
		while state.is_layout_running() {
			state.tick(0.016);
		}
		assert_eq!(state.position(0), (100.0, 300.0));
	}

	#[test]
	fn hit_testing_uses_node_rectangles() {
		let mut state = NetworkState::new(elements(), quick(), 800.0, 600.0);
		state.transform = ViewTransform::default();
		state.move_node(1, 0.0, 0.0);
		state.move_node(2, 200.0, 0.0);
		assert_eq!(state.tap_target(10.0, -10.0), TapTarget::Node(1));
		assert_eq!(state.tap_target(100.0, 2.0), TapTarget::Edge(1));
		assert_eq!(state.tap_target(100.0, 80.0), TapTarget::Background);
	}

	#[test]
	fn hover_tracks_transitions() {
		let mut state = NetworkState::new(elements(), quick(), 800.0, 600.0);
		assert!(state.set_hover(Some(1)));
		assert!(!state.set_hover(Some(1)));
		assert_eq!(state.model.highlighted(), Some(1));
		assert!(state.set_hover(None));
		assert_eq!(state.model.highlighted(), None);
	}

	#[test]
	fn focus_animates_onto_node() {
		let mut state = NetworkState::new(elements(), quick(), 1200.0, 1000.0);
		state.move_node(2, 50.0, 50.0);
		assert_eq!(state.focus("N18"), Ok(2));
		assert_eq!(state.model.highlighted(), Some(2));
		assert!(state.focus("Z99").is_err());
		for _ in 0..40 {
			state.tick(0.016);
		}
		let (x, y) = state.position(2);
		let t = state.transform;
		assert!((x * t.k + t.x - 600.0).abs() < 1e-6);
		assert!((y * t.k + t.y - 500.0).abs() < 1e-6);
	}

	#[test]
	fn replace_restarts_layout() {
		let mut state = NetworkState::new(elements(), quick(), 800.0, 600.0);
		while state.is_layout_running() {
			state.tick(0.016);
		}
		state.replace(
			GraphElements {
				nodes: vec![DiseaseNode::new("K21")],
				edges: vec![],
			},
			LayoutOptions::proof(),
		);
		assert!(state.is_layout_running());
		assert_eq!(state.model.nodes().len(), 1);
	}
}
