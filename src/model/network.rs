//! Element classes and visibility of the live network.

use std::collections::{BTreeSet, HashMap, HashSet};

use log::warn;

use super::elements::{ComorbidityEdge, DiseaseNode, GraphElements};
use crate::error::LookupError;

/// Highlight classes carried by a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NodeClasses {
	/// The focused node.
	pub highlighted: bool,
	/// Source of an edge into the focused node.
	pub incoming: bool,
	/// Target of an edge out of the focused node.
	pub outgoing: bool,
}

/// Direction classes carried by an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeClasses {
	/// The edge points at the focused node.
	pub incoming: bool,
	/// The edge leaves the focused node.
	pub outgoing: bool,
}

/// Nodes and edges of the visualization with their transient classes.
#[derive(Clone, Debug, Default)]
pub struct NetworkModel {
	nodes: Vec<DiseaseNode>,
	edges: Vec<ComorbidityEdge>,
	endpoints: Vec<(usize, usize)>,
	index: HashMap<String, usize>,
	node_classes: Vec<NodeClasses>,
	edge_classes: Vec<EdgeClasses>,
	node_visible: Vec<bool>,
	edge_visible: Vec<bool>,
	highlighted: Option<usize>,
}

impl NetworkModel {
	/// Build from an element set. Duplicate node ids keep the first
	/// occurrence; edges with an unknown endpoint are dropped.
	pub fn new(elements: GraphElements) -> Self {
		let mut nodes = Vec::with_capacity(elements.nodes.len());
		let mut index = HashMap::new();
		for node in elements.nodes {
			if index.contains_key(&node.id) {
				warn!("duplicate node {} ignored", node.id);
				continue;
			}
			index.insert(node.id.clone(), nodes.len());
			nodes.push(node);
		}

		let mut edges = Vec::with_capacity(elements.edges.len());
		let mut endpoints = Vec::with_capacity(elements.edges.len());
		for edge in elements.edges {
			match (index.get(&edge.source), index.get(&edge.target)) {
				(Some(&s), Some(&t)) => {
					endpoints.push((s, t));
					edges.push(edge);
				}
				_ => warn!("edge {} -> {} references a missing node", edge.source, edge.target),
			}
		}

		Self {
			node_classes: vec![NodeClasses::default(); nodes.len()],
			edge_classes: vec![EdgeClasses::default(); edges.len()],
			node_visible: vec![true; nodes.len()],
			edge_visible: vec![true; edges.len()],
			nodes,
			edges,
			endpoints,
			index,
			highlighted: None,
		}
	}

	/// All nodes.
	pub fn nodes(&self) -> &[DiseaseNode] {
		&self.nodes
	}

	/// All edges.
	pub fn edges(&self) -> &[ComorbidityEdge] {
		&self.edges
	}

	/// Node indices of edge `e`.
	pub fn endpoints(&self, e: usize) -> (usize, usize) {
		self.endpoints[e]
	}

	/// Index of the node with code `id`.
	pub fn node_index(&self, id: &str) -> Option<usize> {
		self.index.get(id).copied()
	}

	/// Classes of node `i`.
	pub fn node_classes(&self, i: usize) -> NodeClasses {
		self.node_classes[i]
	}

	/// Classes of edge `e`.
	pub fn edge_classes(&self, e: usize) -> EdgeClasses {
		self.edge_classes[e]
	}

	/// Whether node `i` is displayed.
	pub fn is_node_visible(&self, i: usize) -> bool {
		self.node_visible[i]
	}

	/// Whether edge `e` is displayed.
	pub fn is_edge_visible(&self, e: usize) -> bool {
		self.edge_visible[e]
	}

	/// The focused node, if any.
	pub fn highlighted(&self) -> Option<usize> {
		self.highlighted
	}

	/// Drop every highlight and direction class.
	pub fn clear_highlight(&mut self) {
		self.node_classes.fill(NodeClasses::default());
		self.edge_classes.fill(EdgeClasses::default());
		self.highlighted = None;
	}

	/// Focus node `i`: clear all classes, then mark its incoming edges and
	/// their sources, and its outgoing edges and their targets.
	pub fn highlight(&mut self, i: usize) {
		self.clear_highlight();
		self.node_classes[i].highlighted = true;
		self.highlighted = Some(i);
		for (e, &(s, t)) in self.endpoints.iter().enumerate() {
			if t == i {
				self.edge_classes[e].incoming = true;
				self.node_classes[s].incoming = true;
			}
			if s == i {
				self.edge_classes[e].outgoing = true;
				self.node_classes[t].outgoing = true;
			}
		}
	}

	/// Focus the node with code `id`.
	pub fn highlight_id(&mut self, id: &str) -> Result<usize, LookupError> {
		let i = self
			.node_index(id)
			.ok_or_else(|| LookupError(id.to_string()))?;
		self.highlight(i);
		Ok(i)
	}

	/// Distinct group tags, sorted.
	pub fn groups(&self) -> Vec<String> {
		self.nodes
			.iter()
			.filter_map(|n| n.group.clone())
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}

	/// Recompute visibility from the checked groups: a node is shown when its
	/// group is checked, an edge when both endpoints are shown, and a shown
	/// node without any shown edge is hidden again.
	///
	/// Hiding isolated nodes cannot hide an edge, because those nodes have no
	/// shown edges, so one pass reaches the fixed point.
	pub fn apply_groups(&mut self, active: &HashSet<String>) {
		for (visible, node) in self.node_visible.iter_mut().zip(&self.nodes) {
			*visible = node.group.as_ref().is_some_and(|g| active.contains(g));
		}

		for (visible, &(s, t)) in self.edge_visible.iter_mut().zip(&self.endpoints) {
			*visible = self.node_visible[s] && self.node_visible[t];
		}

		let mut has_edge = vec![false; self.nodes.len()];
		for (e, &(s, t)) in self.endpoints.iter().enumerate() {
			if self.edge_visible[e] {
				has_edge[s] = true;
				has_edge[t] = true;
			}
		}
		for (visible, connected) in self.node_visible.iter_mut().zip(has_edge) {
			*visible &= connected;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> NetworkModel {
		NetworkModel::new(GraphElements {
			nodes: vec![
				DiseaseNode::new("A").with_group("1"),
				DiseaseNode::new("B").with_group("1"),
				DiseaseNode::new("C").with_group("2"),
				DiseaseNode::new("D").with_group("2"),
				DiseaseNode::new("E").with_group("3"),
			],
			edges: vec![
				ComorbidityEdge::new("A", "B", 1.2),
				ComorbidityEdge::new("C", "A", 1.5),
				ComorbidityEdge::new("B", "C", 2.0),
				ComorbidityEdge::new("D", "E", 1.1),
			],
		})
	}

	fn classes_of(model: &NetworkModel) -> Vec<NodeClasses> {
		(0..model.nodes().len()).map(|i| model.node_classes(i)).collect()
	}

	#[test]
	fn highlight_marks_directions() {
		let mut model = sample();
		let a = model.highlight_id("A").unwrap();
		assert_eq!(model.highlighted(), Some(a));

		// A -> B outgoing, C -> A incoming.
		assert!(model.edge_classes(0).outgoing);
		assert!(model.edge_classes(1).incoming);
		assert_eq!(model.edge_classes(2), EdgeClasses::default());

		let b = model.node_index("B").unwrap();
		let c = model.node_index("C").unwrap();
		assert!(model.node_classes(b).outgoing);
		assert!(model.node_classes(c).incoming);
		assert!(!model.node_classes(b).highlighted);
	}

	#[test]
	fn exactly_one_highlighted_after_each_click() {
		let mut model = sample();
		for id in ["A", "C", "C", "E", "A"] {
			model.highlight_id(id).unwrap();
			let highlighted = classes_of(&model).iter().filter(|c| c.highlighted).count();
			assert_eq!(highlighted, 1, "after clicking {id}");
		}
	}

	#[test]
	fn previous_direction_classes_are_cleared() {
		let mut model = sample();
		model.highlight_id("A").unwrap();
		model.highlight_id("E").unwrap();
		// Only D -> E is incident to E.
		assert!(model.edge_classes(3).incoming);
		for e in 0..3 {
			assert_eq!(model.edge_classes(e), EdgeClasses::default());
		}
		let d = model.node_index("D").unwrap();
		for (i, classes) in classes_of(&model).into_iter().enumerate() {
			if i != d && Some(i) != model.highlighted() {
				assert_eq!(classes, NodeClasses::default());
			}
		}
	}

	#[test]
	fn highlight_is_idempotent() {
		let mut model = sample();
		model.highlight_id("B").unwrap();
		let first = classes_of(&model);
		model.highlight_id("B").unwrap();
		assert_eq!(classes_of(&model), first);
	}

	#[test]
	fn unknown_node_is_reported() {
		let mut model = sample();
		model.highlight_id("A").unwrap();
		assert_eq!(model.highlight_id("Z99"), Err(LookupError("Z99".into())));
		assert_eq!(model.highlighted(), model.node_index("A"));
	}

	#[test]
	fn clear_drops_everything() {
		let mut model = sample();
		model.highlight_id("A").unwrap();
		model.clear_highlight();
		assert_eq!(model.highlighted(), None);
		assert!(classes_of(&model).iter().all(|c| *c == NodeClasses::default()));
	}

	#[test]
	fn self_loop_is_both_directions() {
		let mut model = NetworkModel::new(GraphElements {
			nodes: vec![DiseaseNode::new("A")],
			edges: vec![ComorbidityEdge::new("A", "A", 1.0)],
		});
		model.highlight(0);
		assert_eq!(
			model.edge_classes(0),
			EdgeClasses {
				incoming: true,
				outgoing: true
			}
		);
	}

	#[test]
	fn dangling_edges_are_dropped() {
		let model = NetworkModel::new(GraphElements {
			nodes: vec![DiseaseNode::new("A"), DiseaseNode::new("A")],
			edges: vec![
				ComorbidityEdge::new("A", "Q", 1.0),
				ComorbidityEdge::new("A", "A", 1.0),
			],
		});
		assert_eq!(model.nodes().len(), 1);
		assert_eq!(model.edges().len(), 1);
	}

	fn set(groups: &[&str]) -> HashSet<String> {
		groups.iter().map(|g| g.to_string()).collect()
	}

	fn assert_no_dangling(model: &NetworkModel) {
		for e in 0..model.edges().len() {
			if model.is_edge_visible(e) {
				let (s, t) = model.endpoints(e);
				assert!(model.is_node_visible(s) && model.is_node_visible(t));
			}
		}
		for i in 0..model.nodes().len() {
			if model.is_node_visible(i) {
				let connected = (0..model.edges().len()).any(|e| {
					let (s, t) = model.endpoints(e);
					model.is_edge_visible(e) && (s == i || t == i)
				});
				assert!(connected, "visible node {i} is isolated");
			}
		}
	}

	#[test]
	fn group_toggles_never_show_dangling_edges() {
		let mut model = sample();
		for groups in [
			set(&["1"]),
			set(&["2"]),
			set(&["3"]),
			set(&["1", "2"]),
			set(&["2", "3"]),
			set(&[]),
		] {
			model.apply_groups(&groups);
			assert_no_dangling(&model);
		}
	}

	#[test]
	fn isolated_nodes_are_hidden() {
		let mut model = sample();
		model.apply_groups(&set(&["2"]));
		// C and D share group 2 but have no edge between them.
		assert!(!model.is_node_visible(model.node_index("C").unwrap()));
		assert!(!model.is_node_visible(model.node_index("D").unwrap()));

		model.apply_groups(&set(&["1"]));
		assert!(model.is_node_visible(model.node_index("A").unwrap()));
		assert!(model.is_edge_visible(0));
		assert!(!model.is_edge_visible(1));
	}

	#[test]
	fn groups_are_distinct_and_sorted() {
		assert_eq!(sample().groups(), ["1", "2", "3"]);
		let mut model = sample();
		model.apply_groups(&set(&[]));
		assert!((0..5).all(|i| !model.is_node_visible(i)));
	}
}
