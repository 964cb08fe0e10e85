//! Nodes, edges and disease list entries of the network.

use super::filters::FilterOverrides;

/// Node size used when the backend sends no sizing hint.
pub const DEFAULT_NODE_SIZE: f64 = 30.0;
/// Node fill used when the backend sends no background color.
pub const DEFAULT_NODE_COLOR: &str = "#666";

/// A disease node.
#[derive(Clone, Debug, PartialEq)]
pub struct DiseaseNode {
	/// Disease code, unique within a graph.
	pub id: String,
	/// Display name.
	pub label: String,
	/// Rectangle width in graph units.
	pub width: f64,
	/// Rectangle height in graph units.
	pub height: f64,
	/// Group tag used by the group toggles.
	pub group: Option<String>,
	/// Fill color.
	pub color: String,
	/// Fixed starting position.
	pub position: Option<(f64, f64)>,
	/// Whether the layout must keep the node at `position`.
	pub locked: bool,
}

impl DiseaseNode {
	/// Node with default size and color.
	pub fn new(id: impl Into<String>) -> Self {
		let id = id.into();
		Self {
			label: id.clone(),
			id,
			width: DEFAULT_NODE_SIZE,
			height: DEFAULT_NODE_SIZE,
			group: None,
			color: DEFAULT_NODE_COLOR.to_string(),
			position: None,
			locked: false,
		}
	}

	/// Same node tagged with `group`.
	pub fn with_group(mut self, group: impl Into<String>) -> Self {
		self.group = Some(group.into());
		self
	}
}

/// A directed comorbidity edge (`source` precedes `target`).
#[derive(Clone, Debug, PartialEq)]
pub struct ComorbidityEdge {
	/// Cause disease code.
	pub source: String,
	/// Outcome disease code.
	pub target: String,
	/// Edge weight (relative risk).
	pub weight: f64,
	/// Filter values that produced this edge, if the backend attached them.
	pub filters: FilterOverrides,
}

impl ComorbidityEdge {
	/// Edge with no attached filter values.
	pub fn new(source: impl Into<String>, target: impl Into<String>, weight: f64) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
			weight,
			filters: FilterOverrides::default(),
		}
	}
}

/// The full element set of one visualization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphElements {
	/// Nodes.
	pub nodes: Vec<DiseaseNode>,
	/// Edges.
	pub edges: Vec<ComorbidityEdge>,
}

impl GraphElements {
	/// One list entry per node, in node order.
	pub fn disease_entries(&self) -> Vec<DiseaseEntry> {
		self.nodes
			.iter()
			.map(|n| DiseaseEntry {
				code: n.id.clone(),
				label: n.label.clone(),
			})
			.collect()
	}
}

/// An entry of the searchable disease list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiseaseEntry {
	/// Disease code.
	pub code: String,
	/// Display name.
	pub label: String,
}

impl DiseaseEntry {
	/// Text shown in the list and in the hover info box.
	pub fn display(&self) -> String {
		if self.label.is_empty() || self.label == self.code {
			self.code.clone()
		} else {
			format!("{} {}", self.code, self.label)
		}
	}
}
