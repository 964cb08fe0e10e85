//! JSON shapes exchanged with the backend, and their conversion into the
//! element model.

use serde::{Deserialize, Deserializer};

use crate::model::detail::DetailData;
use crate::model::elements::{
	ComorbidityEdge, DEFAULT_NODE_COLOR, DEFAULT_NODE_SIZE, DiseaseEntry, DiseaseNode, GraphElements,
};
use crate::model::filters::FilterOverrides;
use crate::model::literature::Paper;

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
	Number(f64),
	Text(String),
	#[allow(dead_code)]
	Other(serde_json::Value),
}

/// Accept a number, a numeric string, or null.
pub(crate) fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
	Ok(match Option::<Lenient>::deserialize(d)? {
		Some(Lenient::Number(n)) => Some(n),
		Some(Lenient::Text(s)) => s.trim().parse().ok(),
		_ => None,
	})
}

/// Accept a non-negative integer as number or string, or null.
pub(crate) fn lenient_u32<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
	Ok(lenient_f64(d)?
		.filter(|v| *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f64)
		.map(|v| v as u32))
}

/// Accept a string or a number rendered as text.
pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
	Ok(match Option::<Lenient>::deserialize(d)? {
		Some(Lenient::Text(s)) => Some(s),
		Some(Lenient::Number(n)) => Some(n.to_string()),
		_ => None,
	})
}

/// A node as the backend ships it: `{data, style, position, locked}`.
#[derive(Clone, Debug, Deserialize)]
pub struct WireNode {
	/// Node fields.
	pub data: WireNodeData,
	/// Inline style.
	#[serde(default)]
	pub style: WireNodeStyle,
	/// Fixed position.
	#[serde(default)]
	pub position: Option<WirePosition>,
	/// Layout lock.
	#[serde(default)]
	pub locked: bool,
}

/// `data` block of a node.
#[derive(Clone, Debug, Deserialize)]
pub struct WireNodeData {
	/// Disease code.
	pub id: String,
	/// Display name.
	#[serde(default)]
	pub label: Option<String>,
	/// Width hint.
	#[serde(default, deserialize_with = "lenient_f64")]
	pub width: Option<f64>,
	/// Height hint.
	#[serde(default, deserialize_with = "lenient_f64")]
	pub height: Option<f64>,
	/// Group tag.
	#[serde(default, deserialize_with = "lenient_string")]
	pub group: Option<String>,
}

/// `style` block of a node.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct WireNodeStyle {
	/// Fill color.
	#[serde(rename = "background-color", default)]
	pub background_color: Option<String>,
}

/// A fixed node position.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct WirePosition {
	/// X in graph units.
	pub x: f64,
	/// Y in graph units.
	pub y: f64,
}

/// An edge as the backend ships it: `{data}`.
#[derive(Clone, Debug, Deserialize)]
pub struct WireEdge {
	/// Edge fields.
	pub data: WireEdgeData,
}

/// `data` block of an edge.
#[derive(Clone, Debug, Deserialize)]
pub struct WireEdgeData {
	/// Cause code.
	pub source: String,
	/// Outcome code.
	pub target: String,
	/// Weight.
	#[serde(default, deserialize_with = "lenient_f64")]
	pub weight: Option<f64>,
	/// Follow-up period.
	#[serde(default, deserialize_with = "lenient_u32")]
	pub follow_up: Option<u32>,
	/// RR lower bound.
	#[serde(default, deserialize_with = "lenient_f64")]
	pub rr_values_min: Option<f64>,
	/// RR upper bound.
	#[serde(default, deserialize_with = "lenient_f64")]
	pub rr_values_max: Option<f64>,
	/// Chi-square threshold.
	#[serde(default, deserialize_with = "lenient_f64")]
	pub chisq_p_values: Option<f64>,
	/// Fisher threshold.
	#[serde(default, deserialize_with = "lenient_f64")]
	pub fisher_p_values: Option<f64>,
}

impl From<WireNode> for DiseaseNode {
	fn from(wire: WireNode) -> Self {
		let WireNodeData {
			id,
			label,
			width,
			height,
			group,
		} = wire.data;
		Self {
			label: label.filter(|l| !l.is_empty()).unwrap_or_else(|| id.clone()),
			id,
			width: width.filter(|w| *w > 0.0).unwrap_or(DEFAULT_NODE_SIZE),
			height: height.filter(|h| *h > 0.0).unwrap_or(DEFAULT_NODE_SIZE),
			group,
			color: wire
				.style
				.background_color
				.unwrap_or_else(|| DEFAULT_NODE_COLOR.to_string()),
			position: wire.position.map(|p| (p.x, p.y)),
			locked: wire.locked,
		}
	}
}

impl From<WireEdge> for ComorbidityEdge {
	fn from(wire: WireEdge) -> Self {
		let d = wire.data;
		Self {
			source: d.source,
			target: d.target,
			weight: d.weight.unwrap_or(0.0),
			filters: FilterOverrides {
				follow_up: d.follow_up,
				rr_min: d.rr_values_min,
				rr_max: d.rr_values_max,
				chisq: d.chisq_p_values,
				fisher: d.fisher_p_values,
			},
		}
	}
}

/// Convert wire nodes and edges into an element set.
pub fn into_elements(nodes: Vec<WireNode>, edges: Vec<WireEdge>) -> GraphElements {
	GraphElements {
		nodes: nodes.into_iter().map(DiseaseNode::from).collect(),
		edges: edges.into_iter().map(ComorbidityEdge::from).collect(),
	}
}

/// An entry of the server-rendered disease list.
#[derive(Clone, Debug, Deserialize)]
pub struct WireDiseaseEntry {
	/// Disease code.
	pub code: String,
	/// Display name; the backend calls it `Korean`.
	#[serde(default, alias = "Korean")]
	pub label: Option<String>,
}

impl From<WireDiseaseEntry> for DiseaseEntry {
	fn from(wire: WireDiseaseEntry) -> Self {
		Self {
			label: wire.label.unwrap_or_default(),
			code: wire.code,
		}
	}
}

/// Body of `get_detail_info`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DetailResponse {
	/// Breakdown payload.
	#[serde(default)]
	pub data: Option<DetailData>,
	/// Backend-reported error.
	#[serde(default)]
	pub error: Option<String>,
}

/// Body of `search_pubmed`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PubmedResponse {
	/// Papers found.
	#[serde(default)]
	pub results: Option<Vec<Paper>>,
	/// Backend-reported error.
	#[serde(default)]
	pub error: Option<String>,
}

/// Body of `sub_disease_graph`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SubgraphResponse {
	/// Replacement nodes.
	#[serde(default)]
	pub nodes: Vec<WireNode>,
	/// Replacement edges.
	#[serde(default)]
	pub edges: Vec<WireEdge>,
	/// `"CODE (label)"` lines for the node list.
	#[serde(default)]
	pub node_names: Option<Vec<String>>,
	/// Backend-reported error.
	#[serde(default)]
	pub error: Option<String>,
}
