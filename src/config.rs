//! Page configuration: the `window.graphData` object injected by the host
//! page, and where the backend lives.

use log::debug;
use serde::{Deserialize, Deserializer};
use wasm_bindgen::JsValue;

use crate::api::types::{
	WireDiseaseEntry, WireEdge, WireNode, into_elements, lenient_f64, lenient_u32,
};
use crate::error::ConfigError;
use crate::model::elements::{DiseaseEntry, GraphElements};
use crate::model::filters::FilterBundle;

/// Global the host page injects the graph under.
pub const GRAPH_DATA_GLOBAL: &str = "graphData";

const DEFAULT_API_BASE: &str = "/network";

/// Base path of the backend endpoints.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
	base: String,
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self::new(DEFAULT_API_BASE)
	}
}

impl ApiConfig {
	/// Endpoints under `base` (trailing slashes are ignored).
	pub fn new(base: impl Into<String>) -> Self {
		let base: String = base.into();
		Self {
			base: base.trim_end_matches('/').to_string(),
		}
	}

	/// URL of `name`, with the trailing slash the backend routes expect.
	pub fn endpoint(&self, name: &str) -> String {
		format!("{}/{name}/", self.base)
	}
}

fn codes<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum Codes {
		Csv(String),
		List(Vec<String>),
	}
	let list = match Option::<Codes>::deserialize(d)? {
		Some(Codes::Csv(csv)) => csv.split(',').map(str::to_string).collect(),
		Some(Codes::List(list)) => list,
		None => Vec::new(),
	};
	Ok(list
		.into_iter()
		.map(|c| c.trim().to_string())
		.filter(|c| !c.is_empty())
		.collect())
}

/// Contents of `window.graphData`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct PageData {
	/// Initial nodes.
	#[serde(default)]
	pub nodes: Vec<WireNode>,
	/// Initial edges.
	#[serde(default)]
	pub edges: Vec<WireEdge>,
	/// Follow-up period the edges were selected with.
	#[serde(default, deserialize_with = "lenient_u32")]
	pub follow_up: Option<u32>,
	/// RR lower bound.
	#[serde(default, deserialize_with = "lenient_f64")]
	pub rr_min: Option<f64>,
	/// RR upper bound.
	#[serde(default, deserialize_with = "lenient_f64")]
	pub rr_max: Option<f64>,
	/// Chi-square threshold.
	#[serde(default, deserialize_with = "lenient_f64")]
	pub chisq: Option<f64>,
	/// Fisher threshold.
	#[serde(default, deserialize_with = "lenient_f64")]
	pub fisher: Option<f64>,
	/// Diseases chosen on the multi-disease page.
	#[serde(default, deserialize_with = "codes")]
	pub selected_codes: Vec<String>,
	/// Lines of the node list on the multi-disease page.
	#[serde(default)]
	pub node_names: Vec<String>,
	/// Searchable disease list; derived from the nodes when empty.
	#[serde(default)]
	pub disease_list: Vec<WireDiseaseEntry>,
	/// Backend base path.
	#[serde(default)]
	pub api_base: Option<String>,
}

impl PageData {
	/// Parse the JSON text of the injected object.
	pub fn from_json(json: &str) -> Result<Self, ConfigError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Read the object from a JS value.
	pub fn from_js(value: &JsValue) -> Result<Self, ConfigError> {
		if value.is_undefined() || value.is_null() {
			return Err(ConfigError::MissingGraphData);
		}
		let json = js_sys::JSON::stringify(value)
			.ok()
			.and_then(|s| s.as_string())
			.ok_or(ConfigError::Unserializable)?;
		Self::from_json(&json)
	}

	/// Read `window.graphData`.
	pub fn from_window() -> Result<Self, ConfigError> {
		let window = web_sys::window().ok_or(ConfigError::NoWindow)?;
		let value = js_sys::Reflect::get(&window, &JsValue::from_str(GRAPH_DATA_GLOBAL))
			.map_err(|_| ConfigError::MissingGraphData)?;
		let data = Self::from_js(&value)?;
		debug!(
			"graph data: {} nodes, {} edges",
			data.nodes.len(),
			data.edges.len()
		);
		Ok(data)
	}

	/// Page-level filter bundle, falling back to `defaults` per field.
	pub fn filters(&self, defaults: FilterBundle) -> FilterBundle {
		FilterBundle {
			follow_up: self.follow_up.unwrap_or(defaults.follow_up),
			rr_min: self.rr_min.unwrap_or(defaults.rr_min),
			rr_max: self.rr_max.unwrap_or(defaults.rr_max),
			chisq: self.chisq.unwrap_or(defaults.chisq),
			fisher: self.fisher.unwrap_or(defaults.fisher),
		}
	}

	/// Initial element set.
	pub fn elements(&self) -> GraphElements {
		into_elements(self.nodes.clone(), self.edges.clone())
	}

	/// Disease list entries.
	pub fn disease_entries(&self, elements: &GraphElements) -> Vec<DiseaseEntry> {
		if self.disease_list.is_empty() {
			elements.disease_entries()
		} else {
			self.disease_list.iter().cloned().map(DiseaseEntry::from).collect()
		}
	}

	/// Backend configuration.
	pub fn api(&self) -> ApiConfig {
		self.api_base
			.as_deref()
			.map(ApiConfig::new)
			.unwrap_or_default()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_main_page_data() {
		let data = PageData::from_json(
			r#"{"nodes":[{"data":{"id":"E11","label":"당뇨병"}},{"data":{"id":"N18"}}],
			    "edges":[{"data":{"source":"E11","target":"N18","weight":2.4}}],
			    "follow_up":"3","rr_min":0,"rr_max":"2","chisq":0.05,"fisher":0.01}"#,
		)
		.unwrap();
		let filters = data.filters(FilterBundle::network_defaults());
		assert_eq!(filters.follow_up, 3);
		assert_eq!(filters.rr_max, 2.0);
		assert_eq!(filters.fisher, 0.01);

		let elements = data.elements();
		assert_eq!(elements.nodes.len(), 2);
		let entries = data.disease_entries(&elements);
		assert_eq!(entries[0].display(), "E11 당뇨병");
		assert_eq!(entries[1].display(), "N18");
		assert_eq!(data.api(), ApiConfig::default());
	}

	#[test]
	fn selected_codes_accept_csv_or_list() {
		let csv = PageData::from_json(r#"{"selected_codes":"E11, I10,"}"#).unwrap();
		assert_eq!(csv.selected_codes, ["E11", "I10"]);
		let list = PageData::from_json(r#"{"selected_codes":["E11","I10"]}"#).unwrap();
		assert_eq!(list.selected_codes, ["E11", "I10"]);
		let none = PageData::from_json(r#"{"selected_codes":null}"#).unwrap();
		assert!(none.selected_codes.is_empty());
	}

	#[test]
	fn missing_filters_use_page_defaults() {
		let data = PageData::from_json("{}").unwrap();
		assert_eq!(
			data.filters(FilterBundle::subgraph_defaults()),
			FilterBundle::subgraph_defaults()
		);
	}

	#[test]
	fn server_disease_list_wins() {
		let data = PageData::from_json(
			r#"{"nodes":[{"data":{"id":"E11"}}],
			    "disease_list":[{"code":"E11","Korean":"당뇨병"},{"code":"I10"}]}"#,
		)
		.unwrap();
		let entries = data.disease_entries(&data.elements());
		assert_eq!(entries.len(), 2);
		assert_eq!(entries[0].label, "당뇨병");
	}

	#[test]
	fn api_base_trailing_slash_is_ignored() {
		let api = ApiConfig::new("/api/network/");
		assert_eq!(api.endpoint("search_pubmed"), "/api/network/search_pubmed/");
	}

	#[test]
	fn malformed_data_is_an_error() {
		assert!(matches!(
			PageData::from_json(r#"{"nodes":{}}"#),
			Err(ConfigError::Invalid(_))
		));
	}
}
