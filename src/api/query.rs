//! URLs of the backend endpoints.

use crate::config::ApiConfig;
use crate::model::filters::FilterBundle;
use crate::model::literature::LiteratureQuery;

/// `key=value` pairs joined with `&`, values percent-encoded.
#[derive(Default)]
struct QueryString(Vec<String>);

impl QueryString {
	fn push(&mut self, key: &str, value: impl ToString) -> &mut Self {
		self.0
			.push(format!("{key}={}", urlencoding::encode(&value.to_string())));
		self
	}

	/// Comma-separated list; commas stay literal.
	fn push_list(&mut self, key: &str, values: &[String]) -> &mut Self {
		let joined = values
			.iter()
			.map(|v| urlencoding::encode(v).into_owned())
			.collect::<Vec<_>>()
			.join(",");
		self.0.push(format!("{key}={joined}"));
		self
	}

	fn push_filters(&mut self, filters: &FilterBundle) -> &mut Self {
		self.push("follow_up", filters.follow_up)
			.push("rr_values_min", filters.rr_min)
			.push("rr_values_max", filters.rr_max)
			.push("chisq_p_values", filters.chisq)
			.push("fisher_p_values", filters.fisher)
	}

	fn url(&self, api: &ApiConfig, endpoint: &str) -> String {
		format!("{}?{}", api.endpoint(endpoint), self.0.join("&"))
	}
}

/// A `get_detail_info` request.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailRequest {
	/// Breakdown of one disease.
	Node {
		/// Disease code.
		id: String,
	},
	/// Breakdown of the patients behind one edge.
	Edge {
		/// Cause code.
		source: String,
		/// Outcome code.
		target: String,
		/// Filters the edge was selected with.
		filters: FilterBundle,
	},
}

impl DetailRequest {
	/// Request URL.
	pub fn url(&self, api: &ApiConfig) -> String {
		let mut q = QueryString::default();
		match self {
			DetailRequest::Node { id } => {
				q.push("type", "node").push("node_id", id);
			}
			DetailRequest::Edge {
				source,
				target,
				filters,
			} => {
				q.push("type", "edge")
					.push("source", source)
					.push("target", target)
					.push_filters(filters);
			}
		}
		q.url(api, "get_detail_info")
	}
}

impl LiteratureQuery {
	/// `search_pubmed` URL.
	pub fn url(&self, api: &ApiConfig) -> String {
		let mut q = QueryString::default();
		match self {
			LiteratureQuery::Disease(code) => {
				q.push("code", code);
			}
			LiteratureQuery::Pair { source, target } => {
				q.push("source", source).push("target", target);
			}
		}
		q.url(api, "search_pubmed")
	}
}

/// A `sub_disease_graph` request.
#[derive(Clone, Debug, PartialEq)]
pub struct SubgraphRequest {
	/// Selected disease codes.
	pub diseases: Vec<String>,
	/// Edge filters.
	pub filters: FilterBundle,
}

impl SubgraphRequest {
	/// Request URL.
	pub fn url(&self, api: &ApiConfig) -> String {
		let mut q = QueryString::default();
		q.push_list("diseases", &self.diseases)
			.push_filters(&self.filters);
		q.url(api, "sub_disease_graph")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn api() -> ApiConfig {
		ApiConfig::default()
	}

	#[test]
	fn node_detail_url() {
		let url = DetailRequest::Node { id: "E11".into() }.url(&api());
		assert_eq!(url, "/network/get_detail_info/?type=node&node_id=E11");
	}

	#[test]
	fn edge_detail_forwards_filter_bundle() {
		let request = DetailRequest::Edge {
			source: "A".into(),
			target: "B".into(),
			filters: FilterBundle {
				follow_up: 5,
				rr_min: 0.0,
				rr_max: 2.0,
				chisq: 0.05,
				fisher: 0.05,
			},
		};
		let url = request.url(&api());
		assert_eq!(
			url,
			"/network/get_detail_info/?type=edge&source=A&target=B&follow_up=5\
			 &rr_values_min=0&rr_values_max=2&chisq_p_values=0.05&fisher_p_values=0.05"
		);
		assert!(url.contains("follow_up=5"));
	}

	#[test]
	fn literature_urls() {
		assert_eq!(
			LiteratureQuery::Disease("E11".into()).url(&api()),
			"/network/search_pubmed/?code=E11"
		);
		assert_eq!(
			LiteratureQuery::for_selection("E11", Some("N18")).url(&api()),
			"/network/search_pubmed/?source=E11&target=N18"
		);
	}

	#[test]
	fn subgraph_url_keeps_commas_and_encodes_values() {
		let request = SubgraphRequest {
			diseases: vec!["E11".into(), "I10".into(), "A B".into()],
			filters: FilterBundle::subgraph_defaults(),
		};
		assert_eq!(
			request.url(&api()),
			"/network/sub_disease_graph/?diseases=E11,I10,A%20B&follow_up=1\
			 &rr_values_min=1.1&rr_values_max=1.3&chisq_p_values=0.5&fisher_p_values=0.5"
		);
	}

	#[test]
	fn custom_base_is_used() {
		let api = ApiConfig::new("https://example.org/network/");
		assert_eq!(
			DetailRequest::Node { id: "K21".into() }.url(&api),
			"https://example.org/network/get_detail_info/?type=node&node_id=K21"
		);
	}
}
