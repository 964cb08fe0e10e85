//! Literature lookups for a node or an edge.

use serde::Deserialize;

use crate::api::types::PubmedResponse;

/// Shown when the search returns no papers.
pub const NO_RESULTS: &str = "관련 논문이 없습니다.";
/// Shown while the search is in flight.
pub const LOADING: &str = "논문을 불러오는 중...";
/// Shown when the search request fails in transport or decoding.
pub const FETCH_FAILED: &str = "논문을 불러오는 중 오류가 발생했습니다.";

/// A related paper.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Paper {
	/// Paper title.
	#[serde(default)]
	pub title: String,
	/// PubMed link.
	#[serde(default)]
	pub url: String,
}

/// What to search literature for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiteratureQuery {
	/// One disease code.
	Disease(String),
	/// Two distinct disease codes.
	Pair {
		/// Cause code.
		source: String,
		/// Outcome code.
		target: String,
	},
}

impl LiteratureQuery {
	/// A pair query when `target` is present and differs from `source`,
	/// otherwise a single-disease query.
	pub fn for_selection(source: &str, target: Option<&str>) -> Self {
		match target {
			Some(target) if target != source => LiteratureQuery::Pair {
				source: source.to_string(),
				target: target.to_string(),
			},
			_ => LiteratureQuery::Disease(source.to_string()),
		}
	}
}

/// Turn a search response into a paper list or an inline error message.
pub fn interpret(response: PubmedResponse) -> Result<Vec<Paper>, String> {
	match response {
		PubmedResponse {
			results: Some(papers),
			..
		} if !papers.is_empty() => Ok(papers),
		PubmedResponse {
			error: Some(error), ..
		} => Err(error),
		_ => Ok(Vec::new()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pair_needs_distinct_endpoints() {
		assert_eq!(
			LiteratureQuery::for_selection("A", Some("A")),
			LiteratureQuery::Disease("A".into())
		);
		assert_eq!(
			LiteratureQuery::for_selection("A", None),
			LiteratureQuery::Disease("A".into())
		);
		assert_eq!(
			LiteratureQuery::for_selection("A", Some("B")),
			LiteratureQuery::Pair {
				source: "A".into(),
				target: "B".into()
			}
		);
	}

	#[test]
	fn interprets_results_and_errors() {
		let found: PubmedResponse = serde_json::from_str(
			r#"{"results":[{"title":"Diabetes and CKD","url":"https://pubmed.ncbi.nlm.nih.gov/1/"}]}"#,
		)
		.unwrap();
		let papers = interpret(found).unwrap();
		assert_eq!(papers.len(), 1);
		assert_eq!(papers[0].title, "Diabetes and CKD");

		let empty: PubmedResponse = serde_json::from_str(r#"{"results":[]}"#).unwrap();
		assert_eq!(interpret(empty), Ok(Vec::new()));

		let failed: PubmedResponse = serde_json::from_str(r#"{"error":"PubMed 검색 실패"}"#).unwrap();
		assert_eq!(interpret(failed), Err("PubMed 검색 실패".to_string()));
	}
}
