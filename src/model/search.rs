//! Disease list search.

use super::elements::DiseaseEntry;

/// Whether `code` matches the search box text: trimmed, case-insensitive
/// substring. An empty query matches everything.
pub fn matches(code: &str, query: &str) -> bool {
	let query = query.trim().to_uppercase();
	query.is_empty() || code.to_uppercase().contains(&query)
}

/// Visibility of every entry for `query`.
pub fn filter_entries(entries: &[DiseaseEntry], query: &str) -> Vec<bool> {
	entries.iter().map(|e| matches(&e.code, query)).collect()
}
