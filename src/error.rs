//! Error types shared by the page, the fetch layer and the controllers.

use thiserror::Error;

/// Failure while talking to the backend.
#[derive(Debug, Error)]
pub enum FetchError {
	/// The code is not running inside a browser window.
	#[error("no browser window available")]
	NoWindow,

	/// The request could not be built, sent, or its body read.
	#[error("request to {url} failed: {message}")]
	Transport {
		/// Request URL.
		url: String,
		/// Message extracted from the thrown JS value.
		message: String,
	},

	/// The response body was not the expected JSON.
	#[error("malformed response body: {0}")]
	Decode(#[from] serde_json::Error),
}

/// The injected page data is missing or unreadable.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// No browser window available.
	#[error("no browser window available")]
	NoWindow,

	/// `window.graphData` is undefined.
	#[error("window.graphData is not defined on this page")]
	MissingGraphData,

	/// `window.graphData` could not be serialized by the browser.
	#[error("window.graphData could not be serialized")]
	Unserializable,

	/// `window.graphData` has an unexpected shape.
	#[error("invalid graph data: {0}")]
	Invalid(#[from] serde_json::Error),
}

/// A node id was looked up that the graph does not contain.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("node {0} is not in the graph")]
pub struct LookupError(pub String);

/// A filter control holds a value that is not a number.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{field} must be a number, got {value:?}")]
pub struct InputError {
	/// Control name.
	pub field: &'static str,
	/// Raw control value.
	pub value: String,
}
