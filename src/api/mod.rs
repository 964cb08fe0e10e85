//! Backend access: wire types, URL construction and the fetch helper.

mod client;
pub mod query;
pub mod types;

pub use client::get_json;
pub use query::{DetailRequest, SubgraphRequest};
