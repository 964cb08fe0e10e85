//! Browser-independent state of the network page.

pub mod detail;
pub mod elements;
pub mod filters;
pub mod literature;
pub mod network;
pub mod panel;
pub mod search;
