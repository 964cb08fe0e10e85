//! Browser client for a disease comorbidity network: graph view, neighborhood
//! highlighting, demographic detail panels, literature lookup, and subgraph
//! rebuilds against the `/network/` backend.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod api;
pub mod config;
pub mod error;
pub mod model;

// Modules
mod components;
mod controller;
mod pages;

// Top-Level pages
use crate::pages::graph::GraphPage;
use crate::pages::not_found::NotFound;
use crate::pages::sub_disease::SubDiseasePage;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the network pages and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="ko" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="질병 동반이환 네트워크" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=GraphPage />
				<Route path=path!("/network/graph") view=GraphPage />
				<Route path=path!("/network/sub_disease_graph") view=SubDiseasePage />
			</Routes>
		</Router>
	}
}
