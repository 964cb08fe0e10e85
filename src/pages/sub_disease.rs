use leptos::prelude::*;

use super::PageBoundary;
use crate::components::network_graph::LayoutOptions;
use crate::components::{FilterControls, NetworkWorkspace, NodeList};
use crate::config::PageData;
use crate::controller::NetworkController;
use crate::model::filters::FilterBundle;

/// Subgraph of the diseases chosen on the selection page, with filter
/// controls that rebuild it in place.
#[component]
pub fn SubDiseasePage() -> impl IntoView {
	let page = PageData::from_window().map(|data| {
		let controller = NetworkController::new(
			&data,
			LayoutOptions::proof(),
			FilterBundle::subgraph_defaults(),
		);
		let selected = data.selected_codes.clone();
		let codes = selected.join(", ");
		view! {
			<NetworkWorkspace controller=controller>
				<div class="sub-disease-controls">
					<p class="selected-codes">{codes}</p>
					<FilterControls controller=controller selected=selected />
					<NodeList controller=controller />
				</div>
			</NetworkWorkspace>
		}
	});

	view! { <PageBoundary>{page}</PageBoundary> }
}
