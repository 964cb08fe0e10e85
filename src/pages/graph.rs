use leptos::prelude::*;

use super::PageBoundary;
use crate::components::network_graph::LayoutOptions;
use crate::components::{DiseaseList, NetworkWorkspace};
use crate::config::PageData;
use crate::controller::NetworkController;
use crate::model::filters::FilterBundle;

/// Main comorbidity network page.
#[component]
pub fn GraphPage() -> impl IntoView {
	let page = PageData::from_window().map(|data| {
		let controller = NetworkController::new(
			&data,
			LayoutOptions::overview(),
			FilterBundle::network_defaults(),
		);
		view! {
			<NetworkWorkspace controller=controller>
				<DiseaseList controller=controller />
			</NetworkWorkspace>
		}
	});

	view! { <PageBoundary>{page}</PageBoundary> }
}
