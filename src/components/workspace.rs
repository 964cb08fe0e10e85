use leptos::prelude::*;

use super::detail_sidebar::DetailSidebar;
use super::literature_panel::LiteraturePanel;
use super::network_graph::NetworkCanvas;
use crate::controller::NetworkController;

/// Hover box with the code and name of the node under the pointer.
#[component]
fn NodeInfo(controller: NetworkController) -> impl IntoView {
	let info = controller.hover_info;
	view! {
		<div
			id="node-info"
			class="node-info"
			style:display=move || if info.with(Option::is_some) { "block" } else { "none" }
		>
			{move || info.get().unwrap_or_default()}
		</div>
	}
}

/// Full-screen network with its hover box and both side panels; `children`
/// go in between as page-specific controls.
#[component]
pub fn NetworkWorkspace(controller: NetworkController, children: Children) -> impl IntoView {
	view! {
		<div class="network-page">
			<NetworkCanvas controller=controller />
			<NodeInfo controller=controller />
			<div class="page-controls">{children()}</div>
			<DetailSidebar controller=controller />
			<LiteraturePanel controller=controller />
		</div>
	}
}
