use leptos::prelude::*;

use crate::controller::NetworkController;

/// Names of the nodes in the current subgraph, one line each.
#[component]
pub fn NodeList(controller: NetworkController) -> impl IntoView {
	view! {
		<ul id="node-list" class="node-list">
			{move || {
				controller
					.node_names
					.get()
					.into_iter()
					.map(|name| {
						view! { <li style="padding: 5px; border-bottom: 1px solid #eee;">{name}</li> }
					})
					.collect_view()
			}}
		</ul>
	}
}
