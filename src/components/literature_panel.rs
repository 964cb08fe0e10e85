use leptos::prelude::*;

use crate::controller::NetworkController;
use crate::model::literature::{LOADING, NO_RESULTS};
use crate::model::panel::Panel;

/// Slide-out list of papers for the current selection.
#[component]
pub fn LiteraturePanel(controller: NetworkController) -> impl IntoView {
	let literature = controller.literature;

	let body = move || {
		literature.with(|slot| match slot.state() {
			Panel::Closed => ().into_any(),
			Panel::Loading(_) => view! { <p>{LOADING}</p> }.into_any(),
			Panel::Populated(_, papers) if papers.is_empty() => {
				view! { <p>{NO_RESULTS}</p> }.into_any()
			}
			Panel::Populated(_, papers) => papers
				.iter()
				.map(|paper| {
					view! {
						<p>
							<a href=paper.url.clone() target="_blank" rel="noopener noreferrer">
								{paper.title.clone()}
							</a>
						</p>
					}
				})
				.collect_view()
				.into_any(),
			Panel::Errored(_, message) => view! { <p class="panel-error">{message.clone()}</p> }.into_any(),
		})
	};

	view! {
		<div id="pubmed-slide" class="pubmed-slide" class:show=move || literature.with(|s| s.is_open())>
			<button class="close-button" on:click=move |_| controller.close_literature()>
				"×"
			</button>
			<div id="pubmed-slide-body">{body}</div>
		</div>
	}
}
