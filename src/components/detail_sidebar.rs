use leptos::prelude::*;

use super::charts::ChartCanvas;
use crate::controller::NetworkController;
use crate::model::detail::Subject;
use crate::model::panel::Panel;

#[component]
fn SubjectHeading(subject: Subject) -> impl IntoView {
	subject
		.heading()
		.into_iter()
		.map(|line| view! { <p class="subject-heading"><strong>{line}</strong></p> })
		.collect_view()
}

/// Sidebar with the demographic breakdown of the selected node or edge.
#[component]
pub fn DetailSidebar(controller: NetworkController) -> impl IntoView {
	let detail = controller.detail;

	let body = move || {
		detail.with(|slot| match slot.state() {
			Panel::Closed => ().into_any(),
			Panel::Loading(subject) => view! {
				<SubjectHeading subject=subject.clone() />
				<p>{subject.loading_message()}</p>
			}
			.into_any(),
			Panel::Errored(subject, message) => view! {
				<p><strong>{subject.short_heading()}</strong></p>
				<p class="panel-error">{message.clone()}</p>
			}
			.into_any(),
			Panel::Populated(subject, charts) => {
				let query = subject.literature_query();
				let charts = charts
					.iter()
					.cloned()
					.map(|spec| {
						let title = spec.title;
						view! {
							<div class="graph-box">
								<h4>{title}</h4>
								<ChartCanvas spec=spec />
							</div>
						}
					})
					.collect_view();
				view! {
					<SubjectHeading subject=subject.clone() />
					<div class="pubmed-button-container">
						<button
							id="pubmed-button"
							on:click=move |_| controller.open_literature(query.clone())
						>
							"관련 논문 보기"
						</button>
					</div>
					{charts}
				}
				.into_any()
			}
		})
	};

	view! {
		<aside id="info-sidebar" class="info-sidebar" class:open=move || detail.with(|s| s.is_open())>
			<button class="close-button" on:click=move |_| controller.close_detail()>
				"×"
			</button>
			<div id="sidebar-body">{body}</div>
		</aside>
	}
}
