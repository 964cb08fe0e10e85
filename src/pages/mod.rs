pub mod graph;
pub mod not_found;
pub mod sub_disease;

use leptos::prelude::*;

/// Shows `children`, or the collected errors when they fail to render.
#[component]
fn PageBoundary(children: Children) -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>{children()}</ErrorBoundary>
	}
}
