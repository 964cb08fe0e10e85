use leptos::prelude::*;
use log::warn;

use crate::api::SubgraphRequest;
use crate::controller::{NetworkController, alert};
use crate::model::filters::FilterBundle;

#[component]
fn NumberInput(id: &'static str, label: &'static str, value: RwSignal<String>) -> impl IntoView {
	view! {
		<label class="filter-field">
			{label}
			<input
				id=id
				type="number"
				step="any"
				prop:value=move || value.get()
				on:input=move |ev| value.set(event_target_value(&ev))
			/>
		</label>
	}
}

/// Filter inputs of the multi-disease page; the button rebuilds the subgraph
/// for `selected` with the entered thresholds.
#[component]
pub fn FilterControls(controller: NetworkController, selected: Vec<String>) -> impl IntoView {
	let initial = controller.filters();
	let follow_up = RwSignal::new(initial.follow_up.to_string());
	let rr_min = RwSignal::new(initial.rr_min.to_string());
	let rr_max = RwSignal::new(initial.rr_max.to_string());
	let chisq = RwSignal::new(initial.chisq.to_string());
	let fisher = RwSignal::new(initial.fisher.to_string());

	let submit = move |_| {
		let parsed = FilterBundle::parse_inputs(
			&follow_up.get_untracked(),
			&rr_min.get_untracked(),
			&rr_max.get_untracked(),
			&chisq.get_untracked(),
			&fisher.get_untracked(),
		);
		match parsed {
			Ok(filters) => controller.reload_subgraph(SubgraphRequest {
				diseases: selected.clone(),
				filters,
			}),
			Err(err) => {
				warn!("{err}");
				alert(&err.to_string());
			}
		}
	};

	view! {
		<div class="filter-controls">
			<label class="filter-field">
				"Follow-up: "
				<span id="follow-up-text">{move || follow_up.get()}</span>
				<input
					id="follow-up-slider"
					type="range"
					min="1"
					max="10"
					step="1"
					prop:value=move || follow_up.get()
					on:input=move |ev| follow_up.set(event_target_value(&ev))
				/>
			</label>
			<NumberInput id="rr-min" label="RR min" value=rr_min />
			<NumberInput id="rr-max" label="RR max" value=rr_max />
			<NumberInput id="chisq-p" label="Chi-square p" value=chisq />
			<NumberInput id="fisher-p" label="Fisher p" value=fisher />
			<button class="update-button" on:click=submit>
				"그래프 업데이트"
			</button>
		</div>
	}
}
