use std::collections::HashSet;

use leptos::prelude::*;

use crate::controller::NetworkController;
use crate::model::search::filter_entries;

/// Searchable disease list; clicking an entry focuses its node.
#[component]
pub fn DiseaseList(controller: NetworkController) -> impl IntoView {
	let query = RwSignal::new(String::new());
	let shown = RwSignal::new(true);
	let visible = Memo::new(move |_| {
		let query = query.get();
		controller.entries.with(|entries| filter_entries(entries, &query))
	});

	let items = move || {
		controller
			.entries
			.get()
			.into_iter()
			.enumerate()
			.map(|(i, entry)| {
				let code = entry.code.clone();
				view! {
					<div
						class="disease-item"
						data-code=entry.code.clone()
						style:display=move || {
							if visible.with(|v| v.get(i).copied().unwrap_or(true)) { "block" } else { "none" }
						}
						on:click=move |_| controller.focus_from_list(&code)
					>
						{entry.display()}
					</div>
				}
			})
			.collect_view()
	};

	view! {
		<button class="list-toggle" on:click=move |_| shown.update(|s| *s = !*s)>
			"질병 목록"
		</button>
		<div id="disease-list" class="disease-list" class:show=move || shown.get()>
			<input
				id="search-bar"
				type="text"
				placeholder="질병 코드 검색"
				prop:value=move || query.get()
				on:input=move |ev| query.set(event_target_value(&ev))
			/>
			<GroupToggles controller=controller />
			{items}
		</div>
	}
}

/// One checkbox per node group; unchecking hides that group. The boxes are
/// rebuilt, all checked, whenever a reload brings a new set of groups.
#[component]
fn GroupToggles(controller: NetworkController) -> impl IntoView {
	move || {
		let groups = controller.groups.get();
		let active = StoredValue::new(groups.iter().cloned().collect::<HashSet<String>>());

		groups
			.into_iter()
			.map(|group| {
				let name = group.clone();
				let on_change = move |ev: leptos::ev::Event| {
					let checked = event_target_checked(&ev);
					active.update_value(|active| {
						if checked {
							active.insert(name.clone());
						} else {
							active.remove(&name);
						}
					});
					active.with_value(|active| controller.apply_groups(active));
				};
				view! {
					<label class="group-toggle-label">
						<input
							type="checkbox"
							class="group-toggle"
							data-group=group.clone()
							checked=true
							on:change=on_change
						/>
						{group}
					</label>
				}
			})
			.collect_view()
	}
}
