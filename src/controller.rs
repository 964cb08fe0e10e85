//! The single owner of the network view and its panels.
//!
//! Components receive a [`NetworkController`] as a prop and route every user
//! action through it. Graph state lives in a local stored value; panel state
//! lives in signals the sidebars render from.

use std::collections::HashSet;

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, error, info, warn};
use serde::de::DeserializeOwned;

use crate::api::types::{DetailResponse, PubmedResponse, SubgraphResponse, into_elements};
use crate::api::{DetailRequest, SubgraphRequest, get_json};
use crate::components::network_graph::{LayoutOptions, NetworkState, TapTarget};
use crate::config::{ApiConfig, PageData};
use crate::error::LookupError;
use crate::model::detail::{self, ChartSpec, Subject};
use crate::model::elements::DiseaseEntry;
use crate::model::filters::FilterBundle;
use crate::model::literature::{self, LiteratureQuery, Paper};
use crate::model::panel::{PanelSlot, RequestToken};

/// Shown when a list entry names a node the graph does not contain.
pub const NODE_NOT_FOUND: &str = "그래프에 해당 노드가 없습니다.";

const INITIAL_WIDTH: f64 = 800.0;
const INITIAL_HEIGHT: f64 = 600.0;

pub type DetailSlot = PanelSlot<Subject, Vec<ChartSpec>>;
pub type LiteratureSlot = PanelSlot<LiteratureQuery, Vec<Paper>>;

/// Show a blocking browser alert.
pub fn alert(message: &str) {
	if let Some(window) = web_sys::window() {
		let _ = window.alert_with_message(message);
	}
}

#[derive(Clone, Copy)]
pub struct NetworkController {
	state: StoredValue<NetworkState, LocalStorage>,
	api: StoredValue<ApiConfig>,
	filters: StoredValue<FilterBundle>,
	pub groups: RwSignal<Vec<String>>,
	pub entries: RwSignal<Vec<DiseaseEntry>>,
	pub detail: RwSignal<DetailSlot>,
	pub literature: RwSignal<LiteratureSlot>,
	pub hover_info: RwSignal<Option<String>>,
	pub node_names: RwSignal<Vec<String>>,
}

impl NetworkController {
	pub fn new(page: &PageData, options: LayoutOptions, defaults: FilterBundle) -> Self {
		let elements = page.elements();
		let entries = page.disease_entries(&elements);
		let state = NetworkState::new(elements, options, INITIAL_WIDTH, INITIAL_HEIGHT);
		info!(
			"network loaded: {} nodes, {} edges",
			state.model.nodes().len(),
			state.model.edges().len()
		);
		let groups = state.model.groups();
		Self {
			state: StoredValue::new_local(state),
			api: StoredValue::new(page.api()),
			filters: StoredValue::new(page.filters(defaults)),
			groups: RwSignal::new(groups),
			entries: RwSignal::new(entries),
			detail: RwSignal::new(PanelSlot::default()),
			literature: RwSignal::new(PanelSlot::default()),
			hover_info: RwSignal::new(None),
			node_names: RwSignal::new(page.node_names.clone()),
		}
	}

	pub fn with_state<U>(&self, f: impl FnOnce(&NetworkState) -> U) -> U {
		self.state.with_value(f)
	}

	pub fn update_state<U>(&self, f: impl FnOnce(&mut NetworkState) -> U) -> Option<U> {
		let mut out = None;
		self.state.update_value(|state| out = Some(f(state)));
		out
	}

	/// Filter values in effect for edge detail requests.
	pub fn filters(&self) -> FilterBundle {
		self.filters.get_value()
	}

	/// Update the hover box after the hovered node changed.
	pub fn hover_changed(&self, node: Option<usize>) {
		let id = node.and_then(|i| self.with_state(|s| s.model.nodes().get(i).map(|n| n.id.clone())));
		let info = id.and_then(|id| {
			self.entries
				.with_untracked(|entries| entries.iter().find(|e| e.code == id).map(DiseaseEntry::display))
		});
		self.hover_info.set(info);
	}

	/// Dispatch a click that did not move the pointer.
	pub fn tap_at(&self, x: f64, y: f64) {
		match self.with_state(|s| s.tap_target(x, y)) {
			TapTarget::Node(i) => self.open_node_detail(i),
			TapTarget::Edge(e) => self.open_edge_detail(e),
			TapTarget::Background => self.close_panels(),
		}
	}

	/// Highlight `code` and zoom onto it. An unknown code leaves the current
	/// highlight untouched.
	pub fn focus_node(&self, code: &str) -> Result<usize, LookupError> {
		self.update_state(|s| s.focus(code))
			.unwrap_or_else(|| Err(LookupError(code.to_string())))
	}

	/// Disease list click: focus the node or alert that it is missing.
	pub fn focus_from_list(&self, code: &str) {
		if let Err(err) = self.focus_node(code) {
			warn!("{err}");
			alert(NODE_NOT_FOUND);
		}
	}

	/// Show only the elements allowed by the active groups.
	pub fn apply_groups(&self, active: &HashSet<String>) {
		self.update_state(|s| s.model.apply_groups(active));
	}

	pub fn open_node_detail(&self, i: usize) {
		let Some((id, label)) = self.with_state(|s| {
			s.model
				.nodes()
				.get(i)
				.map(|node| (node.id.clone(), node.label.clone()))
		}) else {
			return;
		};
		let request = DetailRequest::Node { id: id.clone() };
		self.fetch_detail(Subject::Node { id, label }, request);
	}

	pub fn open_edge_detail(&self, e: usize) {
		let base = self.filters();
		let Some((subject, request)) = self.with_state(|s| {
			let edge = s.model.edges().get(e)?;
			let (si, ti) = s.model.endpoints(e);
			let (source, target) = (&s.model.nodes()[si], &s.model.nodes()[ti]);
			let subject = Subject::Edge {
				source: source.id.clone(),
				source_label: source.label.clone(),
				target: target.id.clone(),
				target_label: target.label.clone(),
			};
			let request = DetailRequest::Edge {
				source: source.id.clone(),
				target: target.id.clone(),
				filters: edge.filters.resolve(base),
			};
			Some((subject, request))
		}) else {
			return;
		};
		self.fetch_detail(subject, request);
	}

	fn fetch_detail(&self, subject: Subject, request: DetailRequest) {
		let url = request.url(&self.api.get_value());
		let charts_for = subject.clone();
		spawn_panel_request(
			self.detail,
			subject,
			url,
			move |response: DetailResponse| detail::interpret(&charts_for, response),
			detail::FETCH_FAILED,
		);
	}

	pub fn close_detail(&self) {
		self.detail.update(|slot| slot.close());
	}

	pub fn open_literature(&self, query: LiteratureQuery) {
		let url = query.url(&self.api.get_value());
		spawn_panel_request(
			self.literature,
			query,
			url,
			|response: PubmedResponse| literature::interpret(response),
			literature::FETCH_FAILED,
		);
	}

	pub fn close_literature(&self) {
		self.literature.update(|slot| slot.close());
	}

	/// Background click: close both panels and hide the hover box.
	pub fn close_panels(&self) {
		self.close_detail();
		self.close_literature();
		self.hover_info.set(None);
	}

	/// Fetch a subgraph for the selected diseases and swap it in.
	pub fn reload_subgraph(&self, request: SubgraphRequest) {
		let url = request.url(&self.api.get_value());
		let this = *self;
		info!("requesting subgraph for {} diseases", request.diseases.len());
		spawn_local(async move {
			match get_json::<SubgraphResponse>(&url, true).await {
				Ok(SubgraphResponse {
					error: Some(message),
					..
				}) if !message.is_empty() => {
					warn!("subgraph rejected: {message}");
					alert(&format!("❌ 오류: {message}"));
				}
				Ok(response) => this.replace_graph(response, request.filters),
				Err(err) => error!("subgraph request failed: {err}"),
			}
		});
	}

	fn replace_graph(&self, response: SubgraphResponse, filters: FilterBundle) {
		let elements = into_elements(response.nodes, response.edges);
		let entries = elements.disease_entries();
		let groups = self
			.update_state(|s| {
				s.replace(elements, LayoutOptions::proof());
				s.model.groups()
			})
			.unwrap_or_default();
		self.groups.set(groups);
		self.filters.set_value(filters);
		self.entries.set(entries);
		self.hover_info.set(None);
		if let Some(names) = response.node_names {
			self.node_names.set(names);
		}
	}
}

/// Open `slot` on `subject`, fetch `url`, and settle the slot with the
/// interpreted body. Responses to superseded requests are dropped.
fn spawn_panel_request<S, T, R>(
	slot: RwSignal<PanelSlot<S, T>>,
	subject: S,
	url: String,
	interpret: impl FnOnce(R) -> Result<T, String> + 'static,
	failure: &'static str,
) where
	S: Send + Sync + 'static,
	T: Send + Sync + 'static,
	R: DeserializeOwned + 'static,
{
	let Some(token) = open_panel(slot, subject) else {
		return;
	};
	spawn_local(async move {
		let outcome = match get_json::<R>(&url, false).await {
			Ok(body) => interpret(body),
			Err(err) => {
				error!("{err}");
				Err(failure.to_string())
			}
		};
		if !settle_panel(slot, token, outcome) {
			debug!("dropping stale response from {url}");
		}
	});
}

/// Put `slot` in loading state for `subject`.
fn open_panel<S, T>(slot: RwSignal<PanelSlot<S, T>>, subject: S) -> Option<RequestToken>
where
	S: Send + Sync + 'static,
	T: Send + Sync + 'static,
{
	let mut token = None;
	slot.update(|slot| token = Some(slot.open(subject)));
	token
}

/// Settle `slot` with the outcome of request `token`. Returns `false` when
/// the request was superseded and the outcome dropped.
fn settle_panel<S, T>(
	slot: RwSignal<PanelSlot<S, T>>,
	token: RequestToken,
	outcome: Result<T, String>,
) -> bool
where
	S: Send + Sync + 'static,
	T: Send + Sync + 'static,
{
	let mut settled = false;
	slot.update(|slot| settled = slot.settle(token, outcome));
	settled
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::panel::Panel;

	const PAGE: &str = r#"{
		"nodes": [
			{"data": {"id": "E11", "label": "당뇨병", "group": "1"}},
			{"data": {"id": "I10", "label": "고혈압", "group": "1"}},
			{"data": {"id": "N18", "label": "만성 신장병", "group": "2"}}
		],
		"edges": [
			{"data": {"source": "E11", "target": "I10", "weight": 1.2}},
			{"data": {"source": "I10", "target": "N18", "weight": 3}}
		]
	}"#;

	fn controller() -> (Owner, NetworkController) {
		let owner = Owner::new();
		let page = PageData::from_json(PAGE).unwrap();
		let controller = owner.with(|| {
			NetworkController::new(&page, LayoutOptions::overview(), FilterBundle::network_defaults())
		});
		(owner, controller)
	}

	fn node(id: &str) -> Subject {
		Subject::Node {
			id: id.into(),
			label: id.into(),
		}
	}

	#[test]
	fn unknown_code_keeps_highlight() {
		let (_owner, controller) = controller();
		assert_eq!(controller.focus_node("I10"), Ok(1));
		assert_eq!(
			controller.focus_node("Z99"),
			Err(LookupError("Z99".into()))
		);
		assert_eq!(controller.with_state(|s| s.model.highlighted()), Some(1));
	}

	#[test]
	fn superseded_detail_response_is_dropped() {
		let (_owner, controller) = controller();
		let first = open_panel(controller.detail, node("E11")).unwrap();
		let second = open_panel(controller.detail, node("I10")).unwrap();

		assert!(!settle_panel(controller.detail, first, Ok(Vec::new())));
		assert_eq!(
			controller.detail.with_untracked(|slot| slot.state().clone()),
			Panel::Loading(node("I10"))
		);

		assert!(settle_panel(controller.detail, second, Err("not found".into())));
		assert_eq!(
			controller.detail.with_untracked(|slot| slot.state().clone()),
			Panel::Errored(node("I10"), "not found".into())
		);
	}

	#[test]
	fn background_tap_drops_in_flight_responses() {
		let (_owner, controller) = controller();
		let token = open_panel(controller.literature, LiteratureQuery::Disease("E11".into())).unwrap();
		controller.close_panels();
		assert!(!settle_panel(controller.literature, token, Ok(Vec::new())));
		assert!(!controller.literature.with_untracked(|slot| slot.is_open()));
	}

	#[test]
	fn reload_refreshes_groups_and_entries() {
		let (_owner, controller) = controller();
		assert_eq!(controller.groups.get_untracked(), ["1", "2"]);

		let response: SubgraphResponse = serde_json::from_str(
			r#"{
				"nodes": [
					{"data": {"id": "K21", "group": "7"}, "position": {"x": 0, "y": 0}, "locked": true},
					{"data": {"id": "E78", "group": "8"}}
				],
				"edges": [{"data": {"source": "K21", "target": "E78", "weight": 2}}],
				"node_names": ["K21 (위식도역류)", "E78 (고지혈증)"]
			}"#,
		)
		.unwrap();
		controller.replace_graph(response, FilterBundle::subgraph_defaults());

		assert_eq!(controller.groups.get_untracked(), ["7", "8"]);
		assert_eq!(controller.entries.get_untracked().len(), 2);
		assert_eq!(controller.node_names.get_untracked().len(), 2);
		assert_eq!(controller.filters(), FilterBundle::subgraph_defaults());
		assert!(controller.with_state(|s| s.is_layout_running()));
	}
}
