//! Demographic breakdown payloads and the charts built from them.
//!
//! Node and edge payloads share one shape. Every dimension is normalized into
//! an ordered list of [`SeriesPoint`]s before any chart is built, and cross
//! tabulations are always looked up by label.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::literature::LiteratureQuery;
use crate::api::types::DetailResponse;

/// Male series color.
pub const MALE_COLOR: &str = "#4e79a7";
/// Female series color.
pub const FEMALE_COLOR: &str = "#f28e2b";
/// Income chart color.
pub const INCOME_COLOR: &str = "#59a14f";

/// Sex codes used as keys of the cross tabulations.
const MALE: &str = "1";
const FEMALE: &str = "2";

/// Shown when a detail request fails in transport or decoding.
pub const FETCH_FAILED: &str = "정보 불러오기 실패";

/// What the detail panel describes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Subject {
	/// A single disease.
	Node {
		/// Disease code.
		id: String,
		/// Display name.
		label: String,
	},
	/// A comorbidity edge.
	Edge {
		/// Cause code.
		source: String,
		/// Cause name.
		source_label: String,
		/// Outcome code.
		target: String,
		/// Outcome name.
		target_label: String,
	},
}

impl Subject {
	/// Heading lines shown above the panel content.
	pub fn heading(&self) -> Vec<String> {
		match self {
			Subject::Node { id, label } => {
				vec![format!("노드 코드: {id}"), format!("질병 이름: {label}")]
			}
			Subject::Edge {
				source,
				source_label,
				target,
				target_label,
			} => vec![format!(
				"Edge: {source} ({source_label}) → {target} ({target_label})"
			)],
		}
	}

	/// Short heading used when the panel shows an error.
	pub fn short_heading(&self) -> String {
		match self {
			Subject::Node { id, .. } => id.clone(),
			Subject::Edge { source, target, .. } => format!("Edge: {source} → {target}"),
		}
	}

	/// Placeholder while the request is in flight.
	pub fn loading_message(&self) -> &'static str {
		match self {
			Subject::Node { .. } => "로딩 중...",
			Subject::Edge { .. } => "세부정보 불러오는 중...",
		}
	}

	/// Literature search for the same node or edge.
	pub fn literature_query(&self) -> LiteratureQuery {
		match self {
			Subject::Node { id, .. } => LiteratureQuery::Disease(id.clone()),
			Subject::Edge { source, target, .. } => {
				LiteratureQuery::for_selection(source, Some(target))
			}
		}
	}

	fn is_edge(&self) -> bool {
		matches!(self, Subject::Edge { .. })
	}
}

/// Turn a detail response into charts, or the message the panel shows
/// instead.
pub fn interpret(subject: &Subject, response: DetailResponse) -> Result<Vec<ChartSpec>, String> {
	if let Some(error) = response.error.filter(|e| !e.is_empty()) {
		return Err(error);
	}
	response
		.data
		.map(|data| build_charts(subject, &data))
		.ok_or_else(|| FETCH_FAILED.to_string())
}

/// Raw breakdown payload. Absent or `null` sections are empty.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DetailData {
	#[serde(default)]
	sex: Option<Map<String, Value>>,
	#[serde(default)]
	age: Option<Map<String, Value>>,
	#[serde(default)]
	ctrb: Option<Map<String, Value>>,
	#[serde(default)]
	sido: Option<Map<String, Value>>,
	#[serde(default)]
	sex_age: Option<Map<String, Value>>,
	#[serde(default)]
	sex_ctrb: Option<Map<String, Value>>,
	#[serde(default)]
	sex_sido: Option<Map<String, Value>>,
}

/// One labelled value.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesPoint {
	/// Category label.
	pub label: String,
	/// Count.
	pub value: f64,
}

/// Chart type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartKind {
	/// Pie chart, one dataset.
	Pie,
	/// Vertical bars starting at zero, one or more datasets.
	Bar,
}

/// One series of a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
	/// Legend text.
	pub label: String,
	/// One value per chart label.
	pub values: Vec<f64>,
	/// Fill colors, cycled over the values.
	pub colors: Vec<&'static str>,
}

/// A chart ready to be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
	/// DOM id of the canvas.
	pub canvas_id: &'static str,
	/// Heading above the canvas.
	pub title: &'static str,
	/// Chart type.
	pub kind: ChartKind,
	/// Category labels.
	pub labels: Vec<String>,
	/// Series.
	pub datasets: Vec<Dataset>,
}

/// Coerce a JSON value into a count; anything non-numeric counts as zero.
fn numeric(value: &Value) -> f64 {
	match value {
		Value::Number(n) => n.as_f64().unwrap_or(0.0),
		Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0),
		Value::Bool(true) => 1.0,
		_ => 0.0,
	}
}

/// Integer-like keys as a browser orders them (canonical array indices).
fn array_index(key: &str) -> Option<u32> {
	let n: u32 = key.parse().ok()?;
	(n != u32::MAX && n.to_string() == key).then_some(n)
}

/// Keys in browser object order: array indices ascending, then insertion order.
fn ordered_keys(map: &Map<String, Value>) -> Vec<&str> {
	let mut indexed: Vec<(u32, &str)> = map
		.keys()
		.filter_map(|k| array_index(k).map(|n| (n, k.as_str())))
		.collect();
	indexed.sort_by_key(|(n, _)| *n);
	indexed
		.into_iter()
		.map(|(_, k)| k)
		.chain(map.keys().map(String::as_str).filter(|k| array_index(k).is_none()))
		.collect()
}

/// Normalize a single-dimension breakdown.
pub fn series(map: Option<&Map<String, Value>>) -> Vec<SeriesPoint> {
	let Some(map) = map else {
		return Vec::new();
	};
	ordered_keys(map)
		.into_iter()
		.map(|k| SeriesPoint {
			label: k.to_string(),
			value: map.get(k).map(numeric).unwrap_or(0.0),
		})
		.collect()
}

/// Values of one sex row of a cross tabulation, aligned to `labels`.
pub fn cross_tab(map: Option<&Map<String, Value>>, sex: &str, labels: &[SeriesPoint]) -> Vec<f64> {
	let row = map.and_then(|m| m.get(sex)).and_then(Value::as_object);
	labels
		.iter()
		.map(|p| row.and_then(|r| r.get(&p.label)).map(numeric).unwrap_or(0.0))
		.collect()
}

fn labels_of(points: &[SeriesPoint]) -> Vec<String> {
	points.iter().map(|p| p.label.clone()).collect()
}

fn values_of(points: &[SeriesPoint]) -> Vec<f64> {
	points.iter().map(|p| p.value).collect()
}

fn single_bar(
	canvas_id: &'static str,
	title: &'static str,
	points: &[SeriesPoint],
	color: &'static str,
) -> ChartSpec {
	ChartSpec {
		canvas_id,
		title,
		kind: ChartKind::Bar,
		labels: labels_of(points),
		datasets: vec![Dataset {
			label: title.to_string(),
			values: values_of(points),
			colors: vec![color],
		}],
	}
}

fn paired_bar(
	canvas_id: &'static str,
	title: &'static str,
	table: Option<&Map<String, Value>>,
	points: &[SeriesPoint],
) -> ChartSpec {
	ChartSpec {
		canvas_id,
		title,
		kind: ChartKind::Bar,
		labels: labels_of(points),
		datasets: vec![
			Dataset {
				label: "남성".to_string(),
				values: cross_tab(table, MALE, points),
				colors: vec![MALE_COLOR],
			},
			Dataset {
				label: "여성".to_string(),
				values: cross_tab(table, FEMALE, points),
				colors: vec![FEMALE_COLOR],
			},
		],
	}
}

/// Canvas ids in display order; node and edge panels use distinct ids.
struct CanvasIds {
	gender: &'static str,
	age: &'static str,
	sido: &'static str,
	income: &'static str,
	sex_age: &'static str,
	sex_income: &'static str,
	sex_sido: &'static str,
}

const NODE_CANVAS: CanvasIds = CanvasIds {
	gender: "genderChart",
	age: "ageBarChart",
	sido: "sidoChart",
	income: "incomeChart",
	sex_age: "sexAgeChart",
	sex_income: "sexIncomeChart",
	sex_sido: "sexSidoChart",
};

const EDGE_CANVAS: CanvasIds = CanvasIds {
	gender: "genderEdgeChart",
	age: "edgeAgeChart",
	sido: "sidoEdgeChart",
	income: "incomeEdgeChart",
	sex_age: "sexAgeEdgeChart",
	sex_income: "sexIncomeEdgeChart",
	sex_sido: "sexSidoEdgeChart",
};

/// Build the seven breakdown charts for `subject`.
pub fn build_charts(subject: &Subject, data: &DetailData) -> Vec<ChartSpec> {
	let ids = if subject.is_edge() {
		&EDGE_CANVAS
	} else {
		&NODE_CANVAS
	};
	let sex = data.sex.as_ref();
	let age = series(data.age.as_ref());
	let income = series(data.ctrb.as_ref());
	let sido = series(data.sido.as_ref());

	let gender = ChartSpec {
		canvas_id: ids.gender,
		title: "성별 비율",
		kind: ChartKind::Pie,
		labels: vec!["남성".to_string(), "여성".to_string()],
		datasets: vec![Dataset {
			label: "성별 비율".to_string(),
			values: [MALE, FEMALE]
				.iter()
				.map(|k| sex.and_then(|m| m.get(*k)).map(numeric).unwrap_or(0.0))
				.collect(),
			colors: vec![MALE_COLOR, FEMALE_COLOR],
		}],
	};

	let mut charts = vec![
		gender,
		single_bar(ids.age, "연령 분포", &age, MALE_COLOR),
		single_bar(ids.sido, "지역 분포", &sido, FEMALE_COLOR),
		single_bar(ids.income, "소득 수준 분포", &income, INCOME_COLOR),
		paired_bar(ids.sex_age, "성별 × 연령", data.sex_age.as_ref(), &age),
	];
	// The edge panel lists region before income.
	let sex_income = paired_bar(ids.sex_income, "성별 × 소득", data.sex_ctrb.as_ref(), &income);
	let sex_sido = paired_bar(ids.sex_sido, "성별 × 지역", data.sex_sido.as_ref(), &sido);
	if subject.is_edge() {
		charts.extend([sex_sido, sex_income]);
	} else {
		charts.extend([sex_income, sex_sido]);
	}
	charts
}
