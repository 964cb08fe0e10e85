//! Statistical filter bundle attached to edges and subgraph queries.

use crate::error::InputError;

/// Thresholds the backend used to select an edge set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterBundle {
	/// Follow-up period in years.
	pub follow_up: u32,
	/// Lower relative-risk bound.
	pub rr_min: f64,
	/// Upper relative-risk bound.
	pub rr_max: f64,
	/// Adjusted chi-square p-value threshold.
	pub chisq: f64,
	/// Adjusted Fisher p-value threshold.
	pub fisher: f64,
}

impl FilterBundle {
	/// Defaults of the main network page.
	pub const fn network_defaults() -> Self {
		Self {
			follow_up: 1,
			rr_min: 0.0,
			rr_max: 2.0,
			chisq: 0.05,
			fisher: 0.05,
		}
	}

	/// Defaults of the multi-disease page.
	pub const fn subgraph_defaults() -> Self {
		Self {
			follow_up: 1,
			rr_min: 1.1,
			rr_max: 1.3,
			chisq: 0.5,
			fisher: 0.5,
		}
	}

	/// Parse the raw values of the filter controls.
	pub fn parse_inputs(
		follow_up: &str,
		rr_min: &str,
		rr_max: &str,
		chisq: &str,
		fisher: &str,
	) -> Result<Self, InputError> {
		Ok(Self {
			follow_up: parse_field("follow_up", follow_up)?,
			rr_min: parse_field("rr_min", rr_min)?,
			rr_max: parse_field("rr_max", rr_max)?,
			chisq: parse_field("chisq", chisq)?,
			fisher: parse_field("fisher", fisher)?,
		})
	}
}

fn parse_field<T: std::str::FromStr>(field: &'static str, raw: &str) -> Result<T, InputError> {
	raw.trim().parse().map_err(|_| InputError {
		field,
		value: raw.to_string(),
	})
}

/// Per-edge values that override the page-level bundle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FilterOverrides {
	/// Follow-up override.
	pub follow_up: Option<u32>,
	/// RR lower bound override.
	pub rr_min: Option<f64>,
	/// RR upper bound override.
	pub rr_max: Option<f64>,
	/// Chi-square threshold override.
	pub chisq: Option<f64>,
	/// Fisher threshold override.
	pub fisher: Option<f64>,
}

impl FilterOverrides {
	/// Fill every missing value from `base`.
	pub fn resolve(&self, base: FilterBundle) -> FilterBundle {
		FilterBundle {
			follow_up: self.follow_up.unwrap_or(base.follow_up),
			rr_min: self.rr_min.unwrap_or(base.rr_min),
			rr_max: self.rr_max.unwrap_or(base.rr_max),
			chisq: self.chisq.unwrap_or(base.chisq),
			fisher: self.fisher.unwrap_or(base.fisher),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_control_values() {
		let bundle = FilterBundle::parse_inputs("3", " 1.2", "1.4 ", "0.5", "0.01").unwrap();
		assert_eq!(
			bundle,
			FilterBundle {
				follow_up: 3,
				rr_min: 1.2,
				rr_max: 1.4,
				chisq: 0.5,
				fisher: 0.01,
			}
		);
	}

	#[test]
	fn rejects_non_numeric_control() {
		let err = FilterBundle::parse_inputs("3", "abc", "1.4", "0.5", "0.5").unwrap_err();
		assert_eq!(err.field, "rr_min");
		assert_eq!(err.value, "abc");
	}

	#[test]
	fn overrides_fall_back_to_base() {
		let overrides = FilterOverrides {
			follow_up: Some(5),
			fisher: Some(0.2),
			..Default::default()
		};
		let resolved = overrides.resolve(FilterBundle::network_defaults());
		assert_eq!(resolved.follow_up, 5);
		assert_eq!(resolved.fisher, 0.2);
		assert_eq!(resolved.rr_max, 2.0);
	}
}
