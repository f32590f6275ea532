#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Analysis configuration and result types.
//!
//! [`AnalysisConfig`] holds the thresholds a user ranks counties against.
//! It deserializes from a table where every key is optional; missing keys
//! fall back to [`AnalysisConfig::default`].

use std::ops::RangeInclusive;

use county_rank_location_models::Location;
use serde::{Deserialize, Serialize};

/// Default maximum median home price, in dollars.
pub const DEFAULT_MAX_HOME_PRICE: u64 = 300_000;
/// Default minimum county population.
pub const DEFAULT_POPULATION_MIN: u64 = 50_000;
/// Default maximum county population.
pub const DEFAULT_POPULATION_MAX: u64 = 150_000;
/// Default minimum Biden vote share.
pub const DEFAULT_MIN_BIDEN_PERCENT: f64 = 0.50;
/// Default number of results.
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Thresholds for filtering and ranking counties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Counties with a median home price above this are excluded.
    pub max_home_price: u64,
    /// Inclusive lower bound on 2020 population.
    pub population_min: u64,
    /// Inclusive upper bound on 2020 population.
    pub population_max: u64,
    /// Counties with a smaller Biden vote share are excluded. In `[0, 1]`.
    pub min_biden_percent: f64,
    /// Maximum number of ranked results.
    pub result_limit: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_home_price: DEFAULT_MAX_HOME_PRICE,
            population_min: DEFAULT_POPULATION_MIN,
            population_max: DEFAULT_POPULATION_MAX,
            min_biden_percent: DEFAULT_MIN_BIDEN_PERCENT,
            result_limit: DEFAULT_RESULT_LIMIT,
        }
    }
}

impl AnalysisConfig {
    /// The accepted population range.
    #[must_use]
    pub const fn population_range(&self) -> RangeInclusive<u64> {
        self.population_min..=self.population_max
    }
}

/// How many counties survived each filter stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSummary {
    /// Counties considered.
    pub considered: usize,
    /// Counties at or below the home price threshold.
    pub affordable: usize,
    /// Counties inside the population range.
    pub right_population: usize,
    /// Counties at or above the Biden vote share threshold.
    pub right_politics: usize,
    /// Counties passing all three filters.
    pub matching: usize,
}

/// A county in the final ranking, with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedLocation {
    /// 1-based rank (1 = lowest risk per dollar).
    pub rank: usize,
    /// Normalized risk divided by normalized home price.
    pub risk_per_dollar: f64,
    /// People per whole square mile (truncated).
    pub population_density: u64,
    /// The joined county data.
    pub location: Location,
}

/// Output of a full analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// The configuration the run used.
    pub config: AnalysisConfig,
    /// Counties present in all five datasets.
    pub analyzed_count: usize,
    /// Per-stage filter counts.
    pub summary: FilterSummary,
    /// Ranked results, ascending by risk per dollar.
    pub results: Vec<RankedLocation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_population_range_is_inclusive() {
        let range = AnalysisConfig::default().population_range();
        assert!(range.contains(&50_000));
        assert!(range.contains(&150_000));
        assert!(!range.contains(&150_001));
    }

    #[test]
    fn deserializes_partial_config() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"max_home_price": 450000, "result_limit": 10}"#).unwrap();
        assert_eq!(config.max_home_price, 450_000);
        assert_eq!(config.result_limit, 10);
        assert_eq!(config.population_min, DEFAULT_POPULATION_MIN);
        assert!((config.min_biden_percent - DEFAULT_MIN_BIDEN_PERCENT).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_unknown_config_keys() {
        assert!(serde_json::from_str::<AnalysisConfig>(r#"{"max_price": 1}"#).is_err());
    }
}
