#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! County entity types shared across the county-rank toolchain.
//!
//! Every dataset is keyed by the same canonical county ID, formatted as
//! `"<state abbreviation> - <county name>"` (e.g. `"CA - Alameda County"`).
//! The ID is opaque: it must match exactly across sources for a county to
//! survive the join.
//!
//! Two layers live here:
//!
//! - **Records** (`HomePriceRecord`, `RiskRecord`, `VoteRecord`) are the
//!   typed rows read straight from the canonical CSV files.
//! - **Entities** (`RealEstate`, `Risk`, `Population`, `Politics`,
//!   `Location`) are the normalized, joined values the analysis ranks.

use serde::{Deserialize, Serialize};

/// Separator between the state abbreviation and county name in an ID.
pub const ID_SEPARATOR: &str = " - ";

/// Builds a canonical county ID from a state abbreviation and a county
/// name.
#[must_use]
pub fn county_id(state_abbr: &str, county: &str) -> String {
    format!("{state_abbr}{ID_SEPARATOR}{county}")
}

/// A median home price row from `home_prices.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePriceRecord {
    /// Canonical county ID.
    pub id: String,
    /// Median home price in whole dollars.
    pub median_home_price: u64,
}

/// A climate risk row from `risk.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRecord {
    /// Canonical county ID.
    pub id: String,
    /// Extreme heat sub-score.
    pub heat: u64,
    /// Wet bulb temperature sub-score.
    pub wet_bulb: u64,
    /// Farm crop yield loss sub-score.
    pub farm_crop_yields: u64,
    /// Sea level rise sub-score.
    pub sea_level_rise: u64,
    /// Very large fire sub-score.
    pub very_large_fires: u64,
    /// Economic damages sub-score.
    pub economic_damages: u64,
    /// Total risk score (sum of the sub-scores in the source data).
    pub total: u64,
}

/// A single candidate's vote count for one county, from `president.csv`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteRecord {
    /// Canonical county ID.
    pub id: String,
    /// Candidate name as it appears in the source.
    pub candidate: String,
    /// Votes cast for the candidate.
    pub votes: f64,
}

/// Home price data for a county, with its min-max normalized score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealEstate {
    /// Canonical county ID.
    pub id: String,
    /// Median home price in whole dollars.
    pub median_home_price: u64,
    /// Normalized price in `(0, 100]`. Never zero.
    pub normalized_median_home_price: f64,
}

/// Climate risk data for a county, with its min-max normalized total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    /// Canonical county ID.
    pub id: String,
    /// Extreme heat sub-score.
    pub heat: u64,
    /// Wet bulb temperature sub-score.
    pub wet_bulb: u64,
    /// Farm crop yield loss sub-score.
    pub farm_crop_yields: u64,
    /// Sea level rise sub-score.
    pub sea_level_rise: u64,
    /// Very large fire sub-score.
    pub very_large_fires: u64,
    /// Economic damages sub-score.
    pub economic_damages: u64,
    /// Total risk score.
    pub total: u64,
    /// Normalized total in `(0, 100]`. Never zero.
    pub normalized_total: f64,
}

impl Risk {
    /// Builds a [`Risk`] from a loaded record and its normalized total.
    #[must_use]
    pub fn from_record(record: &RiskRecord, normalized_total: f64) -> Self {
        Self {
            id: record.id.clone(),
            heat: record.heat,
            wet_bulb: record.wet_bulb,
            farm_crop_yields: record.farm_crop_yields,
            sea_level_rise: record.sea_level_rise,
            very_large_fires: record.very_large_fires,
            economic_damages: record.economic_damages,
            total: record.total,
            normalized_total,
        }
    }
}

/// 2020 population estimate for a county.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Population {
    /// Canonical county ID.
    pub id: String,
    /// Population estimate for 2020.
    pub population_2020: u64,
}

/// 2020 presidential vote share for a county.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Politics {
    /// Canonical county ID.
    pub id: String,
    /// Fraction of all recorded votes cast for Biden, in `[0, 1]`.
    pub percent_for_biden_2020: f64,
}

/// A county present in every source dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Canonical county ID.
    pub id: String,
    /// Climate risk data.
    pub risk: Risk,
    /// Home price data.
    pub real_estate: RealEstate,
    /// Population data.
    pub pop: Population,
    /// Presidential vote share.
    pub politics: Politics,
    /// Land area in whole square miles.
    pub land_area_sq_miles: u64,
}

impl Location {
    /// Normalized risk divided by normalized home price. Lower is better:
    /// less climate risk for each unit of price.
    ///
    /// Both operands are clamped to a positive minimum by normalization,
    /// so the result is always finite.
    #[must_use]
    pub fn risk_per_dollar(&self) -> f64 {
        self.risk.normalized_total / self.real_estate.normalized_median_home_price
    }

    /// People per square mile, truncated to a whole number.
    ///
    /// # Errors
    ///
    /// Returns [`DivisionByZeroError`] if the land area is zero.
    pub fn population_density(&self) -> Result<u64, DivisionByZeroError> {
        self.pop
            .population_2020
            .checked_div(self.land_area_sq_miles)
            .ok_or_else(|| DivisionByZeroError {
                id: self.id.clone(),
            })
    }
}

/// Error returned when a [`Location`] has zero land area and its
/// population density cannot be computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisionByZeroError {
    /// ID of the location with zero land area.
    pub id: String,
}

impl std::fmt::Display for DivisionByZeroError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "division by zero: location '{}' has zero land area",
            self.id
        )
    }
}

impl std::error::Error for DivisionByZeroError {}
