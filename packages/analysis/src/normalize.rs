//! Min-max normalization of home prices and risk totals.
//!
//! Scores are rescaled to `(0, 100]`. A value at the minimum would scale
//! to zero, so it is clamped to [`NORMALIZED_FLOOR`] instead: normalized
//! scores are used as both numerator and denominator of risk per dollar
//! and must never be zero.
//!
//! Risk totals are scaled against the fixed bounds of the risk dataset's
//! scoring scheme ([`RISK_TOTAL_MIN`], [`RISK_TOTAL_MAX`]). Home prices
//! are scaled against the smallest and largest price in the loaded file,
//! counting rows whose ID a later row replaced.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use county_rank_location_models::{HomePriceRecord, RealEstate, Risk, RiskRecord};

/// Normalized value assigned to anything at or below the minimum.
pub const NORMALIZED_FLOOR: f64 = 0.1;

/// Lowest possible total risk score (six sub-scores of 1).
pub const RISK_TOTAL_MIN: u64 = 6;

/// Highest possible total risk score (six sub-scores of 10).
pub const RISK_TOTAL_MAX: u64 = 60;

/// Inclusive bounds of a metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

impl Bounds {
    /// Creates bounds from explicit limits.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Bounds spanning an integer range.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_range(range: &RangeInclusive<u64>) -> Self {
        Self::new(*range.start() as f64, *range.end() as f64)
    }

    /// Scales `value` to `(0, 100]`.
    ///
    /// Results that are not strictly positive, including the `NaN` that
    /// comes from a zero-width range, become [`NORMALIZED_FLOOR`].
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let scaled = (value - self.min) / (self.max - self.min);
        if scaled > 0.0 {
            scaled * 100.0
        } else {
            NORMALIZED_FLOOR
        }
    }
}

/// Fixed bounds for total risk scores.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn risk_bounds() -> Bounds {
    Bounds::new(RISK_TOTAL_MIN as f64, RISK_TOTAL_MAX as f64)
}

/// Normalizes every home price against `price_range`, the minimum and
/// maximum over all loaded rows.
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn normalize_home_prices(
    records: &BTreeMap<String, HomePriceRecord>,
    price_range: &RangeInclusive<u64>,
) -> BTreeMap<String, RealEstate> {
    let bounds = Bounds::from_range(price_range);
    log::debug!("Home price bounds: {} to {}", bounds.min, bounds.max);

    records
        .iter()
        .map(|(id, record)| {
            let real_estate = RealEstate {
                id: record.id.clone(),
                median_home_price: record.median_home_price,
                normalized_median_home_price: bounds.normalize(record.median_home_price as f64),
            };
            (id.clone(), real_estate)
        })
        .collect()
}

/// Normalizes every risk total against [`risk_bounds`].
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn normalize_risk(records: &BTreeMap<String, RiskRecord>) -> BTreeMap<String, Risk> {
    let bounds = risk_bounds();
    records
        .iter()
        .map(|(id, record)| {
            let risk = Risk::from_record(record, bounds.normalize(record.total as f64));
            (id.clone(), risk)
        })
        .collect()
}
