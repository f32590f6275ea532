//! Per-dataset record loaders.
//!
//! Each loader turns one canonical [`SourceTable`] into a map keyed by
//! county ID. Maps are `BTreeMap`s so every downstream iteration is in
//! ID-ascending order. When an ID repeats in a one-row-per-county table,
//! the last row wins.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use county_rank_location_models::{HomePriceRecord, Politics, Population, RiskRecord, VoteRecord};

use crate::{LoadError, SourceTable};

/// Canonical column names shared by the loader and the converter that
/// writes these files.
pub mod columns {
    /// Join key present in every canonical table.
    pub const ID: &str = "ID";

    /// `home_prices.csv`: median home price in dollars.
    pub const MEDIAN_PRICE: &str = "Median Price";

    /// `risk.csv` sub-score and total columns.
    pub const HEAT: &str = "Heat";
    /// `risk.csv`
    pub const WET_BULB: &str = "Wet Bulb";
    /// `risk.csv`
    pub const FARM_CROP_YIELDS: &str = "Farm Crop Yields";
    /// `risk.csv`
    pub const SEA_LEVEL_RISE: &str = "Sea Level Rise";
    /// `risk.csv`
    pub const VERY_LARGE_FIRES: &str = "Very Large Fires";
    /// `risk.csv`
    pub const ECONOMIC_DAMAGES: &str = "Economic Damages";
    /// `risk.csv`
    pub const TOTAL_RISK_SCORE: &str = "Total Risk Score";

    /// `population.csv`: 2020 population estimate.
    pub const POPULATION: &str = "Population";

    /// `president.csv`: candidate name.
    pub const CANDIDATE: &str = "candidate";
    /// `president.csv`: votes for the candidate.
    pub const VOTES: &str = "votes";

    /// `land_area.csv`: whole square miles.
    pub const LAND_AREA_SQ_MILES: &str = "land area in square miles";
}

/// Candidate whose vote share is tracked.
pub const BIDEN_CANDIDATE: &str = "Joe Biden";

/// Loads `home_prices.csv`.
///
/// # Errors
///
/// Returns [`LoadError`] if a row is missing a column or has a
/// non-integer price.
pub fn load_home_prices(
    table: &SourceTable,
) -> Result<BTreeMap<String, HomePriceRecord>, LoadError> {
    let mut by_id = BTreeMap::new();
    for row in table.rows() {
        let id = row.field(columns::ID)?.to_owned();
        let median_home_price = row.integer(columns::MEDIAN_PRICE)?;
        by_id.insert(
            id.clone(),
            HomePriceRecord {
                id,
                median_home_price,
            },
        );
    }
    Ok(by_id)
}

/// Smallest and largest median price over every row of `home_prices.csv`,
/// including rows a later duplicate ID replaces in [`load_home_prices`].
///
/// Returns `None` for a table with no rows.
///
/// # Errors
///
/// Returns [`LoadError`] if a row is missing the price column or the price
/// is not an integer.
pub fn home_price_range(
    table: &SourceTable,
) -> Result<Option<RangeInclusive<u64>>, LoadError> {
    let mut range: Option<RangeInclusive<u64>> = None;
    for row in table.rows() {
        let price = row.integer(columns::MEDIAN_PRICE)?;
        range = Some(match range {
            Some(r) => (*r.start()).min(price)..=(*r.end()).max(price),
            None => price..=price,
        });
    }
    Ok(range)
}

/// Loads `risk.csv`.
///
/// # Errors
///
/// Returns [`LoadError`] if a row is missing a column or a score is not
/// an integer.
pub fn load_risk(table: &SourceTable) -> Result<BTreeMap<String, RiskRecord>, LoadError> {
    let mut by_id = BTreeMap::new();
    for row in table.rows() {
        let id = row.field(columns::ID)?.to_owned();
        let record = RiskRecord {
            id: id.clone(),
            heat: row.integer(columns::HEAT)?,
            wet_bulb: row.integer(columns::WET_BULB)?,
            farm_crop_yields: row.integer(columns::FARM_CROP_YIELDS)?,
            sea_level_rise: row.integer(columns::SEA_LEVEL_RISE)?,
            very_large_fires: row.integer(columns::VERY_LARGE_FIRES)?,
            economic_damages: row.integer(columns::ECONOMIC_DAMAGES)?,
            total: row.integer(columns::TOTAL_RISK_SCORE)?,
        };
        by_id.insert(id, record);
    }
    Ok(by_id)
}

/// Loads `population.csv`.
///
/// # Errors
///
/// Returns [`LoadError`] if a row is missing a column or the population
/// is not an integer.
pub fn load_population(table: &SourceTable) -> Result<BTreeMap<String, Population>, LoadError> {
    let mut by_id = BTreeMap::new();
    for row in table.rows() {
        let id = row.field(columns::ID)?.to_owned();
        let population_2020 = row.integer(columns::POPULATION)?;
        by_id.insert(
            id.clone(),
            Population {
                id,
                population_2020,
            },
        );
    }
    Ok(by_id)
}

/// Loads the raw per-candidate rows of `president.csv`, in file order.
///
/// # Errors
///
/// Returns [`LoadError`] if a row is missing a column or the vote count
/// is not a decimal number.
pub fn load_votes(table: &SourceTable) -> Result<Vec<VoteRecord>, LoadError> {
    table
        .rows()
        .map(|row| -> Result<VoteRecord, LoadError> {
            Ok(VoteRecord {
                id: row.field(columns::ID)?.to_owned(),
                candidate: row.field(columns::CANDIDATE)?.to_owned(),
                votes: row.decimal(columns::VOTES)?,
            })
        })
        .collect()
}

/// Groups vote rows by county and reduces each group to the fraction of
/// votes cast for [`BIDEN_CANDIDATE`].
///
/// Counties whose recorded votes sum to zero are left out of the result.
///
/// # Errors
///
/// Returns [`LoadError::CandidateNotFound`] if a county has no row for
/// [`BIDEN_CANDIDATE`]. This check runs before the zero-total check.
pub fn aggregate_politics(votes: &[VoteRecord]) -> Result<BTreeMap<String, Politics>, LoadError> {
    let mut votes_by_id: BTreeMap<&str, Vec<&VoteRecord>> = BTreeMap::new();
    for vote in votes {
        votes_by_id.entry(vote.id.as_str()).or_default().push(vote);
    }

    let mut by_id = BTreeMap::new();
    for (id, votes) in votes_by_id {
        let biden_votes = votes
            .iter()
            .find(|v| v.candidate == BIDEN_CANDIDATE)
            .map(|v| v.votes)
            .ok_or_else(|| LoadError::CandidateNotFound {
                id: id.to_owned(),
                candidate: BIDEN_CANDIDATE.to_owned(),
            })?;
        let total_votes: f64 = votes.iter().map(|v| v.votes).sum();

        if total_votes == 0.0 {
            log::debug!("Skipping {id}: no votes recorded");
            continue;
        }

        by_id.insert(
            id.to_owned(),
            Politics {
                id: id.to_owned(),
                percent_for_biden_2020: biden_votes / total_votes,
            },
        );
    }
    Ok(by_id)
}

/// Loads `president.csv` and aggregates it into per-county [`Politics`].
///
/// # Errors
///
/// See [`load_votes`] and [`aggregate_politics`].
pub fn load_politics(table: &SourceTable) -> Result<BTreeMap<String, Politics>, LoadError> {
    aggregate_politics(&load_votes(table)?)
}

/// Loads `land_area.csv` as a map from ID to whole square miles.
///
/// # Errors
///
/// Returns [`LoadError`] if a row is missing a column or the area is not
/// an integer.
pub fn load_land_area(table: &SourceTable) -> Result<BTreeMap<String, u64>, LoadError> {
    let mut by_id = BTreeMap::new();
    for row in table.rows() {
        let id = row.field(columns::ID)?.to_owned();
        by_id.insert(id, row.integer(columns::LAND_AREA_SQ_MILES)?);
    }
    Ok(by_id)
}
