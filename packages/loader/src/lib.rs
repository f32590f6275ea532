#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Loads the five canonical county tables into ID-keyed records.
//!
//! The canonical tables are produced by `county_rank_ingest` from the raw
//! upstream downloads. Each has a header row and an `ID` column holding
//! the `"<ST> - <County>"` join key. See [`records::columns`] for the
//! columns each loader requires.

pub mod paths;
pub mod records;
pub mod table;

use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use std::path::Path;

use county_rank_location_models::{HomePriceRecord, Politics, Population, RiskRecord};
use thiserror::Error;

pub use paths::SourceFile;
pub use table::{Row, SourceTable};

/// Errors that can occur while loading county tables.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or is not valid CSV.
    #[error("Failed to read {table}: {source}")]
    Csv {
        /// Table name (usually the file path).
        table: String,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from a row.
    #[error("{table} line {line}: missing column '{column}'")]
    MissingColumn {
        /// Table name.
        table: String,
        /// 1-based line number.
        line: u64,
        /// Column that was requested.
        column: String,
    },

    /// A value is present but does not parse as the expected type.
    #[error("{table} line {line}: could not parse '{value}' in column '{column}' as {expected}")]
    Parse {
        /// Table name.
        table: String,
        /// 1-based line number.
        line: u64,
        /// Column holding the value.
        column: String,
        /// The offending value.
        value: String,
        /// Description of the expected type.
        expected: &'static str,
    },

    /// A county's vote rows lack the tracked candidate.
    #[error("{id}: candidate '{candidate}' not found")]
    CandidateNotFound {
        /// County ID.
        id: String,
        /// Candidate that was looked up.
        candidate: String,
    },
}

/// All five datasets, keyed by county ID.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Median home prices.
    pub home_prices: BTreeMap<String, HomePriceRecord>,
    /// Lowest and highest median price over every loaded row, before
    /// duplicate IDs collapse. `None` when the table is empty.
    pub home_price_range: Option<RangeInclusive<u64>>,
    /// Climate risk scores.
    pub risk: BTreeMap<String, RiskRecord>,
    /// 2020 population estimates.
    pub population: BTreeMap<String, Population>,
    /// 2020 Biden vote share (counties with zero recorded votes excluded).
    pub politics: BTreeMap<String, Politics>,
    /// Land area in whole square miles.
    pub land_area: BTreeMap<String, u64>,
}

/// Loads all five canonical tables from `dir`.
///
/// # Errors
///
/// Returns the first [`LoadError`] encountered. Loading has no partial
/// result: any failure aborts the whole dataset.
pub fn load_dataset(dir: &Path) -> Result<Dataset, LoadError> {
    let read = |file: SourceFile| SourceTable::from_path(&file.path_in(dir));

    let home_prices = read(SourceFile::HomePrices)?;

    let dataset = Dataset {
        home_prices: records::load_home_prices(&home_prices)?,
        home_price_range: records::home_price_range(&home_prices)?,
        risk: records::load_risk(&read(SourceFile::Risk)?)?,
        population: records::load_population(&read(SourceFile::Population)?)?,
        politics: records::load_politics(&read(SourceFile::President)?)?,
        land_area: records::load_land_area(&read(SourceFile::LandArea)?)?,
    };

    log::debug!(
        "Loaded {} home prices, {} risk scores, {} populations, {} vote shares, {} land areas from {}",
        dataset.home_prices.len(),
        dataset.risk.len(),
        dataset.population.len(),
        dataset.politics.len(),
        dataset.land_area.len(),
        dir.display(),
    );

    Ok(dataset)
}
