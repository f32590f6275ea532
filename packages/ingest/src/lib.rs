#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Converts raw upstream county datasets into the canonical tables read
//! by `county_rank_loader`.
//!
//! The five upstream sources each identify a county differently (a
//! `"<County>, <ST>"` string, separate name and abbreviation columns, or
//! a full state name). Conversion rewrites every row with the shared
//! `"<ST> - <County>"` ID so the datasets can be joined.

pub mod convert;

use std::path::Path;

use county_rank_loader::{LoadError, SourceFile, SourceTable};
use strum::IntoEnumIterator as _;
use thiserror::Error;

/// Errors that can occur while converting raw datasets.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A raw table could not be read, or a row lacks a column or has an
    /// unparseable value.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A canonical table could not be written.
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    /// The output directory could not be created.
    #[error("Failed to create {path}: {source}")]
    Io {
        /// Directory that could not be created.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A full state name is not one of the 50 states + DC.
    #[error("{table} line {line}: unknown state '{state}'")]
    UnknownState {
        /// Raw table name.
        table: String,
        /// 1-based line number.
        line: u64,
        /// The unrecognized state name.
        state: String,
    },

    /// A `"<County>, <ST>"` value has no state part.
    #[error("{table} line {line}: expected '<County>, <ST>', found '{value}'")]
    MalformedArea {
        /// Raw table name.
        table: String,
        /// 1-based line number.
        line: u64,
        /// The offending value.
        value: String,
    },

    /// A land area is negative.
    #[error("{table} line {line}: negative land area {value}")]
    NegativeLandArea {
        /// Raw table name.
        table: String,
        /// 1-based line number.
        line: u64,
        /// The offending value.
        value: f64,
    },
}

/// Converts one raw dataset in `input_dir` to its canonical form in
/// `output_dir`. Both use the same file name.
///
/// Returns the number of rows written.
///
/// # Errors
///
/// Returns [`ConvertError`] if the raw file cannot be read or converted,
/// or the canonical file cannot be written.
pub fn convert_file(
    file: SourceFile,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<usize, ConvertError> {
    let table = SourceTable::from_path(&file.path_in(input_dir))?;
    let output_path = file.path_in(output_dir);
    let mut out = csv::Writer::from_path(&output_path)?;

    let written = match file {
        SourceFile::HomePrices => convert::convert_home_prices(&table, &mut out)?,
        SourceFile::Risk => convert::convert_risk(&table, &mut out)?,
        SourceFile::Population => convert::convert_population(&table, &mut out)?,
        SourceFile::President => convert::convert_president(&table, &mut out)?,
        SourceFile::LandArea => convert::convert_land_area(&table, &mut out)?,
    };
    out.flush().map_err(csv::Error::from)?;

    log::info!(
        "Wrote {written} of {} {file} rows to {}",
        table.len(),
        output_path.display()
    );

    Ok(written)
}

/// Converts all five raw datasets, creating `output_dir` if needed.
///
/// Returns `(dataset, rows written)` in load order.
///
/// # Errors
///
/// Returns the first [`ConvertError`] encountered.
pub fn convert_all(
    input_dir: &Path,
    output_dir: &Path,
) -> Result<Vec<(SourceFile, usize)>, ConvertError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ConvertError::Io {
        path: output_dir.display().to_string(),
        source,
    })?;

    SourceFile::iter()
        .map(|file| -> Result<_, ConvertError> {
            Ok((file, convert_file(file, input_dir, output_dir)?))
        })
        .collect()
}
