#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Renders an [`AnalysisReport`] for humans (a boxed text table) or
//! machines (pretty JSON).

pub mod table;

use county_rank_analysis_models::AnalysisReport;
use strum_macros::{AsRefStr, Display, EnumString};
use thiserror::Error;

pub use table::{COLUMNS, format_currency, render_table};

/// Errors that can occur while rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    /// Boxed text table of the ranked counties.
    #[default]
    Table,
    /// The full report as pretty-printed JSON.
    Json,
}

/// Renders `report` in `format`.
///
/// # Errors
///
/// Returns [`RenderError::Json`] if JSON serialization fails.
pub fn render(report: &AnalysisReport, format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Table => Ok(render_table(&report.results)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
    }
}
