#![allow(clippy::module_name_repetitions)]
//! Canonical file paths for the county data directory.
//!
//! All paths are relative to the project root's `data/` directory.
//! Raw upstream downloads live in `data/orig/`, the canonical tables the
//! analysis reads live in `data/parsed/`. Both directories use the same
//! file name for each dataset.

use std::path::{Path, PathBuf};

use strum_macros::{AsRefStr, Display, EnumIter};

/// The five county datasets, in load order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum SourceFile {
    /// Median home prices.
    HomePrices,
    /// Climate risk scores.
    Risk,
    /// 2020 population estimates.
    Population,
    /// 2020 presidential votes, one row per candidate.
    President,
    /// Land area in square miles.
    LandArea,
}

impl SourceFile {
    /// File name of this dataset inside a data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::HomePrices => "home_prices.csv",
            Self::Risk => "risk.csv",
            Self::Population => "population.csv",
            Self::President => "president.csv",
            Self::LandArea => "land_area.csv",
        }
    }

    /// Path of this dataset inside `dir`.
    #[must_use]
    pub fn path_in(self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
///
/// # Panics
///
/// Panics if the project root cannot be resolved.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the `data/orig/` directory for raw upstream files.
#[must_use]
pub fn orig_dir() -> PathBuf {
    data_dir().join("orig")
}

/// Returns the `data/parsed/` directory for canonical tables.
#[must_use]
pub fn parsed_dir() -> PathBuf {
    data_dir().join("parsed")
}
