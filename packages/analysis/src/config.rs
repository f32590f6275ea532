//! Loading and validating [`AnalysisConfig`] from TOML.
//!
//! Every key is optional:
//!
//! ```toml
//! max_home_price = 300000
//! population_min = 50000
//! population_max = 150000
//! min_biden_percent = 0.5
//! result_limit = 5
//! ```

use std::path::Path;

use county_rank_analysis_models::AnalysisConfig;
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config {path}: {source}")]
    Io {
        /// Path of the config file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has unknown keys.
    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("Invalid config: {message}")]
    Invalid {
        /// Description of what went wrong.
        message: String,
    },
}

/// Parses an [`AnalysisConfig`] from a TOML string.
///
/// Values are not range-checked here so that command-line overrides can
/// be layered on first; call [`validate`] on the final config.
///
/// # Errors
///
/// Returns [`ConfigError::Toml`] if the TOML is malformed or has unknown
/// keys.
pub fn from_toml_str(toml_str: &str) -> Result<AnalysisConfig, ConfigError> {
    Ok(toml::from_str(toml_str)?)
}

/// Reads an [`AnalysisConfig`] from a TOML file. See [`from_toml_str`].
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or is malformed.
pub fn load_config(path: &Path) -> Result<AnalysisConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    log::debug!("Loaded config from {}", path.display());
    from_toml_str(&contents)
}

/// Checks that every threshold is usable.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if the population range is inverted,
/// the Biden share is outside `[0, 1]`, or the result limit is zero.
pub fn validate(config: &AnalysisConfig) -> Result<(), ConfigError> {
    if config.population_min > config.population_max {
        return Err(ConfigError::Invalid {
            message: format!(
                "population_min ({}) is greater than population_max ({})",
                config.population_min, config.population_max
            ),
        });
    }
    if !(0.0..=1.0).contains(&config.min_biden_percent) {
        return Err(ConfigError::Invalid {
            message: format!(
                "min_biden_percent ({}) must be between 0 and 1",
                config.min_biden_percent
            ),
        });
    }
    if config.result_limit == 0 {
        return Err(ConfigError::Invalid {
            message: "result_limit must be at least 1".to_string(),
        });
    }
    Ok(())
}
