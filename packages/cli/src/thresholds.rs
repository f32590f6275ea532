//! Command-line threshold overrides layered over the config file.

use clap::Args;
use county_rank_analysis_models::AnalysisConfig;

/// Per-threshold overrides. Each flag replaces the matching config value.
#[derive(Debug, Clone, Default, Args)]
pub struct ThresholdArgs {
    /// Maximum median home price in dollars
    #[arg(long)]
    pub max_home_price: Option<u64>,
    /// Minimum 2020 population (inclusive)
    #[arg(long)]
    pub population_min: Option<u64>,
    /// Maximum 2020 population (inclusive)
    #[arg(long)]
    pub population_max: Option<u64>,
    /// Minimum fraction of 2020 votes cast for Biden, between 0 and 1
    #[arg(long)]
    pub min_biden_percent: Option<f64>,
    /// Number of ranked counties to show
    #[arg(long)]
    pub limit: Option<usize>,
}

impl ThresholdArgs {
    /// Returns `config` with every provided flag applied.
    #[must_use]
    pub fn apply(&self, config: AnalysisConfig) -> AnalysisConfig {
        AnalysisConfig {
            max_home_price: self.max_home_price.unwrap_or(config.max_home_price),
            population_min: self.population_min.unwrap_or(config.population_min),
            population_max: self.population_max.unwrap_or(config.population_max),
            min_biden_percent: self.min_biden_percent.unwrap_or(config.min_biden_percent),
            result_limit: self.limit.unwrap_or(config.result_limit),
        }
    }
}
