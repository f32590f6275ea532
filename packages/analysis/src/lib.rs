#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! County ranking pipeline.
//!
//! Takes the five loaded datasets through:
//!
//! 1. [`normalize`]: min-max scale home prices and risk totals.
//! 2. [`join`]: inner-join everything on county ID into `Location`s.
//! 3. [`rank`]: apply the price, population and politics thresholds,
//!    sort by risk per dollar, keep the top N.
//!
//! [`analyze`] runs all three and computes the derived metrics for each
//! ranked county.

pub mod config;
pub mod join;
pub mod normalize;
pub mod rank;

use std::collections::BTreeMap;
use std::path::Path;

use county_rank_analysis_models::{AnalysisConfig, AnalysisReport, RankedLocation};
use county_rank_loader::{Dataset, LoadError};
use county_rank_location_models::DivisionByZeroError;
use thiserror::Error;

pub use config::ConfigError;
pub use join::{JoinInputs, join_locations};
pub use rank::filter_and_rank;

/// Errors that can occur during an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The thresholds are invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A dataset could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// A ranked county has zero land area.
    #[error(transparent)]
    DivisionByZero(#[from] DivisionByZeroError),
}

/// Runs the full pipeline over an already-loaded dataset.
///
/// # Errors
///
/// Returns [`AnalysisError::Config`] if `config` fails validation, or
/// [`AnalysisError::DivisionByZero`] if a ranked county has zero land
/// area.
pub fn analyze(
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    config::validate(config)?;
    run(dataset, config)
}

/// Loads the canonical tables from `dir` and runs [`analyze`].
///
/// The config is validated before any file is read.
///
/// # Errors
///
/// Returns [`AnalysisError::Config`] if `config` fails validation,
/// [`AnalysisError::Load`] if loading fails, or any error from
/// [`analyze`].
pub fn analyze_dir(dir: &Path, config: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
    config::validate(config)?;
    let dataset = county_rank_loader::load_dataset(dir)?;
    run(&dataset, config)
}

fn run(dataset: &Dataset, config: &AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
    let real_estate = dataset
        .home_price_range
        .as_ref()
        .map_or_else(BTreeMap::new, |range| {
            normalize::normalize_home_prices(&dataset.home_prices, range)
        });
    let risk = normalize::normalize_risk(&dataset.risk);

    let locations = join_locations(JoinInputs {
        real_estate: &real_estate,
        risk: &risk,
        population: &dataset.population,
        politics: &dataset.politics,
        land_area: &dataset.land_area,
    });
    log::info!("Analyzing {} counties", locations.len());

    let ranking = filter_and_rank(&locations, config);

    let results = ranking
        .locations
        .into_iter()
        .enumerate()
        .map(|(i, location)| -> Result<RankedLocation, AnalysisError> {
            Ok(RankedLocation {
                rank: i + 1,
                risk_per_dollar: location.risk_per_dollar(),
                population_density: location.population_density()?,
                location: location.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    log::info!("Returning {} results", results.len());

    Ok(AnalysisReport {
        config: config.clone(),
        analyzed_count: locations.len(),
        summary: ranking.summary,
        results,
    })
}

#[cfg(test)]
mod tests {
    use county_rank_loader::SourceFile;
    use county_rank_location_models::{HomePriceRecord, Politics, Population, RiskRecord};

    use super::*;

    struct County {
        id: &'static str,
        price: u64,
        risk_total: u64,
        population: u64,
        biden: f64,
        land_area: u64,
    }

    fn dataset(counties: &[County]) -> Dataset {
        let mut dataset = Dataset::default();
        for c in counties {
            let id = c.id.to_string();
            dataset.home_prices.insert(
                id.clone(),
                HomePriceRecord {
                    id: id.clone(),
                    median_home_price: c.price,
                },
            );
            dataset.risk.insert(
                id.clone(),
                RiskRecord {
                    id: id.clone(),
                    heat: 1,
                    wet_bulb: 1,
                    farm_crop_yields: 1,
                    sea_level_rise: 1,
                    very_large_fires: 1,
                    economic_damages: 1,
                    total: c.risk_total,
                },
            );
            dataset.population.insert(
                id.clone(),
                Population {
                    id: id.clone(),
                    population_2020: c.population,
                },
            );
            dataset.politics.insert(
                id.clone(),
                Politics {
                    id: id.clone(),
                    percent_for_biden_2020: c.biden,
                },
            );
            dataset.land_area.insert(id, c.land_area);
        }
        refresh_price_range(&mut dataset);
        dataset
    }

    fn refresh_price_range(dataset: &mut Dataset) {
        let prices = dataset.home_prices.values().map(|r| r.median_home_price);
        dataset.home_price_range = prices
            .clone()
            .min()
            .zip(prices.max())
            .map(|(min, max)| min..=max);
    }

    fn sample() -> Dataset {
        dataset(&[
            County {
                id: "CA - Alameda County",
                price: 100_000,
                risk_total: 33,
                population: 100_000,
                biden: 0.6,
                land_area: 50,
            },
            County {
                id: "OR - Lane County",
                price: 200_000,
                risk_total: 20,
                population: 120_000,
                biden: 0.7,
                land_area: 4_000,
            },
            County {
                id: "TX - Travis County",
                price: 300_000,
                risk_total: 60,
                population: 90_000,
                biden: 0.8,
                land_area: 900,
            },
            County {
                id: "WY - Teton County",
                price: 250_000,
                risk_total: 6,
                population: 23_000,
                biden: 0.67,
                land_area: 4_000,
            },
        ])
    }

    #[test]
    fn ranks_by_risk_per_dollar() {
        let report = analyze(&sample(), &AnalysisConfig::default()).unwrap();

        assert_eq!(report.analyzed_count, 4);
        assert_eq!(report.summary.matching, 3);
        let ids: Vec<_> = report
            .results
            .iter()
            .map(|r| r.location.id.as_str())
            .collect();
        // Lane: (14/54*100) / 50 = 0.52, Travis: 100/100 = 1.0,
        // Alameda: 50/0.1 = 500.
        assert_eq!(ids, vec!["OR - Lane County", "TX - Travis County", "CA - Alameda County"]);
        assert_eq!(
            report.results.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert!((report.results[2].risk_per_dollar - 500.0).abs() < 1e-6);
        assert_eq!(report.results[2].population_density, 2000);
    }

    #[test]
    fn home_price_bounds_include_unjoined_counties() {
        let mut data = sample();
        data.home_prices.insert(
            "NY - New York County".to_string(),
            HomePriceRecord {
                id: "NY - New York County".to_string(),
                median_home_price: 1_100_000,
            },
        );
        refresh_price_range(&mut data);
        let report = analyze(&data, &AnalysisConfig::default()).unwrap();
        assert_eq!(report.analyzed_count, 4);
        let travis = report
            .results
            .iter()
            .find(|r| r.location.id == "TX - Travis County")
            .unwrap();
        assert!((travis.location.real_estate.normalized_median_home_price - 20.0).abs() < 1e-9);
    }

    #[test]
    fn home_price_bounds_include_replaced_rows() {
        let mut data = sample();
        // A row for Lane at 1,100,000 was read first, then replaced by
        // the 200,000 row that survives in the map.
        data.home_price_range = Some(100_000..=1_100_000);
        let report = analyze(&data, &AnalysisConfig::default()).unwrap();
        let lane = report
            .results
            .iter()
            .find(|r| r.location.id == "OR - Lane County")
            .unwrap();
        assert_eq!(lane.location.real_estate.median_home_price, 200_000);
        assert!((lane.location.real_estate.normalized_median_home_price - 10.0).abs() < 1e-9);
    }

    #[test]
    fn duplicate_price_rows_widen_bounds_end_to_end() {
        let dir = std::env::temp_dir().join("county_rank_analysis_duplicate_price_test");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let write = |file: SourceFile, contents: &str| {
            std::fs::write(file.path_in(&dir), contents).unwrap();
        };
        write(
            SourceFile::HomePrices,
            "ID,Median Price\n\
             A - X,100000\n\
             B - Y,1000000\n\
             B - Y,200000\n\
             C - Z,300000\n",
        );
        write(
            SourceFile::Risk,
            "ID,Heat,Wet Bulb,Farm Crop Yields,Sea Level Rise,Very Large Fires,Economic Damages,Total Risk Score\n\
             B - Y,5,5,5,5,5,5,30\n",
        );
        write(SourceFile::Population, "ID,Population\nB - Y,60000\n");
        write(
            SourceFile::President,
            "ID,candidate,votes\nB - Y,Joe Biden,60\nB - Y,Donald Trump,40\n",
        );
        write(SourceFile::LandArea, "ID,land area in square miles\nB - Y,600\n");

        let report = analyze_dir(&dir, &AnalysisConfig::default()).unwrap();
        assert_eq!(report.results.len(), 1);
        let normalized = report.results[0]
            .location
            .real_estate
            .normalized_median_home_price;
        assert!((normalized - 100.0 / 9.0).abs() < 1e-9, "got {normalized}");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn honours_result_limit() {
        let config = AnalysisConfig {
            result_limit: 1,
            ..AnalysisConfig::default()
        };
        let report = analyze(&sample(), &config).unwrap();
        assert_eq!(report.results.len(), 1);
        assert_eq!(report.summary.matching, 3);
    }

    #[test]
    fn empty_intersection_is_empty_report() {
        let config = AnalysisConfig {
            min_biden_percent: 0.99,
            ..AnalysisConfig::default()
        };
        let report = analyze(&sample(), &config).unwrap();
        assert!(report.results.is_empty());
        assert_eq!(report.analyzed_count, 4);
    }

    #[test]
    fn zero_land_area_in_results_fails() {
        let mut data = sample();
        data.land_area.insert("CA - Alameda County".to_string(), 0);
        assert!(matches!(
            analyze(&data, &AnalysisConfig::default()),
            Err(AnalysisError::DivisionByZero(ref e)) if e.id == "CA - Alameda County"
        ));
    }

    #[test]
    fn zero_land_area_outside_results_is_ignored() {
        let mut data = sample();
        data.land_area.insert("WY - Teton County".to_string(), 0);
        assert!(analyze(&data, &AnalysisConfig::default()).is_ok());
    }

    #[test]
    fn invalid_config_fails_before_analysis() {
        let config = AnalysisConfig {
            result_limit: 0,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            analyze(&sample(), &config),
            Err(AnalysisError::Config(_))
        ));
    }

    #[test]
    fn analyze_dir_checks_config_before_reading_files() {
        let dir = std::env::temp_dir().join("county_rank_analysis_invalid_config_test");
        let _ = std::fs::remove_dir_all(&dir);
        let config = AnalysisConfig {
            population_min: 10,
            population_max: 5,
            ..AnalysisConfig::default()
        };
        assert!(matches!(
            analyze_dir(&dir, &config),
            Err(AnalysisError::Config(ConfigError::Invalid { .. }))
        ));
    }

    #[test]
    fn missing_dataset_directory_is_load_error() {
        let dir = std::env::temp_dir().join("county_rank_analysis_missing_dir_test");
        let _ = std::fs::remove_dir_all(&dir);
        assert!(matches!(
            analyze_dir(&dir, &AnalysisConfig::default()),
            Err(AnalysisError::Load(_))
        ));
    }
}
