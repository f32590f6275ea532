//! Threshold filtering and risk-per-dollar ranking.
//!
//! Each threshold is applied independently to the full location list,
//! then a location is kept only if it passed all three. Survivors keep
//! their join order (ID ascending) before a stable sort on risk per
//! dollar, so ties rank by ID.

use std::collections::BTreeSet;

use county_rank_analysis_models::{AnalysisConfig, FilterSummary};
use county_rank_location_models::Location;

/// Median home price at or below the configured maximum.
#[must_use]
pub const fn is_affordable(location: &Location, config: &AnalysisConfig) -> bool {
    location.real_estate.median_home_price <= config.max_home_price
}

/// 2020 population within the configured inclusive range.
#[must_use]
pub fn has_population_in_range(location: &Location, config: &AnalysisConfig) -> bool {
    config
        .population_range()
        .contains(&location.pop.population_2020)
}

/// Biden vote share at or above the configured minimum.
#[must_use]
pub fn has_politics(location: &Location, config: &AnalysisConfig) -> bool {
    location.politics.percent_for_biden_2020 >= config.min_biden_percent
}

/// Filtered and ranked locations.
#[derive(Debug, Clone)]
pub struct Ranking<'a> {
    /// Per-stage counts.
    pub summary: FilterSummary,
    /// Top locations, ascending by risk per dollar.
    pub locations: Vec<&'a Location>,
}

fn matching_ids<'a>(
    locations: &'a [Location],
    predicate: impl Fn(&Location) -> bool,
) -> BTreeSet<&'a str> {
    locations
        .iter()
        .filter(|l| predicate(l))
        .map(|l| l.id.as_str())
        .collect()
}

/// Filters `locations` by every threshold in `config`, sorts the
/// survivors by risk per dollar (lowest first), and keeps the first
/// `config.result_limit`.
///
/// An empty result is not an error.
#[must_use]
pub fn filter_and_rank<'a>(locations: &'a [Location], config: &AnalysisConfig) -> Ranking<'a> {
    let affordable = matching_ids(locations, |l| is_affordable(l, config));
    log::info!("Filter median home price: <= {}", config.max_home_price);

    let right_population = matching_ids(locations, |l| has_population_in_range(l, config));
    log::info!(
        "Filter population: {}..={}",
        config.population_min,
        config.population_max
    );

    let right_politics = matching_ids(locations, |l| has_politics(l, config));
    log::info!(
        "Filter politics: Percentage of 2020 votes for Biden >= {:.2}",
        config.min_biden_percent
    );

    let mut matching: Vec<&Location> = locations
        .iter()
        .filter(|l| {
            let id = l.id.as_str();
            affordable.contains(id) && right_population.contains(id) && right_politics.contains(id)
        })
        .collect();

    let summary = FilterSummary {
        considered: locations.len(),
        affordable: affordable.len(),
        right_population: right_population.len(),
        right_politics: right_politics.len(),
        matching: matching.len(),
    };

    matching.sort_by(|a, b| a.risk_per_dollar().total_cmp(&b.risk_per_dollar()));
    matching.truncate(config.result_limit);

    Ranking {
        summary,
        locations: matching,
    }
}

#[cfg(test)]
mod tests {
    use county_rank_location_models::{Politics, Population, RealEstate, Risk};

    use super::*;

    fn location(
        id: &str,
        price: u64,
        population: u64,
        biden: f64,
        risk_per_dollar: f64,
    ) -> Location {
        Location {
            id: id.to_string(),
            risk: Risk {
                id: id.to_string(),
                heat: 1,
                wet_bulb: 1,
                farm_crop_yields: 1,
                sea_level_rise: 1,
                very_large_fires: 1,
                economic_damages: 1,
                total: 6,
                normalized_total: risk_per_dollar * 10.0,
            },
            real_estate: RealEstate {
                id: id.to_string(),
                median_home_price: price,
                normalized_median_home_price: 10.0,
            },
            pop: Population {
                id: id.to_string(),
                population_2020: population,
            },
            politics: Politics {
                id: id.to_string(),
                percent_for_biden_2020: biden,
            },
            land_area_sq_miles: 100,
        }
    }

    fn ids(ranking: &Ranking<'_>) -> Vec<String> {
        ranking.locations.iter().map(|l| l.id.clone()).collect()
    }

    fn sample() -> Vec<Location> {
        vec![
            location("A - Alpha", 250_000, 60_000, 0.55, 3.0),
            location("B - Bravo", 350_000, 60_000, 0.55, 1.0),
            location("C - Charlie", 200_000, 40_000, 0.70, 0.5),
            location("D - Delta", 150_000, 100_000, 0.45, 0.2),
            location("E - Echo", 300_000, 150_000, 0.50, 2.0),
            location("F - Foxtrot", 120_000, 50_000, 0.90, 1.5),
        ]
    }

    #[test]
    fn keeps_only_locations_passing_every_filter() {
        let locations = sample();
        let config = AnalysisConfig::default();
        let ranking = filter_and_rank(&locations, &config);

        assert_eq!(ids(&ranking), vec!["F - Foxtrot", "E - Echo", "A - Alpha"]);
        for loc in &ranking.locations {
            assert!(is_affordable(loc, &config));
            assert!(has_population_in_range(loc, &config));
            assert!(has_politics(loc, &config));
        }
    }

    #[test]
    fn reports_stage_counts() {
        let locations = sample();
        let summary = filter_and_rank(&locations, &AnalysisConfig::default()).summary;
        assert_eq!(
            summary,
            FilterSummary {
                considered: 6,
                affordable: 5,
                right_population: 5,
                right_politics: 5,
                matching: 3,
            }
        );
    }

    #[test]
    fn results_are_sorted_and_limited() {
        let locations = sample();
        let config = AnalysisConfig {
            max_home_price: u64::MAX,
            population_min: 0,
            population_max: u64::MAX,
            min_biden_percent: 0.0,
            result_limit: 4,
        };
        let ranking = filter_and_rank(&locations, &config);

        assert_eq!(ranking.locations.len(), 4);
        assert_eq!(ranking.summary.matching, 6);
        assert!(
            ranking
                .locations
                .windows(2)
                .all(|w| w[0].risk_per_dollar() <= w[1].risk_per_dollar())
        );
        assert_eq!(ranking.locations[0].id, "D - Delta");
    }

    #[test]
    fn ties_rank_by_id() {
        let locations = vec![
            location("B - Second", 100, 60_000, 0.6, 1.0),
            location("A - First", 100, 60_000, 0.6, 1.0),
        ];
        let mut sorted = locations.clone();
        sorted.sort_by(|a, b| a.id.cmp(&b.id));
        let ranking = filter_and_rank(&sorted, &AnalysisConfig::default());
        assert_eq!(ids(&ranking), vec!["A - First", "B - Second"]);
    }

    #[test]
    fn politics_threshold_is_inclusive_at_boundary() {
        let locations = vec![location("CA - Alameda", 100_000, 60_000, 0.6, 1.0)];

        let passing = AnalysisConfig {
            min_biden_percent: 0.5,
            ..AnalysisConfig::default()
        };
        assert_eq!(filter_and_rank(&locations, &passing).locations.len(), 1);

        let failing = AnalysisConfig {
            min_biden_percent: 0.65,
            ..AnalysisConfig::default()
        };
        assert!(filter_and_rank(&locations, &failing).locations.is_empty());
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let locations = sample();
        let config = AnalysisConfig {
            max_home_price: 1,
            ..AnalysisConfig::default()
        };
        let ranking = filter_and_rank(&locations, &config);
        assert!(ranking.locations.is_empty());
        assert_eq!(ranking.summary.matching, 0);
    }

    #[test]
    fn empty_input_is_empty_output() {
        let ranking = filter_and_rank(&[], &AnalysisConfig::default());
        assert!(ranking.locations.is_empty());
        assert_eq!(ranking.summary, FilterSummary::default());
    }
}
