//! Inner join of the per-dataset maps into [`Location`]s.

use std::collections::BTreeMap;

use county_rank_location_models::{Location, Politics, Population, RealEstate, Risk};

/// The five normalized, ID-keyed datasets to join.
#[derive(Debug, Clone, Copy)]
pub struct JoinInputs<'a> {
    /// Normalized home prices.
    pub real_estate: &'a BTreeMap<String, RealEstate>,
    /// Normalized risk scores.
    pub risk: &'a BTreeMap<String, Risk>,
    /// Population estimates.
    pub population: &'a BTreeMap<String, Population>,
    /// Vote shares.
    pub politics: &'a BTreeMap<String, Politics>,
    /// Land area in square miles.
    pub land_area: &'a BTreeMap<String, u64>,
}

/// Builds one [`Location`] per ID present in all five datasets.
///
/// IDs missing from any dataset are dropped. The result is sorted by ID
/// ascending.
#[must_use]
pub fn join_locations(inputs: JoinInputs<'_>) -> Vec<Location> {
    inputs
        .real_estate
        .iter()
        .filter_map(|(id, real_estate)| {
            let risk = inputs.risk.get(id)?;
            let pop = inputs.population.get(id)?;
            let politics = inputs.politics.get(id)?;
            let land_area_sq_miles = *inputs.land_area.get(id)?;

            Some(Location {
                id: id.clone(),
                risk: risk.clone(),
                real_estate: real_estate.clone(),
                pop: pop.clone(),
                politics: politics.clone(),
                land_area_sq_miles,
            })
        })
        .collect()
}
