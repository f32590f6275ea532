//! Per-dataset converters from raw upstream schemas to canonical tables.
//!
//! Every converter reads a raw [`SourceTable`], synthesizes the
//! `"<ST> - <County>"` ID for each row, and writes the canonical columns
//! the loader expects. Values other than the ID are copied through as
//! text, except land area which is rounded to whole square miles.

use std::io::Write;

use county_rank_geography_models::abbr_for_name;
use county_rank_loader::records::columns;
use county_rank_loader::{Row, SourceTable};
use county_rank_location_models::county_id;

use crate::ConvertError;

/// Column names in the raw upstream files.
pub mod raw {
    /// `risk.csv`: `"<County>, <ST>"`.
    pub const RISK_COUNTY: &str = "County";

    /// `home_prices.csv`: county name.
    pub const HOME_COUNTY: &str = "County";
    /// `home_prices.csv`: two-letter state abbreviation.
    pub const HOME_STATE_ABBR: &str = "State Abbrv";
    /// `home_prices.csv`: median price.
    pub const HOME_MEDIAN_PRICE: &str = "Median Home Price Q3 2022";

    /// `population.csv`: county name (equal to the state name on state
    /// total rows).
    pub const POP_COUNTY: &str = "CTYNAME";
    /// `population.csv`: full state name.
    pub const POP_STATE: &str = "STNAME";
    /// `population.csv`: 2020 population estimate.
    pub const POP_ESTIMATE_2020: &str = "POPESTIMATE2020";

    /// `president.csv`: county name.
    pub const PRES_COUNTY: &str = "county";
    /// `president.csv`: full state name.
    pub const PRES_STATE: &str = "state";
    /// `president.csv`: candidate name.
    pub const PRES_CANDIDATE: &str = "candidate";
    /// `president.csv`: votes for the candidate.
    pub const PRES_TOTAL_VOTES: &str = "total_votes";

    /// `land_area.csv`: `"<County>, <ST>"`, or a bare name for state and
    /// national rows.
    pub const LAND_AREA_NAME: &str = "Areaname";
    /// `land_area.csv`: land area in square miles, 2010.
    pub const LAND_AREA_SQ_MILES_2010: &str = "LND110210D";
}

/// Canonical output headers that precede copied-through columns.
const COUNTY: &str = "County";
const STATE: &str = "State";

/// Splits a `"<County>, <ST>"` value into trimmed county and state parts.
///
/// Anything after a second comma is ignored.
///
/// # Errors
///
/// Returns [`ConvertError::MalformedArea`] if there is no state part.
pub fn split_county_state<'a>(
    row: &Row<'_>,
    table: &SourceTable,
    value: &'a str,
) -> Result<(&'a str, &'a str), ConvertError> {
    let mut parts = value.split(',').map(str::trim);
    match (parts.next(), parts.next()) {
        (Some(county), Some(state)) if !state.is_empty() => Ok((county, state)),
        _ => Err(ConvertError::MalformedArea {
            table: table.name().to_owned(),
            line: row.line(),
            value: value.to_owned(),
        }),
    }
}

fn state_abbr(
    row: &Row<'_>,
    table: &SourceTable,
    state: &str,
) -> Result<&'static str, ConvertError> {
    abbr_for_name(state).ok_or_else(|| ConvertError::UnknownState {
        table: table.name().to_owned(),
        line: row.line(),
        state: state.to_owned(),
    })
}

/// Converts the raw climate risk table.
///
/// Output columns are `ID, County, State` followed by every raw column
/// after the first.
///
/// # Errors
///
/// Returns [`ConvertError`] if a row lacks the county column, the county
/// value has no state part, or writing fails.
pub fn convert_risk<W: Write>(
    table: &SourceTable,
    out: &mut csv::Writer<W>,
) -> Result<usize, ConvertError> {
    let mut header = vec![columns::ID, COUNTY, STATE];
    header.extend(table.headers().iter().skip(1).map(String::as_str));
    out.write_record(&header)?;

    let mut written = 0;
    for row in table.rows() {
        let (county, state) = split_county_state(&row, table, row.field(raw::RISK_COUNTY)?)?;
        let mut record = vec![county_id(state, county), county.to_owned(), state.to_owned()];
        record.extend(row.values().skip(1).map(str::to_owned));
        out.write_record(&record)?;
        written += 1;
    }
    Ok(written)
}

/// Converts the raw home price table.
///
/// # Errors
///
/// Returns [`ConvertError`] if a row lacks a required column or writing
/// fails.
pub fn convert_home_prices<W: Write>(
    table: &SourceTable,
    out: &mut csv::Writer<W>,
) -> Result<usize, ConvertError> {
    out.write_record([columns::ID, COUNTY, STATE, columns::MEDIAN_PRICE])?;

    let mut written = 0;
    for row in table.rows() {
        let county = row.field(raw::HOME_COUNTY)?;
        let state = row.field(raw::HOME_STATE_ABBR)?;
        let price = row.field(raw::HOME_MEDIAN_PRICE)?;
        out.write_record([county_id(state, county).as_str(), county, state, price])?;
        written += 1;
    }
    Ok(written)
}

/// Converts the raw population estimate table, skipping state total rows.
///
/// # Errors
///
/// Returns [`ConvertError`] if a row lacks a required column, names an
/// unknown state, or writing fails.
pub fn convert_population<W: Write>(
    table: &SourceTable,
    out: &mut csv::Writer<W>,
) -> Result<usize, ConvertError> {
    out.write_record([columns::ID, columns::POPULATION])?;

    let mut written = 0;
    for row in table.rows() {
        let county = row.field(raw::POP_COUNTY)?;
        let state = row.field(raw::POP_STATE)?;
        if county == state {
            continue;
        }

        let abbr = state_abbr(&row, table, state)?;
        let population = row.field(raw::POP_ESTIMATE_2020)?;
        out.write_record([county_id(abbr, county).as_str(), population])?;
        written += 1;
    }
    Ok(written)
}

/// Converts the raw per-candidate presidential vote table.
///
/// # Errors
///
/// Returns [`ConvertError`] if a row lacks a required column, names an
/// unknown state, or writing fails.
pub fn convert_president<W: Write>(
    table: &SourceTable,
    out: &mut csv::Writer<W>,
) -> Result<usize, ConvertError> {
    out.write_record([columns::ID, columns::CANDIDATE, columns::VOTES])?;

    let mut written = 0;
    for row in table.rows() {
        let county = row.field(raw::PRES_COUNTY)?;
        let abbr = state_abbr(&row, table, row.field(raw::PRES_STATE)?)?;
        let candidate = row.field(raw::PRES_CANDIDATE)?;
        let votes = row.field(raw::PRES_TOTAL_VOTES)?;
        out.write_record([county_id(abbr, county).as_str(), candidate, votes])?;
        written += 1;
    }
    Ok(written)
}

/// Converts the raw land area table.
///
/// Rows whose area name has no comma (national and state totals) are
/// skipped. The raw county name lacks the `County` suffix the other
/// datasets use, so it is appended to the ID. Areas are rounded to the
/// nearest whole square mile, halves away from zero.
///
/// # Errors
///
/// Returns [`ConvertError`] if a row lacks a required column, the area is
/// not a non-negative decimal, or writing fails.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn convert_land_area<W: Write>(
    table: &SourceTable,
    out: &mut csv::Writer<W>,
) -> Result<usize, ConvertError> {
    out.write_record([columns::ID, columns::LAND_AREA_SQ_MILES])?;

    let mut written = 0;
    for row in table.rows() {
        let area_name = row.field(raw::LAND_AREA_NAME)?;
        if !area_name.contains(',') {
            continue;
        }

        let (county, state) = split_county_state(&row, table, area_name)?;
        let sq_miles = row.decimal(raw::LAND_AREA_SQ_MILES_2010)?;
        if sq_miles < 0.0 {
            return Err(ConvertError::NegativeLandArea {
                table: table.name().to_owned(),
                line: row.line(),
                value: sq_miles,
            });
        }

        let id = county_id(state, &format!("{county} County"));
        let rounded = sq_miles.round() as u64;
        out.write_record([id, rounded.to_string()])?;
        written += 1;
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use county_rank_loader::LoadError;

    use super::*;

    fn table(data: &str) -> SourceTable {
        SourceTable::from_reader("raw.csv", data.as_bytes()).unwrap()
    }

    fn run(
        data: &str,
        convert: fn(&SourceTable, &mut csv::Writer<Vec<u8>>) -> Result<usize, ConvertError>,
    ) -> Result<(usize, String), ConvertError> {
        let mut out = csv::Writer::from_writer(Vec::new());
        let written = convert(&table(data), &mut out)?;
        let bytes = out.into_inner().unwrap();
        Ok((written, String::from_utf8(bytes).unwrap()))
    }

    #[test]
    fn converts_risk_copying_score_columns() {
        let (written, csv) = run(
            "County,Heat,Wet Bulb,Total Risk Score\n\
             \"Alameda County, CA\",3,1,24\n",
            convert_risk,
        )
        .unwrap();
        assert_eq!(written, 1);
        assert_eq!(
            csv,
            "ID,County,State,Heat,Wet Bulb,Total Risk Score\n\
             CA - Alameda County,Alameda County,CA,3,1,24\n"
        );
    }

    #[test]
    fn risk_county_without_state_fails() {
        let err = run("County,Heat\nAlameda County,3\n", convert_risk).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedArea { line: 2, .. }));
    }

    #[test]
    fn converts_home_prices() {
        let (_, csv) = run(
            "County,State Abbrv,Median Home Price Q3 2022,Extra\n\
             Travis County,TX,550000,x\n",
            convert_home_prices,
        )
        .unwrap();
        assert_eq!(
            csv,
            "ID,County,State,Median Price\n\
             TX - Travis County,Travis County,TX,550000\n"
        );
    }

    #[test]
    fn converts_population_skipping_state_totals() {
        let (written, csv) = run(
            "STNAME,CTYNAME,POPESTIMATE2020\n\
             Alabama,Alabama,4921532\n\
             Alabama,Autauga County,56145\n\
             District of Columbia,District of Columbia,712816\n",
            convert_population,
        )
        .unwrap();
        assert_eq!(written, 1);
        assert_eq!(csv, "ID,Population\nAL - Autauga County,56145\n");
    }

    #[test]
    fn population_with_unknown_state_fails() {
        let err = run(
            "STNAME,CTYNAME,POPESTIMATE2020\nPuerto Rico,Adjuntas Municipio,17363\n",
            convert_population,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::UnknownState { ref state, .. } if state == "Puerto Rico"
        ));
    }

    #[test]
    fn converts_president_votes() {
        let (written, csv) = run(
            "state,county,candidate,party,total_votes\n\
             California,Alameda County,Joe Biden,DEM,617659\n\
             California,Alameda County,Donald Trump,REP,136309\n",
            convert_president,
        )
        .unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            csv,
            "ID,candidate,votes\n\
             CA - Alameda County,Joe Biden,617659\n\
             CA - Alameda County,Donald Trump,136309\n"
        );
    }

    #[test]
    fn president_missing_column_fails() {
        let err = run(
            "state,county,candidate\nCalifornia,Kern County,Joe Biden\n",
            convert_president,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConvertError::Load(LoadError::MissingColumn { ref column, .. })
                if column == "total_votes"
        ));
    }

    #[test]
    fn converts_land_area_rounding_and_suffixing() {
        let (written, csv) = run(
            "Areaname,STCOU,LND110210D\n\
             UNITED STATES,00000,3531905.43\n\
             ALABAMA,01000,50645.33\n\
             \"Autauga, AL\",01001,594.44\n\
             \"Baldwin, AL\",01003,1589.5\n",
            convert_land_area,
        )
        .unwrap();
        assert_eq!(written, 2);
        assert_eq!(
            csv,
            "ID,land area in square miles\n\
             AL - Autauga County,594\n\
             AL - Baldwin County,1590\n"
        );
    }

    #[test]
    fn land_area_must_be_decimal() {
        let err = run("Areaname,LND110210D\n\"Autauga, AL\",n/a\n", convert_land_area).unwrap_err();
        assert!(matches!(err, ConvertError::Load(LoadError::Parse { .. })));
    }

    #[test]
    fn negative_land_area_fails() {
        let err = run("Areaname,LND110210D\n\"Autauga, AL\",-3\n", convert_land_area).unwrap_err();
        assert!(matches!(err, ConvertError::NegativeLandArea { .. }));
    }
}
