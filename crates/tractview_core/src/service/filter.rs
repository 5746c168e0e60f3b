//! Regional filter over the indicator table.
//!
//! # Responsibility
//! - Restrict indicator rows to the target county, optionally to one year.
//!
//! # Invariants
//! - County comparison is exact and case-sensitive, as in the source data.
//! - Zero matches is an empty result ("nothing to display"), never an
//!   error.

use crate::model::indicator::{IndicatorRow, IndicatorTable};

/// Returns the rows whose county field equals `county`.
pub fn filter_by_county<'a>(table: &'a IndicatorTable, county: &str) -> Vec<&'a IndicatorRow> {
    table
        .rows()
        .iter()
        .filter(|row| row.county == county)
        .collect()
}

/// Returns the rows matching both `county` and `year`.
///
/// Single-year tables stamp every row with the table year, so the year
/// restriction is a no-op for them and meaningful for multi-year exports.
pub fn filter_by_county_year<'a>(
    table: &'a IndicatorTable,
    county: &str,
    year: u16,
) -> Vec<&'a IndicatorRow> {
    table
        .rows()
        .iter()
        .filter(|row| row.county == county && row.year == year)
        .collect()
}
