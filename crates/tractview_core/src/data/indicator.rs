//! Indicator-table loader for SVI CSV exports.
//!
//! # Responsibility
//! - Read one year's indicator CSV into a typed [`IndicatorTable`].
//! - Normalize identifiers and fold no-data cells into `None`.
//!
//! # Invariants
//! - The returned column list preserves the CSV header order.
//! - Duplicate `(tract, year)` rows reject the whole file.

use crate::data::{DataError, DataResult};
use crate::model::indicator::{category_of, IndicatorRow, IndicatorTable};
use crate::model::tract::TractId;
use log::{error, info};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

const FIPS_FIELD: &str = "FIPS";
const COUNTY_FIELD: &str = "COUNTY";
const YEAR_FIELD: &str = "YEAR";

/// CDC SVI exports use -999 for suppressed or unavailable values.
const NO_DATA_SENTINEL: f64 = -999.0;

/// Loads one year's indicator CSV.
///
/// # Contract
/// - The header must carry `FIPS` and `COUNTY`; an optional `YEAR` column
///   overrides `year` per row (multi-year exports).
/// - Cells that are empty, non-numeric, non-finite, or the -999 sentinel
///   load as `None`.
///
/// # Errors
/// - Missing or unreadable file, malformed CSV, missing required header
///   fields, invalid identifiers, and duplicate rows all reject the load.
pub fn load_indicators(path: &Path, year: u16) -> DataResult<IndicatorTable> {
    let started_at = Instant::now();
    info!(
        "event=indicator_load module=data status=start year={year} path={}",
        path.display()
    );

    match read_table(path, year) {
        Ok(table) => {
            info!(
                "event=indicator_load module=data status=ok year={year} rows={} columns={} duration_ms={}",
                table.rows().len(),
                table.columns().len(),
                started_at.elapsed().as_millis()
            );
            Ok(table)
        }
        Err(err) => {
            error!(
                "event=indicator_load module=data status=error year={year} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn read_table(path: &Path, year: u16) -> DataResult<IndicatorTable> {
    let file = std::fs::File::open(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| csv_error(path, source))?
        .clone();
    let columns: Vec<String> = headers.iter().map(str::to_string).collect();

    let fips_index = field_index(&columns, FIPS_FIELD)
        .ok_or(DataError::MissingField {
            path: path.to_path_buf(),
            field: FIPS_FIELD,
        })?;
    let county_index = field_index(&columns, COUNTY_FIELD)
        .ok_or(DataError::MissingField {
            path: path.to_path_buf(),
            field: COUNTY_FIELD,
        })?;
    let year_index = field_index(&columns, YEAR_FIELD);

    // Only columns belonging to an indicator family carry numeric values;
    // administrative columns stay out of the per-row value map.
    let indicator_indexes: Vec<(usize, &str)> = columns
        .iter()
        .enumerate()
        .filter(|(_, name)| category_of(name).is_some())
        .map(|(index, name)| (index, name.as_str()))
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| csv_error(path, source))?;

        let raw_fips = record.get(fips_index).unwrap_or_default();
        let tract = TractId::normalize(raw_fips).map_err(|source| DataError::InvalidTractId {
            path: path.to_path_buf(),
            source,
        })?;

        let county = record.get(county_index).unwrap_or_default().trim().to_string();

        let row_year = match year_index {
            Some(index) => record
                .get(index)
                .and_then(|value| value.trim().parse::<u16>().ok())
                .unwrap_or(year),
            None => year,
        };

        let mut values = BTreeMap::new();
        for (index, name) in &indicator_indexes {
            let cell = record.get(*index).unwrap_or_default();
            values.insert((*name).to_string(), parse_cell(cell));
        }

        rows.push(IndicatorRow {
            tract,
            county,
            year: row_year,
            values,
        });
    }

    IndicatorTable::new(year, columns, rows).map_err(|source| DataError::Table {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_cell(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value != NO_DATA_SENTINEL)
}

fn field_index(columns: &[String], field: &str) -> Option<usize> {
    columns.iter().position(|name| name == field)
}

fn csv_error(path: &Path, source: csv::Error) -> DataError {
    DataError::CsvParse {
        path: path.to_path_buf(),
        source,
    }
}
