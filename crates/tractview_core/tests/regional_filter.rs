use std::collections::BTreeMap;
use tractview_core::{filter_by_county, filter_by_county_year, IndicatorRow, IndicatorTable, TractId};

#[test]
fn county_filter_keeps_only_matching_rows() {
    let table = sample_table();

    let rows = filter_by_county(&table, "Arapahoe");
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.county == "Arapahoe"));
}

#[test]
fn county_filter_with_no_matches_returns_empty_not_error() {
    let table = sample_table();

    let rows = filter_by_county(&table, "Boulder");
    assert!(rows.is_empty());
}

#[test]
fn county_match_is_case_sensitive() {
    let table = sample_table();

    assert!(filter_by_county(&table, "arapahoe").is_empty());
}

#[test]
fn year_restriction_drops_other_years() {
    let table = sample_table();

    let rows = filter_by_county_year(&table, "Arapahoe", 2020);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tract.as_str(), "08005000100");

    let rows = filter_by_county_year(&table, "Arapahoe", 2018);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tract.as_str(), "08005000200");
}

#[test]
fn year_restriction_with_no_matching_year_returns_empty() {
    let table = sample_table();

    assert!(filter_by_county_year(&table, "Arapahoe", 2016).is_empty());
}

fn sample_table() -> IndicatorTable {
    let columns = ["FIPS", "COUNTY", "EP_POV150"]
        .into_iter()
        .map(str::to_string)
        .collect();

    let rows = vec![
        row("08005000100", "Arapahoe", 2020, Some(12.5)),
        row("08005000200", "Arapahoe", 2018, Some(9.0)),
        row("08031000100", "Denver", 2020, Some(20.0)),
    ];

    IndicatorTable::new(2020, columns, rows).unwrap()
}

fn row(fips: &str, county: &str, year: u16, poverty: Option<f64>) -> IndicatorRow {
    let mut values = BTreeMap::new();
    values.insert("EP_POV150".to_string(), poverty);

    IndicatorRow {
        tract: TractId::normalize(fips).unwrap(),
        county: county.to_string(),
        year,
        values,
    }
}
