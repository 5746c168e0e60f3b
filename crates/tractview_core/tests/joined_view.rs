use std::collections::BTreeMap;
use tractview_core::{
    compute_joined_view, IndicatorCategory, IndicatorRow, IndicatorTable, ReferenceData,
    ReferenceError, Selection, SelectionError, TractGeometry, TractId, ViewError, ViewOptions,
    VintageData,
};

#[test]
fn end_to_end_scenario_joins_exactly_the_shared_tract() {
    let reference = arapahoe_reference();
    let selection = Selection::new(
        2020,
        IndicatorCategory::Percent,
        Some("EP_POV150".to_string()),
        0.8,
    )
    .unwrap();

    let view = compute_joined_view(&selection, &reference, &ViewOptions::default()).unwrap();

    assert_eq!(view.records.len(), 1);
    assert_eq!(view.records[0].tract.as_str(), "08005000100");
    assert_eq!(view.records[0].value, Some(12.5));
    assert_eq!(view.column.as_deref(), Some("EP_POV150"));
    assert_eq!(view.opacity, 0.8);

    let ids: Vec<&str> = view
        .records
        .iter()
        .map(|record| record.tract.as_str())
        .collect();
    assert!(!ids.contains(&"08005000200"));
    assert!(!ids.contains(&"08005000300"));
}

#[test]
fn unsupported_year_is_an_error_not_a_fallback() {
    let reference = multi_year_reference(&[2018, 2020]);
    let selection = Selection::new(
        2016,
        IndicatorCategory::Percent,
        Some("EP_POV150".to_string()),
        1.0,
    )
    .unwrap();

    let err = compute_joined_view(&selection, &reference, &ViewOptions::default()).unwrap_err();
    match err {
        ViewError::Reference(ReferenceError::UnsupportedYear { year, supported }) => {
            assert_eq!(year, 2016);
            assert_eq!(supported, vec![2018, 2020]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn no_column_and_no_default_yields_the_empty_view() {
    let reference = arapahoe_reference();
    let selection = Selection::new(2020, IndicatorCategory::Percent, None, 1.0).unwrap();

    let view = compute_joined_view(&selection, &reference, &ViewOptions::default()).unwrap();

    assert!(view.is_empty());
    assert_eq!(view.column, None);
    assert_eq!(view.year, 2020);
}

#[test]
fn configured_default_column_fills_an_empty_selection() {
    let reference = arapahoe_reference();
    let selection = Selection::new(2020, IndicatorCategory::Percent, None, 1.0).unwrap();
    let options = ViewOptions {
        default_column: Some("EP_POV150".to_string()),
        ..ViewOptions::default()
    };

    let view = compute_joined_view(&selection, &reference, &options).unwrap();

    assert_eq!(view.column.as_deref(), Some("EP_POV150"));
    assert_eq!(view.records.len(), 1);
}

#[test]
fn column_absent_from_the_table_yields_the_empty_view() {
    let reference = arapahoe_reference();
    let selection = Selection::new(
        2020,
        IndicatorCategory::Percent,
        Some("EP_UNKNOWN".to_string()),
        1.0,
    )
    .unwrap();

    let view = compute_joined_view(&selection, &reference, &ViewOptions::default()).unwrap();
    assert!(view.is_empty());
}

#[test]
fn out_of_range_opacity_is_rejected() {
    let reference = arapahoe_reference();
    let selection = Selection {
        year: 2020,
        category: IndicatorCategory::Percent,
        column: Some("EP_POV150".to_string()),
        opacity: 1.5,
    };

    let err = compute_joined_view(&selection, &reference, &ViewOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        ViewError::Selection(SelectionError::OpacityOutOfRange(_))
    ));
}

#[test]
fn nan_opacity_is_rejected() {
    let err = Selection::new(
        2020,
        IndicatorCategory::Percent,
        Some("EP_POV150".to_string()),
        f64::NAN,
    )
    .unwrap_err();
    assert!(matches!(err, SelectionError::OpacityOutOfRange(_)));
}

#[test]
fn column_outside_the_selected_category_is_rejected() {
    let err = Selection::new(
        2020,
        IndicatorCategory::Flag,
        Some("EP_POV150".to_string()),
        1.0,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        SelectionError::ColumnOutsideCategory { .. }
    ));
}

#[test]
fn duplicate_vintage_years_are_rejected_at_assembly() {
    let first = vintage(2020, &[("08005000100", Some(1.0))]);
    let second = vintage(2020, &[("08005000200", Some(2.0))]);

    let err = ReferenceData::new("Arapahoe", vec![first, second]).unwrap_err();
    assert!(matches!(err, ReferenceError::DuplicateYear(2020)));
}

fn arapahoe_reference() -> ReferenceData {
    let geometry = geometry_map(&["08005000100", "08005000200"]);
    let columns = ["FIPS", "COUNTY", "EP_POV150"]
        .into_iter()
        .map(str::to_string)
        .collect();
    let rows = vec![
        row("08005000100", "Arapahoe", 2020, Some(12.5)),
        row("08005000300", "Arapahoe", 2020, Some(9.0)),
    ];
    let indicators = IndicatorTable::new(2020, columns, rows).unwrap();

    ReferenceData::new("Arapahoe", vec![VintageData::new(2020, geometry, indicators)]).unwrap()
}

fn multi_year_reference(years: &[u16]) -> ReferenceData {
    let vintages = years
        .iter()
        .map(|year| vintage(*year, &[("08005000100", Some(1.0))]))
        .collect();
    ReferenceData::new("Arapahoe", vintages).unwrap()
}

fn vintage(year: u16, rows: &[(&str, Option<f64>)]) -> VintageData {
    let geometry = geometry_map(&rows.iter().map(|(fips, _)| *fips).collect::<Vec<_>>());
    let columns = ["FIPS", "COUNTY", "EP_POV150"]
        .into_iter()
        .map(str::to_string)
        .collect();
    let table_rows = rows
        .iter()
        .map(|(fips, value)| row(fips, "Arapahoe", year, *value))
        .collect();
    let indicators = IndicatorTable::new(year, columns, table_rows).unwrap();

    VintageData::new(year, geometry, indicators)
}

fn geometry_map(ids: &[&str]) -> BTreeMap<TractId, TractGeometry> {
    ids.iter()
        .enumerate()
        .map(|(index, fips)| {
            let id = TractId::normalize(fips).unwrap();
            (id.clone(), TractGeometry::new(id, square(index as f64 * 2.0)))
        })
        .collect()
}

fn square(origin: f64) -> geo_types::Geometry<f64> {
    geo_types::Geometry::Polygon(geo_types::Polygon::new(
        geo_types::LineString::from(vec![
            (origin, 0.0),
            (origin + 1.0, 0.0),
            (origin + 1.0, 1.0),
            (origin, 1.0),
            (origin, 0.0),
        ]),
        Vec::new(),
    ))
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
