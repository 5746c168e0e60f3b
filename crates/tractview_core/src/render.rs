//! GeoJSON hand-off for the external map renderer.
//!
//! # Responsibility
//! - Convert a [`JoinedView`] into the feature collection the choropleth
//!   layer consumes.
//!
//! # Invariants
//! - One feature per joined record, keyed by the `FIPS` property.
//! - No-data values serialize as JSON null, never as a magic number.

use crate::model::joined::JoinedView;
use geojson::{Feature, FeatureCollection, GeoJson};
use serde_json::{Map, Value};

const FIPS_PROPERTY: &str = "FIPS";

/// Builds the renderer-facing feature collection for one view.
///
/// Each feature carries the tract boundary, a `FIPS` property, and — when
/// the view has a column — that column name as a property holding the
/// joined value or null. The scalar display parameters (opacity, viewport)
/// stay on the view itself; they are layer settings, not feature data.
pub fn to_feature_collection(view: &JoinedView) -> FeatureCollection {
    let features = view
        .records
        .iter()
        .map(|record| {
            let mut properties = Map::new();
            properties.insert(
                FIPS_PROPERTY.to_string(),
                Value::String(record.tract.as_str().to_string()),
            );

            if let Some(column) = &view.column {
                let value = record
                    .value
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null);
                properties.insert(column.clone(), value);
            }

            Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::from(
                    &record.boundary,
                ))),
                id: Some(geojson::feature::Id::String(
                    record.tract.as_str().to_string(),
                )),
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Serializes the view's feature collection to a GeoJSON string.
pub fn to_geojson_string(view: &JoinedView) -> String {
    GeoJson::FeatureCollection(to_feature_collection(view)).to_string()
}
