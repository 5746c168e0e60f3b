//! Boundary-vintage loader for GeoJSON tract exports.
//!
//! # Responsibility
//! - Read one year's tract boundaries from a GeoJSON feature collection.
//! - Keep only the target county's tracts, keyed by canonical id.
//!
//! # Invariants
//! - Returned geometries are polygons or multipolygons only.
//! - Duplicate tract identifiers reject the whole file.

use crate::data::{DataError, DataResult};
use crate::model::tract::{TractGeometry, TractId};
use log::{error, info};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Instant;

/// Feature properties probed, in order, for the tract identifier.
const ID_PROPERTIES: &[&str] = &["FIPS", "GEOID", "GEOID20"];

/// Loads one boundary vintage and keeps the target county's tracts.
///
/// # Contract
/// - `county_code` is the 3-digit county FIPS portion; features outside it
///   are skipped, matching the pre-filtered county shapefiles the
///   dashboards started from.
/// - Feature identifiers are normalized before keying, so vintage spelling
///   differences never reach the join.
///
/// # Errors
/// - Missing or unreadable file, non-FeatureCollection payloads, features
///   without an identifier property or geometry, non-areal geometry, and
///   duplicate identifiers all reject the load.
pub fn load_geometry(
    path: &Path,
    county_code: &str,
    year: u16,
) -> DataResult<BTreeMap<TractId, TractGeometry>> {
    let started_at = Instant::now();
    info!(
        "event=geometry_load module=data status=start year={year} path={}",
        path.display()
    );

    match read_vintage(path, county_code) {
        Ok(tracts) => {
            info!(
                "event=geometry_load module=data status=ok year={year} tracts={} duration_ms={}",
                tracts.len(),
                started_at.elapsed().as_millis()
            );
            Ok(tracts)
        }
        Err(err) => {
            error!(
                "event=geometry_load module=data status=error year={year} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn read_vintage(path: &Path, county_code: &str) -> DataResult<BTreeMap<TractId, TractGeometry>> {
    let raw = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let geojson = raw
        .parse::<geojson::GeoJson>()
        .map_err(|source| DataError::GeojsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let collection = match geojson {
        geojson::GeoJson::FeatureCollection(collection) => collection,
        _ => {
            return Err(DataError::NotFeatureCollection {
                path: path.to_path_buf(),
            })
        }
    };

    let mut tracts = BTreeMap::new();
    for feature in collection.features {
        let raw_id = feature_tract_id(&feature).ok_or_else(|| DataError::MissingTractId {
            path: path.to_path_buf(),
        })?;

        let id = TractId::normalize(&raw_id).map_err(|source| DataError::InvalidTractId {
            path: path.to_path_buf(),
            source,
        })?;

        if id.county_code() != county_code {
            continue;
        }

        let geometry = feature.geometry.ok_or_else(|| DataError::MissingGeometry {
            path: path.to_path_buf(),
            fips: id.as_str().to_string(),
        })?;

        let boundary = geo_types::Geometry::<f64>::try_from(geometry.value).map_err(|source| {
            DataError::GeojsonParse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        if !matches!(
            boundary,
            geo_types::Geometry::Polygon(_) | geo_types::Geometry::MultiPolygon(_)
        ) {
            return Err(DataError::NonArealGeometry {
                path: path.to_path_buf(),
                fips: id.as_str().to_string(),
            });
        }

        let record = TractGeometry::new(id.clone(), boundary);
        if tracts.insert(id.clone(), record).is_some() {
            return Err(DataError::DuplicateTract {
                path: path.to_path_buf(),
                fips: id.as_str().to_string(),
            });
        }
    }

    Ok(tracts)
}

fn feature_tract_id(feature: &geojson::Feature) -> Option<String> {
    let properties = feature.properties.as_ref()?;
    for name in ID_PROPERTIES {
        match properties.get(*name) {
            Some(serde_json::Value::String(value)) => return Some(value.clone()),
            // Integer-typed identifiers lose their leading zero; the
            // normalizer restores it.
            Some(serde_json::Value::Number(value)) => return Some(value.to_string()),
            _ => continue,
        }
    }
    None
}
