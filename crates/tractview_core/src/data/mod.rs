//! Reference-data loading for boundary and indicator files.
//!
//! # Responsibility
//! - Read boundary GeoJSON and indicator CSV files into typed, immutable
//!   reference structures.
//! - Reject malformed or duplicate source rows instead of masking them.
//!
//! # Invariants
//! - Every identifier is normalized to the canonical form before it leaves
//!   this layer.
//! - Load failures are fatal to startup; no partially-loaded vintage is
//!   ever returned.

use crate::model::indicator::IndicatorTableError;
use crate::model::tract::TractIdError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub mod geometry;
pub mod indicator;
pub mod reference;

pub use geometry::load_geometry;
pub use indicator::load_indicators;

pub type DataResult<T> = Result<T, DataError>;

/// Reference-data load error.
#[derive(Debug)]
pub enum DataError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    CsvParse {
        path: PathBuf,
        source: csv::Error,
    },
    GeojsonParse {
        path: PathBuf,
        source: geojson::Error,
    },
    NotFeatureCollection {
        path: PathBuf,
    },
    MissingField {
        path: PathBuf,
        field: &'static str,
    },
    MissingTractId {
        path: PathBuf,
    },
    MissingGeometry {
        path: PathBuf,
        fips: String,
    },
    NonArealGeometry {
        path: PathBuf,
        fips: String,
    },
    InvalidTractId {
        path: PathBuf,
        source: TractIdError,
    },
    DuplicateTract {
        path: PathBuf,
        fips: String,
    },
    Table {
        path: PathBuf,
        source: IndicatorTableError,
    },
    Reference(reference::ReferenceError),
}

impl Display for DataError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read `{}`: {source}", path.display())
            }
            Self::CsvParse { path, source } => {
                write!(f, "invalid CSV in `{}`: {source}", path.display())
            }
            Self::GeojsonParse { path, source } => {
                write!(f, "invalid GeoJSON in `{}`: {source}", path.display())
            }
            Self::NotFeatureCollection { path } => write!(
                f,
                "`{}` is not a GeoJSON feature collection",
                path.display()
            ),
            Self::MissingField { path, field } => {
                write!(f, "`{}` has no `{field}` field", path.display())
            }
            Self::MissingTractId { path } => write!(
                f,
                "feature in `{}` carries no tract identifier property",
                path.display()
            ),
            Self::MissingGeometry { path, fips } => write!(
                f,
                "feature `{fips}` in `{}` has no geometry",
                path.display()
            ),
            Self::NonArealGeometry { path, fips } => write!(
                f,
                "feature `{fips}` in `{}` is not a polygon or multipolygon",
                path.display()
            ),
            Self::InvalidTractId { path, source } => {
                write!(f, "invalid tract identifier in `{}`: {source}", path.display())
            }
            Self::DuplicateTract { path, fips } => {
                write!(f, "duplicate tract `{fips}` in `{}`", path.display())
            }
            Self::Table { path, source } => {
                write!(f, "invalid indicator table `{}`: {source}", path.display())
            }
            Self::Reference(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DataError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::CsvParse { source, .. } => Some(source),
            Self::GeojsonParse { source, .. } => Some(source),
            Self::InvalidTractId { source, .. } => Some(source),
            Self::Table { source, .. } => Some(source),
            Self::Reference(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reference::ReferenceError> for DataError {
    fn from(value: reference::ReferenceError) -> Self {
        Self::Reference(value)
    }
}
