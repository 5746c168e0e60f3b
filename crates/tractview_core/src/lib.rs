//! Core domain logic for the tractview choropleth data service.
//! This crate is the single source of truth for filter/join invariants.

pub mod catalog;
pub mod config;
pub mod data;
pub mod logging;
pub mod model;
pub mod render;
pub mod service;

pub use catalog::columns::{columns_for_category, columns_with_prefix, contains_column};
pub use config::{load_config, ConfigError, LoggingConfig, TractviewConfig, VintageSource};
pub use data::reference::{load_reference, ReferenceData, ReferenceError, VintageData};
pub use data::{DataError, DataResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::indicator::{
    IndicatorCategory, IndicatorRow, IndicatorTable, IndicatorTableError,
};
pub use model::joined::{JoinDiagnostics, JoinedTractRecord, JoinedView};
pub use model::selection::{MapViewport, Selection, SelectionError};
pub use model::tract::{TractGeometry, TractId, TractIdError};
pub use render::{to_feature_collection, to_geojson_string};
pub use service::filter::{filter_by_county, filter_by_county_year};
pub use service::join::{join_geometry, JoinError, JoinOutcome};
pub use service::view::{compute_joined_view, ViewError, ViewOptions};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
