//! Deployment configuration for reference-data paths and display defaults.
//!
//! # Responsibility
//! - Load the TOML settings file naming the county and per-year data files.
//! - Validate the vintage list before any file is touched.
//!
//! # Invariants
//! - At least one vintage is configured and years are unique.
//! - The county code is exactly three digits.

use crate::model::selection::MapViewport;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

static COUNTY_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{3}$").expect("valid county code regex"));

fn default_log_level() -> String {
    crate::logging::default_log_level().to_string()
}

/// One year's data file pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VintageSource {
    /// Census year this vintage describes.
    pub year: u16,
    /// Boundary GeoJSON export for this year.
    pub geometry_path: PathBuf,
    /// Indicator CSV for this year.
    pub indicator_path: PathBuf,
}

/// File-logging settings consumed by [`crate::logging::init_logging`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Log level name; defaults per build mode.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Absolute log directory; logging stays off when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            dir: None,
        }
    }
}

/// Full deployment configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TractviewConfig {
    /// County name as spelled in the indicator CSV's county field.
    pub county: String,
    /// Three-digit county FIPS portion used to filter boundary features.
    pub county_code: String,
    /// Column used when a selection has none; off unless set.
    #[serde(default)]
    pub default_column: Option<String>,
    /// Display frame handed to the renderer.
    #[serde(default)]
    pub viewport: MapViewport,
    /// File logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Per-year data files.
    pub vintages: Vec<VintageSource>,
}

/// Configuration load/validation error.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    NoVintages,
    DuplicateYear(u16),
    InvalidCountyCode(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid config `{}`: {source}", path.display())
            }
            Self::NoVintages => write!(f, "config names no vintages; at least one is required"),
            Self::DuplicateYear(year) => {
                write!(f, "vintage year {year} is configured more than once")
            }
            Self::InvalidCountyCode(value) => {
                write!(f, "county code `{value}` is not a 3-digit FIPS code")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl TractviewConfig {
    /// Checks cross-field invariants after deserialization.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !COUNTY_CODE_RE.is_match(&self.county_code) {
            return Err(ConfigError::InvalidCountyCode(self.county_code.clone()));
        }

        if self.vintages.is_empty() {
            return Err(ConfigError::NoVintages);
        }

        let mut years = std::collections::BTreeSet::new();
        for vintage in &self.vintages {
            if !years.insert(vintage.year) {
                return Err(ConfigError::DuplicateYear(vintage.year));
            }
        }

        Ok(())
    }
}

/// Loads and validates a TOML configuration file.
pub fn load_config(path: &Path) -> Result<TractviewConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config: TractviewConfig = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL_CONFIG: &str = r#"
        county = "Arapahoe"
        county_code = "005"

        [[vintages]]
        year = 2020
        geometry_path = "data/tracts_2020.geojson"
        indicator_path = "data/svi_2020.csv"
    "#;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let config: TractviewConfig = toml::from_str(MINIMAL_CONFIG).expect("config should parse");
        config.validate().expect("config should validate");

        assert_eq!(config.county, "Arapahoe");
        assert_eq!(config.default_column, None);
        assert_eq!(config.viewport, MapViewport::default());
        assert_eq!(config.logging.dir, None);
        assert_eq!(config.vintages.len(), 1);
    }

    #[test]
    fn parses_viewport_and_default_column_overrides() {
        let raw = r#"
            county = "Arapahoe"
            county_code = "005"
            default_column = "EP_POV150"

            [viewport]
            center_lat = 39.0
            center_lon = -105.0
            zoom = 9.5

            [[vintages]]
            year = 2020
            geometry_path = "a.geojson"
            indicator_path = "a.csv"
        "#;

        let config: TractviewConfig = toml::from_str(raw).expect("config should parse");
        assert_eq!(config.default_column.as_deref(), Some("EP_POV150"));
        assert_eq!(config.viewport.zoom, 9.5);
    }

    #[test]
    fn validate_rejects_duplicate_years() {
        let raw = r#"
            county = "Arapahoe"
            county_code = "005"

            [[vintages]]
            year = 2020
            geometry_path = "a.geojson"
            indicator_path = "a.csv"

            [[vintages]]
            year = 2020
            geometry_path = "b.geojson"
            indicator_path = "b.csv"
        "#;

        let config: TractviewConfig = toml::from_str(raw).expect("config should parse");
        let err = config.validate().expect_err("duplicate year must be rejected");
        assert!(matches!(err, ConfigError::DuplicateYear(2020)));
    }

    #[test]
    fn validate_rejects_bad_county_code_and_empty_vintages() {
        let raw = r#"
            county = "Arapahoe"
            county_code = "5"
            vintages = []
        "#;

        let config: TractviewConfig = toml::from_str(raw).expect("config should parse");
        let err = config.validate().expect_err("county code must be rejected");
        assert!(matches!(err, ConfigError::InvalidCountyCode(_)));

        let raw = r#"
            county = "Arapahoe"
            county_code = "005"
            vintages = []
        "#;
        let config: TractviewConfig = toml::from_str(raw).expect("config should parse");
        let err = config.validate().expect_err("empty vintages must be rejected");
        assert!(matches!(err, ConfigError::NoVintages));
    }
}
