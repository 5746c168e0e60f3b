//! Immutable reference data shared by every compute cycle.
//!
//! # Responsibility
//! - Own all loaded year vintages behind one explicit container.
//! - Resolve a selected year to its vintage, or fail loudly.
//!
//! # Invariants
//! - Vintage years are unique.
//! - An unsupported year is always an error, never a fallback vintage.

use crate::config::TractviewConfig;
use crate::data::{load_geometry, load_indicators, DataResult};
use crate::model::indicator::IndicatorTable;
use crate::model::tract::{TractGeometry, TractId};
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// One year's boundary set and indicator table.
#[derive(Debug, Clone, PartialEq)]
pub struct VintageData {
    year: u16,
    /// Tract boundaries keyed by canonical identifier.
    pub geometry: BTreeMap<TractId, TractGeometry>,
    /// The matching indicator table.
    pub indicators: IndicatorTable,
}

impl VintageData {
    pub fn new(
        year: u16,
        geometry: BTreeMap<TractId, TractGeometry>,
        indicators: IndicatorTable,
    ) -> Self {
        Self {
            year,
            geometry,
            indicators,
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }
}

/// Year-resolution error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceError {
    UnsupportedYear { year: u16, supported: Vec<u16> },
    DuplicateYear(u16),
}

impl Display for ReferenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedYear { year, supported } => {
                let supported = supported
                    .iter()
                    .map(u16::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "unsupported year {year}; loaded vintages: {supported}")
            }
            Self::DuplicateYear(year) => {
                write!(f, "vintage year {year} is configured more than once")
            }
        }
    }
}

impl Error for ReferenceError {}

/// All loaded vintages plus the target county, read-only after load.
///
/// Passed by reference into the filter/join services; nothing in the crate
/// holds this in global state.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceData {
    county: String,
    vintages: BTreeMap<u16, VintageData>,
}

impl ReferenceData {
    /// Assembles reference data, rejecting duplicate vintage years.
    pub fn new(
        county: impl Into<String>,
        vintages: Vec<VintageData>,
    ) -> Result<Self, ReferenceError> {
        let mut by_year = BTreeMap::new();
        for vintage in vintages {
            let year = vintage.year();
            if by_year.insert(year, vintage).is_some() {
                return Err(ReferenceError::DuplicateYear(year));
            }
        }

        Ok(Self {
            county: county.into(),
            vintages: by_year,
        })
    }

    /// Target county name used by the regional filter.
    pub fn county(&self) -> &str {
        &self.county
    }

    /// Resolves one year's vintage.
    ///
    /// # Errors
    /// - [`ReferenceError::UnsupportedYear`] for years with no loaded
    ///   vintage; the error lists what is loaded.
    pub fn vintage(&self, year: u16) -> Result<&VintageData, ReferenceError> {
        self.vintages
            .get(&year)
            .ok_or_else(|| ReferenceError::UnsupportedYear {
                year,
                supported: self.supported_years(),
            })
    }

    /// Loaded vintage years, ascending.
    pub fn supported_years(&self) -> Vec<u16> {
        self.vintages.keys().copied().collect()
    }
}

/// Loads every configured vintage into one [`ReferenceData`].
///
/// Any file-level failure aborts the whole load; the process cannot run on
/// partial reference data.
pub fn load_reference(config: &TractviewConfig) -> DataResult<ReferenceData> {
    let started_at = Instant::now();
    info!(
        "event=reference_load module=data status=start county={} vintages={}",
        config.county,
        config.vintages.len()
    );

    let mut vintages = Vec::with_capacity(config.vintages.len());
    for source in &config.vintages {
        let geometry = load_geometry(&source.geometry_path, &config.county_code, source.year)?;
        let indicators = load_indicators(&source.indicator_path, source.year)?;
        vintages.push(VintageData::new(source.year, geometry, indicators));
    }

    let reference = ReferenceData::new(config.county.clone(), vintages)?;
    info!(
        "event=reference_load module=data status=ok county={} years={:?} duration_ms={}",
        reference.county(),
        reference.supported_years(),
        started_at.elapsed().as_millis()
    );

    Ok(reference)
}
