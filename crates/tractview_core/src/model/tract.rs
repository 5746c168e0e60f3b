//! Census-tract identity and boundary model.
//!
//! # Responsibility
//! - Define the canonical tract identifier shared by every data source.
//! - Normalize vintage-specific identifier spellings into one shape.
//!
//! # Invariants
//! - A canonical id is exactly 11 ASCII digits (2 state + 3 county + 6 tract).
//! - `TractId::normalize` is idempotent on canonical input.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Canonical FIPS identifier width: state (2) + county (3) + tract (6).
pub const TRACT_ID_DIGITS: usize = 11;

static DIGITS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid digits regex"));

/// Canonical census-tract identifier (11-digit FIPS code).
///
/// Source vintages disagree on spelling: CSV exports parsed as integers lose
/// the leading state zero, and some boundary exports carry extra leading
/// characters. [`TractId::normalize`] folds all of them into one shape so
/// that the geometry/indicator join can key on plain string equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TractId(String);

/// Identifier normalization error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TractIdError {
    Empty,
    NonNumeric { value: String },
}

impl Display for TractIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "tract identifier is empty"),
            Self::NonNumeric { value } => {
                write!(f, "tract identifier `{value}` is not a numeric FIPS code")
            }
        }
    }
}

impl Error for TractIdError {}

impl TractId {
    /// Normalizes a raw identifier into the canonical 11-digit form.
    ///
    /// # Contract
    /// - Surrounding whitespace is trimmed.
    /// - Inputs longer than 11 characters keep their rightmost 11 (older
    ///   vintages prepend a county-level digit that must be stripped).
    /// - Inputs shorter than 11 digits are left-padded with zeros (integer
    ///   parsing drops the leading state zero).
    /// - Normalizing an already-canonical id is a no-op.
    ///
    /// # Errors
    /// - [`TractIdError::Empty`] when nothing remains after trimming.
    /// - [`TractIdError::NonNumeric`] when the retained characters are not
    ///   all ASCII digits.
    pub fn normalize(raw: &str) -> Result<Self, TractIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TractIdError::Empty);
        }

        let retained = if trimmed.len() > TRACT_ID_DIGITS {
            let cut = trimmed
                .char_indices()
                .rev()
                .nth(TRACT_ID_DIGITS - 1)
                .map(|(index, _)| index)
                .unwrap_or(0);
            &trimmed[cut..]
        } else {
            trimmed
        };

        if !DIGITS_RE.is_match(retained) {
            return Err(TractIdError::NonNumeric {
                value: raw.trim().to_string(),
            });
        }

        Ok(Self(format!("{:0>width$}", retained, width = TRACT_ID_DIGITS)))
    }

    /// Returns the canonical identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the 3-digit county portion of the identifier.
    pub fn county_code(&self) -> &str {
        &self.0[2..5]
    }

    /// Returns the 2-digit state portion of the identifier.
    pub fn state_code(&self) -> &str {
        &self.0[..2]
    }
}

impl Display for TractId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One census tract boundary record.
///
/// Loaded once per year vintage and immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct TractGeometry {
    /// Canonical tract identifier.
    pub id: TractId,
    /// County portion of the identifier, kept for regional filtering.
    pub county_code: String,
    /// Polygon or multipolygon boundary.
    pub boundary: geo_types::Geometry<f64>,
}

impl TractGeometry {
    /// Creates a boundary record; the county code is derived from the id.
    pub fn new(id: TractId, boundary: geo_types::Geometry<f64>) -> Self {
        let county_code = id.county_code().to_string();
        Self {
            id,
            county_code,
            boundary,
        }
    }
}
