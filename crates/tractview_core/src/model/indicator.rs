//! Social-vulnerability indicator model.
//!
//! # Responsibility
//! - Classify indicator columns into the four SVI name families.
//! - Hold one year's indicator rows keyed by canonical tract id.
//!
//! # Invariants
//! - Column order mirrors the source CSV header exactly.
//! - A table never contains two rows for the same tract and year.
//! - Missing or unusable cell values are `None`, never a magic number.

use crate::model::tract::TractId;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// SVI indicator column family, identified by the column-name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorCategory {
    /// Raw population estimate columns (`E_`).
    Estimate,
    /// Percentage columns (`EP_`).
    Percent,
    /// Percentile-rank columns (`EPL_`).
    Percentile,
    /// Binary flag columns (`F_`).
    Flag,
}

impl IndicatorCategory {
    /// All families, in the order the source dataset groups them.
    pub fn all() -> &'static [IndicatorCategory] {
        &[
            Self::Estimate,
            Self::Percent,
            Self::Percentile,
            Self::Flag,
        ]
    }

    /// Column-name prefix encoding this family.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Estimate => "E_",
            Self::Percent => "EP_",
            Self::Percentile => "EPL_",
            Self::Flag => "F_",
        }
    }

    /// Human-facing label used by selection widgets.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Estimate => "Total",
            Self::Percent => "Pct.",
            Self::Percentile => "Percentile",
            Self::Flag => "Flag",
        }
    }

    /// Parses a family from its prefix string.
    pub fn parse_prefix(value: &str) -> Option<Self> {
        match value {
            "E_" => Some(Self::Estimate),
            "EP_" => Some(Self::Percent),
            "EPL_" => Some(Self::Percentile),
            "F_" => Some(Self::Flag),
            _ => None,
        }
    }

    /// Returns whether `column` belongs to this family.
    ///
    /// Families share leading letters (`E` < `EP` < `EPL`), so membership
    /// is checked longest-prefix-first via [`category_of`].
    pub fn matches_column(&self, column: &str) -> bool {
        category_of(column) == Some(*self)
    }
}

/// Classifies one column name into its indicator family.
///
/// Returns `None` for non-indicator columns such as `FIPS` or `COUNTY`.
pub fn category_of(column: &str) -> Option<IndicatorCategory> {
    if column.starts_with("EPL_") {
        Some(IndicatorCategory::Percentile)
    } else if column.starts_with("EP_") {
        Some(IndicatorCategory::Percent)
    } else if column.starts_with("E_") {
        Some(IndicatorCategory::Estimate)
    } else if column.starts_with("F_") {
        Some(IndicatorCategory::Flag)
    } else {
        None
    }
}

/// One tract's indicator values for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRow {
    /// Canonical tract identifier, normalized at load.
    pub tract: TractId,
    /// County name as spelled by the source dataset.
    pub county: String,
    /// Data year this row describes.
    pub year: u16,
    /// Indicator column name -> value; `None` marks no-data cells.
    pub values: BTreeMap<String, Option<f64>>,
}

impl IndicatorRow {
    /// Returns the value for `column`, flattening missing-column and
    /// no-data into `None`.
    ///
    /// Callers that need to distinguish an unknown column from a no-data
    /// cell check [`IndicatorTable::contains_column`] first.
    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied().flatten()
    }
}

/// One year's indicator table with the source column order preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorTable {
    year: u16,
    columns: Vec<String>,
    rows: Vec<IndicatorRow>,
}

/// Table construction error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndicatorTableError {
    DuplicateTract { fips: String, year: u16 },
}

impl Display for IndicatorTableError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTract { fips, year } => write!(
                f,
                "duplicate tract `{fips}` for year {year} in indicator table"
            ),
        }
    }
}

impl Error for IndicatorTableError {}

impl IndicatorTable {
    /// Creates a table, rejecting duplicate `(tract, year)` rows.
    ///
    /// Duplicates are a data-quality error in the source file; silently
    /// keeping either row would make the join nondeterministic.
    pub fn new(
        year: u16,
        columns: Vec<String>,
        rows: Vec<IndicatorRow>,
    ) -> Result<Self, IndicatorTableError> {
        let mut seen = std::collections::BTreeSet::new();
        for row in &rows {
            if !seen.insert((row.tract.clone(), row.year)) {
                return Err(IndicatorTableError::DuplicateTract {
                    fips: row.tract.as_str().to_string(),
                    year: row.year,
                });
            }
        }

        Ok(Self {
            year,
            columns,
            rows,
        })
    }

    /// Data year this table was loaded for.
    pub fn year(&self) -> u16 {
        self.year
    }

    /// Column names in source-header order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// All rows, in source order.
    pub fn rows(&self) -> &[IndicatorRow] {
        &self.rows
    }

    /// Returns whether `column` appears in the source header.
    pub fn contains_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }
}
