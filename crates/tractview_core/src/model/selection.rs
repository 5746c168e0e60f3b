//! User selection state and display parameters.
//!
//! # Responsibility
//! - Model the transient year/category/column/opacity choice driving one
//!   filter-and-join cycle.
//! - Validate selection fields before any computation runs.
//!
//! # Invariants
//! - Opacity stays inside `[0.0, 1.0]` and is never NaN.
//! - A selected column always belongs to the selected category family.

use crate::model::indicator::IndicatorCategory;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Current user selection for one compute cycle.
///
/// Held only for the life of a user session; never persisted. Fields are
/// public so UI shells can rebuild the value per interaction; services call
/// [`Selection::validate`] before acting on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Data year to display.
    pub year: u16,
    /// Indicator family chosen on the category widget.
    pub category: IndicatorCategory,
    /// Specific column chosen on the column widget; `None` renders nothing
    /// unless a configured default column applies.
    pub column: Option<String>,
    /// Choropleth layer opacity in `[0.0, 1.0]`.
    pub opacity: f64,
}

/// Selection validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionError {
    OpacityOutOfRange(f64),
    ColumnOutsideCategory {
        column: String,
        category: IndicatorCategory,
    },
}

impl Display for SelectionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpacityOutOfRange(value) => {
                write!(f, "opacity {value} is outside the range 0.0..=1.0")
            }
            Self::ColumnOutsideCategory { column, category } => write!(
                f,
                "column `{column}` does not belong to the `{}` family",
                category.prefix()
            ),
        }
    }
}

impl Error for SelectionError {}

impl Selection {
    /// Creates a validated selection.
    pub fn new(
        year: u16,
        category: IndicatorCategory,
        column: Option<String>,
        opacity: f64,
    ) -> Result<Self, SelectionError> {
        let selection = Self {
            year,
            category,
            column,
            opacity,
        };
        selection.validate()?;
        Ok(selection)
    }

    /// Checks field-level invariants.
    ///
    /// # Errors
    /// - [`SelectionError::OpacityOutOfRange`] for NaN or out-of-range
    ///   opacity.
    /// - [`SelectionError::ColumnOutsideCategory`] when the column name does
    ///   not carry the category's prefix.
    pub fn validate(&self) -> Result<(), SelectionError> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(SelectionError::OpacityOutOfRange(self.opacity));
        }

        if let Some(column) = &self.column {
            if !self.category.matches_column(column) {
                return Err(SelectionError::ColumnOutsideCategory {
                    column: column.clone(),
                    category: self.category,
                });
            }
        }

        Ok(())
    }
}

/// Scalar map-display parameters passed through to the renderer untouched.
///
/// Defaults are the Arapahoe County frame the dashboards ship with.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapViewport {
    /// Map center latitude in degrees.
    pub center_lat: f64,
    /// Map center longitude in degrees.
    pub center_lon: f64,
    /// Renderer zoom level.
    pub zoom: f64,
}

impl Default for MapViewport {
    fn default() -> Self {
        Self {
            center_lat: 39.65,
            center_lon: -104.8,
            zoom: 10.4,
        }
    }
}
