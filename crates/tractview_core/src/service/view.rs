//! Joined-view computation: one selection in, one rendering hand-off out.
//!
//! # Responsibility
//! - Resolve the selected vintage, apply the regional filter, run the
//!   join, and assemble the [`JoinedView`] envelope.
//! - Apply the configured default-column policy when nothing is selected.
//!
//! # Invariants
//! - Pure request/response: no state survives between calls, and the only
//!   side effect is diagnostic logging.
//! - An unsupported year propagates as an error, never as a fallback
//!   vintage's result.
//! - A missing or unknown column produces the empty view, not a failure.

use crate::catalog::columns::contains_column;
use crate::data::reference::{ReferenceData, ReferenceError};
use crate::model::joined::JoinedView;
use crate::model::selection::{MapViewport, Selection, SelectionError};
use crate::service::filter::filter_by_county_year;
use crate::service::join::{join_geometry, JoinError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Per-deployment knobs for view computation.
///
/// `default_column` is the explicit opt-in replacement for the silent
/// fallback some dashboard variants had: when the selection carries no
/// column and this is unset, the view is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewOptions {
    /// Column used when the selection has none.
    pub default_column: Option<String>,
    /// Display frame copied into every view.
    pub viewport: MapViewport,
}

/// View computation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewError {
    Selection(SelectionError),
    Reference(ReferenceError),
    Join(JoinError),
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Selection(err) => write!(f, "{err}"),
            Self::Reference(err) => write!(f, "{err}"),
            Self::Join(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ViewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Selection(err) => Some(err),
            Self::Reference(err) => Some(err),
            Self::Join(err) => Some(err),
        }
    }
}

impl From<SelectionError> for ViewError {
    fn from(value: SelectionError) -> Self {
        Self::Selection(value)
    }
}

impl From<ReferenceError> for ViewError {
    fn from(value: ReferenceError) -> Self {
        Self::Reference(value)
    }
}

impl From<JoinError> for ViewError {
    fn from(value: JoinError) -> Self {
        Self::Join(value)
    }
}

/// Computes the joined tract view for one selection.
///
/// # Contract
/// - Validates the selection, resolves the year vintage, restricts rows to
///   the reference county and selected year, joins on the tract id, and
///   copies opacity/viewport through for the renderer.
/// - No column selected and no configured default, or a column absent from
///   the vintage's table, yields the empty view ("render nothing").
///
/// # Errors
/// - [`ViewError::Selection`] for invalid opacity or a column outside the
///   selected category.
/// - [`ViewError::Reference`] for a year with no loaded vintage.
/// - [`ViewError::Join`] for duplicate identifiers in the join input.
pub fn compute_joined_view(
    selection: &Selection,
    reference: &ReferenceData,
    options: &ViewOptions,
) -> Result<JoinedView, ViewError> {
    selection.validate()?;
    let vintage = reference.vintage(selection.year)?;

    let column = match selection
        .column
        .as_deref()
        .or(options.default_column.as_deref())
    {
        Some(column) => column,
        None => {
            info!(
                "event=view_compute module=service status=no_column year={} reason=unselected",
                selection.year
            );
            return Ok(JoinedView::empty(
                selection.year,
                selection.opacity,
                options.viewport,
            ));
        }
    };

    if !contains_column(&vintage.indicators, column) {
        warn!(
            "event=view_compute module=service status=no_column year={} column={column} reason=unknown_column",
            selection.year
        );
        return Ok(JoinedView::empty(
            selection.year,
            selection.opacity,
            options.viewport,
        ));
    }

    let rows = filter_by_county_year(&vintage.indicators, reference.county(), selection.year);
    let outcome = join_geometry(&vintage.geometry, &rows, column)?;

    info!(
        "event=view_compute module=service status=ok year={} column={column} matched={} filtered_rows={}",
        selection.year,
        outcome.diagnostics.matched,
        outcome.diagnostics.indicator_count
    );

    Ok(JoinedView {
        year: selection.year,
        column: Some(column.to_string()),
        opacity: selection.opacity,
        viewport: options.viewport,
        records: outcome.records,
        diagnostics: outcome.diagnostics,
    })
}
