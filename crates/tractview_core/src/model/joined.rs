//! Joined read models handed to the rendering collaborator.
//!
//! # Responsibility
//! - Define the per-tract record and view envelope produced by one
//!   filter-and-join cycle.
//! - Carry join diagnostics so empty results stay explainable.
//!
//! # Invariants
//! - Every record has a boundary; no-data is expressed by a `None` value,
//!   never by a missing geometry.
//! - Records are uniquely keyed and ordered by tract identifier.

use crate::model::selection::MapViewport;
use crate::model::tract::TractId;

/// One tract ready for choropleth rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedTractRecord {
    /// Canonical tract identifier.
    pub tract: TractId,
    /// Boundary geometry for this tract's vintage.
    pub boundary: geo_types::Geometry<f64>,
    /// Selected indicator value; `None` is the explicit no-data sentinel.
    pub value: Option<f64>,
}

/// Join statistics for one compute cycle.
///
/// `suspected_id_mismatch` marks the "both inputs non-empty, zero matches"
/// shape, which indicates an identifier-normalization defect in the source
/// data rather than a legitimately empty result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JoinDiagnostics {
    /// Tract count on the geometry side of the join.
    pub geometry_count: usize,
    /// Row count on the indicator side, after regional/year filtering.
    pub indicator_count: usize,
    /// Rows present on both sides.
    pub matched: usize,
    /// True when both sides had rows but none matched.
    pub suspected_id_mismatch: bool,
}

/// Full rendering hand-off for one selection.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedView {
    /// Data year the view was computed for.
    pub year: u16,
    /// Column rendered as the choropleth color; `None` for the empty view.
    pub column: Option<String>,
    /// Layer opacity copied from the selection.
    pub opacity: f64,
    /// Display frame copied from configuration.
    pub viewport: MapViewport,
    /// Joined records ordered by tract identifier.
    pub records: Vec<JoinedTractRecord>,
    /// Statistics for the join that produced `records`.
    pub diagnostics: JoinDiagnostics,
}

impl JoinedView {
    /// The "render nothing" view used when no usable column is selected.
    pub fn empty(year: u16, opacity: f64, viewport: MapViewport) -> Self {
        Self {
            year,
            column: None,
            opacity,
            viewport,
            records: Vec::new(),
            diagnostics: JoinDiagnostics::default(),
        }
    }

    /// Returns whether the view carries anything to draw.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
