//! Geometry/indicator inner join keyed by canonical tract id.
//!
//! # Responsibility
//! - Merge boundary records with filtered indicator rows for one column.
//! - Surface join statistics so empty results stay diagnosable.
//!
//! # Invariants
//! - Strict inner join: rows present on only one side are dropped
//!   silently (tracts without data simply do not render).
//! - Output is uniquely keyed and ordered by tract id; input row order
//!   never changes the result content.
//! - Duplicate ids inside the indicator input fail fast.

use crate::model::indicator::IndicatorRow;
use crate::model::joined::{JoinDiagnostics, JoinedTractRecord};
use crate::model::tract::{TractGeometry, TractId};
use log::warn;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Join result: ordered records plus statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinOutcome {
    pub records: Vec<JoinedTractRecord>,
    pub diagnostics: JoinDiagnostics,
}

/// Join rejection error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinError {
    /// The indicator input carried the same tract twice; picking either
    /// row silently would hide a data-quality defect.
    DuplicateTract(TractId),
}

impl Display for JoinError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateTract(id) => {
                write!(f, "duplicate tract `{id}` in indicator join input")
            }
        }
    }
}

impl Error for JoinError {}

/// Inner-joins boundary records with indicator rows on the tract id.
///
/// # Contract
/// - Both sides must already carry canonical identifiers; loaders
///   guarantee this.
/// - `column` selects the single indicator value copied into each record;
///   a no-data cell yields `Some record` with `value: None`, keeping the
///   geometry renderable.
/// - A zero-match outcome with rows on both sides is flagged as a
///   suspected identifier mismatch and logged, since it indicates a
///   normalization defect rather than a legitimately empty frame.
pub fn join_geometry(
    geometry: &BTreeMap<TractId, TractGeometry>,
    rows: &[&IndicatorRow],
    column: &str,
) -> Result<JoinOutcome, JoinError> {
    let mut matched: BTreeMap<TractId, JoinedTractRecord> = BTreeMap::new();
    let mut seen = std::collections::BTreeSet::new();

    for row in rows {
        if !seen.insert(row.tract.clone()) {
            return Err(JoinError::DuplicateTract(row.tract.clone()));
        }

        let Some(tract) = geometry.get(&row.tract) else {
            continue;
        };

        matched.insert(
            row.tract.clone(),
            JoinedTractRecord {
                tract: row.tract.clone(),
                boundary: tract.boundary.clone(),
                value: row.value(column),
            },
        );
    }

    let diagnostics = JoinDiagnostics {
        geometry_count: geometry.len(),
        indicator_count: rows.len(),
        matched: matched.len(),
        suspected_id_mismatch: !geometry.is_empty() && !rows.is_empty() && matched.is_empty(),
    };

    if diagnostics.suspected_id_mismatch {
        warn!(
            "event=tract_join module=service status=zero_match geometry={} indicators={} geometry_sample={} indicator_sample={}",
            diagnostics.geometry_count,
            diagnostics.indicator_count,
            sample_key(geometry.keys()),
            sample_key(rows.iter().map(|row| &row.tract)),
        );
    }

    Ok(JoinOutcome {
        records: matched.into_values().collect(),
        diagnostics,
    })
}

fn sample_key<'a>(mut keys: impl Iterator<Item = &'a TractId>) -> String {
    keys.next()
        .map(|id| id.as_str().to_string())
        .unwrap_or_else(|| "-".to_string())
}
