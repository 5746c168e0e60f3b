//! Category filter over the indicator column list.
//!
//! # Responsibility
//! - Return the ordered column subset for a chosen family prefix.
//! - Support the "selected column still exists" recovery check.
//!
//! # Invariants
//! - Output order is the source CSV header order.
//! - No query mutates the table.

use crate::model::indicator::{category_of, IndicatorCategory, IndicatorTable};

/// Returns the ordered columns whose names start with `prefix`.
///
/// # Contract
/// - Plain prefix match over the raw header, exactly as the source
///   widgets behave. Use [`columns_for_category`] for family-exact
///   results.
/// - An empty prefix or zero matches yields an empty list, not an error.
pub fn columns_with_prefix<'a>(table: &'a IndicatorTable, prefix: &str) -> Vec<&'a str> {
    if prefix.is_empty() {
        return Vec::new();
    }

    table
        .columns()
        .iter()
        .filter(|name| name.starts_with(prefix))
        .map(String::as_str)
        .collect()
}

/// Returns the ordered columns belonging to exactly one indicator family.
///
/// Family membership is longest-prefix, so a `Percent` query never returns
/// `EPL_` percentile columns.
pub fn columns_for_category<'a>(
    table: &'a IndicatorTable,
    category: IndicatorCategory,
) -> Vec<&'a str> {
    table
        .columns()
        .iter()
        .filter(|name| category_of(name) == Some(category))
        .map(String::as_str)
        .collect()
}

/// Returns whether the table's header carries `column`.
pub fn contains_column(table: &IndicatorTable, column: &str) -> bool {
    table.contains_column(column)
}
