//! Column catalog queries over the indicator reference dataset.
//!
//! # Responsibility
//! - Answer "which columns belong to this family" for selection widgets.
//! - Keep catalog reads side-effect free over the immutable table.

pub mod columns;
