//! Domain model for tract geometry, indicator tables, and selections.
//!
//! # Responsibility
//! - Define canonical data structures used by filter/join logic.
//! - Keep one normalized tract-identifier shape across all data sources.
//!
//! # Invariants
//! - Every record is keyed by a canonical 11-digit [`tract::TractId`].
//! - Reference data structures are immutable after load.

pub mod indicator;
pub mod joined;
pub mod selection;
pub mod tract;
