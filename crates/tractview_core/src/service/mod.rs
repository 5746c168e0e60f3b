//! Filter-and-join services driving one compute cycle per interaction.
//!
//! # Responsibility
//! - Orchestrate regional filtering and the geometry/indicator join into
//!   the view handed to the rendering collaborator.
//! - Keep every service a pure function over the immutable reference data.

pub mod filter;
pub mod join;
pub mod view;
