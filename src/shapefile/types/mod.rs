//! Foundational data structures, geometry variants and error types.

pub mod error;
pub mod geometry;
pub mod models;
