//! High-level entry points that compose the [`crate::core`] building blocks
//! into complete procedures.

pub mod triage;
