//! Provides the building blocks of the triage pipeline.
//!
//! This module contains the stateless pieces the workflow layer composes:
//! scanning a folder for log files, parsing one log into a filtered report,
//! indexing failed molecules per library, and collecting their structure
//! files.

pub mod collect;
pub mod index;
pub mod parse;
pub mod scan;
