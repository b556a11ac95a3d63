//! # conffails Core Library
//!
//! Triage for log files produced by the OMEGA conformational search: each log
//! covers one compound library, and this crate filters it down to the
//! molecules that raised warnings, flags the ones that failed outright, and
//! gathers their 3-D structure files for inspection.
//!
//! ## Architectural Philosophy
//!
//! The library is split into two layers:
//!
//! - **[`core`]: The Foundation.** Stateless building blocks — the log
//!   scanner, the line-oriented log parser, the structure-file collector, and
//!   the failure index that connects them.
//!
//! - **[`workflows`]: The Public API.** Ties the pieces together into the
//!   complete two-phase procedure (parse every log, then collect structures)
//!   and is the entry point CLI front-ends should call.
//!
//! Progress is surfaced through [`progress::ProgressReporter`] so the library
//! never writes to the console itself.

pub mod core;
pub mod progress;
pub mod workflows;
