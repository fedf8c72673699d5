//! Turning raw analyzer output into reports.
//!
//! Parses cppcheck, semgrep and scan-build output into normalised
//! findings, tags them with a memory-safety defect class, and writes
//! native, SARIF, HTML or JSON reports.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod classify;
pub mod error;
pub mod output;
pub mod parse;

pub use classify::{classify, classify_all};
pub use error::ReportError;
pub use output::{write_output, OutputFormat, Report};
pub use parse::parse_output;
