//! Front end of the `sast` aggregator.
//!
//! Resolves command-line flags against layered config, runs the selected
//! analyzers in parallel and writes the combined report.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::{analyze, run, Outcome, Settings};
pub use cli::Cli;
pub use error::CliError;
