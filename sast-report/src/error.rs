//! Error types for the report crate.

use std::path::PathBuf;

/// Errors that can occur while parsing tool output or writing reports.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ReportError {
    /// The requested report format is not supported.
    #[error("unknown format '{0}'; expected one of: native, sarif, html, json")]
    UnknownFormat(String),

    /// A tool's output could not be parsed.
    #[error("failed to parse {tool} output: {reason}")]
    Parse { tool: String, reason: String },

    /// A report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    /// A report file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
