//! Error types for the command-line front end.

use std::path::PathBuf;

/// Errors that abort a `sast` invocation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CliError {
    /// The project path given on the command line does not exist.
    #[error("project path '{}' does not exist", path.display())]
    ProjectNotFound { path: PathBuf },

    /// A requested tool has no configuration.
    #[error("unknown tool '{name}'; available: {}", available.join(", "))]
    UnknownTool { name: String, available: Vec<String> },

    /// No requested tool produced a run.
    #[error("all tools failed to execute")]
    AllToolsFailed,

    /// The output directory could not be created.
    #[error("failed to create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] sast_runner::ConfigError),

    #[error(transparent)]
    Report(#[from] sast_report::ReportError),
}
