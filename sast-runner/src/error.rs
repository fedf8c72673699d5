//! Error types for the runner crate.

use std::path::PathBuf;
use std::time::Duration;

/// Errors that can occur while loading configuration layers.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A config file passed explicitly does not exist.
    #[error("config file {} does not exist", path.display())]
    NotFound { path: PathBuf },

    /// A config file exists but could not be read.
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A config file is not valid YAML for the config schema.
    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Errors that can occur while preparing or executing a tool.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RunnerError {
    /// The tool process could not be started.
    #[error("failed to execute '{program}' for {tool}; is it installed? ({source})")]
    SpawnFailed {
        tool: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool did not finish within its timeout.
    #[error("{tool} timed out after {}s", timeout.as_secs())]
    Timeout { tool: String, timeout: Duration },

    /// The `append_sources` glob pattern is malformed.
    #[error("invalid source pattern '{pattern}' for {tool}: {source}")]
    InvalidPattern {
        tool: String,
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// A tool task panicked or was cancelled.
    #[error("tool task failed: {0}")]
    TaskJoin(String),

    /// Underlying I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
