/// Errors produced by the `sast-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A severity string did not name any known severity.
    #[error("unknown severity '{value}'")]
    UnknownSeverity { value: String },

    /// A parser name did not name any known output parser.
    #[error("unknown parser '{value}': expected one of cppcheck, semgrep, scan-build, generic")]
    UnknownParser { value: String },
}
