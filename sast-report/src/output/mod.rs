//! Report writers.

pub mod html;
pub mod json;
pub mod native;
pub mod sarif;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use sast_core::{AnalysisId, Finding, ToolConfig, ToolRun};

use crate::ReportError;

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Raw tool output, one file per tool.
    Native,
    Sarif,
    Html,
    Json,
}

impl OutputFormat {
    /// Whether the format is built from parsed findings.
    #[must_use]
    pub fn needs_findings(self) -> bool {
        !matches!(self, OutputFormat::Native)
    }
}

impl FromStr for OutputFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "native" => Ok(Self::Native),
            "sarif" => Ok(Self::Sarif),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            _ => Err(ReportError::UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Native => "native",
            Self::Sarif => "sarif",
            Self::Html => "html",
            Self::Json => "json",
        };
        f.write_str(s)
    }
}

/// Everything a writer may need about one analysis.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub analysis_id: AnalysisId,
    pub project_name: &'a str,
    pub runs: &'a [ToolRun],
    pub findings: &'a [Finding],
    pub tool_configs: &'a HashMap<String, ToolConfig>,
}

/// Write `report` into `output_dir` in the requested format.
///
/// Returns the paths of the files written.
///
/// # Errors
/// Returns [`ReportError::Write`] if a file cannot be written and
/// [`ReportError::Serialize`] if JSON serialization fails.
pub async fn write_output(
    format: OutputFormat,
    report: &Report<'_>,
    output_dir: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    match format {
        OutputFormat::Native => native::write(report, output_dir).await,
        OutputFormat::Sarif => sarif::write(report, output_dir).await.map(|p| vec![p]),
        OutputFormat::Html => html::write(report, output_dir).await.map(|p| vec![p]),
        OutputFormat::Json => json::write(report, output_dir).await.map(|p| vec![p]),
    }
}

pub(crate) async fn write_file(path: PathBuf, contents: impl AsRef<[u8]>) -> Result<PathBuf, ReportError> {
    tokio::fs::write(&path, contents)
        .await
        .map_err(|source| ReportError::Write { path: path.clone(), source })?;
    tracing::info!(path = %path.display(), "report written");
    Ok(path)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parsing_is_case_insensitive() {
        assert!(matches!("SARIF".parse::<OutputFormat>(), Ok(OutputFormat::Sarif)));
        assert!(matches!("Html".parse::<OutputFormat>(), Ok(OutputFormat::Html)));
        assert!(matches!("native".parse::<OutputFormat>(), Ok(OutputFormat::Native)));
    }

    #[test]
    fn unknown_format_lists_choices() {
        match "xml".parse::<OutputFormat>() {
            Err(e @ ReportError::UnknownFormat(_)) => {
                let msg = e.to_string();
                assert!(msg.contains("unknown format 'xml'"), "got {msg}");
                assert!(msg.contains("sarif"), "got {msg}");
            }
            other => panic!("expected UnknownFormat, got {other:?}"),
        }
    }

    #[test]
    fn only_native_skips_parsing() {
        assert!(!OutputFormat::Native.needs_findings());
        assert!(OutputFormat::Json.needs_findings());
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for format in [OutputFormat::Native, OutputFormat::Sarif, OutputFormat::Html, OutputFormat::Json] {
            assert!(matches!(format.to_string().parse::<OutputFormat>(), Ok(f) if f == format));
        }
    }
}
