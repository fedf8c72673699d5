use std::path::{Path, PathBuf};

use super::{write_file, Report};
use crate::ReportError;

/// Write all findings as a pretty-printed JSON array to `report.json`.
///
/// # Errors
/// Returns [`ReportError::Serialize`] or [`ReportError::Write`].
pub async fn write(report: &Report<'_>, output_dir: &Path) -> Result<PathBuf, ReportError> {
    let json = serde_json::to_string_pretty(report.findings)?;
    write_file(output_dir.join("report.json"), json).await
}
