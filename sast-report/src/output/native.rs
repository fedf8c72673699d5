use std::path::{Path, PathBuf};

use sast_core::{OutputStream, ToolRun};

use super::{write_file, Report};
use crate::ReportError;

/// Save each tool's raw output as `<tool>.<native_extension>`.
///
/// Filesystem tools have already written their own reports and are skipped.
///
/// # Errors
/// Returns [`ReportError::Write`] if a file cannot be written.
pub async fn write(report: &Report<'_>, output_dir: &Path) -> Result<Vec<PathBuf>, ReportError> {
    let mut written = Vec::new();

    for run in report.runs {
        let config = report.tool_configs.get(&run.tool_name);
        let stream = config.map_or(OutputStream::Stdout, |c| c.output_stream);

        if stream == OutputStream::Filesystem {
            tracing::info!(
                tool = %run.tool_name,
                dir = %output_dir.display(),
                "tool wrote its own report"
            );
            continue;
        }

        let ext = config.map_or("txt", |c| c.native_extension_or_default());
        let path = output_dir.join(format!("{}.{ext}", run.tool_name));
        written.push(write_file(path, raw_output(run, stream)).await?);
    }

    Ok(written)
}

/// Bytes holding the tool's results for the given stream.
///
/// Stderr tools fall back to stdout when stderr is empty, since some
/// platforms redirect cppcheck diagnostics there.
fn raw_output(run: &ToolRun, stream: OutputStream) -> &[u8] {
    match stream {
        OutputStream::Stderr if !run.stderr.is_empty() => &run.stderr,
        _ => &run.stdout,
    }
}
