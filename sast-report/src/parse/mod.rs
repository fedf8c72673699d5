//! Parsers turning raw [`ToolRun`] output into normalised [`Finding`]s.

pub mod cppcheck;
pub mod generic;
pub mod scan_build;
pub mod semgrep;

use sast_core::{Finding, ParserKind, ToolRun};

use crate::classify::classify_all;
use crate::ReportError;

/// Parse a run with the given parser and classify the resulting findings.
///
/// # Errors
/// Returns [`ReportError::Parse`] if the output is structurally invalid
/// (e.g. semgrep output that is not JSON).
pub fn parse_output(kind: ParserKind, run: &ToolRun) -> Result<Vec<Finding>, ReportError> {
    let mut findings = match kind {
        ParserKind::Cppcheck => cppcheck::parse(run),
        ParserKind::Semgrep => semgrep::parse(run)?,
        ParserKind::ScanBuild => scan_build::parse(run),
        ParserKind::Generic => generic::parse(run),
    };
    classify_all(&mut findings);
    tracing::debug!(tool = %run.tool_name, parser = %kind, count = findings.len(), "parsed findings");
    Ok(findings)
}
