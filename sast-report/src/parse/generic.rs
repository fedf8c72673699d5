//! Fallback for tools without a dedicated parser.

use sast_core::{Finding, Location, Severity, ToolRun};

/// Wrap the whole output in a single informational finding.
///
/// Uses stdout, or stderr when stdout is empty. Blank output yields nothing.
#[must_use]
pub fn parse(run: &ToolRun) -> Vec<Finding> {
    let raw = if run.stdout.is_empty() { &run.stderr } else { &run.stdout };
    let text = String::from_utf8_lossy(raw);
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    vec![Finding::new(
        &run.tool_name,
        Severity::Info,
        text,
        Location::new(".", None, None),
    )]
}
