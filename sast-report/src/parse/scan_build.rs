//! clang static analyzer diagnostics as printed by `scan-build` on stderr.

use std::sync::LazyLock;

use regex::Regex;

use sast_core::{Finding, Location, Severity, ToolRun};

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static DIAGNOSTIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([^:\s]+\.\w+):(\d+):(\d+):\s*(warning|error|note):\s*(.+)")
        .expect("valid scan-build regex")
});

/// Parse diagnostics of the form `/path/file.cpp:12:5: warning: ...` from stderr.
#[must_use]
pub fn parse(run: &ToolRun) -> Vec<Finding> {
    parse_text(&run.tool_name, &String::from_utf8_lossy(&run.stderr))
}

/// Parse clang diagnostics from text.
#[must_use]
pub fn parse_text(tool: &str, text: &str) -> Vec<Finding> {
    DIAGNOSTIC
        .captures_iter(text)
        .map(|cap| {
            let severity = match &cap[4] {
                "error" => Severity::Error,
                "warning" => Severity::Warning,
                _ => Severity::Note,
            };
            Finding::new(
                tool,
                severity,
                cap[5].trim_end(),
                Location::new(&cap[1], cap[2].parse().ok(), cap[3].parse().ok()),
            )
        })
        .collect()
}
