//! cppcheck text output.
//!
//! Expected template: `file:line:column: severity: message [id]`.

use std::sync::LazyLock;

use regex::Regex;

use sast_core::{Finding, Location, Severity, ToolRun};

#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?):(\d+):(\d+):\s*(\w+):\s*(.+?)(?:\s*\[(\w+)\])?\s*$")
        .expect("valid cppcheck regex")
});

/// Parse a cppcheck run.
///
/// cppcheck reports on stderr, but some builds (notably on Windows) use
/// stdout; stdout is only consulted when stderr yields nothing.
#[must_use]
pub fn parse(run: &ToolRun) -> Vec<Finding> {
    let from_stderr = parse_text(&run.tool_name, &String::from_utf8_lossy(&run.stderr));
    if !from_stderr.is_empty() {
        return from_stderr;
    }
    parse_text(&run.tool_name, &String::from_utf8_lossy(&run.stdout))
}

/// Parse cppcheck diagnostics from text; lines that do not match are skipped.
#[must_use]
pub fn parse_text(tool: &str, text: &str) -> Vec<Finding> {
    text.lines()
        .filter_map(|line| LINE.captures(line))
        .map(|cap| {
            let line = position(&cap[2]);
            let column = position(&cap[3]);
            let rule_id = cap.get(6).map(|m| m.as_str().to_owned());
            Finding::new(
                tool,
                severity(&cap[4]),
                &cap[5],
                Location::new(&cap[1], line, column),
            )
            .with_rule(rule_id)
        })
        .collect()
}

/// cppcheck prints `0` for "no line" or "no column"; positions are 1-based.
fn position(digits: &str) -> Option<u32> {
    digits.parse().ok().filter(|&n| n > 0)
}

fn severity(level: &str) -> Severity {
    match level {
        "error" => Severity::Error,
        "warning" | "performance" | "portability" => Severity::Warning,
        "style" => Severity::Style,
        "information" => Severity::Info,
        _ => Severity::Note,
    }
}
