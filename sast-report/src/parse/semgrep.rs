//! semgrep `--json` output.

use serde_json::Value;

use sast_core::{Finding, Location, Severity, ToolRun};

use crate::ReportError;

/// Parse a semgrep run from its stdout JSON document.
///
/// # Errors
/// Returns [`ReportError::Parse`] if stdout is non-empty and not valid JSON.
pub fn parse(run: &ToolRun) -> Result<Vec<Finding>, ReportError> {
    let text = String::from_utf8_lossy(&run.stdout);
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let json: Value = serde_json::from_str(&text).map_err(|e| ReportError::Parse {
        tool: run.tool_name.clone(),
        reason: e.to_string(),
    })?;
    Ok(findings_from_json(&run.tool_name, &json))
}

/// Extract findings from a parsed semgrep document.
#[must_use]
pub fn findings_from_json(tool: &str, json: &Value) -> Vec<Finding> {
    let Some(results) = json.get("results").and_then(Value::as_array) else {
        return Vec::new();
    };

    results
        .iter()
        .map(|result| {
            let path = result.get("path").and_then(Value::as_str).unwrap_or("unknown");
            let line = pointer_u32(result, "/start/line");
            let column = pointer_u32(result, "/start/col");
            let message = result
                .pointer("/extra/message")
                .and_then(Value::as_str)
                .unwrap_or("No message");
            let check_id = result.get("check_id").and_then(Value::as_str).map(String::from);
            let severity = match result.pointer("/extra/severity").and_then(Value::as_str) {
                Some("ERROR") => Severity::Error,
                Some("INFO") => Severity::Info,
                _ => Severity::Warning,
            };

            Finding::new(tool, severity, message, Location::new(path, line, column))
                .with_rule(check_id)
        })
        .collect()
}

fn pointer_u32(value: &Value, pointer: &str) -> Option<u32> {
    value
        .pointer(pointer)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}
