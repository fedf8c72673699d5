//! SARIF 2.1.0 writer.
//!
//! One `run` per executed tool, ordered by tool name. Each run has its own
//! `guid`; the analysis id ties them together as `correlationGuid`.
//! Classified findings carry their CWE in `properties.tags`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::SecondsFormat;
use serde_json::{json, Value};
use uuid::Uuid;

use sast_core::{Finding, Severity, ToolRun};

use super::{write_file, Report};
use crate::ReportError;

const SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json";

/// Write `report.sarif`.
///
/// # Errors
/// Returns [`ReportError::Serialize`] or [`ReportError::Write`].
pub async fn write(report: &Report<'_>, output_dir: &Path) -> Result<PathBuf, ReportError> {
    let sarif = to_sarif(report);
    let text = serde_json::to_string_pretty(&sarif)?;
    write_file(output_dir.join("report.sarif"), text).await
}

/// Build the SARIF document.
#[must_use]
pub fn to_sarif(report: &Report<'_>) -> Value {
    let mut by_tool: BTreeMap<&str, (Option<&ToolRun>, Vec<&Finding>)> = BTreeMap::new();
    for run in report.runs {
        by_tool.entry(run.tool_name.as_str()).or_default().0 = Some(run);
    }
    for finding in report.findings {
        by_tool.entry(finding.tool.as_str()).or_default().1.push(finding);
    }

    let runs: Vec<Value> = by_tool
        .into_iter()
        .map(|(tool, (run, findings))| {
            let mut value = json!({
                "tool": {
                    "driver": {
                        "name": tool,
                        "informationUri": format!("https://github.com/search?q={tool}"),
                    }
                },
                "automationDetails": {
                    "guid": Uuid::new_v4().to_string(),
                    "correlationGuid": report.analysis_id.to_string(),
                },
                "results": findings.into_iter().map(result).collect::<Vec<_>>(),
            });
            if let Some(run) = run {
                value["invocations"] = json!([invocation(run)]);
            }
            value
        })
        .collect();

    json!({
        "$schema": SCHEMA,
        "version": "2.1.0",
        "runs": runs,
    })
}

fn level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info | Severity::Style | Severity::Note => "note",
    }
}

fn result(finding: &Finding) -> Value {
    let mut location = json!({
        "physicalLocation": {
            "artifactLocation": { "uri": finding.location.file.to_string_lossy() }
        }
    });
    // SARIF positions are 1-based; a zero means the tool had none.
    if let Some(line) = finding.location.line.filter(|&l| l > 0) {
        let mut region = json!({ "startLine": line });
        if let Some(column) = finding.location.column.filter(|&c| c > 0) {
            region["startColumn"] = column.into();
        }
        location["physicalLocation"]["region"] = region;
    }

    let mut value = json!({
        "level": level(finding.severity),
        "message": { "text": finding.message },
        "locations": [location],
    });
    if let Some(rule_id) = &finding.rule_id {
        value["ruleId"] = Value::String(rule_id.clone());
    }
    if let Some(defect) = finding.defect {
        value["properties"] = json!({
            "defect": defect.to_string(),
            "tags": [defect.cwe_tag()],
        });
    }
    value
}

fn invocation(run: &ToolRun) -> Value {
    let mut value = json!({
        "executionSuccessful": run.exit_code.is_some(),
        "startTimeUtc": run.started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        "endTimeUtc": run.finished_at().to_rfc3339_opts(SecondsFormat::Millis, true),
    });
    if let Some(code) = run.exit_code {
        value["exitCode"] = code.into();
    }
    value
}
