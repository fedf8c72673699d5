use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::defect::DefectKind;
use crate::error::CoreError;

/// A single normalised issue reported by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Finding {
    /// Name of the tool that produced the finding (e.g. `"cppcheck"`).
    pub tool: String,
    /// Tool-specific rule or check identifier, if the tool reports one.
    pub rule_id: Option<String>,
    /// Normalised severity.
    pub severity: Severity,
    /// Message text as reported by the tool.
    pub message: String,
    /// Where in the analyzed project the finding points.
    pub location: Location,
    /// Memory-safety defect class, when the finding could be classified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defect: Option<DefectKind>,
}

impl Finding {
    /// Create an unclassified finding without a rule id.
    pub fn new(
        tool: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            tool: tool.into(),
            rule_id: None,
            severity,
            message: message.into(),
            location,
            defect: None,
        }
    }

    /// Attach a rule id.
    #[must_use]
    pub fn with_rule(mut self, rule_id: Option<String>) -> Self {
        self.rule_id = rule_id;
        self
    }

    /// Attach a defect classification.
    #[must_use]
    pub fn with_defect(mut self, defect: Option<DefectKind>) -> Self {
        self.defect = defect;
        self
    }
}

/// Source location of a finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Location {
    /// File path as reported by the tool (may be relative).
    pub file: PathBuf,
    /// 1-based line number.
    pub line: Option<u32>,
    /// 1-based column number.
    pub column: Option<u32>,
}

impl Location {
    /// Create a location.
    pub fn new(file: impl Into<PathBuf>, line: Option<u32>, column: Option<u32>) -> Self {
        Self { file: file.into(), line, column }
    }
}

/// Normalised finding severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
    Style,
    Note,
}

impl Severity {
    const fn as_str(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Style => "style",
            Severity::Note => "note",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(Severity::Error),
            "warning" => Ok(Severity::Warning),
            "info" => Ok(Severity::Info),
            "style" => Ok(Severity::Style),
            "note" => Ok(Severity::Note),
            _ => Err(CoreError::UnknownSeverity { value: s.to_owned() }),
        }
    }
}

/// Aggregate counts over a set of findings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FindingSummary {
    /// Total number of findings.
    pub total: usize,
    by_severity: BTreeMap<Severity, usize>,
    by_defect: BTreeMap<DefectKind, usize>,
}

impl FindingSummary {
    /// Count the given findings.
    #[must_use]
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut summary = Self { total: findings.len(), ..Self::default() };
        for finding in findings {
            *summary.by_severity.entry(finding.severity).or_default() += 1;
            if let Some(defect) = finding.defect {
                *summary.by_defect.entry(defect).or_default() += 1;
            }
        }
        summary
    }

    /// Number of findings with the given severity.
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.by_severity.get(&severity).copied().unwrap_or(0)
    }

    /// Number of findings classified as the given defect kind.
    #[must_use]
    pub fn defect_count(&self, defect: DefectKind) -> usize {
        self.by_defect.get(&defect).copied().unwrap_or(0)
    }

    /// Defect kinds with at least one finding, in catalogue order.
    pub fn defects(&self) -> impl Iterator<Item = (DefectKind, usize)> + '_ {
        self.by_defect.iter().map(|(k, v)| (*k, *v))
    }
}
