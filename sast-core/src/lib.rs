//! Core types for the `sast` static-analysis aggregator.
//!
//! Defines the normalised finding model, the memory-safety defect
//! taxonomy, analyzer configuration and run records, and the catalogue
//! of known-bad fixtures the analyzers are exercised against.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod defect;
pub mod error;
pub mod finding;
pub mod fixtures;
pub mod id;
pub mod tool;

pub use defect::DefectKind;
pub use error::CoreError;
pub use finding::{Finding, FindingSummary, Location, Severity};
pub use fixtures::FixtureDefect;
pub use id::AnalysisId;
pub use tool::{OutputStream, ParserKind, ToolConfig, ToolRun};

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::time::Duration;

    use chrono::Utc;

    use super::*;
    use crate::fixtures::{catalogue, detected};

    fn finding_at(file: &str, line: u32, defect: Option<DefectKind>) -> Finding {
        Finding::new("cppcheck", Severity::Error, "msg", Location::new(file, Some(line), None))
            .with_defect(defect)
    }

    #[test]
    fn severity_display_is_lowercase() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
        assert_eq!(Severity::Info.to_string(), "info");
        assert_eq!(Severity::Style.to_string(), "style");
        assert_eq!(Severity::Note.to_string(), "note");
    }

    #[test]
    fn severity_from_str_is_case_insensitive() {
        assert!(matches!("ERROR".parse::<Severity>(), Ok(Severity::Error)));
        assert!(matches!("Note".parse::<Severity>(), Ok(Severity::Note)));
        assert!(matches!(
            "fatal".parse::<Severity>(),
            Err(CoreError::UnknownSeverity { .. })
        ));
    }

    #[test]
    fn finding_json_omits_missing_defect() {
        let finding = finding_at("a.cpp", 3, None);
        let json = match serde_json::to_string(&finding) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert!(!json.contains("defect"), "absent defect must not be serialized: {json}");
        assert!(json.contains("\"severity\":\"error\""), "severity must be lowercase: {json}");
    }

    #[test]
    fn finding_json_includes_kebab_case_defect() {
        let finding = finding_at("a.cpp", 3, Some(DefectKind::UseAfterFree));
        let json = match serde_json::to_string(&finding) {
            Ok(s) => s,
            Err(e) => panic!("serialization failed: {e}"),
        };
        assert!(json.contains("\"defect\":\"use-after-free\""), "got {json}");
    }

    #[test]
    fn defect_cwe_tags_are_distinct() {
        let tags: BTreeSet<String> = DefectKind::ALL.iter().map(|d| d.cwe_tag()).collect();
        assert_eq!(tags.len(), DefectKind::ALL.len(), "each defect needs its own CWE");
        assert!(tags.contains("CWE-416"));
        assert!(tags.contains("CWE-415"));
    }

    #[test]
    fn defect_display_matches_serde_name() {
        for defect in DefectKind::ALL {
            let json = match serde_json::to_string(&defect) {
                Ok(s) => s,
                Err(e) => panic!("serialization failed: {e}"),
            };
            assert_eq!(json.trim_matches('"'), defect.to_string());
        }
    }

    #[test]
    fn summary_counts_by_severity_and_defect() {
        let findings = vec![
            finding_at("a.cpp", 1, Some(DefectKind::MemoryLeak)),
            finding_at("a.cpp", 2, Some(DefectKind::MemoryLeak)),
            Finding::new("semgrep", Severity::Warning, "w", Location::new("b.cpp", None, None)),
        ];
        let summary = FindingSummary::from_findings(&findings);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.count(Severity::Error), 2);
        assert_eq!(summary.count(Severity::Warning), 1);
        assert_eq!(summary.count(Severity::Style), 0);
        assert_eq!(summary.defect_count(DefectKind::MemoryLeak), 2);
        assert_eq!(summary.defects().count(), 1);
    }

    #[test]
    fn parser_kind_inferred_from_tool_name() {
        assert_eq!(ParserKind::for_tool_name("cppcheck"), ParserKind::Cppcheck);
        assert_eq!(ParserKind::for_tool_name("scan-build"), ParserKind::ScanBuild);
        assert_eq!(ParserKind::for_tool_name("semgrep"), ParserKind::Semgrep);
        assert_eq!(ParserKind::for_tool_name("flawfinder"), ParserKind::Generic);
    }

    #[test]
    fn explicit_parser_overrides_tool_name() {
        let config = ToolConfig::new("cppcheck").with_parser(ParserKind::Cppcheck);
        assert_eq!(config.parser_for("cppcheck-strict"), ParserKind::Cppcheck);
        assert_eq!(ToolConfig::new("x").parser_for("cppcheck-strict"), ParserKind::Generic);
    }

    #[test]
    fn native_extension_defaults_to_txt() {
        assert_eq!(ToolConfig::new("x").native_extension_or_default(), "txt");
        let config = ToolConfig::new("x").with_native_extension("json");
        assert_eq!(config.native_extension_or_default(), "json");
    }

    #[test]
    fn tool_run_finished_at_adds_duration() {
        let started = Utc::now();
        let run = ToolRun::new("t", Some(0), vec![], vec![], started, Duration::from_millis(1500));
        assert_eq!((run.finished_at() - started).num_milliseconds(), 1500);
        assert!(run.succeeded());
    }

    #[test]
    fn catalogue_covers_every_defect_once() {
        let entries = catalogue();
        assert_eq!(entries.len(), DefectKind::ALL.len());
        let defects: BTreeSet<DefectKind> = entries.iter().map(|e| e.defect).collect();
        assert_eq!(defects.len(), DefectKind::ALL.len(), "defects must be distinct");
        let functions: BTreeSet<&str> = entries.iter().map(|e| e.function).collect();
        assert_eq!(functions.len(), entries.len(), "functions must be distinct");
    }

    #[test]
    fn catalogue_matches_by_file_line_and_defect() {
        let entries = catalogue();
        let double_free = match entries.iter().find(|e| e.function == "double_free") {
            Some(e) => e,
            None => panic!("double_free must be catalogued"),
        };
        let hit = finding_at("/tmp/p/memory_issues.cpp", 23, Some(DefectKind::DoubleFree));
        assert!(double_free.matches(&hit));

        let wrong_line = finding_at("/tmp/p/memory_issues.cpp", 36, Some(DefectKind::DoubleFree));
        assert!(!double_free.matches(&wrong_line));

        let wrong_file = finding_at("/tmp/p/buffer_overflow.cpp", 23, Some(DefectKind::DoubleFree));
        assert!(!double_free.matches(&wrong_file));

        let unclassified = finding_at("memory_issues.cpp", 23, None);
        assert!(!double_free.matches(&unclassified));
    }

    #[test]
    fn detected_returns_only_matched_entries() {
        let entries = catalogue();
        let findings = vec![
            finding_at("memory_issues.cpp", 10, Some(DefectKind::MemoryLeak)),
            finding_at("buffer_overflow.cpp", 15, Some(DefectKind::UnboundedRead)),
        ];
        let hits: Vec<&str> = detected(&entries, &findings).iter().map(|e| e.function).collect();
        assert_eq!(hits, vec!["read_input", "memory_leak"]);
    }
}
