//! Catalogue of the known-bad C++ fixtures and the defects they contain.
//!
//! The fixtures live in `sast-cli/tests/fixtures/cpp_project/`. Each broken
//! function is listed with the line span of its body so analyzer findings
//! can be matched back to the defect they are expected to report.

use std::ffi::OsStr;
use std::ops::RangeInclusive;

use crate::defect::DefectKind;
use crate::finding::Finding;

/// One deliberately broken function in a fixture file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct FixtureDefect {
    /// File name within the fixture project.
    pub file: &'static str,
    /// Name of the broken function.
    pub function: &'static str,
    /// Lines spanned by the function, signature through closing brace.
    pub lines: RangeInclusive<u32>,
    /// Defect the function exhibits.
    pub defect: DefectKind,
}

impl FixtureDefect {
    /// True if `finding` reports this defect inside this function.
    #[must_use]
    pub fn matches(&self, finding: &Finding) -> bool {
        let same_file = finding.location.file.file_name() == Some(OsStr::new(self.file));
        let in_span = finding.location.line.is_some_and(|l| self.lines.contains(&l));
        same_file && in_span && finding.defect == Some(self.defect)
    }
}

/// Returns every catalogued fixture defect.
#[must_use]
pub fn catalogue() -> Vec<FixtureDefect> {
    vec![
        FixtureDefect {
            file: "buffer_overflow.cpp",
            function: "unsafe_copy",
            lines: 5..=9,
            defect: DefectKind::BufferOverflow,
        },
        FixtureDefect {
            file: "buffer_overflow.cpp",
            function: "read_input",
            lines: 12..=16,
            defect: DefectKind::UnboundedRead,
        },
        FixtureDefect {
            file: "memory_issues.cpp",
            function: "memory_leak",
            lines: 5..=10,
            defect: DefectKind::MemoryLeak,
        },
        FixtureDefect {
            file: "memory_issues.cpp",
            function: "use_after_free",
            lines: 13..=17,
            defect: DefectKind::UseAfterFree,
        },
        FixtureDefect {
            file: "memory_issues.cpp",
            function: "double_free",
            lines: 20..=24,
            defect: DefectKind::DoubleFree,
        },
        FixtureDefect {
            file: "memory_issues.cpp",
            function: "null_deref",
            lines: 27..=30,
            defect: DefectKind::NullDereference,
        },
    ]
}

/// Catalogue entries that at least one of `findings` matches.
#[must_use]
pub fn detected<'a>(catalogue: &'a [FixtureDefect], findings: &[Finding]) -> Vec<&'a FixtureDefect> {
    catalogue
        .iter()
        .filter(|entry| findings.iter().any(|f| entry.matches(f)))
        .collect()
}
