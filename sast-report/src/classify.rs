//! Maps analyzer rule ids and messages onto the [`DefectKind`] taxonomy.
//!
//! Rule ids are checked first since they are stable; messages are the
//! fallback for tools (like clang's analyzer via scan-build) that report
//! no id.

use std::sync::LazyLock;

use regex::Regex;

use sast_core::{DefectKind, Finding};

/// Matches the `gets` function name as a token, including cppcheck's `getsCalled`.
#[expect(clippy::expect_used, reason = "pattern is a compile-time literal")]
static GETS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^a-z_])gets(?:called|[^a-z_]|$)").expect("valid gets regex")
});

/// Substrings of lowercased rule ids.
const RULE_NEEDLES: &[(&str, DefectKind)] = &[
    ("deallocuse", DefectKind::UseAfterFree),
    ("use-after-free", DefectKind::UseAfterFree),
    ("use_after_free", DefectKind::UseAfterFree),
    ("useafterfree", DefectKind::UseAfterFree),
    ("doublefree", DefectKind::DoubleFree),
    ("double-free", DefectKind::DoubleFree),
    ("double_free", DefectKind::DoubleFree),
    ("deallocdealloc", DefectKind::DoubleFree),
    ("nullpointer", DefectKind::NullDereference),
    ("null-pointer", DefectKind::NullDereference),
    ("null-deref", DefectKind::NullDereference),
    ("nullderef", DefectKind::NullDereference),
    ("memleak", DefectKind::MemoryLeak),
    ("leakreturnvalnotused", DefectKind::MemoryLeak),
    ("leakofmemory", DefectKind::MemoryLeak),
    ("memory-leak", DefectKind::MemoryLeak),
    ("memory_leak", DefectKind::MemoryLeak),
    ("outofbounds", DefectKind::BufferOverflow),
    ("buffer-overflow", DefectKind::BufferOverflow),
    ("bufferoverflow", DefectKind::BufferOverflow),
    ("strcpy", DefectKind::BufferOverflow),
    ("strcat", DefectKind::BufferOverflow),
];

/// Substrings of lowercased messages.
const MESSAGE_NEEDLES: &[(&str, DefectKind)] = &[
    ("use of memory after it is freed", DefectKind::UseAfterFree),
    ("after it is deallocated", DefectKind::UseAfterFree),
    ("after it is released", DefectKind::UseAfterFree),
    ("use after free", DefectKind::UseAfterFree),
    ("use-after-free", DefectKind::UseAfterFree),
    ("attempt to free released memory", DefectKind::DoubleFree),
    ("deallocating a deallocated pointer", DefectKind::DoubleFree),
    ("freed twice", DefectKind::DoubleFree),
    ("double free", DefectKind::DoubleFree),
    ("dereference of null pointer", DefectKind::NullDereference),
    ("null pointer dereference", DefectKind::NullDereference),
    ("potential leak of memory", DefectKind::MemoryLeak),
    ("memory leak", DefectKind::MemoryLeak),
    ("buffer overflow", DefectKind::BufferOverflow),
    ("out of bounds", DefectKind::BufferOverflow),
    ("out-of-bounds", DefectKind::BufferOverflow),
    ("buffer overrun", DefectKind::BufferOverflow),
];

/// Classify a finding from its rule id and message.
#[must_use]
pub fn classify(rule_id: Option<&str>, message: &str) -> Option<DefectKind> {
    rule_id
        .and_then(|id| lookup(&id.to_lowercase(), RULE_NEEDLES))
        .or_else(|| lookup(&message.to_lowercase(), MESSAGE_NEEDLES))
}

/// Fill in `defect` on every finding that does not have one yet.
pub fn classify_all(findings: &mut [Finding]) {
    for finding in findings.iter_mut().filter(|f| f.defect.is_none()) {
        finding.defect = classify(finding.rule_id.as_deref(), &finding.message);
    }
}

fn lookup(haystack: &str, needles: &[(&str, DefectKind)]) -> Option<DefectKind> {
    if GETS.is_match(haystack) {
        return Some(DefectKind::UnboundedRead);
    }
    needles
        .iter()
        .find(|(needle, _)| haystack.contains(needle))
        .map(|(_, kind)| *kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cppcheck_rule_ids() {
        let cases = [
            ("memleak", DefectKind::MemoryLeak),
            ("deallocuse", DefectKind::UseAfterFree),
            ("doubleFree", DefectKind::DoubleFree),
            ("nullPointer", DefectKind::NullDereference),
            ("ctunullpointer", DefectKind::NullDereference),
            ("bufferAccessOutOfBounds", DefectKind::BufferOverflow),
            ("getsCalled", DefectKind::UnboundedRead),
        ];
        for (id, expected) in cases {
            assert_eq!(classify(Some(id), ""), Some(expected), "rule id {id}");
        }
    }

    #[test]
    fn semgrep_rule_ids() {
        assert_eq!(
            classify(Some("c.lang.security.insecure-use-gets-fn.insecure-use-gets-fn"), ""),
            Some(DefectKind::UnboundedRead)
        );
        assert_eq!(
            classify(Some("c.lang.security.insecure-use-strcpy-fn.insecure-use-strcpy-fn"), ""),
            Some(DefectKind::BufferOverflow)
        );
        assert_eq!(
            classify(Some("c.lang.security.double-free.double-free"), ""),
            Some(DefectKind::DoubleFree)
        );
    }

    #[test]
    fn clang_analyzer_messages() {
        let cases = [
            ("Use of memory after it is freed", DefectKind::UseAfterFree),
            ("Attempt to free released memory", DefectKind::DoubleFree),
            ("Potential leak of memory pointed to by 'data'", DefectKind::MemoryLeak),
            ("Dereference of null pointer (loaded from variable 'input')", DefectKind::NullDereference),
            (
                "Call to function 'gets' is extremely insecure as it can always result in a buffer overflow",
                DefectKind::UnboundedRead,
            ),
        ];
        for (message, expected) in cases {
            assert_eq!(classify(None, message), Some(expected), "message {message}");
        }
    }

    #[test]
    fn gets_must_be_a_token() {
        assert_eq!(classify(None, "Obsolete function 'gets' called."), Some(DefectKind::UnboundedRead));
        assert_eq!(classify(None, "Unused variable: targets"), None);
        assert_eq!(classify(Some("widgetsize"), "nothing here"), None);
    }

    #[test]
    fn message_used_when_rule_id_is_unknown() {
        assert_eq!(
            classify(Some("unknownCheck"), "Memory leak: data"),
            Some(DefectKind::MemoryLeak)
        );
    }

    #[test]
    fn specific_leak_ids_are_memory_leaks() {
        for id in ["memleak", "memleakOnRealloc", "leakReturnValNotUsed", "c.custom.memory-leak"] {
            assert_eq!(classify(Some(id), ""), Some(DefectKind::MemoryLeak), "rule id {id}");
        }
    }

    #[test]
    fn information_leak_is_not_a_memory_leak() {
        assert_eq!(
            classify(
                Some("c.lang.security.info-leak-on-non-formated-string.info-leak-on-non-formated-string"),
                "Use %s, %d, %c... to format your variables, otherwise this could leak information."
            ),
            None
        );
        assert_eq!(classify(Some("resourceLeak"), ""), None);
    }

    #[test]
    fn unrelated_findings_stay_unclassified() {
        assert_eq!(classify(Some("unusedFunction"), "The function 'foo' is never used."), None);
        assert_eq!(classify(None, ""), None);
    }

    #[test]
    fn classify_all_keeps_existing_defects() {
        use sast_core::{Location, Severity};

        let mut findings = vec![
            Finding::new("t", Severity::Error, "Memory leak: data", Location::new("a.cpp", None, None)),
            Finding::new("t", Severity::Error, "Memory leak: data", Location::new("a.cpp", None, None))
                .with_defect(Some(DefectKind::DoubleFree)),
        ];
        classify_all(&mut findings);
        assert_eq!(findings[0].defect, Some(DefectKind::MemoryLeak));
        assert_eq!(findings[1].defect, Some(DefectKind::DoubleFree));
    }
}
