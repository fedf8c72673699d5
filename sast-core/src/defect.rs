use std::fmt;

use serde::{Deserialize, Serialize};

/// A class of memory-safety defect that an analyzer finding can be attributed to.
///
/// Each variant corresponds to one deliberately broken function in the
/// bundled C++ fixtures (see [`crate::fixtures`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum DefectKind {
    /// Out-of-bounds write from an unchecked copy into a fixed-size buffer.
    BufferOverflow,
    /// Out-of-bounds write from reading unbounded input into a fixed-size buffer.
    UnboundedRead,
    /// Heap allocation that is never released on any path.
    MemoryLeak,
    /// Dereference after the referent's storage has been released.
    UseAfterFree,
    /// The same heap allocation released twice.
    DoubleFree,
    /// Pointer dereferenced without checking it against null.
    NullDereference,
}

impl DefectKind {
    /// Every defect kind, in catalogue order.
    pub const ALL: [DefectKind; 6] = [
        DefectKind::BufferOverflow,
        DefectKind::UnboundedRead,
        DefectKind::MemoryLeak,
        DefectKind::UseAfterFree,
        DefectKind::DoubleFree,
        DefectKind::NullDereference,
    ];

    /// MITRE CWE identifier for this defect class.
    #[must_use]
    pub const fn cwe(self) -> u32 {
        match self {
            DefectKind::BufferOverflow => 120,
            DefectKind::UnboundedRead => 242,
            DefectKind::MemoryLeak => 401,
            DefectKind::UseAfterFree => 416,
            DefectKind::DoubleFree => 415,
            DefectKind::NullDereference => 476,
        }
    }

    /// CWE tag in the form used by SARIF `properties.tags` (e.g. `CWE-416`).
    #[must_use]
    pub fn cwe_tag(self) -> String {
        format!("CWE-{}", self.cwe())
    }

    /// Short human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            DefectKind::BufferOverflow => "out-of-bounds write (unchecked copy)",
            DefectKind::UnboundedRead => "out-of-bounds write (unbounded input read)",
            DefectKind::MemoryLeak => "resource leak",
            DefectKind::UseAfterFree => "use after free",
            DefectKind::DoubleFree => "double release",
            DefectKind::NullDereference => "invalid dereference (null pointer)",
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            DefectKind::BufferOverflow => "buffer-overflow",
            DefectKind::UnboundedRead => "unbounded-read",
            DefectKind::MemoryLeak => "memory-leak",
            DefectKind::UseAfterFree => "use-after-free",
            DefectKind::DoubleFree => "double-free",
            DefectKind::NullDereference => "null-dereference",
        }
    }
}

impl fmt::Display for DefectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
