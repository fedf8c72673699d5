//! Fuzz target: semgrep JSON parser.
//!
//! Malformed JSON must surface as an error, never a panic.
#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use sast_core::{ParserKind, ToolRun};

fuzz_target!(|data: &[u8]| {
    let run = ToolRun::new(
        "semgrep",
        Some(0),
        data.to_vec(),
        Vec::new(),
        chrono::Utc::now(),
        Duration::ZERO,
    );
    let _ = sast_report::parse_output(ParserKind::Semgrep, &run);
});
