//! Fuzz target: cppcheck diagnostic parser.
//!
//! Arbitrary bytes on either stream must parse without panicking, and every
//! finding must name a file.
#![no_main]

use std::time::Duration;

use libfuzzer_sys::fuzz_target;
use sast_core::{ParserKind, ToolRun};

fuzz_target!(|data: &[u8]| {
    let split = data.len() / 2;
    let run = ToolRun::new(
        "cppcheck",
        Some(0),
        data[..split].to_vec(),
        data[split..].to_vec(),
        chrono::Utc::now(),
        Duration::ZERO,
    );
    let findings = sast_report::parse_output(ParserKind::Cppcheck, &run)
        .expect("cppcheck parsing is infallible");
    assert!(findings.iter().all(|f| !f.location.file.as_os_str().is_empty()));
});
