//! Fuzz target: scan-build (clang analyzer) diagnostic parser.
#![no_main]

use libfuzzer_sys::fuzz_target;
use sast_report::parse::scan_build;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    for finding in scan_build::parse_text("scan-build", &text) {
        assert!(!finding.location.file.as_os_str().is_empty());
    }
});
