//! Fuzz target: defect classifier.
//!
//! Classification is a pure function of its inputs; it must not panic and
//! must give the same answer twice.
#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let (rule, message) = text.split_once('\n').unwrap_or(("", &text));
    let rule = (!rule.is_empty()).then_some(rule);

    let first = sast_report::classify(rule, message);
    assert_eq!(first, sast_report::classify(rule, message));
});
