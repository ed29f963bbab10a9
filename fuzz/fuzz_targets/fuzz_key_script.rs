//! Fuzzes the key script parser and feeds whatever parses through a tracker.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_key_script
#![no_main]
use libfuzzer_sys::fuzz_target;
use oi_teleop_engine::{DriveIntentTracker, KeyEffect, parse_script};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(events) = parse_script(text) else {
        return;
    };
    let mut tracker = DriveIntentTracker::default();
    for event in &events {
        if let Some(KeyEffect::Drive(frame)) = tracker.apply(event) {
            assert!(frame.is_drive());
        }
    }
});
