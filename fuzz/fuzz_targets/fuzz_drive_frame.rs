//! Fuzzes wheel-speed encoding with arbitrary velocity/rotation pairs.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_drive_frame
#![no_main]
use libfuzzer_sys::fuzz_target;
use oi_protocol::{DRIVE_FRAME_LEN, DriveVector};

fuzz_target!(|data: [u8; 8]| {
    let [v0, v1, v2, v3, r0, r1, r2, r3] = data;
    let vector = DriveVector::new(
        i32::from_be_bytes([v0, v1, v2, v3]),
        i32::from_be_bytes([r0, r1, r2, r3]),
    );
    let frame = vector.frame();
    assert_eq!(frame.len(), DRIVE_FRAME_LEN);
    assert!(frame.is_drive());
});
