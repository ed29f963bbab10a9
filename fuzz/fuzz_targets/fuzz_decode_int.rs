//! Fuzzes fixed-width integer decoding against every format.
//!
//! Run with:
//!   cargo +nightly fuzz run fuzz_decode_int
#![no_main]
use libfuzzer_sys::fuzz_target;
use oi_protocol::{IntFormat, decode_int, encode_int};

fuzz_target!(|data: &[u8]| {
    for format in IntFormat::ALL {
        match decode_int(data, format) {
            Ok(value) => {
                assert_eq!(data.len(), format.byte_len());
                assert!(format.contains(value));
                let encoded = encode_int(value, format).ok();
                assert_eq!(encoded.as_ref().map(|b| b.as_bytes()), Some(data));
            }
            Err(_) => assert_ne!(data.len(), format.byte_len()),
        }
    }
});
