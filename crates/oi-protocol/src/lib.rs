//! iRobot Open Interface (OI) framing for tethered teleoperation.
//!
//! This crate is intentionally I/O-free and allocation-free.
//! It provides pure functions and types that can be tested and fuzzed without
//! a robot or a serial port attached.
//!
//! # Key Features
//! - Big-endian 8/16-bit integer codec with strict range and width checks
//! - Literal frames for the mode, clean, dock, reset and beep commands
//! - Drive Direct (opcode 145) frames from wheel speeds or a drive vector
//! - Fixed-width sensor value decoding

#![deny(unsafe_op_in_unsafe_fn)]
#![deny(static_mut_refs)]

pub mod codec;
pub mod commands;
pub mod drive;
pub mod error;
pub mod frame;
pub mod opcodes;
pub mod sensors;

pub use codec::{IntBytes, IntFormat, IntWidth, MAX_INT_BYTES, Signedness, decode_int, encode_int};
pub use commands::OiCommand;
pub use drive::{DriveVector, WheelSpeeds, encode_drive, encode_drive_speeds};
pub use error::{OiError, OiResult};
pub use frame::{CommandFrame, DRIVE_FRAME_LEN, MAX_FRAME_LEN};
pub use opcodes::{
    DEFAULT_BAUD_RATE, DEFAULT_READ_TIMEOUT_MS, DEFAULT_ROTATION_CHANGE, DEFAULT_VELOCITY_CHANGE,
};
pub use sensors::{SensorReading, decode_reading};
