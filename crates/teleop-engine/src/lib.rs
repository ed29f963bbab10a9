//! Tethered teleoperation engine for Open Interface robots.
//!
//! Key events go in, duplicate-suppressed Drive Direct frames and discrete
//! commands come out over an exclusively owned [`ConnectionHandle`]. Sensor
//! values come back as typed readings.
//!
//! # Architecture
//!
//! - [`transport`]: the byte-stream trait and the connection handle that
//!   enforces whole-frame writes, exact reads and fail-once semantics
//! - [`intent`]: held-key flags and the pure key transition function
//! - [`tracker`]: compare-and-send of drive frames against the last one sent
//! - [`session`]: caller-side owner of the connection and tracker
//! - [`shared`]: the same session behind a single lock for multi-threaded use
//! - [`sensor`]: fixed-width reads
//! - [`script`]: key events from text, for tests and scripted driving
//! - [`serial`]: the `serialport` transport (feature `serial`)

#![deny(static_mut_refs)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod intent;
pub mod keys;
pub mod script;
pub mod sensor;
#[cfg(feature = "serial")]
pub mod serial;
pub mod session;
pub mod shared;
pub mod sink;
pub mod tracker;
pub mod transport;

pub use error::{TeleopError, TeleopResult};
pub use intent::{DriveConfig, DriveIntent, KeyEffect, handle_key_event};
pub use keys::{Direction, KEYBIND_HELP, Key, KeyEvent, KeyEventKind};
pub use script::{parse_script, parse_script_line};
pub use sensor::{read_i8, read_i16, read_u8, read_u16, read_value};
#[cfg(feature = "serial")]
pub use serial::{PortInfo, SerialSettings, SerialTransport, list_ports};
pub use session::TeleopSession;
pub use shared::SharedSession;
pub use sink::{DisplaySink, TracingSink, WriterSink};
pub use tracker::DriveIntentTracker;
pub use transport::{ConnectionHandle, ConnectionId, Transport};

// Protocol types re-exported so callers don't need a direct `oi-protocol`
// dependency for the common path.
pub use oi_protocol::{CommandFrame, IntFormat, OiCommand, SensorReading};
