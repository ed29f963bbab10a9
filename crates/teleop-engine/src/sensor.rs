//! Sensor reads over an open connection.
//!
//! Each read requests exactly as many bytes as the format is wide and
//! decodes them big-endian. Failures are surfaced immediately; a short read
//! or transport fault leaves the handle invalid.

use std::num::TryFromIntError;

use oi_protocol::{IntFormat, SensorReading, decode_reading};
use tracing::{trace, warn};

use crate::error::{TeleopError, TeleopResult};
use crate::transport::{ConnectionHandle, Transport};

pub fn read_value<T: Transport>(
    conn: &mut ConnectionHandle<T>,
    format: IntFormat,
) -> TeleopResult<SensorReading> {
    let bytes = conn.read_exact(format.byte_len())?;
    let reading = decode_reading(&bytes, format)?;
    trace!(connection = %conn.id(), %format, value = reading.value(), "Sensor value read");
    Ok(reading)
}

pub fn read_u8<T: Transport>(conn: &mut ConnectionHandle<T>) -> TeleopResult<u8> {
    narrow(read_value(conn, IntFormat::U8)?)
}

pub fn read_i8<T: Transport>(conn: &mut ConnectionHandle<T>) -> TeleopResult<i8> {
    narrow(read_value(conn, IntFormat::I8)?)
}

pub fn read_u16<T: Transport>(conn: &mut ConnectionHandle<T>) -> TeleopResult<u16> {
    narrow(read_value(conn, IntFormat::U16)?)
}

pub fn read_i16<T: Transport>(conn: &mut ConnectionHandle<T>) -> TeleopResult<i16> {
    narrow(read_value(conn, IntFormat::I16)?)
}

fn narrow<N: TryFrom<i32, Error = TryFromIntError>>(reading: SensorReading) -> TeleopResult<N> {
    N::try_from(reading.value()).map_err(|e| {
        warn!(value = reading.value(), format = %reading.format(), error = %e, "Sensor value out of range");
        TeleopError::Range {
            value: reading.value(),
            format: reading.format(),
        }
    })
}
