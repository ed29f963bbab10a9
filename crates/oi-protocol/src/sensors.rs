//! Fixed-width sensor values.

use crate::codec::{IntFormat, decode_int};
use crate::error::OiResult;

/// A decoded value tagged with the format it was read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReading {
    value: i32,
    format: IntFormat,
}

impl SensorReading {
    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn format(&self) -> IntFormat {
        self.format
    }

    pub fn as_u8(&self) -> Option<u8> {
        (self.format == IntFormat::U8).then(|| u8::try_from(self.value).ok())?
    }

    pub fn as_i8(&self) -> Option<i8> {
        (self.format == IntFormat::I8).then(|| i8::try_from(self.value).ok())?
    }

    pub fn as_u16(&self) -> Option<u16> {
        (self.format == IntFormat::U16).then(|| u16::try_from(self.value).ok())?
    }

    pub fn as_i16(&self) -> Option<i16> {
        (self.format == IntFormat::I16).then(|| i16::try_from(self.value).ok())?
    }
}

pub fn decode_reading(bytes: &[u8], format: IntFormat) -> OiResult<SensorReading> {
    let value = decode_int(bytes, format)?;
    Ok(SensorReading { value, format })
}
