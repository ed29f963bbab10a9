//! Big-endian integer codec.
//!
//! Every multi-byte value on the Open Interface is big-endian. Sensor replies
//! and drive payloads only ever use 8- or 16-bit fields, signed or unsigned.

use core::fmt;
use core::str::FromStr;

use crate::error::{OiError, OiResult};

/// Largest encoded integer, in bytes.
pub const MAX_INT_BYTES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    Bits8,
    Bits16,
}

impl IntWidth {
    pub const fn byte_len(self) -> usize {
        match self {
            Self::Bits8 => 1,
            Self::Bits16 => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signedness {
    Signed,
    Unsigned,
}

/// Width and signedness of one integer field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IntFormat {
    pub width: IntWidth,
    pub signedness: Signedness,
}

impl IntFormat {
    pub const U8: Self = Self::new(IntWidth::Bits8, Signedness::Unsigned);
    pub const I8: Self = Self::new(IntWidth::Bits8, Signedness::Signed);
    pub const U16: Self = Self::new(IntWidth::Bits16, Signedness::Unsigned);
    pub const I16: Self = Self::new(IntWidth::Bits16, Signedness::Signed);

    pub const ALL: [Self; 4] = [Self::U8, Self::I8, Self::U16, Self::I16];

    pub const fn new(width: IntWidth, signedness: Signedness) -> Self {
        Self { width, signedness }
    }

    pub const fn byte_len(self) -> usize {
        self.width.byte_len()
    }

    pub const fn min(self) -> i32 {
        match (self.width, self.signedness) {
            (_, Signedness::Unsigned) => 0,
            (IntWidth::Bits8, Signedness::Signed) => i8::MIN as i32,
            (IntWidth::Bits16, Signedness::Signed) => i16::MIN as i32,
        }
    }

    pub const fn max(self) -> i32 {
        match (self.width, self.signedness) {
            (IntWidth::Bits8, Signedness::Unsigned) => u8::MAX as i32,
            (IntWidth::Bits8, Signedness::Signed) => i8::MAX as i32,
            (IntWidth::Bits16, Signedness::Unsigned) => u16::MAX as i32,
            (IntWidth::Bits16, Signedness::Signed) => i16::MAX as i32,
        }
    }

    pub const fn contains(self, value: i32) -> bool {
        value >= self.min() && value <= self.max()
    }
}

impl fmt::Display for IntFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match (self.width, self.signedness) {
            (IntWidth::Bits8, Signedness::Unsigned) => "u8",
            (IntWidth::Bits8, Signedness::Signed) => "i8",
            (IntWidth::Bits16, Signedness::Unsigned) => "u16",
            (IntWidth::Bits16, Signedness::Signed) => "i16",
        };
        f.write_str(name)
    }
}

impl FromStr for IntFormat {
    type Err = OiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "u8" => Ok(Self::U8),
            "i8" => Ok(Self::I8),
            "u16" => Ok(Self::U16),
            "i16" => Ok(Self::I16),
            _ => Err(OiError::UnknownFormat(s.to_string())),
        }
    }
}

/// An encoded integer, 1 or 2 bytes, held on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntBytes {
    buf: [u8; MAX_INT_BYTES],
    len: usize,
}

impl IntBytes {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Encode `value` big-endian in the given format.
///
/// Fails with [`OiError::Range`] when `value` is outside the representable
/// range of `format`; never truncates.
pub fn encode_int(value: i32, format: IntFormat) -> OiResult<IntBytes> {
    if !format.contains(value) {
        return Err(OiError::Range { value, format });
    }

    let mut buf = [0u8; MAX_INT_BYTES];
    match (format.width, format.signedness) {
        (IntWidth::Bits8, Signedness::Unsigned) => buf[0] = value as u8,
        (IntWidth::Bits8, Signedness::Signed) => buf[0] = (value as i8).to_be_bytes()[0],
        (IntWidth::Bits16, Signedness::Unsigned) => buf = (value as u16).to_be_bytes(),
        (IntWidth::Bits16, Signedness::Signed) => buf = (value as i16).to_be_bytes(),
    }

    Ok(IntBytes {
        buf,
        len: format.byte_len(),
    })
}

/// Decode a big-endian integer.
///
/// `bytes` must be exactly `format.byte_len()` long, otherwise
/// [`OiError::Format`] is returned.
pub fn decode_int(bytes: &[u8], format: IntFormat) -> OiResult<i32> {
    let value = match (format.width, format.signedness, bytes) {
        (IntWidth::Bits8, Signedness::Unsigned, &[b]) => i32::from(b),
        (IntWidth::Bits8, Signedness::Signed, &[b]) => i32::from(i8::from_be_bytes([b])),
        (IntWidth::Bits16, Signedness::Unsigned, &[hi, lo]) => {
            i32::from(u16::from_be_bytes([hi, lo]))
        }
        (IntWidth::Bits16, Signedness::Signed, &[hi, lo]) => i32::from(i16::from_be_bytes([hi, lo])),
        _ => {
            return Err(OiError::Format {
                expected: format.byte_len(),
                actual: bytes.len(),
            });
        }
    };
    Ok(value)
}
