//! Complete, fixed-length command frames.

use core::fmt;

use crate::error::{OiError, OiResult};
use crate::opcodes::DRIVE_DIRECT;

/// Longest frame this crate produces (the beep song).
pub const MAX_FRAME_LEN: usize = 7;

/// Opcode plus two big-endian i16 wheel speeds.
pub const DRIVE_FRAME_LEN: usize = 5;

/// One complete protocol command.
///
/// Frames are immutable once built and are written to the link in a single
/// call, never partially.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandFrame {
    buf: [u8; MAX_FRAME_LEN],
    len: usize,
}

impl CommandFrame {
    /// Build a frame from a literal table entry. Bytes past
    /// [`MAX_FRAME_LEN`] are dropped; table entries never reach that limit.
    pub(crate) const fn from_literal(bytes: &[u8]) -> Self {
        let mut buf = [0u8; MAX_FRAME_LEN];
        let mut i = 0;
        while i < bytes.len() && i < MAX_FRAME_LEN {
            buf[i] = bytes[i];
            i += 1;
        }
        Self { buf, len: i }
    }

    pub(crate) const fn from_array<const N: usize>(bytes: [u8; N]) -> Self {
        Self::from_literal(&bytes)
    }

    /// Wrap raw operator-supplied bytes in a frame.
    pub fn try_from_slice(bytes: &[u8]) -> OiResult<Self> {
        if bytes.is_empty() || bytes.len() > MAX_FRAME_LEN {
            return Err(OiError::Format {
                expected: MAX_FRAME_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self::from_literal(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn opcode(&self) -> u8 {
        self.buf[0]
    }

    pub fn is_drive(&self) -> bool {
        self.len == DRIVE_FRAME_LEN && self.opcode() == DRIVE_DIRECT
    }
}

impl TryFrom<&[u8]> for CommandFrame {
    type Error = OiError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::try_from_slice(bytes)
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CommandFrame").field(&self.as_bytes()).finish()
    }
}

/// Operator echo form: space-separated decimal bytes.
impl fmt::Display for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte}")?;
        }
        Ok(())
    }
}
