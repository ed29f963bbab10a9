//! Discrete Open Interface commands.
//!
//! Each command maps to a literal byte sequence fixed at compile time; there
//! is no runtime parsing of byte strings.

use core::fmt;
use core::str::FromStr;

use crate::error::OiError;
use crate::frame::CommandFrame;
use crate::opcodes::{BEEP_SONG, CLEAN, DOCK, FULL, PASSIVE, RESET, SAFE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OiCommand {
    Passive,
    Safe,
    Full,
    Clean,
    Dock,
    Reset,
    Beep,
}

impl OiCommand {
    pub const ALL: [OiCommand; 7] = [
        Self::Passive,
        Self::Safe,
        Self::Full,
        Self::Clean,
        Self::Dock,
        Self::Reset,
        Self::Beep,
    ];

    /// Literal wire bytes for this command.
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Passive => &[PASSIVE],
            Self::Safe => &[SAFE],
            Self::Full => &[FULL],
            Self::Clean => &[CLEAN],
            Self::Dock => &[DOCK],
            Self::Reset => &[RESET],
            Self::Beep => &BEEP_SONG,
        }
    }

    pub const fn frame(self) -> CommandFrame {
        CommandFrame::from_literal(self.as_bytes())
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Passive => "passive",
            Self::Safe => "safe",
            Self::Full => "full",
            Self::Clean => "clean",
            Self::Dock => "dock",
            Self::Reset => "reset",
            Self::Beep => "beep",
        }
    }
}

impl fmt::Display for OiCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OiCommand {
    type Err = OiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|cmd| cmd.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| OiError::UnknownCommand(s.to_string()))
    }
}
