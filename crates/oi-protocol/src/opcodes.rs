//! Open Interface opcodes and link defaults.

/// Start the OI and enter Passive mode.
pub const PASSIVE: u8 = 128;

/// Enter Safe mode (cliff and wheel-drop sensors stay armed).
pub const SAFE: u8 = 131;

/// Enter Full mode (no safety reactions).
pub const FULL: u8 = 132;

/// Start the default cleaning cycle.
pub const CLEAN: u8 = 135;

/// Seek the charging dock.
pub const DOCK: u8 = 143;

/// Soft reset, as if the battery had been removed and reinserted.
pub const RESET: u8 = 7;

/// Define a song: `[140, song, length, (note, duration)*]`.
pub const SONG: u8 = 140;

/// Play a previously defined song: `[141, song]`.
pub const PLAY: u8 = 141;

/// Drive Direct: `[145, vr_hi, vr_lo, vl_hi, vl_lo]`, wheel speeds in mm/s.
pub const DRIVE_DIRECT: u8 = 145;

/// Song 3, one note (MIDI 64 for 16/64 s), then play song 3.
pub const BEEP_SONG: [u8; 7] = [SONG, 3, 1, 64, 16, PLAY, 3];

/// Serial link speed expected by the robot.
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Read timeout applied to the serial link.
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 1_000;

/// Forward/backward speed added per held key, in mm/s.
pub const DEFAULT_VELOCITY_CHANGE: i32 = 150;

/// Rotation added per held turn key, in mm/s of wheel speed difference.
pub const DEFAULT_ROTATION_CHANGE: i32 = 100;
