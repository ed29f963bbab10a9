//! Drive Direct encoding.
//!
//! A drive vector (forward velocity plus rotation) becomes two wheel speeds:
//! - `vr = velocity + rotation / 2`
//! - `vl = velocity - rotation / 2`
//!
//! Both are sent as signed 16-bit big-endian values after opcode 145, right
//! wheel first.

use crate::codec::{IntFormat, encode_int};
use crate::error::OiResult;
use crate::frame::{CommandFrame, DRIVE_FRAME_LEN};
use crate::opcodes::DRIVE_DIRECT;

/// Desired motion before it is split into wheel speeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriveVector {
    pub velocity: i32,
    pub rotation: i32,
}

/// Per-wheel speeds in mm/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WheelSpeeds {
    pub right: i16,
    pub left: i16,
}

impl DriveVector {
    pub const STOP: Self = Self {
        velocity: 0,
        rotation: 0,
    };

    pub const fn new(velocity: i32, rotation: i32) -> Self {
        Self { velocity, rotation }
    }

    /// Split into wheel speeds, saturating each at the i16 bounds.
    ///
    /// `rotation / 2` rounds toward negative infinity.
    pub fn wheel_speeds(&self) -> WheelSpeeds {
        let half = self.rotation.div_euclid(2);
        WheelSpeeds {
            right: saturate_i16(self.velocity.saturating_add(half)),
            left: saturate_i16(self.velocity.saturating_sub(half)),
        }
    }

    pub fn frame(&self) -> CommandFrame {
        encode_drive_speeds(self.wheel_speeds())
    }
}

#[inline]
fn saturate_i16(value: i32) -> i16 {
    value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Build a Drive Direct frame from unchecked wheel speeds.
///
/// Fails with [`crate::OiError::Range`] if either speed is outside i16;
/// callers clamp beforehand or use [`encode_drive_speeds`].
pub fn encode_drive(vr: i32, vl: i32) -> OiResult<CommandFrame> {
    let right = encode_int(vr, IntFormat::I16)?;
    let left = encode_int(vl, IntFormat::I16)?;

    let mut out = [0u8; DRIVE_FRAME_LEN];
    out[0] = DRIVE_DIRECT;
    out[1..3].copy_from_slice(right.as_bytes());
    out[3..5].copy_from_slice(left.as_bytes());
    Ok(CommandFrame::from_array(out))
}

pub fn encode_drive_speeds(speeds: WheelSpeeds) -> CommandFrame {
    let [vr_hi, vr_lo] = speeds.right.to_be_bytes();
    let [vl_hi, vl_lo] = speeds.left.to_be_bytes();
    CommandFrame::from_array([DRIVE_DIRECT, vr_hi, vr_lo, vl_hi, vl_lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OiError;

    #[test]
    fn test_encode_drive_exact_bytes() {
        let frame = encode_drive(300, -300).expect("in range");
        assert_eq!(frame.as_bytes(), &[145, 0x01, 0x2C, 0xFE, 0xD4]);
        assert!(frame.is_drive());
    }

    #[test]
    fn test_encode_drive_out_of_range() {
        assert!(matches!(
            encode_drive(32768, 0),
            Err(OiError::Range { value: 32768, .. })
        ));
        assert!(matches!(
            encode_drive(0, -32769),
            Err(OiError::Range { value: -32769, .. })
        ));
    }

    #[test]
    fn test_forward_left_vector() {
        let speeds = DriveVector::new(150, 100).wheel_speeds();
        assert_eq!(speeds, WheelSpeeds { right: 200, left: 100 });
        assert_eq!(
            DriveVector::new(150, 100).frame().as_bytes(),
            &[145, 0, 200, 0, 100]
        );
    }

    #[test]
    fn test_spin_in_place() {
        let speeds = DriveVector::new(0, -100).wheel_speeds();
        assert_eq!(speeds, WheelSpeeds { right: -50, left: 50 });
    }

    #[test]
    fn test_odd_rotation_rounds_down() {
        let speeds = DriveVector::new(0, -3).wheel_speeds();
        assert_eq!(speeds, WheelSpeeds { right: -2, left: 2 });
    }

    #[test]
    fn test_stop_frame() {
        assert_eq!(DriveVector::STOP.frame().as_bytes(), &[145, 0, 0, 0, 0]);
    }

    #[test]
    fn test_wheel_speeds_saturate() {
        let speeds = DriveVector::new(i32::MAX, i32::MIN).wheel_speeds();
        assert_eq!(speeds.right, i16::MAX);
        assert_eq!(speeds.left, i16::MAX);

        let speeds = DriveVector::new(-40_000, 0).wheel_speeds();
        assert_eq!(speeds, WheelSpeeds { right: i16::MIN, left: i16::MIN });
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(500))]

        #[test]
        fn prop_speeds_and_checked_encoding_agree(vr in any::<i16>(), vl in any::<i16>()) {
            let checked = encode_drive(i32::from(vr), i32::from(vl))?;
            let direct = encode_drive_speeds(WheelSpeeds { right: vr, left: vl });
            prop_assert_eq!(checked, direct);
            prop_assert_eq!(checked.len(), DRIVE_FRAME_LEN);
            prop_assert_eq!(checked.opcode(), DRIVE_DIRECT);
        }

        #[test]
        fn prop_vector_frame_always_valid(velocity in -100_000i32..100_000, rotation in -100_000i32..100_000) {
            let frame = DriveVector::new(velocity, rotation).frame();
            prop_assert!(frame.is_drive());
        }

        #[test]
        fn prop_wheel_difference_matches_rotation(velocity in -1000i32..1000, half in -1000i32..1000) {
            let speeds = DriveVector::new(velocity, half * 2).wheel_speeds();
            prop_assert_eq!(i32::from(speeds.right) - i32::from(speeds.left), half * 2);
        }
    }
}
