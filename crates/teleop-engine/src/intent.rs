//! Drive intent: which direction keys are held, and the pure key transition.
//!
//! A press sets the matching flag, a release clears it, and nothing else
//! touches them. A lost release leaves its flag set
//! until the next press/release pair for that key; this is not corrected.

use oi_protocol::{CommandFrame, DEFAULT_ROTATION_CHANGE, DEFAULT_VELOCITY_CHANGE, DriveVector};
use oi_protocol::{IntFormat, OiCommand, OiError, OiResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::keys::{Direction, Key, KeyEventKind};

/// Speed added per held direction key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveConfig {
    pub velocity_change: i32,
    pub rotation_change: i32,
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self {
            velocity_change: DEFAULT_VELOCITY_CHANGE,
            rotation_change: DEFAULT_ROTATION_CHANGE,
        }
    }
}

impl DriveConfig {
    /// Both magnitudes must themselves fit a wheel-speed field.
    pub fn validate(&self) -> OiResult<()> {
        for value in [self.velocity_change, self.rotation_change] {
            if !IntFormat::I16.contains(value) {
                return Err(OiError::Range {
                    value,
                    format: IntFormat::I16,
                });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DriveIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl DriveIntent {
    pub const IDLE: Self = Self {
        forward: false,
        backward: false,
        left: false,
        right: false,
    };

    pub fn with(mut self, direction: Direction, held: bool) -> Self {
        match direction {
            Direction::Forward => self.forward = held,
            Direction::Backward => self.backward = held,
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
        }
        self
    }

    pub fn vector(&self, config: &DriveConfig) -> DriveVector {
        let signed = |held: bool, magnitude: i32| if held { magnitude } else { 0 };
        DriveVector {
            velocity: signed(self.forward, config.velocity_change)
                .saturating_sub(signed(self.backward, config.velocity_change)),
            rotation: signed(self.left, config.rotation_change)
                .saturating_sub(signed(self.right, config.rotation_change)),
        }
    }

    pub fn frame(&self, config: &DriveConfig) -> CommandFrame {
        self.vector(config).frame()
    }
}

/// What a key event asks the link to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEffect {
    /// Candidate drive frame for the new intent; may still be suppressed as
    /// a duplicate of the last one sent.
    Drive(CommandFrame),
    Command(OiCommand),
}

impl KeyEffect {
    pub fn frame(&self) -> CommandFrame {
        match self {
            KeyEffect::Drive(frame) => *frame,
            KeyEffect::Command(cmd) => cmd.frame(),
        }
    }
}

/// Apply one key event to `intent`.
///
/// Every direction-key event yields a candidate drive frame, including
/// keyboard auto-repeat presses that leave the flags unchanged; the tracker
/// drops candidates equal to the last frame sent. Discrete command keys fire
/// on press and leave the intent alone.
pub fn handle_key_event(
    intent: DriveIntent,
    kind: KeyEventKind,
    key: &Key,
    config: &DriveConfig,
) -> (DriveIntent, Option<KeyEffect>) {
    match (kind, key) {
        (_, Key::Drive(direction)) => {
            let next = intent.with(*direction, kind == KeyEventKind::Press);
            (next, Some(KeyEffect::Drive(next.frame(config))))
        }
        (KeyEventKind::Press, Key::Command(cmd)) => (intent, Some(KeyEffect::Command(*cmd))),
        (KeyEventKind::Release, Key::Command(_)) => (intent, None),
        (KeyEventKind::Press, Key::Other(symbol)) => {
            debug!(key = %symbol, "Unbound key");
            (intent, None)
        }
        (KeyEventKind::Release, Key::Other(_)) => (intent, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: DriveConfig = DriveConfig {
        velocity_change: 150,
        rotation_change: 100,
    };

    fn press(intent: DriveIntent, symbol: &str) -> (DriveIntent, Option<KeyEffect>) {
        handle_key_event(intent, KeyEventKind::Press, &Key::from_symbol(symbol), &CONFIG)
    }

    fn release(intent: DriveIntent, symbol: &str) -> (DriveIntent, Option<KeyEffect>) {
        handle_key_event(intent, KeyEventKind::Release, &Key::from_symbol(symbol), &CONFIG)
    }

    #[test]
    fn test_press_forward_sets_flag_and_frame() {
        let (intent, effect) = press(DriveIntent::IDLE, "w");
        assert!(intent.forward);
        assert_eq!(
            effect.map(|e| e.frame().as_bytes().to_vec()),
            Some(vec![145, 0, 150, 0, 150])
        );
    }

    #[test]
    fn test_forward_left_vector() {
        let (intent, _) = press(DriveIntent::IDLE, "w");
        let (intent, effect) = press(intent, "a");
        assert_eq!(intent.vector(&CONFIG), DriveVector::new(150, 100));
        assert_eq!(
            effect.map(|e| e.frame().as_bytes().to_vec()),
            Some(vec![145, 0, 200, 0, 100])
        );
    }

    #[test]
    fn test_repeat_press_repeats_candidate() {
        let (intent, first) = press(DriveIntent::IDLE, "w");
        let (again, second) = press(intent, "w");
        assert_eq!(again, intent);
        assert_eq!(first, second);
    }

    #[test]
    fn test_release_without_press_keeps_idle() {
        let (intent, effect) = release(DriveIntent::IDLE, "d");
        assert_eq!(intent, DriveIntent::IDLE);
        assert_eq!(effect, Some(KeyEffect::Drive(DriveVector::STOP.frame())));
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let (intent, _) = press(DriveIntent::IDLE, "w");
        let (intent, effect) = press(intent, "s");
        assert!(intent.forward && intent.backward);
        assert_eq!(
            effect.map(|e| e.frame()),
            Some(DriveVector::STOP.frame())
        );
    }

    #[test]
    fn test_command_key_leaves_intent() {
        let (held, _) = press(DriveIntent::IDLE, "w");
        let (intent, effect) = press(held, "space");
        assert_eq!(intent, held);
        assert_eq!(effect, Some(KeyEffect::Command(OiCommand::Beep)));

        let (intent, effect) = release(held, "space");
        assert_eq!(intent, held);
        assert_eq!(effect, None);
    }

    #[test]
    fn test_unbound_key_is_ignored() {
        let (intent, effect) = press(DriveIntent::IDLE, "x");
        assert_eq!(intent, DriveIntent::IDLE);
        assert_eq!(effect, None);
    }

    #[test]
    fn test_drive_config_validate() {
        assert!(DriveConfig::default().validate().is_ok());
        let config = DriveConfig {
            velocity_change: 40_000,
            rotation_change: 100,
        };
        assert!(matches!(
            config.validate(),
            Err(OiError::Range { value: 40_000, .. })
        ));
    }
}
