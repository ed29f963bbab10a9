//! Symbolic keys and key events.

use oi_protocol::OiCommand;

/// Supported keybindings, as shown to the operator.
pub const KEYBIND_HELP: &str = "\
Supported Keys:
E\tPassive
Q\tSafe
F\tFull
C\tClean
G\tDock
R\tReset
Space\tBeep
WASD\tMotion
";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Backward,
        Direction::Left,
        Direction::Right,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Drive(Direction),
    Command(OiCommand),
    Other(String),
}

impl Key {
    /// Map a key symbol (`"w"`, `"Space"`, `"forward"`, ...) to its binding.
    /// Matching is case-insensitive; anything unbound becomes [`Key::Other`].
    pub fn from_symbol(symbol: &str) -> Self {
        let trimmed = symbol.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "w" | "forward" | "up" => Key::Drive(Direction::Forward),
            "s" | "backward" | "back" | "down" => Key::Drive(Direction::Backward),
            "a" | "left" => Key::Drive(Direction::Left),
            "d" | "right" => Key::Drive(Direction::Right),
            "e" | "passive" => Key::Command(OiCommand::Passive),
            "q" | "safe" => Key::Command(OiCommand::Safe),
            "f" | "full" => Key::Command(OiCommand::Full),
            "c" | "clean" => Key::Command(OiCommand::Clean),
            "g" | "dock" => Key::Command(OiCommand::Dock),
            "r" | "reset" => Key::Command(OiCommand::Reset),
            "space" | "beep" => Key::Command(OiCommand::Beep),
            _ => Key::Other(trimmed.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub key: Key,
}

impl KeyEvent {
    pub fn new(kind: KeyEventKind, key: Key) -> Self {
        Self { kind, key }
    }

    pub fn press(symbol: &str) -> Self {
        Self::new(KeyEventKind::Press, Key::from_symbol(symbol))
    }

    pub fn release(symbol: &str) -> Self {
        Self::new(KeyEventKind::Release, Key::from_symbol(symbol))
    }
}
