//! Scripted key input.
//!
//! One event per line:
//!
//! ```text
//! # drive forward, veer left, stop
//! press w
//! +a
//! release a
//! -w
//! ```
//!
//! `press`/`down`/`+` and `release`/`up`/`-` are accepted; text after `#` is
//! ignored.

use crate::error::{TeleopError, TeleopResult};
use crate::keys::{Key, KeyEvent, KeyEventKind};

/// Parse the script line numbered `line_no` (1-based, used in errors).
/// Blank and comment-only lines yield `Ok(None)`.
pub fn parse_script_line(line_no: usize, line: &str) -> TeleopResult<Option<KeyEvent>> {
    parse_line(line).map_err(|reason| TeleopError::Script {
        line: line_no,
        reason,
    })
}

/// Parse a whole script, reporting the 1-based line of the first error.
pub fn parse_script(text: &str) -> TeleopResult<Vec<KeyEvent>> {
    let mut events = Vec::new();
    for (index, line) in text.lines().enumerate() {
        events.extend(parse_script_line(index + 1, line)?);
    }
    Ok(events)
}

fn parse_line(line: &str) -> Result<Option<KeyEvent>, String> {
    let content = line.split('#').next().unwrap_or_default().trim();
    if content.is_empty() {
        return Ok(None);
    }

    if let Some(symbol) = content.strip_prefix('+') {
        return event(KeyEventKind::Press, symbol).map(Some);
    }
    if let Some(symbol) = content.strip_prefix('-') {
        return event(KeyEventKind::Release, symbol).map(Some);
    }

    let mut words = content.split_whitespace();
    let kind = match words.next().map(str::to_ascii_lowercase).as_deref() {
        Some("press" | "down") => KeyEventKind::Press,
        Some("release" | "up") => KeyEventKind::Release,
        Some(other) => return Err(format!("expected 'press' or 'release', got '{other}'")),
        None => return Ok(None),
    };
    let symbol = words.next().unwrap_or_default();
    if let Some(extra) = words.next() {
        return Err(format!("unexpected trailing '{extra}'"));
    }
    event(kind, symbol).map(Some)
}

fn event(kind: KeyEventKind, symbol: &str) -> Result<KeyEvent, String> {
    let symbol = symbol.trim();
    if symbol.is_empty() {
        return Err("missing key name".to_string());
    }
    Ok(KeyEvent::new(kind, Key::from_symbol(symbol)))
}
