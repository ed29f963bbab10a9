//! Drive intent tracker with duplicate suppression.
//!
//! The tracker owns the held-key flags and the last drive frame it
//! transmitted. A new drive frame goes out only when it differs byte-for-byte
//! from that last frame on the same connection, so a bouncing key or an
//! unrelated repeat never produces redundant wire traffic.
//!
//! The last frame is scoped to the connection it was sent on. After a
//! reconnect the first drive frame is always sent, while the held flags
//! survive untouched: reconnecting resumes whatever keys were last held.

use oi_protocol::CommandFrame;
use tracing::{debug, info};

use crate::error::{TeleopError, TeleopResult};
use crate::intent::{DriveConfig, DriveIntent, KeyEffect, handle_key_event};
use crate::keys::KeyEvent;
use crate::sink::DisplaySink;
use crate::transport::{ConnectionHandle, ConnectionId, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SentDriveFrame {
    connection: ConnectionId,
    frame: CommandFrame,
}

#[derive(Debug, Clone, Default)]
pub struct DriveIntentTracker {
    intent: DriveIntent,
    last_sent: Option<SentDriveFrame>,
    config: DriveConfig,
}

impl DriveIntentTracker {
    pub fn new(config: DriveConfig) -> Self {
        Self {
            intent: DriveIntent::IDLE,
            last_sent: None,
            config,
        }
    }

    pub fn intent(&self) -> DriveIntent {
        self.intent
    }

    pub fn config(&self) -> &DriveConfig {
        &self.config
    }

    /// Last drive frame transmitted, on whichever connection.
    pub fn last_sent_frame(&self) -> Option<CommandFrame> {
        self.last_sent.map(|sent| sent.frame)
    }

    /// Last drive frame transmitted on `connection`, if any.
    pub fn last_sent_on(&self, connection: ConnectionId) -> Option<CommandFrame> {
        self.last_sent
            .filter(|sent| sent.connection == connection)
            .map(|sent| sent.frame)
    }

    /// Update the flags for `event` and return what should be transmitted.
    pub fn apply(&mut self, event: &KeyEvent) -> Option<KeyEffect> {
        let (next, effect) = handle_key_event(self.intent, event.kind, &event.key, &self.config);
        self.intent = next;
        effect
    }

    /// Handle one key event end to end: update flags, then compare-and-send.
    ///
    /// Returns the frame actually written, or `None` when nothing needed to go
    /// out. With no open connection any effect fails with `ConnectionLost`;
    /// the flags keep the update and the last sent frame is left as it was.
    pub fn on_key_event<T: Transport>(
        &mut self,
        conn: Option<&mut ConnectionHandle<T>>,
        sink: &mut dyn DisplaySink,
        event: &KeyEvent,
    ) -> TeleopResult<Option<CommandFrame>> {
        match self.apply(event) {
            Some(effect) => self.transmit(conn, sink, effect),
            None => Ok(None),
        }
    }

    pub fn transmit<T: Transport>(
        &mut self,
        conn: Option<&mut ConnectionHandle<T>>,
        sink: &mut dyn DisplaySink,
        effect: KeyEffect,
    ) -> TeleopResult<Option<CommandFrame>> {
        match effect {
            KeyEffect::Drive(frame) => {
                let conn = conn.ok_or_else(TeleopError::not_connected)?;
                // A dead link fails even when the frame would be suppressed.
                conn.ensure_open()?;
                if self.last_sent_on(conn.id()) == Some(frame) {
                    debug!(connection = %conn.id(), frame = %frame, "Drive frame unchanged, not resent");
                    return Ok(None);
                }
                conn.send(&frame)?;
                self.last_sent = Some(SentDriveFrame {
                    connection: conn.id(),
                    frame,
                });
                info!(connection = %conn.id(), intent = ?self.intent, frame = %frame, "Drive frame sent");
                sink.echo(&frame.to_string());
                Ok(Some(frame))
            }
            KeyEffect::Command(cmd) => {
                let conn = conn.ok_or_else(TeleopError::not_connected)?;
                let frame = cmd.frame();
                conn.send(&frame)?;
                info!(connection = %conn.id(), command = %cmd, "Command sent");
                sink.echo(&frame.to_string());
                Ok(Some(frame))
            }
        }
    }
}
