//! Caller-side session: at most one live connection plus the drive tracker.
//!
//! The session is what a UI, CLI or test harness talks to. It owns the
//! connection handle, replaces it on reconnect, and discards it as soon as
//! the handle reports itself invalid.

use oi_protocol::{CommandFrame, IntFormat, OiCommand, SensorReading};
use tracing::warn;

use crate::error::{TeleopError, TeleopResult};
use crate::intent::{DriveConfig, DriveIntent, KeyEffect};
use crate::keys::{Key, KeyEvent, KeyEventKind};
use crate::sensor;
use crate::sink::DisplaySink;
use crate::tracker::DriveIntentTracker;
use crate::transport::{ConnectionHandle, ConnectionId, Transport};

pub struct TeleopSession<T: Transport, S: DisplaySink> {
    connection: Option<ConnectionHandle<T>>,
    tracker: DriveIntentTracker,
    sink: S,
}

impl<T: Transport, S: DisplaySink> TeleopSession<T, S> {
    pub fn new(config: DriveConfig, sink: S) -> Self {
        Self {
            connection: None,
            tracker: DriveIntentTracker::new(config),
            sink,
        }
    }

    /// Open a new connection over `transport`, closing any previous one.
    pub fn connect(&mut self, transport: T) -> ConnectionId {
        self.close_current();
        let handle = ConnectionHandle::open(transport);
        let id = handle.id();
        self.connection = Some(handle);
        id
    }

    pub fn disconnect(&mut self) -> TeleopResult<()> {
        match self.connection.take() {
            Some(handle) => handle.close(),
            None => Ok(()),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connection.as_ref().is_some_and(ConnectionHandle::is_open)
    }

    pub fn connection_id(&self) -> Option<ConnectionId> {
        self.connection.as_ref().map(ConnectionHandle::id)
    }

    pub fn connection(&self) -> Option<&ConnectionHandle<T>> {
        self.connection.as_ref()
    }

    pub fn intent(&self) -> DriveIntent {
        self.tracker.intent()
    }

    pub fn tracker(&self) -> &DriveIntentTracker {
        &self.tracker
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Dispatch a key event by symbol name, e.g. `("w", Press)`.
    pub fn handle_key(
        &mut self,
        kind: KeyEventKind,
        symbol: &str,
    ) -> TeleopResult<Option<CommandFrame>> {
        self.handle_event(&KeyEvent::new(kind, Key::from_symbol(symbol)))
    }

    pub fn handle_event(&mut self, event: &KeyEvent) -> TeleopResult<Option<CommandFrame>> {
        let result = self
            .tracker
            .on_key_event(self.connection.as_mut(), &mut self.sink, event);
        self.discard_if_invalid(result)
    }

    pub fn send_command(&mut self, cmd: OiCommand) -> TeleopResult<CommandFrame> {
        let result = self.tracker.transmit(
            self.connection.as_mut(),
            &mut self.sink,
            KeyEffect::Command(cmd),
        );
        self.discard_if_invalid(result)?
            .ok_or_else(TeleopError::not_connected)
    }

    /// Write an arbitrary frame (e.g. a sensor query) and echo it.
    pub fn send_frame(&mut self, frame: &CommandFrame) -> TeleopResult<()> {
        let result = match self.connection.as_mut() {
            Some(conn) => conn.send(frame),
            None => Err(TeleopError::not_connected()),
        };
        self.discard_if_invalid(result)?;
        self.sink.echo(&frame.to_string());
        Ok(())
    }

    pub fn read_sensor(&mut self, format: IntFormat) -> TeleopResult<SensorReading> {
        let result = match self.connection.as_mut() {
            Some(conn) => sensor::read_value(conn, format),
            None => Err(TeleopError::not_connected()),
        };
        self.discard_if_invalid(result)
    }

    fn discard_if_invalid<R>(&mut self, result: TeleopResult<R>) -> TeleopResult<R> {
        if result.is_err() && self.connection.as_ref().is_some_and(|c| !c.is_open()) {
            if let Some(handle) = self.connection.take() {
                warn!(connection = %handle.id(), fault = ?handle.fault(), "Discarding connection");
            }
        }
        result
    }

    fn close_current(&mut self) {
        if let Some(previous) = self.connection.take() {
            let id = previous.id();
            if let Err(e) = previous.close() {
                warn!(connection = %id, error = %e, "Failed to close previous connection");
            }
        }
    }
}
