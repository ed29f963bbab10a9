//! Thread-safe session wrapper.
//!
//! When key events and I/O arrive on different threads, every call takes the
//! same lock for the whole of flags -> frame -> compare-and-send -> record,
//! so two threads can never both send the same drive frame.

use std::sync::Arc;

use oi_protocol::{CommandFrame, IntFormat, OiCommand, SensorReading};
use parking_lot::Mutex;

use crate::error::TeleopResult;
use crate::intent::DriveIntent;
use crate::keys::{KeyEvent, KeyEventKind};
use crate::session::TeleopSession;
use crate::sink::DisplaySink;
use crate::transport::{ConnectionId, Transport};

pub struct SharedSession<T: Transport, S: DisplaySink> {
    inner: Arc<Mutex<TeleopSession<T, S>>>,
}

impl<T: Transport, S: DisplaySink> Clone for SharedSession<T, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Transport, S: DisplaySink> SharedSession<T, S> {
    pub fn new(session: TeleopSession<T, S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn connect(&self, transport: T) -> ConnectionId {
        self.inner.lock().connect(transport)
    }

    pub fn disconnect(&self) -> TeleopResult<()> {
        self.inner.lock().disconnect()
    }

    pub fn handle_key(
        &self,
        kind: KeyEventKind,
        symbol: &str,
    ) -> TeleopResult<Option<CommandFrame>> {
        self.inner.lock().handle_key(kind, symbol)
    }

    pub fn handle_event(&self, event: &KeyEvent) -> TeleopResult<Option<CommandFrame>> {
        self.inner.lock().handle_event(event)
    }

    pub fn send_command(&self, cmd: OiCommand) -> TeleopResult<CommandFrame> {
        self.inner.lock().send_command(cmd)
    }

    pub fn read_sensor(&self, format: IntFormat) -> TeleopResult<SensorReading> {
        self.inner.lock().read_sensor(format)
    }

    pub fn intent(&self) -> DriveIntent {
        self.inner.lock().intent()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.lock().is_connected()
    }

    /// Run `f` with the session locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut TeleopSession<T, S>) -> R) -> R {
        f(&mut self.inner.lock())
    }
}
