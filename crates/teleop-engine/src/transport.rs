//! Transport abstraction and the exclusively owned connection handle.
//!
//! A [`Transport`] is any duplex byte stream. A [`ConnectionHandle`] wraps one
//! and enforces the link contract:
//! - frames are written whole, never partially
//! - reads return exactly the requested number of bytes or fail
//! - the first fault (write error, read error, short read, timeout) poisons
//!   the handle; every later call fails with `ConnectionLost`
//!
//! Nothing here retries. Reconnecting is the caller's decision.

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

use oi_protocol::CommandFrame;
use tracing::{debug, info, warn};

use crate::error::{TeleopError, TeleopResult};

/// Duplex byte stream to the robot.
pub trait Transport: Send {
    /// Human-readable identifier, e.g. the serial port path.
    fn name(&self) -> &str;

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()>;

    /// Read up to `buf.len()` bytes. `Ok(0)`, `TimedOut` and `WouldBlock`
    /// mean no more data arrived in time.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    fn is_open(&self) -> bool;

    fn close(&mut self) -> io::Result<()>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        (**self).write_all(bytes)
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read(buf)
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one opened connection. Never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(u64);

impl ConnectionId {
    fn next() -> Self {
        ConnectionId(NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An open session with the robot, owned by exactly one caller.
pub struct ConnectionHandle<T: Transport> {
    id: ConnectionId,
    transport: T,
    fault: Option<String>,
}

impl<T: Transport> ConnectionHandle<T> {
    pub fn open(transport: T) -> Self {
        let id = ConnectionId::next();
        info!(connection = %id, port = transport.name(), "Connection opened");
        Self {
            id,
            transport,
            fault: None,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// False once the handle faulted or the underlying transport closed.
    pub fn is_open(&self) -> bool {
        self.fault.is_none() && self.transport.is_open()
    }

    /// Reason the handle was invalidated, if it was.
    pub fn fault(&self) -> Option<&str> {
        self.fault.as_deref()
    }

    pub fn send(&mut self, frame: &CommandFrame) -> TeleopResult<()> {
        self.ensure_open()?;
        if let Err(e) = self.transport.write_all(frame.as_bytes()) {
            return Err(self.poison(TeleopError::ConnectionLost(e.to_string())));
        }
        debug!(connection = %self.id, frame = %frame, "Frame written");
        Ok(())
    }

    /// Read exactly `n` bytes.
    ///
    /// A timeout or end of stream before `n` bytes arrive is a short read and
    /// fails with [`TeleopError::Format`]; the partial bytes are discarded,
    /// never zero-filled.
    pub fn read_exact(&mut self, n: usize) -> TeleopResult<Vec<u8>> {
        self.ensure_open()?;

        let mut buf = vec![0u8; n];
        let mut filled = 0;
        while let Some(rest) = buf.get_mut(filled..).filter(|rest| !rest.is_empty()) {
            match self.transport.read(rest) {
                Ok(0) => break,
                Ok(count) => filled += count.min(rest.len()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e)
                    if matches!(
                        e.kind(),
                        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
                    ) =>
                {
                    break;
                }
                Err(e) => return Err(self.poison(TeleopError::ConnectionLost(e.to_string()))),
            }
        }

        if filled < n {
            return Err(self.poison(TeleopError::Format {
                expected: n,
                actual: filled,
            }));
        }
        Ok(buf)
    }

    /// Close the transport and consume the handle.
    pub fn close(mut self) -> TeleopResult<()> {
        info!(connection = %self.id, port = self.transport.name(), "Connection closed");
        self.transport
            .close()
            .map_err(|e| TeleopError::ConnectionLost(e.to_string()))
    }

    /// Fail with `ConnectionLost` if the handle faulted or the transport closed.
    pub fn ensure_open(&self) -> TeleopResult<()> {
        if let Some(reason) = &self.fault {
            return Err(TeleopError::ConnectionLost(format!(
                "connection {} was invalidated: {reason}",
                self.id
            )));
        }
        if !self.transport.is_open() {
            return Err(TeleopError::ConnectionLost(format!(
                "{} is closed",
                self.transport.name()
            )));
        }
        Ok(())
    }

    fn poison(&mut self, err: TeleopError) -> TeleopError {
        warn!(connection = %self.id, port = self.transport.name(), error = %err, "Connection invalidated");
        self.fault = Some(err.to_string());
        err
    }
}

impl<T: Transport> fmt::Debug for ConnectionHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionHandle")
            .field("id", &self.id)
            .field("port", &self.transport.name())
            .field("fault", &self.fault)
            .finish()
    }
}
