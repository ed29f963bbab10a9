//! In-memory transport and sink for exercising sessions without a robot.
//!
//! [`MockTransport`] is moved into a connection like a real port; the paired
//! [`MockProbe`] stays with the test to queue replies, inject faults and
//! inspect what was written.

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;

use oi_teleop_engine::{DisplaySink, Transport};
use parking_lot::Mutex;

#[derive(Debug, Default)]
struct MockState {
    writes: Vec<Vec<u8>>,
    replies: VecDeque<u8>,
    closed: bool,
    fail_writes: bool,
    fail_reads: bool,
    read_chunk: Option<usize>,
}

#[derive(Debug)]
pub struct MockTransport {
    name: String,
    state: Arc<Mutex<MockState>>,
}

/// Test-side view of a [`MockTransport`].
#[derive(Debug, Clone)]
pub struct MockProbe {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> (Self, MockProbe) {
        Self::named("mock0")
    }

    pub fn named(name: &str) -> (Self, MockProbe) {
        let state = Arc::new(Mutex::new(MockState::default()));
        (
            Self {
                name: name.to_string(),
                state: Arc::clone(&state),
            },
            MockProbe { state },
        )
    }
}

impl Transport for MockTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut state = self.state.lock();
        if state.closed {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "mock closed"));
        }
        if state.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock write failure"));
        }
        state.writes.push(bytes.to_vec());
        Ok(())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.lock();
        if state.fail_reads {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "mock read failure"));
        }
        if state.replies.is_empty() {
            return Err(io::Error::new(io::ErrorKind::TimedOut, "mock read timeout"));
        }
        let limit = state.read_chunk.unwrap_or(buf.len()).min(buf.len());
        let mut count = 0;
        for slot in buf.iter_mut().take(limit) {
            match state.replies.pop_front() {
                Some(byte) => {
                    *slot = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }

    fn is_open(&self) -> bool {
        !self.state.lock().closed
    }

    fn close(&mut self) -> io::Result<()> {
        self.state.lock().closed = true;
        Ok(())
    }
}

impl MockProbe {
    /// Every frame written so far, in order.
    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.state.lock().writes.clone()
    }

    pub fn write_count(&self) -> usize {
        self.state.lock().writes.len()
    }

    pub fn last_write(&self) -> Option<Vec<u8>> {
        self.state.lock().writes.last().cloned()
    }

    /// Queue bytes for the next reads.
    pub fn push_reply(&self, bytes: &[u8]) {
        self.state.lock().replies.extend(bytes.iter().copied());
    }

    pub fn pending_reply_bytes(&self) -> usize {
        self.state.lock().replies.len()
    }

    /// Deliver at most `n` bytes per read call.
    pub fn set_read_chunk(&self, n: usize) {
        self.state.lock().read_chunk = Some(n.max(1));
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().fail_reads = fail;
    }

    /// Simulate the cable being pulled: the transport reports itself closed.
    pub fn unplug(&self) {
        self.state.lock().closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }
}

/// Sink that records each echoed line, shareable across threads.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl DisplaySink for RecordingSink {
    fn echo(&mut self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}
