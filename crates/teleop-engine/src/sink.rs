//! Display sinks for echoing transmitted frames to the operator.

use std::io::Write;

use tracing::{info, warn};

pub trait DisplaySink {
    fn echo(&mut self, line: &str);
}

impl DisplaySink for Vec<String> {
    fn echo(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

impl<S: DisplaySink + ?Sized> DisplaySink for Box<S> {
    fn echo(&mut self, line: &str) {
        (**self).echo(line);
    }
}

/// Echo into the log at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DisplaySink for TracingSink {
    fn echo(&mut self, line: &str) {
        info!(target: "oi_teleop_engine::echo", "{line}");
    }
}

/// Echo one line per frame into any writer (stdout, a log file, ...).
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySink for WriterSink<W> {
    fn echo(&mut self, line: &str) {
        if let Err(e) = writeln!(self.writer, "{line}").and_then(|()| self.writer.flush()) {
            warn!(error = %e, "Failed to echo frame");
        }
    }
}
