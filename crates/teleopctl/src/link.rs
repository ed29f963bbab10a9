//! Opening the robot link for a command.

use std::io;

use anyhow::Result;
use oi_teleop_engine::serial::SerialTransport;
use oi_teleop_engine::{DisplaySink, TeleopSession, Transport};
use tracing::info;

use crate::config::TeleopConfig;
use crate::error::CliError;

pub type Link = Box<dyn Transport>;

/// Stand-in link for `--dry-run`: accepts every write and never has
/// anything to read.
#[derive(Debug, Default)]
pub struct DryRunTransport {
    closed: bool,
}

impl Transport for DryRunTransport {
    fn name(&self) -> &str {
        "dry-run"
    }

    fn write_all(&mut self, _bytes: &[u8]) -> io::Result<()> {
        if self.closed {
            return Err(io::Error::new(io::ErrorKind::NotConnected, "dry-run link closed"));
        }
        Ok(())
    }

    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::TimedOut,
            "dry-run link has no robot attached",
        ))
    }

    fn is_open(&self) -> bool {
        !self.closed
    }

    fn close(&mut self) -> io::Result<()> {
        self.closed = true;
        Ok(())
    }
}

pub fn open_link(config: &TeleopConfig, dry_run: bool) -> Result<Link> {
    if dry_run {
        info!("Dry run: frames are echoed but not transmitted");
        return Ok(Box::new(DryRunTransport::default()));
    }

    let port = config.serial.port.as_deref().ok_or_else(|| {
        CliError::NotConnected(
            "no serial port configured; pass --port or set serial.port in the config file"
                .to_string(),
        )
    })?;
    let transport = SerialTransport::open(port, &config.serial.settings()).map_err(CliError::from)?;
    Ok(Box::new(transport))
}

/// A session already connected over the configured link.
pub fn connect<S: DisplaySink>(
    config: &TeleopConfig,
    dry_run: bool,
    sink: S,
) -> Result<TeleopSession<Link, S>> {
    let mut session = TeleopSession::new(config.drive, sink);
    session.connect(open_link(config, dry_run)?);
    Ok(session)
}
