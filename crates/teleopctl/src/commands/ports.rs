//! Serial port listing

use anyhow::Result;
use oi_teleop_engine::serial::list_ports;
use tracing::debug;

use crate::error::CliError;
use crate::output;

/// List ports the OS knows about. Nothing is opened or probed.
pub fn execute(json: bool) -> Result<()> {
    let ports = list_ports().map_err(CliError::from)?;
    debug!(count = ports.len(), "Enumerated serial ports");
    output::print_ports(&ports, json);
    Ok(())
}
