//! Serial-port transport and port enumeration.

use std::io::{self, Read, Write};
use std::time::Duration;

use oi_protocol::{DEFAULT_BAUD_RATE, DEFAULT_READ_TIMEOUT_MS};
use serde::Serialize;
use serialport::{SerialPort, SerialPortType};
use tracing::{debug, info};

use crate::error::{TeleopError, TeleopResult};
use crate::transport::Transport;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialSettings {
    pub baud_rate: u32,
    pub read_timeout: Duration,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout: Duration::from_millis(DEFAULT_READ_TIMEOUT_MS),
        }
    }
}

pub struct SerialTransport {
    name: String,
    port: Option<Box<dyn SerialPort>>,
}

impl SerialTransport {
    pub fn open(name: &str, settings: &SerialSettings) -> TeleopResult<Self> {
        info!(port = name, baud = settings.baud_rate, "Opening serial port");
        let port = serialport::new(name, settings.baud_rate)
            .timeout(settings.read_timeout)
            .open()
            .map_err(|e| TeleopError::OpenFailed {
                port: name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            name: name.to_string(),
            port: Some(port),
        })
    }

    fn port_mut(&mut self) -> io::Result<&mut Box<dyn SerialPort>> {
        self.port
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "serial port is closed"))
    }
}

impl Transport for SerialTransport {
    fn name(&self) -> &str {
        &self.name
    }

    fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let port = self.port_mut()?;
        port.write_all(bytes)?;
        port.flush()
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port_mut()?.read(buf)
    }

    fn is_open(&self) -> bool {
        self.port.is_some()
    }

    fn close(&mut self) -> io::Result<()> {
        if self.port.take().is_some() {
            debug!(port = %self.name, "Serial port released");
        }
        Ok(())
    }
}

/// A serial port visible to the operating system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortInfo {
    pub name: String,
    pub kind: String,
}

/// Enumerate serial ports without opening any of them.
pub fn list_ports() -> TeleopResult<Vec<PortInfo>> {
    let ports = serialport::available_ports()
        .map_err(|e| TeleopError::InvalidInput(format!("cannot enumerate serial ports: {e}")))?;
    Ok(ports
        .into_iter()
        .map(|p| PortInfo {
            kind: describe_port_type(&p.port_type),
            name: p.port_name,
        })
        .collect())
}

fn describe_port_type(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(usb) => {
            let product = usb.product.as_deref().unwrap_or("USB serial");
            format!("{product} ({:04x}:{:04x})", usb.vid, usb.pid)
        }
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::Unknown => "unknown".to_string(),
    }
}
