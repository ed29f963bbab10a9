//! Persistent teleopctl configuration.
//!
//! A JSON file holding the serial link settings and drive magnitudes.
//! A missing file means defaults; nothing is written until `config init`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context as _, Result};
use oi_protocol::{DEFAULT_BAUD_RATE, DEFAULT_READ_TIMEOUT_MS};
use oi_teleop_engine::DriveConfig;
use oi_teleop_engine::serial::SerialSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const SCHEMA_VERSION: &str = "oi.teleop/1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleopConfig {
    pub schema_version: String,
    pub serial: SerialConfig,
    pub drive: DriveConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SerialConfig {
    /// Port to open, e.g. `/dev/ttyUSB0` or `COM3`. Asked for on the command
    /// line when unset.
    pub port: Option<String>,
    pub baud_rate: u32,
    pub read_timeout_ms: u64,
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            serial: SerialConfig::default(),
            drive: DriveConfig::default(),
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            port: None,
            baud_rate: DEFAULT_BAUD_RATE,
            read_timeout_ms: DEFAULT_READ_TIMEOUT_MS,
        }
    }
}

impl SerialConfig {
    pub fn settings(&self) -> SerialSettings {
        SerialSettings {
            baud_rate: self.baud_rate,
            read_timeout: Duration::from_millis(self.read_timeout_ms),
        }
    }
}

impl TeleopConfig {
    /// Load configuration from a specific path, falling back to defaults when
    /// the file does not exist.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;

        let config: TeleopConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {path:?}"))?;

        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {path:?}"))?;

        debug!("Saved config to {:?}", path);
        Ok(())
    }

    /// `<config dir>/oi-teleop/config.json`, if the platform has a config dir.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("oi-teleop").join("config.json"))
    }

    /// Command-line flags win over the file.
    pub fn apply_overrides(&mut self, port: Option<&str>, baud: Option<u32>) {
        if let Some(port) = port {
            self.serial.port = Some(port.to_string());
        }
        if let Some(baud) = baud {
            self.serial.baud_rate = baud;
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.schema_version.starts_with("oi.teleop/") {
            anyhow::bail!("Invalid schema version: {}", self.schema_version);
        }

        if self.serial.baud_rate == 0 {
            anyhow::bail!("Invalid baud rate: {}", self.serial.baud_rate);
        }

        if self.serial.read_timeout_ms == 0 {
            anyhow::bail!("Invalid read timeout: {} ms", self.serial.read_timeout_ms);
        }

        if self.serial.port.as_deref().is_some_and(|p| p.trim().is_empty()) {
            anyhow::bail!("Serial port name is empty");
        }

        self.drive
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid drive magnitude: {e}"))?;

        Ok(())
    }
}
