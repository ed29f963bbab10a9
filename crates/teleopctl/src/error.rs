//! Error types for teleopctl

use oi_teleop_engine::TeleopError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Not connected: {0}")]
    NotConnected(String),

    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotConnected(_) => 2,
            CliError::InvalidInput(_)
            | CliError::InvalidConfiguration(_)
            | CliError::JsonError(_) => 4,
            CliError::ConnectionLost(_) => 5,
            CliError::IoError(_) => 1,
        }
    }

    /// Variant name reported as the JSON error `type`.
    pub fn kind(&self) -> &'static str {
        match self {
            CliError::NotConnected(_) => "NotConnected",
            CliError::ConnectionLost(_) => "ConnectionLost",
            CliError::InvalidInput(_) => "InvalidInput",
            CliError::InvalidConfiguration(_) => "InvalidConfiguration",
            CliError::IoError(_) => "IoError",
            CliError::JsonError(_) => "JsonError",
        }
    }
}

impl From<TeleopError> for CliError {
    fn from(e: TeleopError) -> Self {
        match e {
            TeleopError::OpenFailed { .. } => CliError::NotConnected(e.to_string()),
            TeleopError::ConnectionLost(reason) => CliError::ConnectionLost(reason),
            TeleopError::Format { .. } => CliError::ConnectionLost(e.to_string()),
            TeleopError::Range { .. }
            | TeleopError::InvalidInput(_)
            | TeleopError::Script { .. } => CliError::InvalidInput(e.to_string()),
        }
    }
}
