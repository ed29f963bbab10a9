//! Error types for the teleoperation engine.

use oi_protocol::{IntFormat, OiError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TeleopError {
    /// A value does not fit the wire width it was meant for.
    #[error("Value {value} does not fit in {format}")]
    Range { value: i32, format: IntFormat },

    /// Wrong byte count, including short reads and read timeouts.
    #[error("Invalid byte count: expected {expected}, got {actual}")]
    Format { expected: usize, actual: usize },

    /// The transport faulted, was closed, or there is no connection at all.
    #[error("Connection lost: {0}")]
    ConnectionLost(String),

    #[error("Failed to open {port}: {reason}")]
    OpenFailed { port: String, reason: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Script line {line}: {reason}")]
    Script { line: usize, reason: String },
}

pub type TeleopResult<T> = Result<T, TeleopError>;

impl TeleopError {
    pub fn not_connected() -> Self {
        TeleopError::ConnectionLost("not connected to a robot".to_string())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TeleopError::Range { .. } => "Range",
            TeleopError::Format { .. } => "Format",
            TeleopError::ConnectionLost(_) => "ConnectionLost",
            TeleopError::OpenFailed { .. } => "OpenFailed",
            TeleopError::InvalidInput(_) => "InvalidInput",
            TeleopError::Script { .. } => "Script",
        }
    }

    /// True for failures after which the connection handle is unusable.
    pub fn is_connection_fault(&self) -> bool {
        matches!(
            self,
            TeleopError::ConnectionLost(_) | TeleopError::Format { .. }
        )
    }
}

impl From<OiError> for TeleopError {
    fn from(e: OiError) -> Self {
        match e {
            OiError::Range { value, format } => TeleopError::Range { value, format },
            OiError::Format { expected, actual } => TeleopError::Format { expected, actual },
            OiError::UnknownCommand(name) => {
                TeleopError::InvalidInput(format!("unknown command '{name}'"))
            }
            OiError::UnknownFormat(name) => {
                TeleopError::InvalidInput(format!("unknown integer format '{name}'"))
            }
        }
    }
}
