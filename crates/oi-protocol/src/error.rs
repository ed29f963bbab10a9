//! Open Interface error types.

use thiserror::Error;

use crate::codec::IntFormat;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OiError {
    #[error("Value {value} does not fit in {format}")]
    Range { value: i32, format: IntFormat },

    #[error("Invalid byte count: expected {expected}, got {actual}")]
    Format { expected: usize, actual: usize },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Unknown integer format: {0}")]
    UnknownFormat(String),
}

pub type OiResult<T> = Result<T, OiError>;
