//! Common error types.

use thiserror::Error;

/// Main error type for the calendar crates.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid life stages: {0}")]
    InvalidStages(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Font error: {0}")]
    Font(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CalendarResult<T> = Result<T, CalendarError>;

impl CalendarError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn stages(msg: impl Into<String>) -> Self {
        Self::InvalidStages(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidOperation(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
