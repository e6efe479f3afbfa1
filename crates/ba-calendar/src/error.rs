//! Error types for ba-calendar operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time: {0}")]
    InvalidTime(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CalendarError {
    /// Stable snake_case tag used in protocol error responses.
    pub fn kind(&self) -> &'static str {
        match self {
            CalendarError::InvalidArgument(_) => "invalid_argument",
            CalendarError::InvalidDate(_) => "invalid_date",
            CalendarError::InvalidTime(_) => "invalid_time",
            CalendarError::NotFound(_) => "not_found",
            CalendarError::Unsupported(_) => "unsupported",
            CalendarError::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;
