//! Error types for pivot-core

use thiserror::Error;

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Text could not be read as a decimal literal
    #[error("Invalid decimal: {0}")]
    InvalidDecimal(String),

    /// Text could not be read as a datetime literal
    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),
}

impl Error {
    /// Create an invalid decimal error
    pub fn invalid_decimal(msg: impl Into<String>) -> Self {
        Error::InvalidDecimal(msg.into())
    }

    /// Create an invalid datetime error
    pub fn invalid_datetime(msg: impl Into<String>) -> Self {
        Error::InvalidDatetime(msg.into())
    }
}
