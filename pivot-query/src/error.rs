//! Error types for operator evaluation

use pivot_core::Kind;
use thiserror::Error;

/// Operator evaluation errors
///
/// Everything except [`QueryError::ContractViolation`] is an ordinary,
/// recoverable failure reported by the dispatch layer. A contract violation
/// means the caller handed the kernel input it does not support; the
/// current evaluation must be aborted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Error from pivot-core
    #[error("Core error: {0}")]
    Core(#[from] pivot_core::Error),

    /// No operator registered under this name
    #[error("Unknown operator: {0}")]
    UnknownOperator(String),

    /// Wrong number of arguments
    #[error("{operator} expects between {min} and {max} arguments, got {found}")]
    ArityMismatch {
        operator: &'static str,
        min: usize,
        max: usize,
        found: usize,
    },

    /// Operand kind rejected by the operator's acceptance declaration
    #[error("{operator} does not accept argument {position} of kind {kind} together with {other}")]
    KindNotAccepted {
        operator: &'static str,
        position: usize,
        kind: Kind,
        other: Kind,
    },

    /// Internal consistency failure (unsupported kind or uncomparable pair)
    #[error("Contract violation: {0}")]
    ContractViolation(String),
}

impl QueryError {
    /// Create a contract violation, logging it at error level
    pub fn contract_violation(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        tracing::error!(error = %msg, "operator contract violation");
        QueryError::ContractViolation(msg)
    }

    /// True if this error must abort evaluation instead of being handled
    pub fn is_fatal(&self) -> bool {
        matches!(self, QueryError::ContractViolation(_))
    }
}

/// Result type for operator evaluation
pub type Result<T> = std::result::Result<T, QueryError>;
