//! Truthiness conversion
//!
//! Maps one scalar to a three-valued [`Truth`]. The rules follow the host
//! engine, not a generic "non-zero" test:
//! - integers are true when non-zero
//! - floats are true when `|v| >= 1` (so `0.5` is false)
//! - strings are true when they start with a nonzero integer lexeme
//! - decimals are true when non-zero
//!
//! Datetimes and byte strings have no truthiness; asking for one is a
//! contract violation.

use crate::error::{QueryError, Result};
use num_traits::Zero;
use once_cell::sync::Lazy;
use pivot_core::ScalarValue;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Leading nonzero integer lexeme: an optional minus, then either a
/// nonzero first digit or a run of zeros followed by a nonzero digit.
///
/// Only the start is anchored. `"12abc"` and `"1e5"` match, `"0.5"` and
/// `" 1"` do not.
static NONZERO_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[1-9]+|^-?0+[1-9]").expect("valid regex"));

/// Three-valued truthiness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Truth {
    Null,
    False,
    True,
}

impl Truth {
    /// Integer code: -1 NULL, 0 false, 1 true
    pub fn code(self) -> i8 {
        match self {
            Truth::Null => -1,
            Truth::False => 0,
            Truth::True => 1,
        }
    }

    /// Inverse of [`Truth::code`]
    pub fn from_code(code: i8) -> Option<Truth> {
        match code {
            -1 => Some(Truth::Null),
            0 => Some(Truth::False),
            1 => Some(Truth::True),
            _ => None,
        }
    }

    pub fn is_null(self) -> bool {
        self == Truth::Null
    }

    /// Boolean view; `None` for NULL
    pub fn to_bool(self) -> Option<bool> {
        match self {
            Truth::Null => None,
            Truth::False => Some(false),
            Truth::True => Some(true),
        }
    }

    /// Result value for this truth: `Bool` or `Null`
    pub fn into_value(self) -> ScalarValue {
        ScalarValue::from(self.to_bool())
    }
}

impl From<bool> for Truth {
    fn from(b: bool) -> Self {
        if b {
            Truth::True
        } else {
            Truth::False
        }
    }
}

/// True if the string starts with a nonzero integer lexeme
pub fn has_nonzero_prefix(s: &str) -> bool {
    NONZERO_PREFIX.is_match(s)
}

/// Convert a scalar to its three-valued truthiness.
///
/// # Errors
///
/// Returns [`QueryError::ContractViolation`] for kinds the converter does
/// not support (`Datetime`, `Bytes`).
pub fn truthiness(value: &ScalarValue) -> Result<Truth> {
    let truth = match value {
        ScalarValue::Null => Truth::Null,
        ScalarValue::Bool(b) => Truth::from(*b),
        ScalarValue::Int64(n) => Truth::from(*n != 0),
        ScalarValue::Uint64(n) => Truth::from(*n != 0),
        ScalarValue::Float32(f) => Truth::from(f.abs() >= 1.0),
        ScalarValue::Float64(f) => Truth::from(f.abs() >= 1.0),
        ScalarValue::String(s) => Truth::from(has_nonzero_prefix(s)),
        ScalarValue::Decimal(d) => Truth::from(!d.is_zero()),
        ScalarValue::Datetime(_) | ScalarValue::Bytes(_) => {
            return Err(QueryError::contract_violation(format!(
                "truthiness is undefined for kind {}",
                value.type_name()
            )));
        }
    };
    Ok(truth)
}
