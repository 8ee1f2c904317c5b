//! Logical operator implementations
//!
//! Implements AND, OR and XOR over three-valued truthiness.
//!
//! AND and OR short-circuit by value: a determinate operand (FALSE for AND,
//! TRUE for OR) decides the result even when the other side is NULL. Both
//! operands are already materialized, so both are always converted first.
//!
//! XOR has no short-circuit: a NULL operand makes the result NULL. The
//! check is on the raw value kind, not on the converted truthiness.

use crate::error::Result;
use pivot_core::ScalarValue;

use super::truth::{truthiness, Truth};

/// Evaluate logical AND
///
/// FALSE if either side is false, else NULL if either side is NULL,
/// else TRUE.
pub fn eval_and(left: &ScalarValue, right: &ScalarValue) -> Result<ScalarValue> {
    let a = truthiness(left)?;
    let b = truthiness(right)?;
    let result = if a == Truth::False || b == Truth::False {
        Truth::False
    } else if a.is_null() || b.is_null() {
        Truth::Null
    } else {
        Truth::True
    };
    Ok(result.into_value())
}

/// Evaluate logical OR
///
/// TRUE if either side is true, else NULL if either side is NULL,
/// else FALSE.
pub fn eval_or(left: &ScalarValue, right: &ScalarValue) -> Result<ScalarValue> {
    let a = truthiness(left)?;
    let b = truthiness(right)?;
    let result = if a == Truth::True || b == Truth::True {
        Truth::True
    } else if a.is_null() || b.is_null() {
        Truth::Null
    } else {
        Truth::False
    };
    Ok(result.into_value())
}

/// Evaluate logical XOR
///
/// NULL if either operand is NULL, else TRUE iff the truthiness differs.
pub fn eval_xor(left: &ScalarValue, right: &ScalarValue) -> Result<ScalarValue> {
    if left.is_null() || right.is_null() {
        return Ok(ScalarValue::Null);
    }
    let a = truthiness(left)?;
    let b = truthiness(right)?;
    Ok(ScalarValue::Bool(a != b))
}
