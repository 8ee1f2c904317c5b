//! Value comparison and relational operators
//!
//! [`compare`] orders two scalars in two steps:
//!
//! 1. **Direct comparison** by kind:
//!    - numeric vs numeric by value (integers, floats, decimals, booleans)
//!    - string vs string byte-wise
//!    - numeric vs string by parsing the string as a number
//!    - datetime vs datetime chronologically, vs string by parsing the
//!      string as a datetime, vs number through its `YYYYMMDDhhmmss` form
//!    - bytes vs bytes or string byte-wise
//!    - NULL sorts first
//! 2. **Zero fallback**, only when the direct step is undefined for the
//!    pair: a machine number paired with a string that is not a number
//!    compares as the number against zero. With the string on the left the
//!    result is reversed. Any other undefined pair is a contract violation.
//!
//! The relational operators (EQ, NE, LT, LE, GT, GE) return NULL when
//! either operand is NULL and never consult the comparator in that case.

use crate::error::{QueryError, Result};
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use once_cell::sync::Lazy;
use pivot_core::{DateTime, ScalarValue};
use regex::Regex;
use std::cmp::Ordering;
use std::str::FromStr;

/// Evaluate equality
pub fn eval_eq(left: &ScalarValue, right: &ScalarValue) -> Result<ScalarValue> {
    eval_relational(left, right, |ord| ord == Ordering::Equal)
}

/// Evaluate inequality
pub fn eval_ne(left: &ScalarValue, right: &ScalarValue) -> Result<ScalarValue> {
    eval_relational(left, right, |ord| ord != Ordering::Equal)
}

/// Evaluate less-than
pub fn eval_lt(left: &ScalarValue, right: &ScalarValue) -> Result<ScalarValue> {
    eval_relational(left, right, |ord| ord == Ordering::Less)
}

/// Evaluate less-than-or-equal
pub fn eval_le(left: &ScalarValue, right: &ScalarValue) -> Result<ScalarValue> {
    eval_relational(left, right, |ord| ord != Ordering::Greater)
}

/// Evaluate greater-than
pub fn eval_gt(left: &ScalarValue, right: &ScalarValue) -> Result<ScalarValue> {
    eval_relational(left, right, |ord| ord == Ordering::Greater)
}

/// Evaluate greater-than-or-equal
pub fn eval_ge(left: &ScalarValue, right: &ScalarValue) -> Result<ScalarValue> {
    eval_relational(left, right, |ord| ord != Ordering::Less)
}

/// NULL-propagating comparison mapped through `predicate`
fn eval_relational(
    left: &ScalarValue,
    right: &ScalarValue,
    predicate: fn(Ordering) -> bool,
) -> Result<ScalarValue> {
    if left.is_null() || right.is_null() {
        return Ok(ScalarValue::Null);
    }
    let ord = compare(left, right)?;
    Ok(ScalarValue::Bool(predicate(ord)))
}

/// Order two scalars.
///
/// # Errors
///
/// Returns [`QueryError::ContractViolation`] when neither the direct
/// comparison nor the zero fallback is defined for the pair (for example a
/// decimal against a non-numeric string, or a datetime against a string
/// that is not a datetime). Such a pair is never reported as equal.
pub fn compare(left: &ScalarValue, right: &ScalarValue) -> Result<Ordering> {
    match direct_cmp(left, right) {
        Some(ord) => Ok(ord),
        None => fallback_cmp(left, right),
    }
}

/// Type-aware comparison; `None` when undefined for the pair
fn direct_cmp(left: &ScalarValue, right: &ScalarValue) -> Option<Ordering> {
    use ScalarValue as V;

    match (left, right) {
        (V::Null, V::Null) => Some(Ordering::Equal),
        (V::Null, _) => Some(Ordering::Less),
        (_, V::Null) => Some(Ordering::Greater),

        (V::String(a), V::String(b)) => Some(a.cmp(b)),

        // Temporal
        (V::Datetime(_), V::Datetime(_)) => left.temporal_cmp(right),
        (V::Datetime(a), V::String(s)) => DateTime::parse(s).ok().map(|b| (**a).cmp(&b)),
        (V::String(s), V::Datetime(b)) => DateTime::parse(s).ok().map(|a| a.cmp(&**b)),
        (V::Datetime(a), _) if right.is_numeric() => right
            .numeric_cmp_decimal(&a.to_number())
            .map(Ordering::reverse),
        (_, V::Datetime(b)) if left.is_numeric() => left.numeric_cmp_decimal(&b.to_number()),

        // Binary
        (V::Bytes(a), V::Bytes(b)) => Some(a.as_slice().cmp(b.as_slice())),
        (V::Bytes(a), V::String(s)) => Some(a.as_slice().cmp(s.as_bytes())),
        (V::String(s), V::Bytes(b)) => Some(s.as_bytes().cmp(b.as_slice())),

        // Number vs numeric string
        (V::String(s), _) if right.is_numeric() => parse_number(s)
            .and_then(|d| right.numeric_cmp_decimal(&d))
            .map(Ordering::reverse),
        (_, V::String(s)) if left.is_numeric() => {
            parse_number(s).and_then(|d| left.numeric_cmp_decimal(&d))
        }

        _ => left.numeric_cmp(right),
    }
}

/// SQL numeric literal: optional sign, digits with an optional fraction,
/// optional exponent. No underscores, inner spaces or doubled signs.
static NUMERIC_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([+-]?)([0-9]*)(?:\.([0-9]*))?(?:[eE]([+-]?[0-9]+))?$").expect("valid regex")
});

/// Strict numeric reading of a string (surrounding whitespace allowed).
///
/// Unlike truthiness, this is a full parse: `"12abc"` and `"1_000"` are not
/// numbers.
fn parse_number(s: &str) -> Option<BigDecimal> {
    let trimmed = s.trim_matches(|c: char| c.is_ascii_whitespace());
    let caps = NUMERIC_TEXT.captures(trimmed)?;
    let int = caps.get(2).map_or("", |m| m.as_str());
    let frac = caps.get(3).map_or("", |m| m.as_str());
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    let exp: i64 = match caps.get(4) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    let mut digits = BigInt::from_str(&format!("{int}{frac}")).ok()?;
    if &caps[1] == "-" {
        digits = -digits;
    }
    let scale = i64::try_from(frac.len()).ok()?.checked_sub(exp)?;
    Some(BigDecimal::new(digits, scale))
}

/// Legacy string/number fallback: the number is compared against zero
fn fallback_cmp(left: &ScalarValue, right: &ScalarValue) -> Result<Ordering> {
    let (left_kind, right_kind) = (left.kind(), right.kind());

    let ord = match (left, right) {
        (_, ScalarValue::String(_)) if left_kind.is_machine_numeric() => left.cmp_zero(),
        (ScalarValue::String(_), _) if right_kind.is_machine_numeric() => {
            right.cmp_zero().map(Ordering::reverse)
        }
        _ => None,
    };

    match ord {
        Some(ord) => {
            tracing::trace!(
                left = %left_kind,
                right = %right_kind,
                ?ord,
                "comparison fell back to zero test"
            );
            Ok(ord)
        }
        None => Err(QueryError::contract_violation(format!(
            "cannot compare {} {} with {} {}",
            left_kind, left, right_kind, right
        ))),
    }
}
