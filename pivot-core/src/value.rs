//! ScalarValue - dynamically typed scalar
//!
//! Operators in the pivot engine receive two already-typed scalars and
//! produce one. The value kinds mirror the host SQL type system:
//! - `Null`
//! - `Bool` (the result kind of every operator; behaves as integer 0/1)
//! - signed / unsigned 64-bit integers, 32/64-bit floats
//! - `Decimal` (arbitrary precision, boxed to keep the enum small)
//! - `String`, `Datetime`
//! - `Bytes` (opaque binary, passed through but not interpreted)
//!
//! ## Numeric comparison
//!
//! [`ScalarValue::numeric_cmp`] compares every numeric kind by value.
//! Integers and decimals compare exactly with each other. As soon as one
//! side is a float, both sides are promoted to `f64`, so `Float64(0.1)`
//! equals `Decimal(0.1)`. A `Float32` is widened through its shortest
//! decimal form. NaN sorts above every other number and equals itself, so
//! the relation stays total.

use crate::error::{Error, Result};
use crate::kind::Kind;
use crate::temporal::DateTime;
use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Dynamically typed scalar value
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ScalarValue {
    /// SQL NULL
    Null,
    /// Boolean (stored by the host as integer 1/0)
    Bool(bool),
    /// 64-bit signed integer
    Int64(i64),
    /// 64-bit unsigned integer
    Uint64(u64),
    /// 32-bit float
    Float32(f32),
    /// 64-bit float
    Float64(f64),
    /// Character string
    String(String),
    /// Arbitrary precision decimal
    Decimal(Box<BigDecimal>),
    /// Timezone-less datetime
    Datetime(Box<DateTime>),
    /// Opaque binary payload
    Bytes(Vec<u8>),
}

/// Numeric view used for value comparison
enum Number {
    Exact(Exact),
    Float(f64),
}

/// Integers and decimals, compared without rounding
enum Exact {
    Int(i128),
    Decimal(BigDecimal),
}

impl Exact {
    fn to_decimal(&self) -> BigDecimal {
        match self {
            Exact::Int(i) => BigDecimal::new(BigInt::from(*i), 0),
            Exact::Decimal(d) => d.clone(),
        }
    }

    fn to_f64(&self) -> f64 {
        match self {
            Exact::Int(i) => *i as f64,
            // parsing the decimal text rounds correctly to the nearest f64
            Exact::Decimal(d) => d
                .to_string()
                .parse::<f64>()
                .ok()
                .or_else(|| d.to_f64())
                .unwrap_or(if d.is_negative() {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }),
        }
    }

    fn cmp(&self, other: &Exact) -> Ordering {
        match (self, other) {
            (Exact::Int(a), Exact::Int(b)) => a.cmp(b),
            _ => self.to_decimal().cmp(&other.to_decimal()),
        }
    }
}

impl Number {
    fn to_f64(&self) -> f64 {
        match self {
            Number::Exact(e) => e.to_f64(),
            Number::Float(f) => *f,
        }
    }

    /// Exact when both sides are exact; otherwise both sides are promoted
    /// to `f64`.
    fn cmp(&self, other: &Number) -> Ordering {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => a.cmp(b),
            _ => float_cmp(self.to_f64(), other.to_f64()),
        }
    }
}

/// Float ordering with NaN above everything (and equal to itself)
fn float_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) if a < b => Ordering::Less,
        (false, false) if a > b => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Widen an `f32` through its shortest decimal form, so `1.1f32` becomes
/// `1.1f64` rather than `1.100000023841858`.
fn widen_f32(f: f32) -> f64 {
    if !f.is_finite() {
        return f64::from(f);
    }
    f.to_string().parse().unwrap_or(f64::from(f))
}

impl ScalarValue {
    /// Kind tag of this value
    pub fn kind(&self) -> Kind {
        match self {
            ScalarValue::Null => Kind::Null,
            ScalarValue::Bool(_) => Kind::Bool,
            ScalarValue::Int64(_) => Kind::Int64,
            ScalarValue::Uint64(_) => Kind::Uint64,
            ScalarValue::Float32(_) => Kind::Float32,
            ScalarValue::Float64(_) => Kind::Float64,
            ScalarValue::String(_) => Kind::String,
            ScalarValue::Decimal(_) => Kind::Decimal,
            ScalarValue::Datetime(_) => Kind::Datetime,
            ScalarValue::Bytes(_) => Kind::Bytes,
        }
    }

    /// Human-readable kind name for error messages
    pub fn type_name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    /// True for every kind that compares by numeric value
    /// (integers, floats, decimals, booleans)
    pub fn is_numeric(&self) -> bool {
        self.kind().is_machine_numeric() || matches!(self, ScalarValue::Decimal(_))
    }

    /// Parse a decimal literal into a `Decimal` value
    pub fn decimal(s: &str) -> Result<ScalarValue> {
        BigDecimal::from_str(s.trim())
            .map(|d| ScalarValue::Decimal(Box::new(d)))
            .map_err(|_| Error::invalid_decimal(s))
    }

    /// Parse a datetime literal into a `Datetime` value
    pub fn datetime(s: &str) -> Result<ScalarValue> {
        DateTime::parse(s).map(|dt| ScalarValue::Datetime(Box::new(dt)))
    }

    /// Boolean payload, if this is a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ScalarValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    fn as_number(&self) -> Option<Number> {
        match self {
            ScalarValue::Bool(b) => Some(Number::Exact(Exact::Int(i128::from(*b)))),
            ScalarValue::Int64(i) => Some(Number::Exact(Exact::Int(i128::from(*i)))),
            ScalarValue::Uint64(u) => Some(Number::Exact(Exact::Int(i128::from(*u)))),
            ScalarValue::Float32(f) => Some(Number::Float(widen_f32(*f))),
            ScalarValue::Float64(f) => Some(Number::Float(*f)),
            ScalarValue::Decimal(d) => Some(Number::Exact(Exact::Decimal((**d).clone()))),
            _ => None,
        }
    }

    /// Compare two numeric values by value.
    ///
    /// Returns `None` if either value is not numeric.
    pub fn numeric_cmp(&self, other: &Self) -> Option<Ordering> {
        let a = self.as_number()?;
        let b = other.as_number()?;
        Some(a.cmp(&b))
    }

    /// Compare a numeric value against an exact decimal.
    ///
    /// Returns `None` if this value is not numeric.
    pub fn numeric_cmp_decimal(&self, other: &BigDecimal) -> Option<Ordering> {
        let a = self.as_number()?;
        Some(a.cmp(&Number::Exact(Exact::Decimal(other.clone()))))
    }

    /// Compare a numeric value against zero.
    ///
    /// Returns `None` if this value is not numeric.
    pub fn cmp_zero(&self) -> Option<Ordering> {
        self.numeric_cmp(&ScalarValue::Int64(0))
    }

    /// Compare two datetimes chronologically.
    ///
    /// Returns `None` unless both values are `Datetime`.
    pub fn temporal_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (ScalarValue::Datetime(a), ScalarValue::Datetime(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

// =============================================================================
// From implementations for primitive types
// =============================================================================

impl From<bool> for ScalarValue {
    fn from(b: bool) -> Self {
        ScalarValue::Bool(b)
    }
}

impl From<i64> for ScalarValue {
    fn from(n: i64) -> Self {
        ScalarValue::Int64(n)
    }
}

impl From<u64> for ScalarValue {
    fn from(n: u64) -> Self {
        ScalarValue::Uint64(n)
    }
}

impl From<f32> for ScalarValue {
    fn from(f: f32) -> Self {
        ScalarValue::Float32(f)
    }
}

impl From<f64> for ScalarValue {
    fn from(f: f64) -> Self {
        ScalarValue::Float64(f)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        ScalarValue::String(s.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        ScalarValue::String(s)
    }
}

impl From<BigDecimal> for ScalarValue {
    fn from(d: BigDecimal) -> Self {
        ScalarValue::Decimal(Box::new(d))
    }
}

impl From<DateTime> for ScalarValue {
    fn from(dt: DateTime) -> Self {
        ScalarValue::Datetime(Box::new(dt))
    }
}

impl From<Vec<u8>> for ScalarValue {
    fn from(b: Vec<u8>) -> Self {
        ScalarValue::Bytes(b)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ScalarValue::Null, Into::into)
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarValue::Null => f.write_str("NULL"),
            ScalarValue::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            ScalarValue::Int64(n) => write!(f, "{}", n),
            ScalarValue::Uint64(n) => write!(f, "{}", n),
            ScalarValue::Float32(v) => write!(f, "{}", v),
            ScalarValue::Float64(v) => write!(f, "{}", v),
            ScalarValue::String(s) => write!(f, "'{}'", s.replace('\'', "''")),
            ScalarValue::Decimal(d) => write!(f, "{}", d),
            ScalarValue::Datetime(dt) => write!(f, "'{}'", dt),
            ScalarValue::Bytes(bytes) => {
                f.write_str("X'")?;
                for b in bytes {
                    write!(f, "{:02X}", b)?;
                }
                f.write_str("'")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> ScalarValue {
        ScalarValue::decimal(s).unwrap()
    }

    #[test]
    fn test_kind_tags() {
        assert_eq!(ScalarValue::Null.kind(), Kind::Null);
        assert_eq!(ScalarValue::from(1u64).kind(), Kind::Uint64);
        assert_eq!(ScalarValue::from(1.5f32).kind(), Kind::Float32);
        assert_eq!(dec("1.5").kind(), Kind::Decimal);
        assert_eq!(ScalarValue::from(vec![1u8]).kind(), Kind::Bytes);
        assert_eq!(ScalarValue::from(None::<i64>), ScalarValue::Null);
        assert_eq!(ScalarValue::from(Some(true)), ScalarValue::Bool(true));
    }

    #[test]
    fn test_numeric_cmp_cross_kind() {
        let three = ScalarValue::Int64(3);
        assert_eq!(
            three.numeric_cmp(&ScalarValue::Float64(3.5)),
            Some(Ordering::Less)
        );
        assert_eq!(
            ScalarValue::Uint64(3).numeric_cmp(&ScalarValue::Float32(3.0)),
            Some(Ordering::Equal)
        );
        assert_eq!(three.numeric_cmp(&dec("2.999")), Some(Ordering::Greater));
        assert_eq!(
            ScalarValue::Bool(true).numeric_cmp(&ScalarValue::Int64(1)),
            Some(Ordering::Equal)
        );
    }

    #[test]
    fn test_numeric_cmp_exact_without_floats() {
        let big = ScalarValue::Int64((1 << 53) + 1);
        assert_eq!(
            big.numeric_cmp(&dec("9007199254740992")),
            Some(Ordering::Greater)
        );
        assert_eq!(
            dec("0.30000000000000001").numeric_cmp(&dec("0.3")),
            Some(Ordering::Greater)
        );

        let max = ScalarValue::Uint64(u64::MAX);
        assert_eq!(
            max.numeric_cmp(&ScalarValue::Int64(-1)),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_numeric_cmp_promotes_to_float() {
        let tenth = ScalarValue::Float64(0.1);
        assert_eq!(tenth.numeric_cmp(&dec("0.1")), Some(Ordering::Equal));
        assert_eq!(dec("0.1").numeric_cmp(&tenth), Some(Ordering::Equal));
        assert_eq!(
            ScalarValue::Float64(1.1).numeric_cmp(&dec("1.1")),
            Some(Ordering::Equal)
        );
        assert_eq!(
            ScalarValue::Float64(0.1).numeric_cmp_decimal(&BigDecimal::from_str("0.1").unwrap()),
            Some(Ordering::Equal)
        );
        assert_eq!(
            ScalarValue::Float64(0.3).numeric_cmp(&dec("0.1")),
            Some(Ordering::Greater)
        );
    }

    #[test]
    fn test_float32_widens_through_shortest_form() {
        let single = ScalarValue::Float32(1.1);
        assert_eq!(single.numeric_cmp(&dec("1.1")), Some(Ordering::Equal));
        assert_eq!(
            single.numeric_cmp(&ScalarValue::Float64(1.1)),
            Some(Ordering::Equal)
        );
        assert_eq!(
            ScalarValue::Float32(0.1).numeric_cmp(&ScalarValue::Float32(0.2)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_numeric_cmp_nan_and_infinity() {
        let nan = ScalarValue::Float64(f64::NAN);
        assert_eq!(
            nan.numeric_cmp(&ScalarValue::Float64(f64::INFINITY)),
            Some(Ordering::Greater)
        );
        assert_eq!(nan.numeric_cmp(&nan), Some(Ordering::Equal));
        assert_eq!(
            ScalarValue::Float64(f64::NEG_INFINITY).numeric_cmp(&ScalarValue::Int64(i64::MIN)),
            Some(Ordering::Less)
        );
        assert_eq!(
            ScalarValue::Int64(0).numeric_cmp(&nan),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_numeric_cmp_non_numeric() {
        assert_eq!(
            ScalarValue::Int64(1).numeric_cmp(&ScalarValue::from("1")),
            None
        );
        assert_eq!(ScalarValue::Null.numeric_cmp(&ScalarValue::Null), None);
    }

    #[test]
    fn test_cmp_zero() {
        assert_eq!(ScalarValue::Int64(5).cmp_zero(), Some(Ordering::Greater));
        assert_eq!(ScalarValue::Float32(-0.25).cmp_zero(), Some(Ordering::Less));
        assert_eq!(ScalarValue::Uint64(0).cmp_zero(), Some(Ordering::Equal));
        assert_eq!(ScalarValue::from("5").cmp_zero(), None);
    }

    #[test]
    fn test_temporal_cmp() {
        let a = ScalarValue::datetime("2024-01-01 00:00:00").unwrap();
        let b = ScalarValue::datetime("2024-06-01").unwrap();
        assert_eq!(a.temporal_cmp(&b), Some(Ordering::Less));
        assert_eq!(a.temporal_cmp(&ScalarValue::from("2024-01-01")), None);
    }

    #[test]
    fn test_decimal_parse_error() {
        assert_eq!(
            ScalarValue::decimal("twelve"),
            Err(Error::InvalidDecimal("twelve".to_string()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ScalarValue::Null.to_string(), "NULL");
        assert_eq!(ScalarValue::Bool(false).to_string(), "FALSE");
        assert_eq!(ScalarValue::from("it's").to_string(), "'it''s'");
        assert_eq!(ScalarValue::from(vec![0xde, 0xad]).to_string(), "X'DEAD'");
        assert_eq!(
            ScalarValue::datetime("2024-01-15 10:30:00").unwrap().to_string(),
            "'2024-01-15 10:30:00'"
        );
    }

    #[test]
    fn test_serde_externally_tagged() {
        let v: ScalarValue = serde_json::from_str(r#"{"Int64": -7}"#).unwrap();
        assert_eq!(v, ScalarValue::Int64(-7));
        let v: ScalarValue = serde_json::from_str(r#""Null""#).unwrap();
        assert_eq!(v, ScalarValue::Null);
        let v: ScalarValue = serde_json::from_str(r#"{"Datetime": "2024-01-15"}"#).unwrap();
        assert_eq!(v.kind(), Kind::Datetime);
        let v: ScalarValue = serde_json::from_str(r#"{"Decimal": "0.00"}"#).unwrap();
        assert_eq!(v, dec("0"));
    }
}
