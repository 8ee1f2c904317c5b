//! Operator dispatch - routes an `Operator` to its implementation
//!
//! This module provides the `Operator` enum and `Operator::eval`, the single
//! entry point for evaluating one of the nine binary operators.

use crate::error::{QueryError, Result};
use pivot_core::ScalarValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{compare, logical};

/// Binary operators supported by the kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Operator {
    // Logical connectives
    And,
    Or,
    Xor,

    // Relational operators
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Operator {
    /// Every operator, logical connectives first
    pub const ALL: [Operator; 9] = [
        Operator::And,
        Operator::Or,
        Operator::Xor,
        Operator::Eq,
        Operator::Ne,
        Operator::Lt,
        Operator::Le,
        Operator::Gt,
        Operator::Ge,
    ];

    /// Registered name
    pub fn name(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::Eq => "EQ",
            Operator::Ne => "NE",
            Operator::Lt => "LT",
            Operator::Le => "LE",
            Operator::Gt => "GT",
            Operator::Ge => "GE",
        }
    }

    /// SQL spelling
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Xor => "XOR",
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
        }
    }

    pub fn is_logical(self) -> bool {
        matches!(self, Operator::And | Operator::Or | Operator::Xor)
    }

    pub fn is_comparison(self) -> bool {
        !self.is_logical()
    }

    /// Comparison with the opposite result on every non-NULL pair
    /// (`a < b` ⇔ `NOT (a >= b)`). `None` for logical operators.
    pub fn negate(self) -> Option<Operator> {
        match self {
            Operator::Eq => Some(Operator::Ne),
            Operator::Ne => Some(Operator::Eq),
            Operator::Lt => Some(Operator::Ge),
            Operator::Ge => Some(Operator::Lt),
            Operator::Le => Some(Operator::Gt),
            Operator::Gt => Some(Operator::Le),
            Operator::And | Operator::Or | Operator::Xor => None,
        }
    }

    /// Operator giving the same result with the operands swapped
    /// (`a < b` ⇔ `b > a`). Logical operators are symmetric already.
    pub fn swap(self) -> Operator {
        match self {
            Operator::Lt => Operator::Gt,
            Operator::Gt => Operator::Lt,
            Operator::Le => Operator::Ge,
            Operator::Ge => Operator::Le,
            other => other,
        }
    }

    /// Evaluate this operator.
    ///
    /// Operands are not checked against the acceptance declaration here; use
    /// [`OperatorRegistry::invoke`](crate::OperatorRegistry::invoke) for that.
    pub fn eval(self, left: &ScalarValue, right: &ScalarValue) -> Result<ScalarValue> {
        match self {
            // Logical operators
            Operator::And => logical::eval_and(left, right),
            Operator::Or => logical::eval_or(left, right),
            Operator::Xor => logical::eval_xor(left, right),

            // Comparison operators
            Operator::Eq => compare::eval_eq(left, right),
            Operator::Ne => compare::eval_ne(left, right),
            Operator::Lt => compare::eval_lt(left, right),
            Operator::Le => compare::eval_le(left, right),
            Operator::Gt => compare::eval_gt(left, right),
            Operator::Ge => compare::eval_ge(left, right),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    /// Accepts registered names and SQL symbols, case-insensitively.
    /// `<>` and `==` are accepted as aliases.
    fn from_str(s: &str) -> Result<Self> {
        let op = match s.trim().to_ascii_uppercase().as_str() {
            "AND" | "&&" => Operator::And,
            "OR" | "||" => Operator::Or,
            "XOR" => Operator::Xor,
            "EQ" | "=" | "==" => Operator::Eq,
            "NE" | "!=" | "<>" => Operator::Ne,
            "LT" | "<" => Operator::Lt,
            "LE" | "<=" => Operator::Le,
            "GT" | ">" => Operator::Gt,
            "GE" | ">=" => Operator::Ge,
            _ => return Err(QueryError::UnknownOperator(s.to_string())),
        };
        Ok(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for op in Operator::ALL {
            assert_eq!(op.name().parse::<Operator>(), Ok(op));
            assert_eq!(op.symbol().parse::<Operator>(), Ok(op));
            assert_eq!(op.name().to_lowercase().parse::<Operator>(), Ok(op));
        }
        assert_eq!("<>".parse::<Operator>(), Ok(Operator::Ne));
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "LIKE".parse::<Operator>(),
            Err(QueryError::UnknownOperator("LIKE".to_string()))
        );
    }

    #[test]
    fn test_negate_and_swap_are_involutions() {
        for op in Operator::ALL {
            assert_eq!(op.swap().swap(), op);
            if let Some(neg) = op.negate() {
                assert_eq!(neg.negate(), Some(op));
                assert!(neg.is_comparison());
            } else {
                assert!(op.is_logical());
            }
        }
    }

    #[test]
    fn test_eval_routes() {
        let three = ScalarValue::Int64(3);
        let five = ScalarValue::Int64(5);
        assert_eq!(Operator::Lt.eval(&three, &five), Ok(ScalarValue::Bool(true)));
        assert_eq!(Operator::Gt.eval(&three, &five), Ok(ScalarValue::Bool(false)));
        assert_eq!(Operator::Xor.eval(&three, &five), Ok(ScalarValue::Bool(false)));
        assert_eq!(
            Operator::And.eval(&three, &ScalarValue::Null),
            Ok(ScalarValue::Null)
        );
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&Operator::Ge).unwrap();
        assert_eq!(json, "\"GE\"");
        let op: Operator = serde_json::from_str("\"XOR\"").unwrap();
        assert_eq!(op, Operator::Xor);
    }
}
