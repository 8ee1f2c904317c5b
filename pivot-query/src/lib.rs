//! # Pivot Query
//!
//! Scalar operator kernel for the pivot expression engine.
//!
//! Implements SQL three-valued logic over [`ScalarValue`]s:
//! - truthiness conversion (`expression::truth`)
//! - type-aware comparison with the legacy string/number fallback
//!   (`expression::compare`)
//! - the AND / OR / XOR connectives (`expression::logical`)
//! - the six relational operators EQ / NE / LT / LE / GT / GE
//!
//! Operators are pure functions. The [`OperatorRegistry`] is an immutable
//! table, built once, that the dispatch framework uses to resolve operator
//! names, check arity and check operand kinds before evaluating.
//!
//! ## Example
//!
//! ```
//! use pivot_core::ScalarValue;
//! use pivot_query::{Operator, OperatorRegistry};
//!
//! let r = Operator::And.eval(&ScalarValue::Int64(0), &ScalarValue::Null).unwrap();
//! assert_eq!(r, ScalarValue::Bool(false));
//!
//! let r = OperatorRegistry::global()
//!     .invoke("<", &[ScalarValue::Int64(3), ScalarValue::Int64(5)])
//!     .unwrap();
//! assert_eq!(r, ScalarValue::Bool(true));
//! ```

pub mod accept;
pub mod error;
pub mod expression;
pub mod options;
pub mod registry;

pub use accept::{AcceptSpec, ArgAcceptance};
pub use error::{QueryError, Result};
pub use expression::compare::compare;
pub use expression::dispatch::Operator;
pub use expression::truth::{truthiness, Truth};
pub use options::EvalOptions;
pub use pivot_core::ScalarValue;
pub use registry::{OperatorRegistry, OperatorSpec};
