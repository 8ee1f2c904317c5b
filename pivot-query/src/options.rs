//! Evaluation options
//!
//! Controls which checks [`OperatorRegistry::invoke_with`](crate::OperatorRegistry::invoke_with)
//! performs before evaluating. A dispatch framework that has already
//! validated arity and operand kinds can switch the checks off.

use serde::{Deserialize, Serialize};

/// Options for registry-driven operator invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalOptions {
    /// Reject calls with more arguments than the operator takes. When off,
    /// surplus arguments are ignored. Missing operands are always an error.
    pub check_arity: bool,
    /// Reject operand kind combinations the operator does not accept
    pub check_kinds: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            check_arity: true,
            check_kinds: true,
        }
    }
}

impl EvalOptions {
    /// Create options with every check enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip the arity check
    pub fn without_arity_check(mut self) -> Self {
        self.check_arity = false;
        self
    }

    /// Skip the operand kind check
    pub fn without_kind_check(mut self) -> Self {
        self.check_kinds = false;
        self
    }
}
