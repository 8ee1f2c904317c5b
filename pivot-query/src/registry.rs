//! Operator registry
//!
//! An immutable table mapping operator names to their [`OperatorSpec`]:
//! arity bounds and kind acceptance. It is built once on first use and
//! never mutated afterwards.
//!
//! [`OperatorRegistry::invoke`] is the checked entry point for a dispatch
//! framework: resolve the name, validate arity and operand kinds, evaluate.

use crate::accept::AcceptSpec;
use crate::error::{QueryError, Result};
use crate::expression::dispatch::Operator;
use crate::options::EvalOptions;
use once_cell::sync::Lazy;
use pivot_core::{Kind, ScalarValue};
use std::collections::HashMap;

/// Lazily built global registry
static REGISTRY: Lazy<OperatorRegistry> = Lazy::new(OperatorRegistry::build);

/// Registration record for one operator
#[derive(Debug, Clone)]
pub struct OperatorSpec {
    pub operator: Operator,
    pub name: &'static str,
    pub min_args: usize,
    pub max_args: usize,
    pub accepts: AcceptSpec,
}

impl OperatorSpec {
    fn new(operator: Operator) -> Self {
        let accepts = if operator.is_logical() {
            AcceptSpec::logical()
        } else {
            AcceptSpec::comparison()
        };
        Self {
            operator,
            name: operator.name(),
            min_args: 2,
            max_args: 2,
            accepts,
        }
    }

    fn check_arity(&self, found: usize, opts: &EvalOptions) -> Result<()> {
        let too_few = found < self.min_args;
        let too_many = opts.check_arity && found > self.max_args;
        if too_few || too_many {
            return Err(QueryError::ArityMismatch {
                operator: self.name,
                min: self.min_args,
                max: self.max_args,
                found,
            });
        }
        Ok(())
    }

    fn check_kinds(&self, args: &[ScalarValue]) -> Result<()> {
        let kinds: Vec<Kind> = args.iter().map(ScalarValue::kind).collect();
        self.accepts
            .check(&kinds)
            .map_err(|(position, kind, other)| QueryError::KindNotAccepted {
                operator: self.name,
                position,
                kind,
                other,
            })
    }
}

/// Read-only operator lookup table
#[derive(Debug)]
pub struct OperatorRegistry {
    specs: HashMap<&'static str, OperatorSpec>,
}

impl OperatorRegistry {
    fn build() -> Self {
        let specs = Operator::ALL
            .iter()
            .map(|&op| (op.name(), OperatorSpec::new(op)))
            .collect();
        Self { specs }
    }

    /// The process-wide registry
    pub fn global() -> &'static OperatorRegistry {
        &REGISTRY
    }

    /// Look up by name or SQL symbol, case-insensitively
    pub fn get(&self, name: &str) -> Option<&OperatorSpec> {
        let op: Operator = name.parse().ok()?;
        self.specs.get(op.name())
    }

    /// Registration record for `operator`
    pub fn spec(&self, operator: Operator) -> &OperatorSpec {
        // Every variant is registered by `build`
        &self.specs[operator.name()]
    }

    /// All registered operators, in `Operator::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = &OperatorSpec> + '_ {
        Operator::ALL.iter().map(move |&op| self.spec(op))
    }

    /// Resolve, check and evaluate with default options
    pub fn invoke(&self, name: &str, args: &[ScalarValue]) -> Result<ScalarValue> {
        self.invoke_with(name, args, &EvalOptions::default())
    }

    /// Resolve, check and evaluate.
    ///
    /// # Errors
    ///
    /// - [`QueryError::UnknownOperator`] if `name` is not registered
    /// - [`QueryError::ArityMismatch`] for a wrong argument count
    /// - [`QueryError::KindNotAccepted`] for a rejected kind combination
    /// - [`QueryError::ContractViolation`] from evaluation itself, when the
    ///   kind check was disabled and an unsupported pair got through
    pub fn invoke_with(
        &self,
        name: &str,
        args: &[ScalarValue],
        opts: &EvalOptions,
    ) -> Result<ScalarValue> {
        let spec = match self.get(name) {
            Some(spec) => spec,
            None => {
                tracing::debug!(name, "unknown operator");
                return Err(QueryError::UnknownOperator(name.to_string()));
            }
        };

        if let Err(e) = spec.check_arity(args.len(), opts) {
            tracing::debug!(operator = spec.name, found = args.len(), "arity rejected");
            return Err(e);
        }

        let operands = &args[..spec.max_args.min(args.len())];
        if opts.check_kinds {
            if let Err(e) = spec.check_kinds(operands) {
                tracing::debug!(operator = spec.name, error = %e, "operand kinds rejected");
                return Err(e);
            }
        }

        match operands {
            [left, right] => spec.operator.eval(left, right),
            _ => Err(QueryError::ArityMismatch {
                operator: spec.name,
                min: spec.min_args,
                max: spec.max_args,
                found: args.len(),
            }),
        }
    }
}
