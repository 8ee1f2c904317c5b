//! Kind acceptance declarations
//!
//! Each operator declares, per argument position, which kinds the *other*
//! arguments may have given the kind of that position. The dispatch layer
//! checks a call against the declaration before evaluating; the operator
//! implementations never consult it.
//!
//! For the comparison operators a datetime and a string are mutually
//! exclusive partners, and bytes only pair with bytes or strings. The
//! logical operators reject kinds without a truth reading outright.

use pivot_core::{Kind, KindSet};

/// Kinds without a truth reading
const NO_TRUTH: KindSet = KindSet::of(Kind::Datetime).union(KindSet::of(Kind::Bytes));

/// Acceptance for one argument position
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ArgAcceptance {
    by_kind: [KindSet; Kind::COUNT],
}

impl Default for ArgAcceptance {
    /// Every kind pairs with every kind
    fn default() -> Self {
        Self {
            by_kind: [KindSet::ANY; Kind::COUNT],
        }
    }
}

impl ArgAcceptance {
    /// Acceptance that rejects every kind at this position
    pub fn none() -> Self {
        Self {
            by_kind: [KindSet::NONE; Kind::COUNT],
        }
    }

    /// Set the partners allowed when this position has `kind`
    pub fn with(mut self, kind: Kind, partners: KindSet) -> Self {
        self.by_kind[kind.index()] = partners;
        self
    }

    /// Kinds the other arguments may have when this position has `kind`.
    ///
    /// An empty set means `kind` itself is not accepted here.
    pub fn allowed_with(&self, kind: Kind) -> KindSet {
        self.by_kind[kind.index()]
    }

    /// Whether `kind` is accepted at this position at all
    pub fn accepts(&self, kind: Kind) -> bool {
        !self.allowed_with(kind).is_empty()
    }
}

impl std::fmt::Debug for ArgAcceptance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(Kind::ALL.iter().map(|k| (k, self.allowed_with(*k))))
            .finish()
    }
}

/// Acceptance declaration for every argument position of an operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptSpec {
    args: Vec<ArgAcceptance>,
}

impl AcceptSpec {
    pub fn new(args: Vec<ArgAcceptance>) -> Self {
        Self { args }
    }

    /// Two positions with the same acceptance
    pub fn binary(arg: ArgAcceptance) -> Self {
        Self::new(vec![arg, arg])
    }

    /// AND / OR / XOR: any kind with a truth reading, in any combination
    pub fn logical() -> Self {
        let truthy = KindSet::ANY.difference(NO_TRUTH);
        let arg = Kind::ALL
            .iter()
            .fold(ArgAcceptance::none(), |acc, &kind| {
                if truthy.contains(kind) {
                    acc.with(kind, truthy)
                } else {
                    acc
                }
            });
        Self::binary(arg)
    }

    /// EQ / NE / LT / LE / GT / GE
    pub fn comparison() -> Self {
        let scalar = KindSet::SUPPORTED;
        let arg = Kind::ALL
            .iter()
            .fold(ArgAcceptance::default(), |acc, &kind| acc.with(kind, scalar))
            .with(Kind::Null, KindSet::ANY)
            .with(Kind::Datetime, scalar ^ Kind::String)
            .with(Kind::String, KindSet::ANY ^ Kind::Datetime)
            .with(
                Kind::Bytes,
                KindSet::of(Kind::Null) | Kind::Bytes | Kind::String,
            );
        Self::binary(arg)
    }

    /// Per-position acceptance
    pub fn args(&self) -> &[ArgAcceptance] {
        &self.args
    }

    /// Check a call's operand kinds.
    ///
    /// On rejection returns `(position, kind, other)`: the position whose
    /// declaration failed, its kind, and the partner kind it refused. A kind
    /// rejected outright is reported with itself as the partner. Positions
    /// beyond the declaration are not checked.
    pub fn check(&self, kinds: &[Kind]) -> Result<(), (usize, Kind, Kind)> {
        for (pos, (decl, &kind)) in self.args.iter().zip(kinds).enumerate() {
            let allowed = decl.allowed_with(kind);
            if allowed.is_empty() {
                return Err((pos, kind, kind));
            }
            let refused = kinds
                .iter()
                .enumerate()
                .find(|&(other_pos, other)| other_pos != pos && !allowed.contains(*other));
            if let Some((_, &other)) = refused {
                return Err((pos, kind, other));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_truth_kinds() {
        assert!(NO_TRUTH.contains(Kind::Datetime));
        assert!(NO_TRUTH.contains(Kind::Bytes));
        assert_eq!(NO_TRUTH.iter().count(), 2);
    }

    #[test]
    fn test_logical_accepts_truthy_pairs() {
        let spec = AcceptSpec::logical();
        assert_eq!(spec.check(&[Kind::Int64, Kind::String]), Ok(()));
        assert_eq!(spec.check(&[Kind::Null, Kind::Decimal]), Ok(()));
        assert_eq!(spec.check(&[Kind::Bool, Kind::Float32]), Ok(()));
    }

    #[test]
    fn test_logical_rejects_kinds_without_truth() {
        let spec = AcceptSpec::logical();
        for kind in NO_TRUTH.iter() {
            assert_eq!(spec.check(&[kind, Kind::Int64]), Err((0, kind, kind)));
            assert_eq!(
                spec.check(&[Kind::Int64, kind]),
                Err((0, Kind::Int64, kind))
            );
            assert!(!spec.args()[1].accepts(kind));
        }
    }

    #[test]
    fn test_comparison_datetime_string_exclusive() {
        let spec = AcceptSpec::comparison();
        assert_eq!(
            spec.check(&[Kind::Datetime, Kind::String]),
            Err((0, Kind::Datetime, Kind::String))
        );
        assert_eq!(
            spec.check(&[Kind::String, Kind::Datetime]),
            Err((0, Kind::String, Kind::Datetime))
        );
        assert_eq!(spec.check(&[Kind::Datetime, Kind::Datetime]), Ok(()));
        assert_eq!(spec.check(&[Kind::Datetime, Kind::Int64]), Ok(()));
        assert_eq!(spec.check(&[Kind::String, Kind::Uint64]), Ok(()));
    }

    #[test]
    fn test_comparison_bytes_partners() {
        let spec = AcceptSpec::comparison();
        assert_eq!(spec.check(&[Kind::Bytes, Kind::String]), Ok(()));
        assert_eq!(spec.check(&[Kind::String, Kind::Bytes]), Ok(()));
        assert_eq!(spec.check(&[Kind::Bytes, Kind::Null]), Ok(()));
        assert_eq!(
            spec.check(&[Kind::Bytes, Kind::Float64]),
            Err((0, Kind::Bytes, Kind::Float64))
        );
        assert_eq!(
            spec.check(&[Kind::Decimal, Kind::Bytes]),
            Err((0, Kind::Decimal, Kind::Bytes))
        );
    }

    #[test]
    fn test_comparison_null_pairs_with_everything() {
        let spec = AcceptSpec::comparison();
        for kind in Kind::ALL {
            assert_eq!(spec.check(&[Kind::Null, kind]), Ok(()), "{kind}");
            assert_eq!(spec.check(&[kind, Kind::Null]), Ok(()), "{kind}");
        }
    }

    #[test]
    fn test_comparison_is_symmetric() {
        let spec = AcceptSpec::comparison();
        for a in Kind::ALL {
            for b in Kind::ALL {
                assert_eq!(
                    spec.check(&[a, b]).is_ok(),
                    spec.check(&[b, a]).is_ok(),
                    "{a} vs {b}"
                );
            }
        }
    }
}
