//! Kind tags and kind sets
//!
//! `Kind` names the variant of a [`ScalarValue`](crate::ScalarValue) without
//! its payload. `KindSet` is a small bitmask over kinds, used by the
//! dispatch layer to declare which operand kinds an operator accepts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor};

/// Kind of a scalar value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Null,
    Bool,
    Int64,
    Uint64,
    Float32,
    Float64,
    String,
    Decimal,
    Datetime,
    /// Opaque binary payload. Carried through the engine but not
    /// supported by truthiness conversion.
    Bytes,
}

impl Kind {
    /// Every kind, in declaration order
    pub const ALL: [Kind; 10] = [
        Kind::Null,
        Kind::Bool,
        Kind::Int64,
        Kind::Uint64,
        Kind::Float32,
        Kind::Float64,
        Kind::String,
        Kind::Decimal,
        Kind::Datetime,
        Kind::Bytes,
    ];

    /// Number of kinds
    pub const COUNT: usize = Self::ALL.len();

    /// Stable lower-case name, used in error messages and logs
    pub fn name(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int64 => "int64",
            Kind::Uint64 => "uint64",
            Kind::Float32 => "float32",
            Kind::Float64 => "float64",
            Kind::String => "string",
            Kind::Decimal => "decimal",
            Kind::Datetime => "datetime",
            Kind::Bytes => "bytes",
        }
    }

    /// Position of this kind in [`Kind::ALL`]
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Integer and floating point kinds (booleans count as integers).
    ///
    /// Decimal is numeric for value comparison but is not part of the
    /// string/number zero-comparison fallback, so it is excluded here.
    pub fn is_machine_numeric(self) -> bool {
        matches!(
            self,
            Kind::Bool | Kind::Int64 | Kind::Uint64 | Kind::Float32 | Kind::Float64
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of [`Kind`]s stored as a bitmask
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindSet(u16);

impl KindSet {
    /// No kinds
    pub const NONE: KindSet = KindSet(0);

    /// Every kind, including opaque ones
    pub const ANY: KindSet = KindSet((1 << Kind::COUNT) - 1);

    /// Every non-opaque kind
    pub const SUPPORTED: KindSet = KindSet(Self::ANY.0 & !(1 << Kind::Bytes as u16));

    /// Set containing a single kind
    #[inline]
    pub const fn of(kind: Kind) -> KindSet {
        KindSet(1 << kind as u16)
    }

    #[inline]
    pub const fn contains(self, kind: Kind) -> bool {
        self.0 & (1 << kind as u16) != 0
    }

    #[inline]
    pub fn insert(&mut self, kind: Kind) {
        self.0 |= 1 << kind as u16;
    }

    #[inline]
    pub const fn union(self, other: KindSet) -> KindSet {
        KindSet(self.0 | other.0)
    }

    /// Kinds in `self` but not in `other`
    #[inline]
    pub const fn difference(self, other: KindSet) -> KindSet {
        KindSet(self.0 & !other.0)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Kinds in this set, in declaration order
    pub fn iter(self) -> impl Iterator<Item = Kind> {
        Kind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl From<Kind> for KindSet {
    fn from(kind: Kind) -> Self {
        KindSet::of(kind)
    }
}

impl FromIterator<Kind> for KindSet {
    fn from_iter<I: IntoIterator<Item = Kind>>(iter: I) -> Self {
        let mut set = KindSet::NONE;
        for kind in iter {
            set.insert(kind);
        }
        set
    }
}

impl BitOr for KindSet {
    type Output = KindSet;

    fn bitor(self, rhs: KindSet) -> KindSet {
        KindSet(self.0 | rhs.0)
    }
}

impl BitOr<Kind> for KindSet {
    type Output = KindSet;

    fn bitor(self, rhs: Kind) -> KindSet {
        self | KindSet::of(rhs)
    }
}

impl BitAnd for KindSet {
    type Output = KindSet;

    fn bitand(self, rhs: KindSet) -> KindSet {
        KindSet(self.0 & rhs.0)
    }
}

impl BitXor for KindSet {
    type Output = KindSet;

    fn bitxor(self, rhs: KindSet) -> KindSet {
        KindSet(self.0 ^ rhs.0)
    }
}

impl BitXor<Kind> for KindSet {
    type Output = KindSet;

    fn bitxor(self, rhs: Kind) -> KindSet {
        self ^ KindSet::of(rhs)
    }
}

impl fmt::Debug for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
