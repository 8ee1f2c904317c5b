//! # Pivot Core
//!
//! Value model shared by the pivot expression engine.
//!
//! This crate provides:
//! - `ScalarValue`: the dynamically typed scalar handed to operators
//! - `Kind` / `KindSet`: kind tags and bitmask sets used for capability declarations
//! - `DateTime`: timezone-less SQL datetime
//!
//! ## Ordering
//!
//! `ScalarValue` does not implement `Ord`. Cross-kind ordering follows SQL
//! coercion rules that live in `pivot-query`; this crate only exposes the
//! building blocks (`numeric_cmp`, `temporal_cmp`).

pub mod error;
pub mod kind;
pub mod temporal;
pub mod value;

pub use error::{Error, Result};
pub use kind::{Kind, KindSet};
pub use temporal::DateTime;
pub use value::ScalarValue;
