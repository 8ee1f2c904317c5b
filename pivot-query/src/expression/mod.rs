//! Scalar operator implementations
//!
//! - `truth`: truthiness conversion (leaf)
//! - `compare`: comparator and relational operators
//! - `logical`: AND / OR / XOR
//! - `dispatch`: the `Operator` enum and its routing to the functions above

pub mod compare;
pub mod dispatch;
pub mod logical;
pub mod truth;
