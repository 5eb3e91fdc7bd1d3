//! The static type lattice of MAVL.
//!
//! This module defines the resolved [`Type`] values attached to expressions
//! and declarations during contextual analysis, together with the pure
//! predicates the analysis uses to classify them. Types are plain values
//! compared by structural equality; aggregate types carry their static
//! dimensions.

pub mod types;


pub use types::{NumericType, Type};
