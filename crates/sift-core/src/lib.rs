//! Core runtime for Sift: scalars and values, the criterion algebra, capability
//! shapes, the textual grammar, and the ergonomics exported via the `prelude`.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod criterion;
pub mod error;
pub mod grammar;
pub mod shape;
pub mod value;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, config, or grammar internals are re-exported here.
///

pub mod prelude {
    pub use crate::{
        criterion::{Bound, Criterion, Parity, Range, Reduction},
        shape::{NamedShape, Reshaped, Shape},
        value::{Scalar, Value},
    };
    pub use sift_primitives::{ValueKind, ValueKinds};
}
