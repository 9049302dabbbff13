//! Module: shape
//! Responsibility: capability descriptions and reshaping criteria against
//! them.
//! Does not own: the algebra itself; reshaping only splits criteria apart.
//!
//! A shape mirrors the criterion variants and says which of them an external
//! capability can serve. Reshaping splits a criterion into the parts the
//! shape serves (`matched`) and the parts it cannot (`open`), without gaining
//! or losing any value.

mod permute;
mod reshape;

#[cfg(test)]
mod tests;

use crate::criterion::Criterion;
use serde::{Deserialize, Serialize};
use sift_primitives::ValueKinds;
use std::collections::BTreeMap;

///
/// Shape
///
/// Declarative capability tree. Built once per endpoint and reused.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Shape {
    /// Any criterion, whole.
    Any,

    /// Equality against scalars of the given kinds; sets split into one
    /// equality per member.
    Value { kinds: ValueKinds },

    /// Set membership over scalars of the given kinds.
    Set { kinds: ValueKinds },

    /// Ranges whose bounds are of the given kinds.
    Range { kinds: ValueKinds },

    /// `some(...)` whose inner criterion the inner shape accepts.
    Some { inner: Box<Self> },

    /// Each child is tried on whatever the previous ones left open.
    Or { shapes: Vec<Self> },

    /// Field bags.
    Named(NamedShape),
}

impl Shape {
    #[must_use]
    pub fn value(kinds: impl Into<ValueKinds>) -> Self {
        Self::Value {
            kinds: kinds.into(),
        }
    }

    #[must_use]
    pub fn set(kinds: impl Into<ValueKinds>) -> Self {
        Self::Set {
            kinds: kinds.into(),
        }
    }

    #[must_use]
    pub fn range(kinds: impl Into<ValueKinds>) -> Self {
        Self::Range {
            kinds: kinds.into(),
        }
    }

    #[must_use]
    pub fn some(inner: Self) -> Self {
        Self::Some {
            inner: Box::new(inner),
        }
    }

    #[must_use]
    pub const fn or(shapes: Vec<Self>) -> Self {
        Self::Or { shapes }
    }
}

impl From<NamedShape> for Shape {
    fn from(shape: NamedShape) -> Self {
        Self::Named(shape)
    }
}

///
/// NamedShape
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NamedShape {
    pub fields: BTreeMap<String, FieldShape>,
}

impl NamedShape {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a field every bag must carry.
    #[must_use]
    pub fn required(mut self, name: impl Into<String>, shape: Shape) -> Self {
        self.fields.insert(
            name.into(),
            FieldShape {
                shape,
                required: true,
            },
        );
        self
    }

    /// Declare a field bags may carry.
    #[must_use]
    pub fn optional(mut self, name: impl Into<String>, shape: Shape) -> Self {
        self.fields.insert(
            name.into(),
            FieldShape {
                shape,
                required: false,
            },
        );
        self
    }
}

///
/// FieldShape
///
/// `required` only decides whether a bag must carry the field. A present
/// field the shape cannot serve leaves the whole bag open either way.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldShape {
    pub shape: Shape,

    #[serde(default)]
    pub required: bool,
}

///
/// Reshaped
///
/// Result of a successful reshape: the criteria the shape serves and the
/// leftovers it does not. `matched` is never empty.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Reshaped {
    matched: Vec<Criterion>,
    open: Vec<Criterion>,
}

impl Reshaped {
    /// # Panics
    ///
    /// Panics when `matched` is empty; a shape that serves nothing reports
    /// `None` instead.
    #[must_use]
    pub fn new(matched: Vec<Criterion>, open: Vec<Criterion>) -> Self {
        assert!(
            !matched.is_empty(),
            "reshaped criteria require at least one matched criterion"
        );

        Self { matched, open }
    }

    #[must_use]
    pub fn matched(&self) -> &[Criterion] {
        &self.matched
    }

    #[must_use]
    pub fn open(&self) -> &[Criterion] {
        &self.open
    }

    /// Returns `true` when nothing was left open.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.open.is_empty()
    }
}
