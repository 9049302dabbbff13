//! Module: criterion
//! Responsibility: the immutable criterion tree and its algebra.
//! Does not own: textual parsing or capability shapes.
//!
//! Every operation returns a fresh criterion or an outcome sentinel; nothing
//! here mutates an existing tree. Dispatch is an exhaustive `match` over the
//! variant pair, and combinations with no defined law fall back to the
//! conservative outcome (`Untouched` / `None`).

mod composite;
mod display;
mod eval;
pub(crate) mod intersect;
mod invert;
mod merge;
mod named;
mod parity;
mod range;
mod reduce;
mod set;

#[cfg(test)]
mod tests;

pub use composite::{Combinator, Criteria};
pub use named::NamedCriteria;
pub use parity::Parity;
pub use range::{Bound, Range};
pub use set::ScalarSet;

use crate::{error::CriterionError, value::Scalar};
use sift_primitives::{ValueKind, ValueKinds};
use std::fmt;

///
/// Criterion
///
/// Composable predicate over runtime values.
/// Equality and hashing are structural; set members and bag fields are kept
/// sorted so equal criteria compare equal regardless of build order.
/// The total order is structural too and only canonicalizes results.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Criterion {
    Any,
    Never,
    Is(Scalar),
    Not(Scalar),
    InSet(ScalarSet),
    NotInSet(ScalarSet),
    InRange(Range),
    Parity(Parity),
    Some(Box<Self>),
    And(Criteria),
    Or(Criteria),
    Named(NamedCriteria),
}

impl Criterion {
    #[must_use]
    pub fn is(value: impl Into<Scalar>) -> Self {
        Self::Is(value.into())
    }

    #[must_use]
    pub fn not(value: impl Into<Scalar>) -> Self {
        Self::Not(value.into())
    }

    /// Membership in `values`; an empty set matches nothing.
    #[must_use]
    pub fn in_set<S, I>(values: I) -> Self
    where
        S: Into<Scalar>,
        I: IntoIterator<Item = S>,
    {
        let values: ScalarSet = values.into_iter().collect();
        if values.is_empty() {
            Self::Never
        } else {
            Self::InSet(values)
        }
    }

    /// Exclusion of `values`; an empty set matches everything.
    #[must_use]
    pub fn not_in_set<S, I>(values: I) -> Self
    where
        S: Into<Scalar>,
        I: IntoIterator<Item = S>,
    {
        let values: ScalarSet = values.into_iter().collect();
        if values.is_empty() {
            Self::Any
        } else {
            Self::NotInSet(values)
        }
    }

    #[must_use]
    pub const fn in_range(range: Range) -> Self {
        Self::InRange(range)
    }

    /// Closed range `[from, to]`.
    pub fn between(from: impl Into<Scalar>, to: impl Into<Scalar>) -> Result<Self, CriterionError> {
        Range::between(from, to).map(Self::InRange)
    }

    #[must_use]
    pub const fn even() -> Self {
        Self::Parity(Parity::Even)
    }

    #[must_use]
    pub const fn odd() -> Self {
        Self::Parity(Parity::Odd)
    }

    /// Lists with at least one element matching `inner`.
    #[must_use]
    pub fn some(inner: Self) -> Self {
        Self::Some(Box::new(inner))
    }

    /// Kinds of value this criterion can possibly match.
    #[must_use]
    pub fn value_kinds(&self) -> ValueKinds {
        match self {
            Self::Any | Self::Not(_) | Self::NotInSet(_) => ValueKinds::ALL,
            Self::Never => ValueKinds::EMPTY,
            Self::Is(value) => ValueKinds::only(value.kind()),
            Self::InSet(values) => values.kinds(),
            Self::InRange(range) => ValueKinds::only(range.kind()),
            Self::Parity(_) => ValueKinds::supporting(ValueKind::supports_parity),
            Self::Some(_) => ValueKinds::only(ValueKind::List),
            Self::Named(_) => ValueKinds::only(ValueKind::Record),
            Self::And(items) => items
                .iter()
                .fold(ValueKinds::ALL, |kinds, item| kinds.intersection(item.value_kinds())),
            Self::Or(items) => items
                .iter()
                .fold(ValueKinds::EMPTY, |kinds, item| kinds.union(item.value_kinds())),
        }
    }

    /// `self \ other`: what of `self` is left once `other` is served.
    #[must_use]
    pub fn subtract_from(&self, other: &Self) -> Reduction {
        other.reduce(self)
    }

    /// Returns `true` when both criteria match exactly the same values, as
    /// far as the algebra can prove.
    #[must_use]
    pub fn equivalent(&self, other: &Self) -> bool {
        self.subtract_from(other).is_removed() && other.subtract_from(self).is_removed()
    }

    /// Leaves that constrain a single scalar.
    pub(crate) const fn is_scalar_leaf(&self) -> bool {
        matches!(
            self,
            Self::Is(_)
                | Self::Not(_)
                | Self::InSet(_)
                | Self::NotInSet(_)
                | Self::InRange(_)
                | Self::Parity(_)
        )
    }
}

///
/// Reduction
///
/// Outcome of subtracting one criterion from another.
///
/// `Removed` is reported only when coverage is proven. A `Remainder` is never
/// smaller than the true difference, and `Untouched` is the answer whenever no
/// law applies.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Reduction {
    Removed,
    Untouched,
    Remainder(Criterion),
}

impl Reduction {
    #[must_use]
    pub const fn is_removed(&self) -> bool {
        matches!(self, Self::Removed)
    }

    #[must_use]
    pub const fn is_untouched(&self) -> bool {
        matches!(self, Self::Untouched)
    }

    #[must_use]
    pub const fn remainder(&self) -> Option<&Criterion> {
        match self {
            Self::Remainder(rest) => Some(rest),
            _ => None,
        }
    }

    /// What is left of `minuend`, with `Never` standing for nothing.
    #[must_use]
    pub fn into_criterion(self, minuend: &Criterion) -> Criterion {
        match self {
            Self::Removed => Criterion::Never,
            Self::Untouched => minuend.clone(),
            Self::Remainder(rest) => rest,
        }
    }

    /// Classify a computed residual against the minuend it came from.
    pub(crate) fn from_residual(residual: Criterion, minuend: &Criterion) -> Self {
        if residual == Criterion::Never {
            Self::Removed
        } else if residual == *minuend {
            Self::Untouched
        } else {
            Self::Remainder(residual)
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removed => f.write_str("removed"),
            Self::Untouched => f.write_str("untouched"),
            Self::Remainder(rest) => write!(f, "{rest}"),
        }
    }
}
