//! Module: criterion::composite
//! Responsibility: `And`/`Or` child lists and their canonicalizing builders.
//! Does not own: the algebra laws over composites (see `reduce`, `merge`,
//! `intersect`).

use crate::{criterion::Criterion, error::CriterionError};
use derive_more::{Deref, Display};

///
/// Combinator
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Combinator {
    #[display("and")]
    And,

    #[display("or")]
    Or,
}

impl Combinator {
    /// Infix operator used by the textual form.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::And => "&",
            Self::Or => "|",
        }
    }
}

///
/// Criteria
///
/// Ordered, non-empty child list of a composite criterion.
///

#[derive(Clone, Debug, Deref, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Criteria(Vec<Criterion>);

impl Criteria {
    pub(crate) fn into_inner(self) -> Vec<Criterion> {
        self.0
    }
}

impl Criterion {
    /// Conjunction of `items`. A single item is returned as-is.
    pub fn and(items: impl IntoIterator<Item = Self>) -> Result<Self, CriterionError> {
        Self::composite(Combinator::And, items.into_iter().collect())
    }

    /// Disjunction of `items`. A single item is returned as-is.
    pub fn or(items: impl IntoIterator<Item = Self>) -> Result<Self, CriterionError> {
        Self::composite(Combinator::Or, items.into_iter().collect())
    }

    fn composite(combinator: Combinator, mut items: Vec<Self>) -> Result<Self, CriterionError> {
        match items.len() {
            0 => Err(CriterionError::EmptyComposite { combinator }),
            1 => Ok(items.remove(0)),
            _ => Ok(match combinator {
                Combinator::And => Self::And(Criteria(items)),
                Combinator::Or => Self::Or(Criteria(items)),
            }),
        }
    }

    /// Canonical conjunction used by the algebra.
    ///
    /// Flattens nested `And`, drops `Any`, collapses to `Never` on any
    /// `Never`, and removes duplicates. Empty input is `Any`.
    pub(crate) fn all_of(items: Vec<Self>) -> Self {
        let mut kept: Vec<Self> = Vec::with_capacity(items.len());

        for item in items {
            let parts = match item {
                Self::Any => continue,
                Self::Never => return Self::Never,
                Self::And(children) => children.into_inner(),
                other => vec![other],
            };
            for part in parts {
                if !kept.contains(&part) {
                    kept.push(part);
                }
            }
        }

        match kept.len() {
            0 => Self::Any,
            1 => kept.remove(0),
            _ => Self::And(Criteria(kept)),
        }
    }

    /// Canonical disjunction used by the algebra.
    ///
    /// Flattens nested `Or`, drops `Never`, collapses to `Any` on any
    /// `Any`, and removes duplicates. Empty input is `Never`.
    pub(crate) fn any_of(items: Vec<Self>) -> Self {
        let mut kept: Vec<Self> = Vec::with_capacity(items.len());

        for item in items {
            let parts = match item {
                Self::Never => continue,
                Self::Any => return Self::Any,
                Self::Or(children) => children.into_inner(),
                other => vec![other],
            };
            for part in parts {
                if !kept.contains(&part) {
                    kept.push(part);
                }
            }
        }

        match kept.len() {
            0 => Self::Never,
            1 => kept.remove(0),
            _ => Self::Or(Criteria(kept)),
        }
    }
}
