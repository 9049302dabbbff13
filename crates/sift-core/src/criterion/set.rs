//! Discrete criteria: `Is`, `Not`, `InSet`, `NotInSet`.
//!
//! All four are handled as one family of finite and co-finite scalar sets so
//! every pairwise law reduces to plain set arithmetic.

use crate::{
    criterion::{Criterion, Reduction, intersect::Meet},
    value::Scalar,
};
use derive_more::Deref;
use sift_primitives::ValueKinds;
use std::collections::BTreeSet;

///
/// ScalarSet
///
/// Sorted, deduplicated scalar members of a set criterion.
/// Read-only once built.
///

#[derive(Clone, Debug, Default, Deref, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ScalarSet(BTreeSet<Scalar>);

impl ScalarSet {
    /// Union of the kinds of every member.
    #[must_use]
    pub fn kinds(&self) -> ValueKinds {
        self.0.iter().map(Scalar::kind).collect()
    }
}

impl<S: Into<Scalar>> FromIterator<S> for ScalarSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeSet<Scalar>> for ScalarSet {
    fn from(values: BTreeSet<Scalar>) -> Self {
        Self(values)
    }
}

///
/// Polarity
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Polarity {
    In,
    NotIn,
}

///
/// Discrete
///
/// Working form of a discrete criterion.
/// `value_form` remembers whether the criterion was written as `Is`/`Not`,
/// which decides how singleton results are rebuilt.
///

#[derive(Clone, Debug)]
pub(crate) struct Discrete {
    pub(crate) polarity: Polarity,
    pub(crate) values: BTreeSet<Scalar>,
    pub(crate) value_form: bool,
}

impl Discrete {
    pub(crate) fn of(criterion: &Criterion) -> Option<Self> {
        let (polarity, values, value_form) = match criterion {
            Criterion::Is(value) => (Polarity::In, BTreeSet::from([value.clone()]), true),
            Criterion::Not(value) => (Polarity::NotIn, BTreeSet::from([value.clone()]), true),
            Criterion::InSet(values) => (Polarity::In, values.0.clone(), false),
            Criterion::NotInSet(values) => (Polarity::NotIn, values.0.clone(), false),
            _ => return None,
        };

        Some(Self {
            polarity,
            values,
            value_form,
        })
    }

    /// Rebuild a criterion from set parts.
    ///
    /// An empty positive set is `Never`, an empty negative set is `Any`.
    pub(crate) fn build(polarity: Polarity, values: BTreeSet<Scalar>, value_form: bool) -> Criterion {
        if values.is_empty() {
            return match polarity {
                Polarity::In => Criterion::Never,
                Polarity::NotIn => Criterion::Any,
            };
        }

        if value_form && values.len() == 1 {
            let value = values.into_iter().next().unwrap_or(Scalar::Null);
            return match polarity {
                Polarity::In => Criterion::Is(value),
                Polarity::NotIn => Criterion::Not(value),
            };
        }

        match polarity {
            Polarity::In => Criterion::InSet(ScalarSet(values)),
            Polarity::NotIn => Criterion::NotInSet(ScalarSet(values)),
        }
    }

    /// Members of a positive set the given leaf admits.
    fn admitted_by(&self, leaf: &Criterion) -> BTreeSet<Scalar> {
        self.values
            .iter()
            .filter(|value| leaf.admits(value))
            .cloned()
            .collect()
    }

    /// `other \ self` for two discrete criteria.
    pub(crate) fn reduce(&self, other: &Self) -> Reduction {
        let (a, b) = (&self.values, &other.values);

        match (self.polarity, other.polarity) {
            // B \ A
            (Polarity::In, Polarity::In) => {
                let rest: BTreeSet<_> = b.difference(a).cloned().collect();
                finite_outcome(rest, b.len(), Polarity::In, other.value_form)
            }
            // ¬B \ A = ¬(A ∪ B)
            (Polarity::In, Polarity::NotIn) => {
                if a.is_subset(b) {
                    Reduction::Untouched
                } else {
                    let excluded = a.union(b).cloned().collect();
                    Reduction::Remainder(Self::build(Polarity::NotIn, excluded, other.value_form))
                }
            }
            // B \ ¬A = B ∩ A
            (Polarity::NotIn, Polarity::In) => {
                let rest: BTreeSet<_> = b.intersection(a).cloned().collect();
                finite_outcome(rest, b.len(), Polarity::In, other.value_form)
            }
            // ¬B \ ¬A = A \ B
            (Polarity::NotIn, Polarity::NotIn) => {
                let rest: BTreeSet<_> = a.difference(b).cloned().collect();
                if rest.is_empty() {
                    Reduction::Removed
                } else {
                    Reduction::Remainder(Self::build(Polarity::In, rest, other.value_form))
                }
            }
        }
    }

    /// Exact union of two discrete criteria.
    pub(crate) fn merge(&self, other: &Self) -> Criterion {
        let value_form = self.value_form && other.value_form;
        let (a, b) = (&self.values, &other.values);

        match (self.polarity, other.polarity) {
            (Polarity::In, Polarity::In) => {
                Self::build(Polarity::In, a.union(b).cloned().collect(), value_form)
            }
            (Polarity::In, Polarity::NotIn) => {
                Self::build(Polarity::NotIn, b.difference(a).cloned().collect(), value_form)
            }
            (Polarity::NotIn, Polarity::In) => {
                Self::build(Polarity::NotIn, a.difference(b).cloned().collect(), value_form)
            }
            (Polarity::NotIn, Polarity::NotIn) => Self::build(
                Polarity::NotIn,
                a.intersection(b).cloned().collect(),
                value_form,
            ),
        }
    }

    /// Intersection of two discrete criteria.
    pub(crate) fn meet(&self, other: &Self) -> Meet {
        let value_form = self.value_form || other.value_form;
        let (a, b) = (&self.values, &other.values);

        let (polarity, values): (Polarity, BTreeSet<Scalar>) = match (self.polarity, other.polarity) {
            (Polarity::In, Polarity::In) => (Polarity::In, a.intersection(b).cloned().collect()),
            (Polarity::In, Polarity::NotIn) => (Polarity::In, a.difference(b).cloned().collect()),
            (Polarity::NotIn, Polarity::In) => (Polarity::In, b.difference(a).cloned().collect()),
            (Polarity::NotIn, Polarity::NotIn) => (Polarity::NotIn, a.union(b).cloned().collect()),
        };

        if polarity == Polarity::In && values.is_empty() {
            return Meet::Disjoint;
        }

        Meet::Meet(Self::build(polarity, values, value_form))
    }

    /// `other \ self` where `other` is a non-discrete scalar leaf.
    pub(crate) fn reduce_leaf(&self, other: &Criterion) -> Reduction {
        match self.polarity {
            Polarity::In => match other {
                Criterion::InRange(range) => {
                    let points: Vec<Scalar> = self
                        .values
                        .iter()
                        .filter(|value| range.contains(value))
                        .cloned()
                        .collect();
                    if points.is_empty() {
                        return Reduction::Untouched;
                    }

                    let pieces = range.split_at(&points);
                    if pieces.is_empty() {
                        Reduction::Removed
                    } else {
                        Reduction::Remainder(Criterion::any_of(
                            pieces.into_iter().map(Criterion::InRange).collect(),
                        ))
                    }
                }
                Criterion::Parity(_) => {
                    let hits = self.admitted_by(other);
                    if hits.is_empty() {
                        Reduction::Untouched
                    } else {
                        Reduction::Remainder(Criterion::all_of(vec![
                            other.clone(),
                            Self::build(Polarity::NotIn, hits, false),
                        ]))
                    }
                }
                _ => Reduction::Untouched,
            },
            // x \ ¬A = x ∩ A
            Polarity::NotIn => {
                // lists and records are never excluded by a scalar set
                if matches!(other, Criterion::Some(_) | Criterion::Named(_)) {
                    return Reduction::Removed;
                }
                if !other.is_scalar_leaf() {
                    return Reduction::Untouched;
                }

                let hits = self.admitted_by(other);
                if hits.is_empty() {
                    Reduction::Removed
                } else {
                    Reduction::Remainder(Self::build(Polarity::In, hits, false))
                }
            }
        }
    }

    /// `self \ leaf` where `self` is a positive finite set: filter members.
    pub(crate) fn reduce_by_leaf(&self, leaf: &Criterion) -> Reduction {
        if self.polarity == Polarity::NotIn || !leaf.is_scalar_leaf() {
            return Reduction::Untouched;
        }

        let rest: BTreeSet<_> = self
            .values
            .iter()
            .filter(|value| !leaf.admits(value))
            .cloned()
            .collect();

        finite_outcome(rest, self.values.len(), Polarity::In, self.value_form)
    }

    /// Exact union with a non-discrete scalar leaf, when expressible.
    pub(crate) fn merge_leaf(&self, other: &Criterion) -> Option<Criterion> {
        if !other.is_scalar_leaf() {
            return None;
        }

        match self.polarity {
            Polarity::In => {
                if self.values.iter().all(|value| other.admits(value)) {
                    return Some(other.clone());
                }

                match other {
                    Criterion::InRange(range) => {
                        let points: Vec<Scalar> = self.values.iter().cloned().collect();
                        range.absorb(&points).map(Criterion::InRange)
                    }
                    _ => None,
                }
            }
            // ¬A ∪ x = ¬(A \ x)
            Polarity::NotIn => {
                let rest = self
                    .values
                    .iter()
                    .filter(|value| !other.admits(value))
                    .cloned()
                    .collect();
                Some(Self::build(Polarity::NotIn, rest, self.value_form))
            }
        }
    }

    /// Intersection with a non-discrete leaf.
    pub(crate) fn meet_leaf(&self, other: &Criterion) -> Meet {
        if !other.is_scalar_leaf() {
            // Scalars never match lists or records; negative sets match all of them.
            return match self.polarity {
                Polarity::In => Meet::Disjoint,
                Polarity::NotIn => Meet::Meet(other.clone()),
            };
        }

        match self.polarity {
            Polarity::In => {
                let hits = self.admitted_by(other);
                if hits.is_empty() {
                    Meet::Disjoint
                } else {
                    Meet::Meet(Self::build(Polarity::In, hits, self.value_form))
                }
            }
            // x ∩ ¬A = x \ A
            Polarity::NotIn => {
                let positive = Self {
                    polarity: Polarity::In,
                    values: self.values.clone(),
                    value_form: self.value_form,
                };
                match positive.reduce_leaf(other) {
                    Reduction::Removed => Meet::Disjoint,
                    Reduction::Untouched => Meet::Meet(other.clone()),
                    Reduction::Remainder(rest) => Meet::Meet(rest),
                }
            }
        }
    }
}

// Classify what is left of a finite minuend of `original_len` members.
fn finite_outcome(
    rest: BTreeSet<Scalar>,
    original_len: usize,
    polarity: Polarity,
    value_form: bool,
) -> Reduction {
    if rest.is_empty() {
        Reduction::Removed
    } else if rest.len() == original_len {
        Reduction::Untouched
    } else {
        Reduction::Remainder(Discrete::build(polarity, rest, value_form))
    }
}
