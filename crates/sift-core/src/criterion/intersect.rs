//! Module: criterion::intersect
//! Responsibility: intersection across every variant pair.

use crate::criterion::{Criterion, named, set::Discrete};

///
/// Meet
///
/// Internal intersection outcome. Keeps "provably empty" apart from "no
/// single criterion expresses it", which callers treat differently.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Meet {
    Disjoint,
    Inexpressible,
    Meet(Criterion),
}

impl Criterion {
    /// Criterion matching exactly what both match.
    ///
    /// Returns `None` when the two are disjoint, or when no single criterion
    /// expresses their overlap.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        match self.meet(other) {
            Meet::Meet(both) => Some(both),
            Meet::Disjoint | Meet::Inexpressible => None,
        }
    }

    /// Returns `true` when the algebra proves the two share no value.
    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.meet(other) == Meet::Disjoint
    }

    // Operands are put in canonical order first, so `a.meet(b)` and
    // `b.meet(a)` run the same computation.
    pub(crate) fn meet(&self, other: &Self) -> Meet {
        if self == other {
            return Meet::Meet(self.clone());
        }

        let (first, second) = if self < other { (self, other) } else { (other, self) };
        first.meet_ordered(second)
    }

    fn meet_ordered(&self, other: &Self) -> Meet {
        match (self, other) {
            (Self::Never, _) | (_, Self::Never) => return Meet::Disjoint,
            (Self::Any, kept) | (kept, Self::Any) => return Meet::Meet(kept.clone()),
            _ => {}
        }

        if self
            .value_kinds()
            .intersection(other.value_kinds())
            .is_empty()
        {
            return Meet::Disjoint;
        }

        match (self, other) {
            (Self::Or(items), incoming) | (incoming, Self::Or(items)) => distribute(items, incoming),
            (Self::And(items), incoming) | (incoming, Self::And(items)) => fold(items, incoming),
            (Self::Named(mine), Self::Named(theirs)) => named::meet(mine, theirs),
            _ => self.meet_leaf(other),
        }
    }

    fn meet_leaf(&self, other: &Self) -> Meet {
        match (Discrete::of(self), Discrete::of(other)) {
            (Some(mine), Some(theirs)) => return mine.meet(&theirs),
            (Some(mine), None) => return mine.meet_leaf(other),
            (None, Some(theirs)) => return theirs.meet_leaf(self),
            (None, None) => {}
        }

        match (self, other) {
            (Self::InRange(mine), Self::InRange(theirs)) => mine
                .intersect(theirs)
                .map_or(Meet::Disjoint, |both| Meet::Meet(Self::InRange(both))),
            // distinct parities
            (Self::Parity(_), Self::Parity(_)) => Meet::Disjoint,
            _ => {
                if other.reduce(self).is_removed() {
                    Meet::Meet(self.clone())
                } else if self.reduce(other).is_removed() {
                    Meet::Meet(other.clone())
                } else {
                    Meet::Inexpressible
                }
            }
        }
    }
}

// (a1 | a2) & x = (a1 & x) | (a2 & x)
fn distribute(items: &[Criterion], incoming: &Criterion) -> Meet {
    let mut parts = Vec::with_capacity(items.len());

    for item in items {
        match item.meet(incoming) {
            Meet::Disjoint => {}
            Meet::Inexpressible => {
                parts.push(Criterion::all_of(vec![item.clone(), incoming.clone()]));
            }
            Meet::Meet(Criterion::Or(branches)) => parts.extend(branches.into_inner()),
            Meet::Meet(both) => parts.push(both),
        }
    }

    if parts.is_empty() {
        Meet::Disjoint
    } else {
        Meet::Meet(Criterion::any_of(drop_subsumed(parts)))
    }
}

// Drop every branch another kept branch covers: `{1} | {1, 2}` is `{1, 2}`.
fn drop_subsumed(mut parts: Vec<Criterion>) -> Vec<Criterion> {
    parts.sort();
    parts.dedup();

    let mut kept: Vec<Criterion> = Vec::with_capacity(parts.len());
    for part in parts {
        if kept.iter().any(|cover| cover.reduce(&part).is_removed()) {
            continue;
        }
        kept.retain(|covered| !part.reduce(covered).is_removed());
        kept.push(part);
    }

    kept
}
