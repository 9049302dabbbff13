//! Module: criterion::reduce
//! Responsibility: subtraction (`other \ self`) across every variant pair.
//! Does not own: the set and range arithmetic it delegates to.

use crate::criterion::{Criterion, Reduction, named, set::Discrete};

impl Criterion {
    /// What of `other` remains once `self` is available (`other \ self`).
    #[must_use]
    pub fn reduce(&self, other: &Self) -> Reduction {
        if self == other {
            return Reduction::Removed;
        }

        match (self, other) {
            (Self::Any, _) | (_, Self::Never) => return Reduction::Removed,
            (Self::Never, _) => return Reduction::Untouched,
            (_, Self::Any) => {
                return self
                    .complement()
                    .map_or(Reduction::Untouched, |rest| Reduction::from_residual(rest, other));
            }
            _ => {}
        }

        match (self, other) {
            (_, Self::Or(branches)) => self.reduce_branches(branches, other),
            (Self::Or(items), _) => reduce_by_each(items, other),
            (Self::And(items), _) => reduce_by_all(items, other),
            (_, Self::And(items)) => self.reduce_conjunction(items),
            (Self::Named(mine), Self::Named(theirs)) => named::reduce(mine, theirs),
            (Self::Some(mine), Self::Some(theirs)) => match mine.reduce(theirs) {
                // a partial element match needs an "every element" quantifier
                Reduction::Removed => Reduction::Removed,
                _ => Reduction::Untouched,
            },
            _ => self.reduce_leaf(other),
        }
    }

    // other = b1 | b2 | ...: subtract from each branch independently.
    fn reduce_branches(&self, branches: &[Self], other: &Self) -> Reduction {
        let mut survivors = Vec::with_capacity(branches.len());

        for branch in branches {
            match self.reduce(branch) {
                Reduction::Removed => {}
                Reduction::Untouched => survivors.push(branch.clone()),
                Reduction::Remainder(rest) => survivors.push(rest),
            }
        }

        Reduction::from_residual(Self::any_of(survivors), other)
    }

    // other = b1 & b2 & ...: a covered child covers the conjunction.
    fn reduce_conjunction(&self, items: &[Self]) -> Reduction {
        let reductions: Vec<Reduction> = items.iter().map(|item| self.reduce(item)).collect();

        if reductions.iter().any(Reduction::is_removed) {
            return Reduction::Removed;
        }
        if reductions.iter().any(Reduction::is_untouched) {
            return Reduction::Untouched;
        }

        let mut children = items.to_vec();
        if let Some(rest) = reductions.into_iter().find_map(|reduction| match reduction {
            Reduction::Remainder(rest) => Some(rest),
            _ => None,
        }) {
            children[0] = rest;
        }

        Reduction::Remainder(Self::all_of(children))
    }

    fn reduce_leaf(&self, other: &Self) -> Reduction {
        if self
            .value_kinds()
            .intersection(other.value_kinds())
            .is_empty()
        {
            return Reduction::Untouched;
        }

        match (Discrete::of(self), Discrete::of(other)) {
            (Some(mine), Some(theirs)) => return mine.reduce(&theirs),
            (Some(mine), None) => return mine.reduce_leaf(other),
            (None, Some(theirs)) => return theirs.reduce_by_leaf(self),
            (None, None) => {}
        }

        match (self, other) {
            (Self::InRange(mine), Self::InRange(theirs)) => {
                if mine.intersect(theirs).is_none() {
                    return Reduction::Untouched;
                }

                let pieces = theirs.subtract(mine);
                Reduction::from_residual(
                    Self::any_of(pieces.into_iter().map(Self::InRange).collect()),
                    other,
                )
            }
            // parity against parity is either equal or disjoint; the rest
            // (parity against range, bags against lists) has no law
            _ => Reduction::Untouched,
        }
    }
}

// self = a1 | a2 | ...: each branch takes its share in turn.
fn reduce_by_each(items: &[Criterion], other: &Criterion) -> Reduction {
    let mut rest = other.clone();

    for item in items {
        match item.reduce(&rest) {
            Reduction::Removed => return Reduction::Removed,
            Reduction::Untouched => {}
            Reduction::Remainder(next) => rest = next,
        }
    }

    Reduction::from_residual(rest, other)
}

// self = a1 & a2 & ...: other \ (a1 & a2) = (other \ a1) | (other \ a2).
fn reduce_by_all(items: &[Criterion], other: &Criterion) -> Reduction {
    let mut pieces = Vec::with_capacity(items.len());

    for item in items {
        match item.reduce(other) {
            Reduction::Removed => {}
            Reduction::Untouched => return Reduction::Untouched,
            Reduction::Remainder(rest) => pieces.push(rest),
        }
    }

    Reduction::from_residual(Criterion::any_of(pieces), other)
}
