use crate::criterion::{Criterion, named, set::Discrete};

impl Criterion {
    /// Single criterion matching exactly the union of both.
    ///
    /// Returns `None` when only a disjunction could express the union.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Option<Self> {
        if self == other {
            return Some(self.clone());
        }

        match (self, other) {
            (Self::Any, _) | (_, Self::Any) => return Some(Self::Any),
            (Self::Never, kept) | (kept, Self::Never) => return Some(kept.clone()),
            _ => {}
        }

        // subsumption
        if other.reduce(self).is_removed() {
            return Some(other.clone());
        }
        if self.reduce(other).is_removed() {
            return Some(self.clone());
        }

        match (self, other) {
            (Self::Or(items), incoming) | (incoming, Self::Or(items)) => absorb(items, incoming),
            (Self::Some(mine), Self::Some(theirs)) => mine.merge(theirs).map(Self::some),
            (Self::Named(mine), Self::Named(theirs)) => named::merge(mine, theirs),
            (Self::And(_), _) | (_, Self::And(_)) => None,
            _ => self.merge_leaf(other),
        }
    }

    fn merge_leaf(&self, other: &Self) -> Option<Self> {
        match (Discrete::of(self), Discrete::of(other)) {
            (Some(mine), Some(theirs)) => return Some(mine.merge(&theirs)),
            (Some(mine), None) => return mine.merge_leaf(other),
            (None, Some(theirs)) => return theirs.merge_leaf(self),
            (None, None) => {}
        }

        match (self, other) {
            (Self::InRange(mine), Self::InRange(theirs)) => mine.merge(theirs).map(Self::InRange),
            _ => None,
        }
    }
}

// Fold every branch of `incoming` into some slot of the disjunction.
fn absorb(items: &[Criterion], incoming: &Criterion) -> Option<Criterion> {
    let mut slots = items.to_vec();
    let branches = match incoming {
        Criterion::Or(branches) => branches.to_vec(),
        single => vec![single.clone()],
    };

    for branch in &branches {
        let (index, merged) = slots
            .iter()
            .enumerate()
            .find_map(|(index, slot)| slot.merge(branch).map(|merged| (index, merged)))?;
        slots[index] = merged;
    }

    Some(Criterion::any_of(slots))
}
