//! Module: criterion::named
//! Responsibility: field-bag criteria over records and their per-key laws.
//! Does not own: per-value laws, which recurse into the field criteria.
//!
//! A bag is a conjunction over record fields. A record missing a field is
//! evaluated as if the field held `null`.

use crate::{
    criterion::{Criterion, Reduction, intersect::Meet},
    error::CriterionError,
};
use derive_more::Deref;
use std::collections::BTreeMap;

// Field value of a bag that does not constrain the field.
static UNCONSTRAINED: Criterion = Criterion::Any;

///
/// NamedCriteria
///
/// Non-empty map of field name to criterion, ordered by field name.
///

#[derive(Clone, Debug, Deref, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NamedCriteria(BTreeMap<String, Criterion>);

impl NamedCriteria {
    /// Build a bag, rejecting empty input and repeated field names.
    pub fn new<K, I>(fields: I) -> Result<Self, CriterionError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Criterion)>,
    {
        let mut map = BTreeMap::new();
        for (key, criterion) in fields {
            let key = key.into();
            if map.contains_key(&key) {
                return Err(CriterionError::DuplicateField { field: key });
            }
            map.insert(key, criterion);
        }

        if map.is_empty() {
            return Err(CriterionError::EmptyNamed);
        }

        Ok(Self(map))
    }

    // Callers guarantee at least one field.
    pub(crate) const fn from_map(map: BTreeMap<String, Criterion>) -> Self {
        Self(map)
    }

    pub(crate) fn field(&self, key: &str) -> &Criterion {
        self.0.get(key).unwrap_or(&UNCONSTRAINED)
    }

    fn with_field(&self, key: &str, criterion: Criterion) -> Self {
        let mut map = self.0.clone();
        map.insert(key.to_string(), criterion);

        Self(map)
    }
}

impl Criterion {
    /// Bag of per-field criteria, all of which must match.
    pub fn named<K, I>(fields: I) -> Result<Self, CriterionError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Self)>,
    {
        NamedCriteria::new(fields).map(Self::Named)
    }
}

/// `minuend \ subtrahend` for two bags.
pub(crate) fn reduce(subtrahend: &NamedCriteria, minuend: &NamedCriteria) -> Reduction {
    let mut partial: Vec<(&str, Criterion)> = Vec::new();

    for (key, mine) in subtrahend.iter() {
        match mine.reduce(minuend.field(key)) {
            Reduction::Removed => {}
            Reduction::Untouched => return Reduction::Untouched,
            Reduction::Remainder(rest) => partial.push((key.as_str(), rest)),
        }
    }

    if partial.is_empty() {
        return Reduction::Removed;
    }

    // Candidate i keeps the residual at key i, the overlap at earlier keys,
    // and the minuend's value everywhere else, so candidates never overlap.
    let mut candidates = Vec::with_capacity(partial.len());
    'candidates: for (index, (key, rest)) in partial.iter().enumerate() {
        let mut bag = minuend.with_field(key, rest.clone());

        for (earlier, _) in &partial[..index] {
            let theirs = minuend.field(earlier);
            let overlap = match theirs.meet(subtrahend.field(earlier)) {
                Meet::Disjoint => continue 'candidates,
                Meet::Inexpressible => theirs.clone(),
                Meet::Meet(overlap) => overlap,
            };
            bag = bag.with_field(earlier, overlap);
        }

        candidates.push(Criterion::Named(bag));
    }

    let minuend = Criterion::Named(minuend.clone());
    Reduction::from_residual(Criterion::any_of(candidates), &minuend)
}

/// Exact union of two bags that differ in at most one field.
pub(crate) fn merge(a: &NamedCriteria, b: &NamedCriteria) -> Option<Criterion> {
    if !a.keys().eq(b.keys()) {
        return None;
    }

    let mut differing: Option<(&str, Criterion)> = None;
    for (key, mine) in a.iter() {
        let theirs = b.field(key);
        if mine.equivalent(theirs) {
            continue;
        }
        if differing.is_some() {
            return None;
        }
        differing = Some((key.as_str(), mine.merge(theirs)?));
    }

    Some(Criterion::Named(match differing {
        Some((key, merged)) => a.with_field(key, merged),
        None => a.clone(),
    }))
}

/// Field-wise intersection over the union of both key sets.
pub(crate) fn meet(a: &NamedCriteria, b: &NamedCriteria) -> Meet {
    let mut map = a.0.clone();

    for (key, theirs) in b.iter() {
        let Some(mine) = a.get(key) else {
            map.insert(key.clone(), theirs.clone());
            continue;
        };

        let field = match mine.meet(theirs) {
            Meet::Disjoint => return Meet::Disjoint,
            Meet::Inexpressible => Criterion::all_of(vec![mine.clone(), theirs.clone()]),
            Meet::Meet(both) => both,
        };
        map.insert(key.clone(), field);
    }

    Meet::Meet(Criterion::Named(NamedCriteria(map)))
}

/// De Morgan over fields: `!{a: A, b: B}` is `{a: !A} | {b: !B}`.
pub(crate) fn invert(bag: &NamedCriteria) -> Result<Criterion, CriterionError> {
    let mut branches = Vec::with_capacity(bag.len());

    for (key, criterion) in bag.iter() {
        let inverted = criterion.invert()?;
        if inverted == Criterion::Never {
            continue;
        }

        let field = BTreeMap::from([(key.clone(), inverted)]);
        branches.push(Criterion::Named(NamedCriteria(field)));
    }

    Ok(Criterion::any_of(branches))
}
