//! Ordered ranges over numbers or text.
//!
//! A missing bound is open-ended. All arithmetic keeps results inside the
//! bound kind: ranges over different kinds never overlap.

use crate::{error::CriterionError, value::Scalar};
use sift_primitives::ValueKind;
use std::{cmp::Ordering, fmt};

///
/// Bound
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Bound {
    value: Scalar,
    inclusive: bool,
}

impl Bound {
    #[must_use]
    pub fn inclusive(value: impl Into<Scalar>) -> Self {
        Self {
            value: value.into(),
            inclusive: true,
        }
    }

    #[must_use]
    pub fn exclusive(value: impl Into<Scalar>) -> Self {
        Self {
            value: value.into(),
            inclusive: false,
        }
    }

    #[must_use]
    pub const fn value(&self) -> &Scalar {
        &self.value
    }

    #[must_use]
    pub const fn is_inclusive(&self) -> bool {
        self.inclusive
    }

    // Same point, opposite side: the complement of `[x` is `x)`.
    fn flipped(&self) -> Self {
        Self {
            value: self.value.clone(),
            inclusive: !self.inclusive,
        }
    }

    fn closed(&self) -> Self {
        Self {
            value: self.value.clone(),
            inclusive: true,
        }
    }
}

/// Order two lower bounds; open is lowest, and for equal values an
/// inclusive bound starts earlier.
pub(crate) fn cmp_lower(a: Option<&Bound>, b: Option<&Bound>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a
            .value
            .cmp(&b.value)
            .then_with(|| b.inclusive.cmp(&a.inclusive)),
    }
}

/// Order two upper bounds; open is highest, and for equal values an
/// exclusive bound ends earlier.
pub(crate) fn cmp_upper(a: Option<&Bound>, b: Option<&Bound>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a
            .value
            .cmp(&b.value)
            .then_with(|| a.inclusive.cmp(&b.inclusive)),
    }
}

/// Returns `true` when some value lies between `lower` and `upper`.
pub(crate) fn lower_reaches_upper(lower: Option<&Bound>, upper: Option<&Bound>) -> bool {
    match (lower, upper) {
        (Some(lower), Some(upper)) => match lower.value.cmp(&upper.value) {
            Ordering::Less => true,
            Ordering::Equal => lower.inclusive && upper.inclusive,
            Ordering::Greater => false,
        },
        _ => true,
    }
}

/// Returns `true` when `upper` ends exactly where `lower` begins, with no gap
/// and no overlap.
pub(crate) fn touches(upper: Option<&Bound>, lower: Option<&Bound>) -> bool {
    match (upper, lower) {
        (Some(upper), Some(lower)) => {
            upper.value == lower.value && upper.inclusive != lower.inclusive
        }
        _ => false,
    }
}

///
/// Range
///
/// Non-empty interval with at least one bound.
/// Both bounds share one orderable kind.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Range {
    from: Option<Bound>,
    to: Option<Bound>,
}

impl Range {
    /// Build a validated range.
    pub fn new(from: Option<Bound>, to: Option<Bound>) -> Result<Self, CriterionError> {
        let kind = match (&from, &to) {
            (None, None) => return Err(CriterionError::UnboundedRange),
            (Some(from), Some(to)) => {
                let (from_kind, to_kind) = (from.value.kind(), to.value.kind());
                if from_kind != to_kind {
                    return Err(CriterionError::MixedBoundKinds {
                        from: from_kind,
                        to: to_kind,
                    });
                }
                from_kind
            }
            (Some(bound), None) | (None, Some(bound)) => bound.value.kind(),
        };

        if !kind.supports_ordering() {
            return Err(CriterionError::UnorderedBound { kind });
        }

        let range = Self { from, to };
        if !lower_reaches_upper(range.from.as_ref(), range.to.as_ref()) {
            return Err(CriterionError::EmptyRange {
                range: range.to_string(),
            });
        }

        Ok(range)
    }

    /// Closed range `[from, to]`.
    pub fn between(from: impl Into<Scalar>, to: impl Into<Scalar>) -> Result<Self, CriterionError> {
        Self::new(Some(Bound::inclusive(from)), Some(Bound::inclusive(to)))
    }

    #[must_use]
    pub const fn from(&self) -> Option<&Bound> {
        self.from.as_ref()
    }

    #[must_use]
    pub const fn to(&self) -> Option<&Bound> {
        self.to.as_ref()
    }

    /// Kind shared by both bounds.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        self.from
            .as_ref()
            .or(self.to.as_ref())
            .map_or(ValueKind::Number, |bound| bound.value.kind())
    }

    #[must_use]
    pub fn contains(&self, value: &Scalar) -> bool {
        if value.kind() != self.kind() {
            return false;
        }

        let above_from = self.from.as_ref().is_none_or(|from| match value.cmp(&from.value) {
            Ordering::Greater => true,
            Ordering::Equal => from.inclusive,
            Ordering::Less => false,
        });
        let below_to = self.to.as_ref().is_none_or(|to| match value.cmp(&to.value) {
            Ordering::Less => true,
            Ordering::Equal => to.inclusive,
            Ordering::Greater => false,
        });

        above_from && below_to
    }

    // Unchecked parts: at least one bound is present by construction.
    fn checked(from: Option<Bound>, to: Option<Bound>) -> Option<Self> {
        if from.is_none() && to.is_none() {
            return None;
        }

        lower_reaches_upper(from.as_ref(), to.as_ref()).then_some(Self { from, to })
    }

    /// Overlap of two ranges, if any.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        if self.kind() != other.kind() {
            return None;
        }

        let from = match cmp_lower(self.from(), other.from()) {
            Ordering::Less => other.from.clone(),
            _ => self.from.clone(),
        };
        let to = match cmp_upper(self.to(), other.to()) {
            Ordering::Greater => other.to.clone(),
            _ => self.to.clone(),
        };

        Self::checked(from, to)
    }

    /// Exact union when the ranges overlap or touch.
    ///
    /// Returns `None` for a gap, or when the union would be unbounded on both
    /// sides.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Option<Self> {
        if self.kind() != other.kind() {
            return None;
        }

        let (first, second) = match cmp_lower(self.from(), other.from()) {
            Ordering::Greater => (other, self),
            _ => (self, other),
        };

        let joined = lower_reaches_upper(second.from(), first.to())
            || touches(first.to(), second.from());
        if !joined {
            return None;
        }

        let to = match cmp_upper(first.to(), second.to()) {
            Ordering::Less => second.to.clone(),
            _ => first.to.clone(),
        };

        Self::checked(first.from.clone(), to)
    }

    /// Complement within the bound kind: up to two half-open ranges.
    #[must_use]
    pub fn complement(&self) -> Vec<Self> {
        let head = self.from.as_ref().map(|from| Self {
            from: None,
            to: Some(from.flipped()),
        });
        let tail = self.to.as_ref().map(|to| Self {
            from: Some(to.flipped()),
            to: None,
        });

        head.into_iter().chain(tail).collect()
    }

    /// Pieces of `self` not covered by `other`, in ascending order.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Vec<Self> {
        if self.intersect(other).is_none() {
            return vec![self.clone()];
        }

        other
            .complement()
            .iter()
            .filter_map(|piece| self.intersect(piece))
            .collect()
    }

    /// Remove single points from the range.
    #[must_use]
    pub fn split_at(&self, points: &[Scalar]) -> Vec<Self> {
        let mut pieces = vec![self.clone()];

        for point in points {
            let hole = Self {
                from: Some(Bound::inclusive(point.clone())),
                to: Some(Bound::inclusive(point.clone())),
            };
            pieces = pieces
                .into_iter()
                .flat_map(|piece| {
                    if piece.contains(point) {
                        piece.subtract(&hole)
                    } else {
                        vec![piece]
                    }
                })
                .collect();
        }

        pieces
    }

    /// Extend the range with points, closing an excluded bound a point sits on.
    ///
    /// Returns `None` when some point is neither inside nor on a bound.
    #[must_use]
    pub fn absorb(&self, points: &[Scalar]) -> Option<Self> {
        let mut range = self.clone();

        for point in points {
            if range.contains(point) {
                continue;
            }

            let on_from = range.from.as_ref().is_some_and(|from| from.value == *point);
            let on_to = range.to.as_ref().is_some_and(|to| to.value == *point);

            if on_from {
                range.from = range.from.as_ref().map(Bound::closed);
            } else if on_to {
                range.to = range.to.as_ref().map(Bound::closed);
            } else {
                return None;
            }
        }

        Some(range)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.from {
            Some(from) => write!(f, "{}{}", if from.inclusive { '[' } else { '(' }, from.value)?,
            None => f.write_str("(...")?,
        }
        f.write_str(", ")?;
        match &self.to {
            Some(to) => write!(f, "{}{}", to.value, if to.inclusive { ']' } else { ')' }),
            None => f.write_str("...)"),
        }
    }
}
