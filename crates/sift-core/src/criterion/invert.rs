use crate::{
    criterion::{Criterion, named},
    error::CriterionError,
};

impl Criterion {
    /// Logical complement.
    ///
    /// Ranges and parity complement within their own kind, and bags within
    /// records: `!(1, 5)` matches numbers only. `Some` has no closed-form
    /// complement and fails with `NotInvertible`, as does any composite
    /// holding one.
    pub fn invert(&self) -> Result<Self, CriterionError> {
        Ok(match self {
            Self::Any => Self::Never,
            Self::Never => Self::Any,
            Self::Is(value) => Self::Not(value.clone()),
            Self::Not(value) => Self::Is(value.clone()),
            Self::InSet(values) => Self::NotInSet(values.clone()),
            Self::NotInSet(values) => Self::InSet(values.clone()),
            Self::InRange(range) => {
                Self::any_of(range.complement().into_iter().map(Self::InRange).collect())
            }
            Self::Parity(parity) => Self::Parity(parity.inverse()),
            Self::Some(_) => return Err(CriterionError::not_invertible(self)),
            Self::And(items) => Self::any_of(
                items
                    .iter()
                    .map(Self::invert)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Self::Or(items) => Self::all_of(
                items
                    .iter()
                    .map(Self::invert)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            Self::Named(bag) => named::invert(bag)?,
        })
    }

    /// Complement over every value kind, when one is expressible.
    pub(crate) fn complement(&self) -> Option<Self> {
        match self {
            Self::Any
            | Self::Never
            | Self::Is(_)
            | Self::Not(_)
            | Self::InSet(_)
            | Self::NotInSet(_) => self.invert().ok(),
            Self::And(items) => items
                .iter()
                .map(Self::complement)
                .collect::<Option<Vec<_>>>()
                .map(Self::any_of),
            Self::Or(items) => items
                .iter()
                .map(Self::complement)
                .collect::<Option<Vec<_>>>()
                .map(Self::all_of),
            Self::InRange(_) | Self::Parity(_) | Self::Some(_) | Self::Named(_) => None,
        }
    }
}
