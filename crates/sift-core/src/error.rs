use crate::criterion::Combinator;
use sift_primitives::ValueKind;
use thiserror::Error as ThisError;

///
/// CriterionError
///
/// Construction and inversion failures.
/// Construction errors are programmer errors and are never retried; an
/// inversion failure tells the caller that no closed-form complement exists.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CriterionError {
    #[error("{combinator} criteria require at least one item")]
    EmptyComposite { combinator: Combinator },

    #[error("named criteria require at least one field")]
    EmptyNamed,

    #[error("named criteria contain duplicate field '{field}'")]
    DuplicateField { field: String },

    #[error("range criteria require at least one bound")]
    UnboundedRange,

    #[error("range bounds must be numbers or text, found {kind}")]
    UnorderedBound { kind: ValueKind },

    #[error("range bounds must share one kind, found {from} and {to}")]
    MixedBoundKinds { from: ValueKind, to: ValueKind },

    #[error("range {range} is empty")]
    EmptyRange { range: String },

    #[error("numbers must be finite")]
    NonFiniteNumber,

    #[error("criterion {criterion} is not invertible")]
    NotInvertible { criterion: String },
}

impl CriterionError {
    pub(crate) fn not_invertible(criterion: &impl ToString) -> Self {
        Self::NotInvertible {
            criterion: criterion.to_string(),
        }
    }

    /// Returns `true` for the inversion failure, the only non-construction error.
    #[must_use]
    pub const fn is_not_invertible(&self) -> bool {
        matches!(self, Self::NotInvertible { .. })
    }
}
