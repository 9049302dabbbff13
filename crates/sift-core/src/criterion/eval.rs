use crate::{
    criterion::Criterion,
    value::{Scalar, Value},
};

impl Criterion {
    /// Evaluate against a runtime value.
    #[must_use]
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Never => false,
            Self::Is(expected) => expected.eq_value(value),
            Self::Not(excluded) => !excluded.eq_value(value),
            Self::InSet(_) | Self::InRange(_) | Self::Parity(_) => {
                value.to_scalar().is_some_and(|scalar| self.admits(&scalar))
            }
            Self::NotInSet(values) => value
                .to_scalar()
                .is_none_or(|scalar| !values.contains(&scalar)),
            Self::Some(inner) => match value {
                Value::List(items) => items.iter().any(|item| inner.matches(item)),
                _ => false,
            },
            Self::And(items) => items.iter().all(|item| item.matches(value)),
            Self::Or(items) => items.iter().any(|item| item.matches(value)),
            Self::Named(fields) => match value {
                Value::Record(record) => fields
                    .iter()
                    .all(|(key, criterion)| criterion.matches(record.get(key).unwrap_or(&Value::Null))),
                _ => false,
            },
        }
    }

    /// Evaluate against a scalar. Lists and records are never scalars, so
    /// `Some` and `Named` admit nothing here.
    pub(crate) fn admits(&self, scalar: &Scalar) -> bool {
        match self {
            Self::Any => true,
            Self::Never | Self::Some(_) | Self::Named(_) => false,
            Self::Is(expected) => expected == scalar,
            Self::Not(excluded) => excluded != scalar,
            Self::InSet(values) => values.contains(scalar),
            Self::NotInSet(values) => !values.contains(scalar),
            Self::InRange(range) => range.contains(scalar),
            Self::Parity(parity) => parity.admits(scalar),
            Self::And(items) => items.iter().all(|item| item.admits(scalar)),
            Self::Or(items) => items.iter().any(|item| item.admits(scalar)),
        }
    }
}
