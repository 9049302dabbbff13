use crate::value::Scalar;
use derive_more::Display;

///
/// Parity
///
/// Even/odd predicate over integral numbers.
/// Non-integral numbers and other kinds match neither.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Parity {
    #[display("even")]
    Even,

    #[display("odd")]
    Odd,
}

impl Parity {
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Even => Self::Odd,
            Self::Odd => Self::Even,
        }
    }

    #[must_use]
    pub fn admits(self, value: &Scalar) -> bool {
        let Some(number) = value.as_number() else {
            return false;
        };
        if !number.is_integral() {
            return false;
        }

        let even = number.get() % 2.0 == 0.0;
        match self {
            Self::Even => even,
            Self::Odd => !even,
        }
    }
}
