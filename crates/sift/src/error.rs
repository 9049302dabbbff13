use derive_more::Display;
use serde::{Deserialize, Serialize};
use sift_core::{config::ConfigError, error::CriterionError, grammar::ParseError};
use thiserror::Error as ThisError;

///
/// Error
/// Public error type with a stable kind taxonomy.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize, ThisError)]
#[error("{message}")]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
}

impl Error {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<CriterionError> for Error {
    fn from(err: CriterionError) -> Self {
        let kind = if err.is_not_invertible() {
            ErrorKind::NotInvertible
        } else {
            ErrorKind::Construction
        };

        Self::new(kind, err.to_string())
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::new(ErrorKind::Parse, err.to_string())
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorKind::Config, err.to_string())
    }
}

///
/// ErrorKind
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
pub enum ErrorKind {
    /// A criterion was built from invalid parts.
    Construction,

    /// The criterion has no closed-form complement.
    NotInvertible,

    /// Criterion text is malformed.
    Parse,

    /// Configuration failed to load or validate.
    Config,
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::criterion::Criterion, load_config, parse};

    #[test]
    fn core_errors_map_to_kinds() {
        let err: Error = Criterion::and(Vec::new()).unwrap_err().into();
        assert_eq!(err.kind, ErrorKind::Construction);

        let err: Error = Criterion::some(Criterion::Any).invert().unwrap_err().into();
        assert_eq!(err.kind, ErrorKind::NotInvertible);

        assert_eq!(parse("[1,").unwrap_err().kind, ErrorKind::Parse);
        assert_eq!(
            load_config("[reshape]\nmax_permutations = 0").unwrap_err().kind,
            ErrorKind::Config
        );
    }

    #[test]
    fn message_is_the_display_form() {
        let err = parse("").unwrap_err();

        assert_eq!(err.to_string(), "unexpected end of input at offset 0");
    }

    #[test]
    fn errors_serialize_with_their_kind() {
        let err = Error::new(ErrorKind::Parse, "bad");
        let json = serde_json::to_string(&err).unwrap();

        assert_eq!(json, r#"{"kind":"Parse","message":"bad"}"#);
        assert_eq!(serde_json::from_str::<Error>(&json).unwrap(), err);
    }
}
