//! Module: grammar
//! Responsibility: the textual criterion form: tokens, parsing, and the
//! error type for malformed input.
//! Does not own: printing, which is `Display` on `Criterion`.
//!
//! ```text
//! group     := conj ("|" conj)*
//! conj      := criterion ("&" criterion)*
//! criterion := "!" set | "!" value | range | named | set
//!            | "some" "(" group ")" | "(" group ")" | value
//! range     := ("[" | "(") endpoint "," endpoint ("]" | ")")
//! endpoint  := number | string | "..."
//! set       := "{" scalar ("," scalar)* "}"
//! named     := "{" key ":" group ("," key ":" group)* "}"
//! value     := scalar | "even" | "odd" | "any" | "never"
//! scalar    := number | string | "true" | "false" | "null"
//! ```

mod lexer;
mod parser;


use crate::{config::GrammarLimits, criterion::Criterion, error::CriterionError};
use thiserror::Error as ThisError;

///
/// ParseError
///
/// Malformed criterion text. `offset` is the byte offset of the offending
/// token or character.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub offset: usize,
}

impl ParseError {
    pub(crate) const fn new(kind: ParseErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

///
/// ParseErrorKind
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ParseErrorKind {
    #[error("unexpected token '{found}'")]
    UnexpectedToken { found: String },

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unterminated string")]
    UnterminatedString,

    #[error("invalid number '{text}'")]
    InvalidNumber { text: String },

    #[error("unexpected character '{found}'")]
    UnexpectedCharacter { found: char },

    #[error("groups nest deeper than {limit} levels")]
    TooDeep { limit: usize },

    #[error(transparent)]
    Construction(#[from] CriterionError),
}

/// Parse criterion text under the default limits.
pub fn parse(text: &str) -> Result<Criterion, ParseError> {
    parse_with(text, &GrammarLimits::default())
}

/// Parse criterion text, rejecting groups nested past `limits.max_depth`.
pub fn parse_with(text: &str, limits: &GrammarLimits) -> Result<Criterion, ParseError> {
    let tokens = lexer::Lexer::new(text).tokenize()?;
    tracing::trace!(tokens = tokens.len(), "parsing criterion");

    parser::Parser::new(&tokens, text.len(), limits.max_depth)
        .parse()
        .inspect_err(|error| tracing::debug!(%error, "criterion parse failed"))
}

/// Returns `true` when `text` can be written as a bare field key.
#[must_use]
pub fn is_ident(text: &str) -> bool {
    let mut chars = text.chars();

    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}
