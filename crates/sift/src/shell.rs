//! Module: shell
//! Responsibility: one-line commands over the algebra, rendered as text.
//! Does not own: line editing or history, which live in the binary.
//!
//! Two-operand commands separate their operands with `;`:
//!
//! ```text
//! reduce {a: [1, 9]} ; {a: [0, 10]}
//! match {a: even} ; {"a": 4}
//! ```

use crate::{
    Error,
    core::{
        config::{ReshapeLimits, SiftConfig},
        criterion::Criterion,
        grammar,
        shape::Shape,
        value::Value,
    },
};
use thiserror::Error as ThisError;

const HELP: &str = "\
commands:
  parse <c>              canonical form of <c>
  kinds <c>              value kinds <c> can match
  invert <c>             complement of <c>
  reduce <a> ; <b>       what of <b> is left once <a> is served
  subtract <a> ; <b>     <a> minus <b>
  merge <a> ; <b>        single criterion for <a> or <b>
  intersect <a> ; <b>    single criterion for <a> and <b>
  match <c> ; <json>     evaluate <c> against a JSON value
  reshape <json> ; <c>   split <c> against a JSON shape
  help                   this text";

///
/// ShellError
///

#[derive(Debug, ThisError)]
pub enum ShellError {
    #[error("unknown command '{0}', try 'help'")]
    UnknownCommand(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Sift(#[from] Error),
}

///
/// Shell
///
/// Stateless apart from the limits parsing and reshaping run under.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct Shell {
    config: SiftConfig,
}

impl Shell {
    #[must_use]
    pub const fn new(config: SiftConfig) -> Self {
        Self { config }
    }

    /// Run one command line. Blank lines produce no output.
    pub fn execute(&self, line: &str) -> Result<Option<String>, ShellError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (command, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(command, rest)| (command, rest.trim()));

        let output = match command {
            "help" => HELP.to_string(),
            "parse" => self.criterion(rest, "parse <c>")?.to_string(),
            "kinds" => self.criterion(rest, "kinds <c>")?.value_kinds().to_string(),
            "invert" => self
                .criterion(rest, "invert <c>")?
                .invert()
                .map_err(Error::from)?
                .to_string(),
            "reduce" => {
                let (a, b) = self.pair(rest, "reduce <a> ; <b>")?;
                a.reduce(&b).to_string()
            }
            "subtract" => {
                let (a, b) = self.pair(rest, "subtract <a> ; <b>")?;
                a.subtract_from(&b).to_string()
            }
            "merge" => {
                let (a, b) = self.pair(rest, "merge <a> ; <b>")?;
                a.merge(&b)
                    .map_or_else(|| "no single criterion".to_string(), |m| m.to_string())
            }
            "intersect" => {
                let (a, b) = self.pair(rest, "intersect <a> ; <b>")?;
                match a.intersect(&b) {
                    Some(both) => both.to_string(),
                    None if a.is_disjoint(&b) => "disjoint".to_string(),
                    None => "no single criterion".to_string(),
                }
            }
            "match" => {
                let (c, json) = split(rest, "match <c> ; <json>")?;
                let value = Value::from(serde_json::from_str::<serde_json::Value>(json)?);
                self.criterion(c, "match <c> ; <json>")?
                    .matches(&value)
                    .to_string()
            }
            "reshape" => {
                let (json, c) = split(rest, "reshape <json> ; <c>")?;
                let shape: Shape = serde_json::from_str(json)?;
                let c = self.criterion(c, "reshape <json> ; <c>")?;
                render_reshape(&shape, &c, &self.config.reshape)
            }
            other => return Err(ShellError::UnknownCommand(other.to_string())),
        };

        Ok(Some(output))
    }

    fn criterion(&self, text: &str, usage: &'static str) -> Result<Criterion, ShellError> {
        if text.is_empty() {
            return Err(ShellError::Usage(usage));
        }

        grammar::parse_with(text, &self.config.grammar)
            .map_err(|err| ShellError::Sift(err.into()))
    }

    fn pair(&self, text: &str, usage: &'static str) -> Result<(Criterion, Criterion), ShellError> {
        let (a, b) = split(text, usage)?;

        Ok((self.criterion(a, usage)?, self.criterion(b, usage)?))
    }
}

// Split at the last `;`; only the left operand may contain one.
fn split<'a>(text: &'a str, usage: &'static str) -> Result<(&'a str, &'a str), ShellError> {
    text.rsplit_once(';')
        .map(|(left, right)| (left.trim(), right.trim()))
        .filter(|(left, right)| !left.is_empty() && !right.is_empty())
        .ok_or(ShellError::Usage(usage))
}

fn render_reshape(shape: &Shape, criterion: &Criterion, limits: &ReshapeLimits) -> String {
    let Some(reshaped) = shape.reshape_with(criterion, limits) else {
        return "nothing matched".to_string();
    };

    let mut lines = Vec::with_capacity(reshaped.matched().len() + reshaped.open().len());
    lines.extend(reshaped.matched().iter().map(|c| format!("matched {c}")));
    lines.extend(reshaped.open().iter().map(|c| format!("open    {c}")));

    lines.join("\n")
}

///
/// TESTS
///
