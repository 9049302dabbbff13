//! Recursive descent over the token list.
//!
//! Alternatives are tried in order with an explicit save/restore of the
//! cursor. When every alternative fails, the error that got furthest into the
//! input is reported. Construction and depth errors commit: the syntax
//! matched, so no other alternative is tried.

use crate::{
    criterion::{Bound, Criterion, Range},
    error::CriterionError,
    grammar::{
        ParseError, ParseErrorKind,
        lexer::{Token, TokenKind},
    },
    value::Scalar,
};

type Alternative<'t> = fn(&mut Parser<'t>) -> Result<Criterion, ParseError>;

///
/// Parser
///

pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    end: usize,
    depth: usize,
    max_depth: usize,
}

impl<'t> Parser<'t> {
    pub(crate) const fn new(tokens: &'t [Token], end: usize, max_depth: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            depth: 0,
            max_depth,
        }
    }

    pub(crate) fn parse(mut self) -> Result<Criterion, ParseError> {
        let criterion = self.parse_group()?;

        match self.peek() {
            None => Ok(criterion),
            Some(token) => Err(Self::unexpected(token)),
        }
    }

    // ---------------------------------------------------------------------
    // Cursor
    // ---------------------------------------------------------------------

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn offset(&self) -> usize {
        self.peek().map_or(self.end, |token| token.offset)
    }

    fn advance(&mut self) -> Result<&'t Token, ParseError> {
        let token = self
            .peek()
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnexpectedEnd, self.end))?;
        self.pos += 1;

        Ok(token)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|token| token.kind == *kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        let token = self.advance()?;
        if token.kind == *kind {
            Ok(())
        } else {
            Err(Self::unexpected(token))
        }
    }

    fn unexpected(token: &Token) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                found: token.kind.to_string(),
            },
            token.offset,
        )
    }

    fn construction(offset: usize) -> impl FnOnce(CriterionError) -> ParseError {
        move |error| ParseError::new(ParseErrorKind::Construction(error), offset)
    }

    fn choice(&mut self, alternatives: &[Alternative<'t>]) -> Result<Criterion, ParseError> {
        let start = self.pos;
        let mut furthest: Option<ParseError> = None;

        for alternative in alternatives {
            match alternative(self) {
                Ok(criterion) => return Ok(criterion),
                Err(error)
                    if matches!(
                        error.kind,
                        ParseErrorKind::Construction(_) | ParseErrorKind::TooDeep { .. }
                    ) =>
                {
                    return Err(error);
                }
                Err(error) => {
                    self.pos = start;
                    if furthest
                        .as_ref()
                        .is_none_or(|best| error.offset > best.offset)
                    {
                        furthest = Some(error);
                    }
                }
            }
        }

        Err(furthest.unwrap_or_else(|| ParseError::new(ParseErrorKind::UnexpectedEnd, self.end)))
    }

    // ---------------------------------------------------------------------
    // Productions
    // ---------------------------------------------------------------------

    // Every nested group passes through here, so this is where depth is
    // counted.
    fn parse_group(&mut self) -> Result<Criterion, ParseError> {
        let offset = self.offset();
        if self.depth >= self.max_depth {
            return Err(ParseError::new(
                ParseErrorKind::TooDeep {
                    limit: self.max_depth,
                },
                offset,
            ));
        }

        self.depth += 1;
        let group = self.parse_disjuncts(offset);
        self.depth -= 1;

        group
    }

    fn parse_disjuncts(&mut self, offset: usize) -> Result<Criterion, ParseError> {
        let mut items = vec![self.parse_conj()?];
        while self.eat(&TokenKind::Pipe) {
            items.push(self.parse_conj()?);
        }

        Criterion::or(items).map_err(Self::construction(offset))
    }

    fn parse_conj(&mut self) -> Result<Criterion, ParseError> {
        let offset = self.offset();
        let mut items = vec![self.parse_criterion()?];
        while self.eat(&TokenKind::Amp) {
            items.push(self.parse_criterion()?);
        }

        Criterion::and(items).map_err(Self::construction(offset))
    }

    fn parse_criterion(&mut self) -> Result<Criterion, ParseError> {
        if self.eat(&TokenKind::Bang) {
            return self.choice(&[Self::parse_negated_set, Self::parse_negated_value]);
        }

        self.choice(&[
            Self::parse_range,
            Self::parse_named,
            Self::parse_set,
            Self::parse_some,
            Self::parse_paren,
            Self::parse_value,
        ])
    }

    fn parse_negated_set(&mut self) -> Result<Criterion, ParseError> {
        let values = self.parse_set_members()?;

        Ok(Criterion::not_in_set(values))
    }

    // `!even` is `odd` and `!any` is `never`.
    fn parse_negated_value(&mut self) -> Result<Criterion, ParseError> {
        if let Some(keyword) = self.keyword() {
            let offset = self.offset();
            self.pos += 1;
            return keyword.invert().map_err(Self::construction(offset));
        }

        self.parse_scalar().map(Criterion::Not)
    }

    fn parse_range(&mut self) -> Result<Criterion, ParseError> {
        let open = self.advance()?;
        let from_inclusive = match open.kind {
            TokenKind::LBracket => true,
            TokenKind::LParen => false,
            _ => return Err(Self::unexpected(open)),
        };

        let from = self.parse_endpoint()?;
        self.expect(&TokenKind::Comma)?;
        let to = self.parse_endpoint()?;

        let close = self.advance()?;
        let to_inclusive = match close.kind {
            TokenKind::RBracket => true,
            TokenKind::RParen => false,
            _ => return Err(Self::unexpected(close)),
        };

        let bound = |value: Option<Scalar>, inclusive: bool| {
            value.map(|value| {
                if inclusive {
                    Bound::inclusive(value)
                } else {
                    Bound::exclusive(value)
                }
            })
        };

        Range::new(bound(from, from_inclusive), bound(to, to_inclusive))
            .map(Criterion::InRange)
            .map_err(Self::construction(open.offset))
    }

    // `...` marks an open end.
    fn parse_endpoint(&mut self) -> Result<Option<Scalar>, ParseError> {
        let token = self.advance()?;
        match &token.kind {
            TokenKind::Ellipsis => Ok(None),
            TokenKind::Number(number) => Ok(Some(Scalar::Number(*number))),
            TokenKind::Text(text) => Ok(Some(Scalar::Text(text.clone()))),
            _ => Err(Self::unexpected(token)),
        }
    }

    fn parse_named(&mut self) -> Result<Criterion, ParseError> {
        let open = self.offset();
        self.expect(&TokenKind::LBrace)?;

        let mut fields = Vec::new();
        loop {
            let key = self.parse_key()?;
            self.expect(&TokenKind::Colon)?;
            fields.push((key, self.parse_group()?));

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;

        Criterion::named(fields).map_err(Self::construction(open))
    }

    fn parse_key(&mut self) -> Result<String, ParseError> {
        let token = self.advance()?;
        match &token.kind {
            TokenKind::Ident(key) | TokenKind::Text(key) => Ok(key.clone()),
            _ => Err(Self::unexpected(token)),
        }
    }

    fn parse_set(&mut self) -> Result<Criterion, ParseError> {
        let values = self.parse_set_members()?;

        Ok(Criterion::in_set(values))
    }

    fn parse_set_members(&mut self) -> Result<Vec<Scalar>, ParseError> {
        self.expect(&TokenKind::LBrace)?;

        let mut values = vec![self.parse_scalar()?];
        while self.eat(&TokenKind::Comma) {
            values.push(self.parse_scalar()?);
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(values)
    }

    fn parse_some(&mut self) -> Result<Criterion, ParseError> {
        let token = self.advance()?;
        if !matches!(&token.kind, TokenKind::Ident(ident) if ident == "some") {
            return Err(Self::unexpected(token));
        }

        self.expect(&TokenKind::LParen)?;
        let inner = self.parse_group()?;
        self.expect(&TokenKind::RParen)?;

        Ok(Criterion::some(inner))
    }

    fn parse_paren(&mut self) -> Result<Criterion, ParseError> {
        self.expect(&TokenKind::LParen)?;
        let inner = self.parse_group()?;
        self.expect(&TokenKind::RParen)?;

        Ok(inner)
    }

    fn parse_value(&mut self) -> Result<Criterion, ParseError> {
        if let Some(keyword) = self.keyword() {
            self.pos += 1;
            return Ok(keyword);
        }

        self.parse_scalar().map(Criterion::Is)
    }

    fn keyword(&self) -> Option<Criterion> {
        let Some(TokenKind::Ident(ident)) = self.peek().map(|token| &token.kind) else {
            return None;
        };

        match ident.as_str() {
            "any" => Some(Criterion::Any),
            "never" => Some(Criterion::Never),
            "even" => Some(Criterion::even()),
            "odd" => Some(Criterion::odd()),
            _ => None,
        }
    }

    fn parse_scalar(&mut self) -> Result<Scalar, ParseError> {
        let token = self.advance()?;
        match &token.kind {
            TokenKind::Number(number) => Ok(Scalar::Number(*number)),
            TokenKind::Text(text) => Ok(Scalar::Text(text.clone())),
            TokenKind::Ident(ident) => match ident.as_str() {
                "true" => Ok(Scalar::Bool(true)),
                "false" => Ok(Scalar::Bool(false)),
                "null" => Ok(Scalar::Null),
                _ => Err(Self::unexpected(token)),
            },
            _ => Err(Self::unexpected(token)),
        }
    }
}
