use crate::{
    grammar::{ParseError, ParseErrorKind},
    value::Number,
};
use std::fmt;

///
/// TokenKind
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum TokenKind {
    LBracket,
    RBracket,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Bang,
    Pipe,
    Amp,
    Ellipsis,
    Number(Number),
    Text(String),
    Ident(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LBracket => f.write_str("["),
            Self::RBracket => f.write_str("]"),
            Self::LParen => f.write_str("("),
            Self::RParen => f.write_str(")"),
            Self::LBrace => f.write_str("{"),
            Self::RBrace => f.write_str("}"),
            Self::Comma => f.write_str(","),
            Self::Colon => f.write_str(":"),
            Self::Bang => f.write_str("!"),
            Self::Pipe => f.write_str("|"),
            Self::Amp => f.write_str("&"),
            Self::Ellipsis => f.write_str("..."),
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => write!(f, "{text:?}"),
            Self::Ident(ident) => f.write_str(ident),
        }
    }
}

///
/// Token
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) offset: usize,
}

///
/// Lexer
///

pub(crate) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(crate) const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(crate) fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();
            let Some(ch) = self.current_char() else {
                return Ok(tokens);
            };

            let offset = self.pos;
            let kind = match ch {
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                '(' => self.single(TokenKind::LParen),
                ')' => self.single(TokenKind::RParen),
                '{' => self.single(TokenKind::LBrace),
                '}' => self.single(TokenKind::RBrace),
                ',' => self.single(TokenKind::Comma),
                ':' => self.single(TokenKind::Colon),
                '!' => self.single(TokenKind::Bang),
                '|' => self.single(TokenKind::Pipe),
                '&' => self.single(TokenKind::Amp),
                '"' => self.lex_string()?,
                '.' if self.input[self.pos..].starts_with("...") => {
                    self.pos += 3;
                    TokenKind::Ellipsis
                }
                '0'..='9' | '.' | '+' | '-' => self.lex_number()?,
                c if c.is_ascii_alphabetic() || c == '_' => self.lex_ident(),
                other => {
                    return Err(ParseError::new(
                        ParseErrorKind::UnexpectedCharacter { found: other },
                        offset,
                    ));
                }
            };

            tokens.push(Token { kind, offset });
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while self.current_char().is_some_and(|ch| ch.is_ascii_digit()) {
            self.pos += 1;
        }

        self.pos - start
    }

    // sign? digits? ("." digits?)? (("e" | "E") sign? digits)?
    fn lex_number(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;

        if matches!(self.current_char(), Some('+' | '-')) {
            self.pos += 1;
        }

        let mut digits = self.eat_digits();
        if self.current_char() == Some('.') {
            self.pos += 1;
            digits += self.eat_digits();
        }

        if digits == 0 {
            let found = self.input[start..].chars().next().unwrap_or('.');
            return Err(ParseError::new(
                ParseErrorKind::UnexpectedCharacter { found },
                start,
            ));
        }

        if matches!(self.current_char(), Some('e' | 'E')) {
            self.pos += 1;
            if matches!(self.current_char(), Some('+' | '-')) {
                self.pos += 1;
            }
            if self.eat_digits() == 0 {
                return Err(self.invalid_number(start));
            }
        }

        let text = &self.input[start..self.pos];
        let value: f64 = text.parse().map_err(|_| self.invalid_number(start))?;

        Number::new(value)
            .map(TokenKind::Number)
            .map_err(|_| self.invalid_number(start))
    }

    fn invalid_number(&self, start: usize) -> ParseError {
        ParseError::new(
            ParseErrorKind::InvalidNumber {
                text: self.input[start..self.pos].to_string(),
            },
            start,
        )
    }

    fn lex_string(&mut self) -> Result<TokenKind, ParseError> {
        let start = self.pos;
        self.pos += 1;
        let mut text = String::new();

        loop {
            let Some(ch) = self.current_char() else {
                return Err(ParseError::new(ParseErrorKind::UnterminatedString, start));
            };
            self.pos += ch.len_utf8();

            match ch {
                '"' => return Ok(TokenKind::Text(text)),
                '\\' => {
                    let escape_offset = self.pos;
                    let Some(escaped) = self.current_char() else {
                        return Err(ParseError::new(ParseErrorKind::UnterminatedString, start));
                    };
                    self.pos += escaped.len_utf8();

                    text.push(match escaped {
                        '"' => '"',
                        '\\' => '\\',
                        'n' => '\n',
                        'r' => '\r',
                        't' => '\t',
                        other => {
                            return Err(ParseError::new(
                                ParseErrorKind::UnexpectedCharacter { found: other },
                                escape_offset,
                            ));
                        }
                    });
                }
                other => text.push(other),
            }
        }
    }

    fn lex_ident(&mut self) -> TokenKind {
        let start = self.pos;
        while self
            .current_char()
            .is_some_and(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            self.pos += 1;
        }

        TokenKind::Ident(self.input[start..self.pos].to_string())
    }
}
