//! Lexer (tokenizer) for Web IDL source text
//!
//! Converts raw IDL text into a flat [`Token`] stream consumed by the parser.
//! Whitespace, `//` line comments and `/* */` block comments are skipped.
//! Keywords are not distinguished here: they are identifiers, and the parser
//! decides from context whether `attribute` or `required` is a keyword or a name.

use crate::error::{ParseError, ParseResult};
use std::fmt;

/// Line/column position of a token, both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Build a syntax error positioned at this location.
    pub fn error(self, reason: impl Into<String>) -> ParseError {
        ParseError::SyntaxError {
            line: self.line,
            column: self.column,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Identifier(String),
    Integer(String),
    Decimal(String),
    /// String literal contents without the surrounding quotes
    String(String),
    /// `...`
    Ellipsis,
    /// Any other single non-alphanumeric character: `{ } ( ) [ ] < > ; : , = ? *` etc.
    Punct(char),
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn is_punct(&self, ch: char) -> bool {
        matches!(self.kind, TokenKind::Punct(c) if c == ch)
    }

    pub fn is_ident(&self, word: &str) -> bool {
        matches!(&self.kind, TokenKind::Identifier(s) if s == word)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(s) => write!(f, "identifier '{s}'"),
            TokenKind::Integer(s) => write!(f, "integer {s}"),
            TokenKind::Decimal(s) => write!(f, "decimal {s}"),
            TokenKind::String(s) => write!(f, "string \"{s}\""),
            TokenKind::Ellipsis => write!(f, "'...'"),
            TokenKind::Punct(c) => write!(f, "'{c}'"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// Lexer for Web IDL source
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input. The last token is always `Eof`.
    pub fn tokenize(&mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments()?;

            let location = self.current_location();
            let Some(ch) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    location,
                });
                break;
            };

            let kind = match ch {
                '"' => self.string_literal()?,
                '0'..='9' => self.number(),
                '.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.number(),
                '.' if self.peek_at(1) == Some('.') && self.peek_at(2) == Some('.') => {
                    self.advance();
                    self.advance();
                    self.advance();
                    TokenKind::Ellipsis
                }
                '-' if self
                    .peek_at(1)
                    .is_some_and(|c| c.is_ascii_digit() || c == '.') =>
                {
                    self.number()
                }
                '-' | '_' if self.peek_at(1).is_some_and(|c| c.is_ascii_alphabetic()) => {
                    self.identifier()
                }
                c if c.is_ascii_alphabetic() => self.identifier(),
                c => {
                    self.advance();
                    TokenKind::Punct(c)
                }
            };

            tokens.push(Token { kind, location });
        }

        Ok(tokens)
    }

    fn skip_whitespace_and_comments(&mut self) -> ParseResult<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_at(1) == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_at(1) == Some('*') => {
                    let start = self.current_location();
                    self.advance();
                    self.advance();
                    loop {
                        match self.peek() {
                            None => return Err(start.error("unterminated block comment")),
                            Some('*') if self.peek_at(1) == Some('/') => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            Some(_) => {
                                self.advance();
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn string_literal(&mut self) -> ParseResult<TokenKind> {
        let start = self.current_location();
        self.advance(); // opening quote

        let mut value = String::new();
        loop {
            match self.advance() {
                None => return Err(start.error("unterminated string literal")),
                Some('"') => return Ok(TokenKind::String(value)),
                Some(c) => value.push(c),
            }
        }
    }

    /// Integers (decimal, hex, octal) and decimals with optional exponent.
    fn number(&mut self) -> TokenKind {
        let mut text = String::new();
        if self.peek() == Some('-') {
            text.push('-');
            self.advance();
        }

        if self.peek() == Some('0') && matches!(self.peek_at(1), Some('x' | 'X')) {
            text.push('0');
            self.advance();
            if let Some(x) = self.advance() {
                text.push(x);
            }
            self.take_while_into(&mut text, |c| c.is_ascii_hexdigit());
            return TokenKind::Integer(text);
        }

        let mut is_decimal = false;
        self.take_while_into(&mut text, |c| c.is_ascii_digit());
        if self.peek() == Some('.') && self.peek_at(1) != Some('.') {
            is_decimal = true;
            text.push('.');
            self.advance();
            self.take_while_into(&mut text, |c| c.is_ascii_digit());
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let signed = matches!(self.peek_at(1), Some('+' | '-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                is_decimal = true;
                for _ in 0..digit_at {
                    if let Some(c) = self.advance() {
                        text.push(c);
                    }
                }
                self.take_while_into(&mut text, |c| c.is_ascii_digit());
            }
        }

        if is_decimal {
            TokenKind::Decimal(text)
        } else {
            TokenKind::Integer(text)
        }
    }

    fn identifier(&mut self) -> TokenKind {
        let mut text = String::new();
        if let Some(c) = self.advance() {
            text.push(c);
        }
        self.take_while_into(&mut text, |c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        TokenKind::Identifier(text)
    }

    fn take_while_into(&mut self, text: &mut String, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            text.push(c);
            self.advance();
        }
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.input.get(self.position).copied()?;
        self.position += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}
