use std::collections::VecDeque;
use std::str::Chars;

use crate::errors::CompilationError;
use crate::SourceLocation;

use super::token::{Token, TokenKind, KEYWORD_LOOKUP};

const TAB_WIDTH: i32 = 4;

/// A simple scanner for MAVL.
///
/// Works through the source one character at a time with a single
/// character of lookahead, tracking 1-based line/column positions as it
/// goes. Every character counts one column, so non-ASCII text inside
/// string literals and comments does not skew locations. A scanner
/// instance is good for exactly one run over one source text.
pub struct Scanner<'a> {
    chars: Chars<'a>,
    current: Option<char>,
    line: i32,
    column: i32,
    token_start: SourceLocation,
    spelling: String,
}

/// Scans the given program text into a token queue terminated by a single
/// EOF token.
pub fn tokenize(source: &str) -> Result<VecDeque<Token>, CompilationError> {
    Scanner::new(source).scan()
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut chars = source.chars();
        let current = chars.next();
        Scanner {
            chars,
            current,
            line: 1,
            column: 1,
            token_start: SourceLocation::new(1, 1),
            spelling: String::new(),
        }
    }

    /// Scans the whole input. Consumes the scanner; it cannot be reused.
    pub fn scan(mut self) -> Result<VecDeque<Token>, CompilationError> {
        let mut result = VecDeque::new();

        while self.current.is_some() {
            // Skip all whitespace immediately
            while matches!(self.current, Some(' ' | '\n' | '\r' | '\t')) {
                self.skip();
            }
            if self.current.is_none() {
                break;
            }

            self.spelling.clear();
            self.token_start = SourceLocation::new(self.line, self.column);

            // Deal with line and block comments; a lone slash is division
            if self.current == Some('/') {
                self.take();

                if self.current == Some('/') {
                    while !matches!(self.current, None | Some('\n')) {
                        self.skip();
                    }
                    continue;
                }

                if self.current == Some('*') {
                    self.skip();
                    loop {
                        match self.current {
                            None => return Err(self.unexpected_end()),
                            Some('*') => {
                                self.skip();
                                if self.current == Some('/') {
                                    self.skip();
                                    break;
                                }
                            }
                            Some(_) => self.skip(),
                        }
                    }
                    continue;
                }

                result.push_back(self.make_token(TokenKind::Div));
                continue;
            }

            let kind = self.scan_token()?;
            result.push_back(self.make_token(kind));
        }

        result.push_back(Token::new(
            TokenKind::Eof,
            TokenKind::Eof.pattern(),
            SourceLocation::new(self.line, self.column),
        ));
        Ok(result)
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.spelling.clone(), self.token_start)
    }

    fn take(&mut self) {
        if let Some(c) = self.current {
            self.spelling.push(c);
        }
        self.skip();
    }

    fn skip(&mut self) {
        match self.current {
            Some('\n') => {
                self.line += 1;
                self.column = 1;
            }
            Some('\t') => {
                // Advance to the next multiple-of-4 tab stop
                self.column = ((self.column - 1) / TAB_WIDTH + 1) * TAB_WIDTH + 1;
            }
            Some(_) => self.column += 1,
            None => {}
        }
        self.current = self.chars.next();
    }

    fn unexpected_end(&self) -> CompilationError {
        CompilationError::UnexpectedEndOfInput {
            location: self.token_start,
        }
    }

    fn scan_token(&mut self) -> Result<TokenKind, CompilationError> {
        let c = match self.current {
            Some(c) => c,
            None => return Err(self.unexpected_end()),
        };

        if c.is_ascii_alphabetic() {
            return Ok(self.scan_keyword_or_identifier());
        }
        if c.is_ascii_digit() {
            return Ok(self.scan_number());
        }
        if c == '"' {
            return self.scan_string();
        }
        if c == '.' {
            return Ok(self.scan_dot());
        }

        self.take();
        Ok(match c {
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            '*' => TokenKind::Mult,
            '/' => TokenKind::Div,
            '+' => TokenKind::Add,
            '-' => TokenKind::Sub,
            ':' => TokenKind::Colon,
            '#' => TokenKind::MatMult,
            '~' => TokenKind::Transpose,
            '?' => TokenKind::QMark,
            '&' => TokenKind::And,
            '|' => TokenKind::Or,
            '@' => TokenKind::At,
            '^' => TokenKind::Exp,
            '<' => {
                if self.current == Some('=') {
                    self.take();
                    TokenKind::CmpLe
                } else {
                    TokenKind::LAngle
                }
            }
            '>' => {
                if self.current == Some('=') {
                    self.take();
                    TokenKind::CmpGe
                } else {
                    TokenKind::RAngle
                }
            }
            '=' => {
                if self.current == Some('=') {
                    self.take();
                    TokenKind::CmpEq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.current == Some('=') {
                    self.take();
                    TokenKind::CmpNe
                } else {
                    TokenKind::Not
                }
            }
            _ => TokenKind::Error,
        })
    }

    fn scan_keyword_or_identifier(&mut self) -> TokenKind {
        self.take();
        while matches!(self.current, Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.take();
        }

        if self.spelling == "true" || self.spelling == "false" {
            return TokenKind::BoolLit;
        }

        KEYWORD_LOOKUP
            .get(self.spelling.as_str())
            .copied()
            .unwrap_or(TokenKind::Id)
    }

    fn scan_number(&mut self) -> TokenKind {
        self.take();
        // Validation of the digit grouping happens later; "1.2.3" is
        // accepted lexically and rejected at parse time.
        while matches!(self.current, Some(c) if c.is_ascii_digit() || c == '.') {
            self.take();
        }
        if self.spelling.contains('.') {
            TokenKind::FloatLit
        } else {
            TokenKind::IntLit
        }
    }

    fn scan_string(&mut self) -> Result<TokenKind, CompilationError> {
        self.skip(); // opening quote
        loop {
            match self.current {
                None => return Err(self.unexpected_end()),
                Some('"') => {
                    self.skip();
                    return Ok(TokenKind::StringLit);
                }
                Some('\\') => {
                    self.skip(); // backslash
                    match self.current {
                        None => return Err(self.unexpected_end()),
                        Some('"') | Some('\\') => self.take(),
                        Some('n') => {
                            self.spelling.push('\n');
                            self.skip();
                        }
                        Some('r') => {
                            self.spelling.push('\r');
                            self.skip();
                        }
                        Some('t') => {
                            self.spelling.push('\t');
                            self.skip();
                        }
                        Some(c) => {
                            // Lenient: keep the character, warn, move on
                            eprintln!("Invalid escape sequence: \\{}", c);
                            self.take();
                        }
                    }
                }
                Some(_) => self.take(),
            }
        }
    }

    fn scan_dot(&mut self) -> TokenKind {
        self.take();

        if self.current == Some('*') {
            self.take();
            return TokenKind::DotProd;
        }

        while matches!(self.current, Some(c) if c.is_ascii_alphabetic()) {
            self.take();
        }

        if self.spelling == TokenKind::Dim.pattern() {
            return TokenKind::Dim;
        }
        if self.spelling == TokenKind::Rows.pattern() {
            return TokenKind::Rows;
        }
        if self.spelling == TokenKind::Cols.pattern() {
            return TokenKind::Cols;
        }

        TokenKind::Error
    }
}
