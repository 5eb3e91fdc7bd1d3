//! Lexical analysis module for the MAVL compiler.
//!
//! This module contains the scanner that converts raw source text into an
//! ordered queue of tokens for the parser. It handles:
//!
//! - Keywords, identifiers and literals
//! - Operators, including the two-character comparisons and the
//!   `.dimension`/`.rows`/`.cols`/`.*` suffix operators
//! - Line and block comments
//! - Line/column tracking with tab expansion for error reporting

pub mod scanner;
pub mod token;

#[cfg(test)]
mod tests;

pub use scanner::{tokenize, Scanner};
pub use token::{Token, TokenKind};
