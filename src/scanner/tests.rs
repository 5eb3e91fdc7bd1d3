//! Unit tests for the scanner module.
//!
//! This module contains comprehensive tests for tokenization including:
//! - Keywords and identifiers
//! - Numeric, boolean and string literals
//! - Operators, including the dot-prefixed suffix operators
//! - Comments and location tracking
//! - Error cases

use super::{tokenize, TokenKind};
use crate::errors::CompilationError;
use crate::SourceLocation;

#[test]
fn test_tokenize_keywords() {
    let source = "matrix vector int float bool void string val var for foreach if else return function record switch case default";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Matrix);
    assert_eq!(tokens[1].kind, TokenKind::Vector);
    assert_eq!(tokens[2].kind, TokenKind::Int);
    assert_eq!(tokens[3].kind, TokenKind::Float);
    assert_eq!(tokens[4].kind, TokenKind::Bool);
    assert_eq!(tokens[5].kind, TokenKind::Void);
    assert_eq!(tokens[6].kind, TokenKind::String);
    assert_eq!(tokens[7].kind, TokenKind::Val);
    assert_eq!(tokens[8].kind, TokenKind::Var);
    assert_eq!(tokens[9].kind, TokenKind::For);
    assert_eq!(tokens[10].kind, TokenKind::Foreach);
    assert_eq!(tokens[11].kind, TokenKind::If);
    assert_eq!(tokens[12].kind, TokenKind::Else);
    assert_eq!(tokens[13].kind, TokenKind::Return);
    assert_eq!(tokens[14].kind, TokenKind::Function);
    assert_eq!(tokens[15].kind, TokenKind::Record);
    assert_eq!(tokens[16].kind, TokenKind::Switch);
    assert_eq!(tokens[17].kind, TokenKind::Case);
    assert_eq!(tokens[18].kind, TokenKind::Default);
    assert_eq!(tokens[19].kind, TokenKind::Eof);
    assert_eq!(tokens.len(), 20);
}

#[test]
fn test_tokenize_identifiers() {
    let source = "foo bar9 baz_123 CamelCase intx";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Id);
    assert_eq!(tokens[0].spelling, "foo");
    assert_eq!(tokens[1].kind, TokenKind::Id);
    assert_eq!(tokens[1].spelling, "bar9");
    assert_eq!(tokens[2].kind, TokenKind::Id);
    assert_eq!(tokens[2].spelling, "baz_123");
    assert_eq!(tokens[3].kind, TokenKind::Id);
    assert_eq!(tokens[3].spelling, "CamelCase");
    // Keyword prefix does not make an identifier a keyword
    assert_eq!(tokens[4].kind, TokenKind::Id);
    assert_eq!(tokens[4].spelling, "intx");
    assert_eq!(tokens[5].kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_numbers() {
    let source = "42 3.14 0 100.5 007";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::IntLit);
    assert_eq!(tokens[0].spelling, "42");
    assert_eq!(tokens[1].kind, TokenKind::FloatLit);
    assert_eq!(tokens[1].spelling, "3.14");
    assert_eq!(tokens[2].kind, TokenKind::IntLit);
    assert_eq!(tokens[2].spelling, "0");
    assert_eq!(tokens[3].kind, TokenKind::FloatLit);
    assert_eq!(tokens[3].spelling, "100.5");
    assert_eq!(tokens[4].kind, TokenKind::IntLit);
    assert_eq!(tokens[4].spelling, "007");
    assert_eq!(tokens[5].kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_malformed_float_stays_one_token() {
    // "1.2.3" is a single malformed float literal, not three tokens
    let tokens = tokenize("1.2.3").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::FloatLit);
    assert_eq!(tokens[0].spelling, "1.2.3");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_bool_literals() {
    let tokens = tokenize("true false trueish").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::BoolLit);
    assert_eq!(tokens[0].spelling, "true");
    assert_eq!(tokens[1].kind, TokenKind::BoolLit);
    assert_eq!(tokens[1].spelling, "false");
    assert_eq!(tokens[2].kind, TokenKind::Id);
    assert_eq!(tokens[2].spelling, "trueish");
}

#[test]
fn test_tokenize_strings() {
    let source = r#""hello" "multiple words" """#;
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::StringLit);
    assert_eq!(tokens[0].spelling, "hello");
    assert_eq!(tokens[1].kind, TokenKind::StringLit);
    assert_eq!(tokens[1].spelling, "multiple words");
    assert_eq!(tokens[2].kind, TokenKind::StringLit);
    assert_eq!(tokens[2].spelling, "");
    assert_eq!(tokens[3].kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_string_escapes() {
    let source = r#""hello\nworld" "tab\there" "back\\slash" "quote\"end""#;
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].spelling, "hello\nworld");
    assert_eq!(tokens[1].spelling, "tab\there");
    assert_eq!(tokens[2].spelling, "back\\slash");
    assert_eq!(tokens[3].spelling, "quote\"end");
}

#[test]
fn test_tokenize_non_ascii_string() {
    let tokens = tokenize("\"café\"").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::StringLit);
    assert_eq!(tokens[0].spelling, "café");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_non_ascii_counts_one_column() {
    // "é" occupies a single column like any other character
    let tokens = tokenize("\"é\" x").unwrap();

    assert_eq!(tokens[0].spelling, "é");
    assert_eq!(tokens[1].kind, TokenKind::Id);
    assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
}

#[test]
fn test_tokenize_non_ascii_comment_keeps_locations() {
    let tokens = tokenize("// héllo wörld\nx").unwrap();

    assert_eq!(tokens[0].spelling, "x");
    assert_eq!(tokens[0].location, SourceLocation::new(2, 1));
}

#[test]
fn test_tokenize_unknown_escape_is_kept() {
    let tokens = tokenize(r#""wh\at""#).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::StringLit);
    assert_eq!(tokens[0].spelling, "what");
}

#[test]
fn test_tokenize_operators() {
    let source = "+ - * / ^ # .* ~ ? & | ! =";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Add);
    assert_eq!(tokens[1].kind, TokenKind::Sub);
    assert_eq!(tokens[2].kind, TokenKind::Mult);
    assert_eq!(tokens[3].kind, TokenKind::Div);
    assert_eq!(tokens[4].kind, TokenKind::Exp);
    assert_eq!(tokens[5].kind, TokenKind::MatMult);
    assert_eq!(tokens[6].kind, TokenKind::DotProd);
    assert_eq!(tokens[7].kind, TokenKind::Transpose);
    assert_eq!(tokens[8].kind, TokenKind::QMark);
    assert_eq!(tokens[9].kind, TokenKind::And);
    assert_eq!(tokens[10].kind, TokenKind::Or);
    assert_eq!(tokens[11].kind, TokenKind::Not);
    assert_eq!(tokens[12].kind, TokenKind::Assign);
    assert_eq!(tokens[13].kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_comparisons() {
    let source = "< > <= >= == !=";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::LAngle);
    assert_eq!(tokens[1].kind, TokenKind::RAngle);
    assert_eq!(tokens[2].kind, TokenKind::CmpLe);
    assert_eq!(tokens[3].kind, TokenKind::CmpGe);
    assert_eq!(tokens[4].kind, TokenKind::CmpEq);
    assert_eq!(tokens[5].kind, TokenKind::CmpNe);
}

#[test]
fn test_tokenize_punctuation() {
    let source = "( ) { } [ ] , ; : @";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::LParen);
    assert_eq!(tokens[1].kind, TokenKind::RParen);
    assert_eq!(tokens[2].kind, TokenKind::LBrace);
    assert_eq!(tokens[3].kind, TokenKind::RBrace);
    assert_eq!(tokens[4].kind, TokenKind::LBracket);
    assert_eq!(tokens[5].kind, TokenKind::RBracket);
    assert_eq!(tokens[6].kind, TokenKind::Comma);
    assert_eq!(tokens[7].kind, TokenKind::Semicolon);
    assert_eq!(tokens[8].kind, TokenKind::Colon);
    assert_eq!(tokens[9].kind, TokenKind::At);
}

#[test]
fn test_tokenize_dot_operators() {
    let source = "v.dimension m.rows m.cols";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Id);
    assert_eq!(tokens[1].kind, TokenKind::Dim);
    assert_eq!(tokens[1].spelling, ".dimension");
    assert_eq!(tokens[2].kind, TokenKind::Id);
    assert_eq!(tokens[3].kind, TokenKind::Rows);
    assert_eq!(tokens[4].kind, TokenKind::Id);
    assert_eq!(tokens[5].kind, TokenKind::Cols);
}

#[test]
fn test_tokenize_unknown_dot_suffix() {
    let tokens = tokenize("x.foo").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Id);
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].spelling, ".foo");
}

#[test]
fn test_tokenize_line_comments() {
    let source = "val x = 5; // this is a comment\nval y = 10;";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Val);
    assert_eq!(tokens[1].spelling, "x");
    assert_eq!(tokens[2].kind, TokenKind::Assign);
    assert_eq!(tokens[3].spelling, "5");
    assert_eq!(tokens[4].kind, TokenKind::Semicolon);
    assert_eq!(tokens[5].kind, TokenKind::Val);
    assert_eq!(tokens[6].spelling, "y");
}

#[test]
fn test_tokenize_block_comments() {
    let source = "a /* multi\nline * comment */ b";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].spelling, "a");
    assert_eq!(tokens[1].spelling, "b");
    assert_eq!(tokens[2].kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_slash_is_division() {
    let tokens = tokenize("a / b").unwrap();

    assert_eq!(tokens[1].kind, TokenKind::Div);
    assert_eq!(tokens[1].spelling, "/");
}

#[test]
fn test_tokenize_unterminated_block_comment() {
    let result = tokenize("a /* never closed");

    match result {
        Err(CompilationError::UnexpectedEndOfInput { location }) => {
            assert_eq!(location, SourceLocation::new(1, 3));
        }
        other => panic!("expected UnexpectedEndOfInput, got {:?}", other),
    }
}

#[test]
fn test_tokenize_unterminated_string() {
    let result = tokenize("\"no end");

    match result {
        Err(CompilationError::UnexpectedEndOfInput { location }) => {
            assert_eq!(location, SourceLocation::new(1, 1));
        }
        other => panic!("expected UnexpectedEndOfInput, got {:?}", other),
    }
}

#[test]
fn test_tokenize_unknown_character() {
    let tokens = tokenize("a $ b").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Id);
    assert_eq!(tokens[1].kind, TokenKind::Error);
    assert_eq!(tokens[1].spelling, "$");
    assert_eq!(tokens[2].kind, TokenKind::Id);
}

#[test]
fn test_tokenize_locations() {
    let source = "val x\n  = 1;";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
    assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
    assert_eq!(tokens[2].location, SourceLocation::new(2, 3));
    assert_eq!(tokens[3].location, SourceLocation::new(2, 5));
    assert_eq!(tokens[4].location, SourceLocation::new(2, 6));
}

#[test]
fn test_tokenize_tab_expansion() {
    // A tab advances the column to the next multiple-of-4 stop
    let tokens = tokenize("\tx").unwrap();

    assert_eq!(tokens[0].location, SourceLocation::new(1, 5));
}

#[test]
fn test_tokenize_empty_input() {
    let tokens = tokenize("").unwrap();

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert_eq!(tokens[0].spelling, "<eof>");
}

#[test]
fn test_tokenize_simple_program() {
    let source = "function void main() { val int x = 42; }";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Function);
    assert_eq!(tokens[1].kind, TokenKind::Void);
    assert_eq!(tokens[2].kind, TokenKind::Id);
    assert_eq!(tokens[2].spelling, "main");
    assert_eq!(tokens[3].kind, TokenKind::LParen);
    assert_eq!(tokens[4].kind, TokenKind::RParen);
    assert_eq!(tokens[5].kind, TokenKind::LBrace);
    assert_eq!(tokens[6].kind, TokenKind::Val);
    assert_eq!(tokens[7].kind, TokenKind::Int);
    assert_eq!(tokens[8].kind, TokenKind::Id);
    assert_eq!(tokens[9].kind, TokenKind::Assign);
    assert_eq!(tokens[10].kind, TokenKind::IntLit);
    assert_eq!(tokens[11].kind, TokenKind::Semicolon);
    assert_eq!(tokens[12].kind, TokenKind::RBrace);
    assert_eq!(tokens[13].kind, TokenKind::Eof);
}

#[test]
fn test_tokenize_matrix_type() {
    let source = "matrix<int>[2][3] m";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Matrix);
    assert_eq!(tokens[1].kind, TokenKind::LAngle);
    assert_eq!(tokens[2].kind, TokenKind::Int);
    assert_eq!(tokens[3].kind, TokenKind::RAngle);
    assert_eq!(tokens[4].kind, TokenKind::LBracket);
    assert_eq!(tokens[5].kind, TokenKind::IntLit);
    assert_eq!(tokens[6].kind, TokenKind::RBracket);
    assert_eq!(tokens[7].kind, TokenKind::LBracket);
    assert_eq!(tokens[8].kind, TokenKind::IntLit);
    assert_eq!(tokens[9].kind, TokenKind::RBracket);
    assert_eq!(tokens[10].kind, TokenKind::Id);
}
