use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::SourceLocation;

lazy_static! {
    /// Spelling to token kind lookup for all reserved words.
    pub static ref KEYWORD_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("matrix", TokenKind::Matrix);
        map.insert("vector", TokenKind::Vector);
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map.insert("bool", TokenKind::Bool);
        map.insert("void", TokenKind::Void);
        map.insert("string", TokenKind::String);
        map.insert("val", TokenKind::Val);
        map.insert("var", TokenKind::Var);
        map.insert("for", TokenKind::For);
        map.insert("foreach", TokenKind::Foreach);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map.insert("function", TokenKind::Function);
        map.insert("record", TokenKind::Record);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("default", TokenKind::Default);
        map
    };
}

/// Enumerates the token kinds used in MAVL.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Id,
    IntLit,
    FloatLit,
    BoolLit,
    StringLit,

    // Reserved words
    Matrix,
    Vector,
    Int,
    Float,
    Bool,
    Void,
    String,
    Val,
    Var,
    For,
    Foreach,
    If,
    Else,
    Return,
    Function,
    Record,
    Switch,
    Case,
    Default,

    At, // @

    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    LAngle,
    RAngle,
    Comma,
    Semicolon,
    Colon,

    Add,
    Sub,
    Mult,
    Div,
    Exp,       // ^
    MatMult,   // #
    DotProd,   // .*
    Transpose, // ~
    QMark,     // ?

    Dim,  // .dimension
    Rows, // .rows
    Cols, // .cols

    CmpLe, // <=
    CmpGe, // >=
    CmpEq, // ==
    CmpNe, // !=

    Assign, // =
    Not,    // !
    And,    // &
    Or,     // |

    Eof,
    Error,
}

impl TokenKind {
    /// The fixed spelling of this kind, where one exists. Literal and
    /// identifier kinds report a describing placeholder instead.
    pub fn pattern(&self) -> &'static str {
        match self {
            TokenKind::Id => "<id>",
            TokenKind::IntLit => "<int literal>",
            TokenKind::FloatLit => "<float literal>",
            TokenKind::BoolLit => "<bool literal>",
            TokenKind::StringLit => "<string literal>",
            TokenKind::Matrix => "matrix",
            TokenKind::Vector => "vector",
            TokenKind::Int => "int",
            TokenKind::Float => "float",
            TokenKind::Bool => "bool",
            TokenKind::Void => "void",
            TokenKind::String => "string",
            TokenKind::Val => "val",
            TokenKind::Var => "var",
            TokenKind::For => "for",
            TokenKind::Foreach => "foreach",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::Function => "function",
            TokenKind::Record => "record",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::At => "@",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::LAngle => "<",
            TokenKind::RAngle => ">",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Mult => "*",
            TokenKind::Div => "/",
            TokenKind::Exp => "^",
            TokenKind::MatMult => "#",
            TokenKind::DotProd => ".*",
            TokenKind::Transpose => "~",
            TokenKind::QMark => "?",
            TokenKind::Dim => ".dimension",
            TokenKind::Rows => ".rows",
            TokenKind::Cols => ".cols",
            TokenKind::CmpLe => "<=",
            TokenKind::CmpGe => ">=",
            TokenKind::CmpEq => "==",
            TokenKind::CmpNe => "!=",
            TokenKind::Assign => "=",
            TokenKind::Not => "!",
            TokenKind::And => "&",
            TokenKind::Or => "|",
            TokenKind::Eof => "<eof>",
            TokenKind::Error => "<error>",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A single token: kind, raw spelling and the location of its first
/// character. Immutable once produced by the scanner.
#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub spelling: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, spelling: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            spelling: spelling.into(),
            location,
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} {}>", self.kind, self.spelling)
    }
}

impl PartialEq for Token {
    // Location is deliberately ignored, matching tokens compare equal
    // wherever they were scanned.
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.spelling == other.spelling
    }
}
