//! Front end of the MAVL compiler.
//!
//! MAVL is a small expression- and matrix-oriented language with scalars,
//! statically sized vectors and matrices, records, control flow and
//! functions. This crate contains the lexical scanner and the contextual
//! analysis pass (identification + type checking); parsing is performed by
//! an external collaborator that consumes the scanner's token queue and
//! produces the AST defined in [`ast`].

#![allow(clippy::module_inception)]

use std::fmt::Display;

pub mod analysis;
pub mod ast;
pub mod errors;
pub mod pipeline;
pub mod scanner;
pub mod types;

/// A position in the source file, 1-based in both line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: i32,
    pub column: i32,
}

impl SourceLocation {
    /// Sentinel location for synthesized nodes that have no source text.
    pub const UNKNOWN: SourceLocation = SourceLocation {
        line: -1,
        column: -1,
    };

    pub fn new(line: i32, column: i32) -> Self {
        SourceLocation { line, column }
    }

    pub fn is_unknown(&self) -> bool {
        *self == SourceLocation::UNKNOWN
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_unknown() {
            write!(f, "<unknown>")
        } else {
            write!(f, "line {}, column {}", self.line, self.column)
        }
    }
}
