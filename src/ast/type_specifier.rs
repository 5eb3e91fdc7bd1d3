use crate::SourceLocation;

use super::{Expression, NodeId};

/// A syntactic type, as written in the source.
///
/// One-to-one with the resolved type variants except that vector and
/// matrix dimensions are still arbitrary expressions here; analysis
/// constant-evaluates them when the specifier is resolved.
#[derive(Debug, Clone)]
pub struct TypeSpecifier {
    pub id: NodeId,
    pub location: SourceLocation,
    pub kind: TypeSpecifierKind,
}

#[derive(Debug, Clone)]
pub enum TypeSpecifierKind {
    Int,
    Float,
    Bool,
    String,
    Void,
    Record(String),
    Vector {
        element: Box<TypeSpecifier>,
        dimension: Box<Expression>,
    },
    Matrix {
        element: Box<TypeSpecifier>,
        rows: Box<Expression>,
        cols: Box<Expression>,
    },
}
