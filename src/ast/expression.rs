use crate::SourceLocation;

use super::NodeId;

/// Binary operators that produce a value of operand-derived type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Exp,
    MatMul,
    DotProduct,
    And,
    Or,
}

/// The six comparison operators; all produce `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
    Equal,
    NotEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Minus,
    Not,
    Transpose,
}

/// An expression node: identity, source location and the variant payload.
#[derive(Debug, Clone)]
pub struct Expression {
    pub id: NodeId,
    pub location: SourceLocation,
    pub kind: ExprKind,
}

#[derive(Debug, Clone)]
pub enum ExprKind {
    IntValue(i64),
    FloatValue(f64),
    BoolValue(bool),
    StringValue(String),
    IdentifierReference(String),
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Compare {
        comparator: Comparator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    /// `v.dimension`
    VectorDimension(Box<Expression>),
    /// `m.rows`
    MatrixRows(Box<Expression>),
    /// `m.cols`
    MatrixCols(Box<Expression>),
    /// `cond ? then : else`
    Select {
        condition: Box<Expression>,
        true_case: Box<Expression>,
        false_case: Box<Expression>,
    },
    Call {
        name: String,
        arguments: Vec<Expression>,
    },
    /// `base[index]` on a vector or matrix
    ElementSelect {
        base: Box<Expression>,
        index: Box<Expression>,
    },
    /// `base@element` on a record value
    RecordElementSelect {
        base: Box<Expression>,
        element: String,
    },
    /// `v { base : offset }` with constant start and end offsets
    SubVector {
        base: Box<Expression>,
        base_index: Box<Expression>,
        start_offset: Box<Expression>,
        end_offset: Box<Expression>,
    },
    /// The two-dimensional analogue of a sub-vector
    SubMatrix {
        base: Box<Expression>,
        row_base_index: Box<Expression>,
        row_start_offset: Box<Expression>,
        row_end_offset: Box<Expression>,
        col_base_index: Box<Expression>,
        col_start_offset: Box<Expression>,
        col_end_offset: Box<Expression>,
    },
    /// `[e1, e2, ...]` building a vector or matrix
    StructureInit(Vec<Expression>),
    /// `@name [e1, e2, ...]` building a record value
    RecordInit {
        name: String,
        elements: Vec<Expression>,
    },
}
