use crate::SourceLocation;

use super::{Declaration, Expression, NodeId};

/// A statement node: identity, source location and the variant payload.
#[derive(Debug, Clone)]
pub struct Statement {
    pub id: NodeId,
    pub location: SourceLocation,
    pub kind: StmtKind,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    /// `var <type> name;`
    VariableDeclaration(Declaration),
    /// `val <type> name = value;`
    ValueDefinition {
        declaration: Declaration,
        value: Expression,
    },
    Assignment {
        target: LhsIdentifier,
        value: Expression,
    },
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    /// `for (a = init; cond; b = incr) body`, both targets being
    /// previously declared variables.
    For {
        init_target: LhsIdentifier,
        init_value: Expression,
        condition: Expression,
        incr_target: LhsIdentifier,
        incr_value: Expression,
        body: Box<Statement>,
    },
    /// `foreach (<iterator> : source) body`
    ForEach {
        iterator: Declaration,
        source: Expression,
        body: Box<Statement>,
    },
    Switch {
        condition: Expression,
        sections: Vec<SwitchSection>,
    },
    Compound(Vec<Statement>),
    Return(Expression),
    /// An expression statement; the payload is always a call expression.
    Call(Expression),
}

/// One `case` or `default` section of a switch statement.
#[derive(Debug, Clone)]
pub struct SwitchSection {
    pub id: NodeId,
    pub location: SourceLocation,
    /// The case label expression, or `None` for a default section.
    pub label: Option<Expression>,
    pub body: Vec<Statement>,
}

impl SwitchSection {
    pub fn is_default(&self) -> bool {
        self.label.is_none()
    }
}

/// The left-hand side of an assignment.
#[derive(Debug, Clone)]
pub struct LhsIdentifier {
    pub id: NodeId,
    pub location: SourceLocation,
    pub kind: LhsKind,
}

impl LhsIdentifier {
    /// The name of the assigned variable, whatever the target shape.
    pub fn name(&self) -> &str {
        match &self.kind {
            LhsKind::Plain(name)
            | LhsKind::VectorElement { name, .. }
            | LhsKind::MatrixElement { name, .. }
            | LhsKind::RecordElement { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone)]
pub enum LhsKind {
    /// `x = ...`
    Plain(String),
    /// `v[i] = ...`
    VectorElement { name: String, index: Box<Expression> },
    /// `m[r][c] = ...`
    MatrixElement {
        name: String,
        row_index: Box<Expression>,
        col_index: Box<Expression>,
    },
    /// `r@element = ...`
    RecordElement { name: String, element: String },
}
