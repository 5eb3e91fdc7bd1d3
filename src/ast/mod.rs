//! AST (Abstract Syntax Tree) module.
//!
//! Contains all definitions related to the AST structure produced by the
//! external parser and consumed by contextual analysis:
//!
//! - expression: expression node kinds
//! - statement: statement node kinds and left-hand sides
//! - module: modules, functions, records and their declarations
//! - type_specifier: syntactic types, pre-resolution
//!
//! Nodes are tagged variants and are never mutated after parsing; every
//! node carries a [`NodeId`] under which analysis files its results in
//! side tables instead of writing into the tree.

pub mod expression;
pub mod module;
pub mod statement;
pub mod type_specifier;

pub use expression::{BinaryOp, Comparator, ExprKind, Expression, UnaryOp};
pub use module::{
    Declaration, Function, Module, RecordElementDeclaration, RecordTypeDeclaration,
};
pub use statement::{LhsIdentifier, LhsKind, Statement, StmtKind, SwitchSection};
pub use type_specifier::{TypeSpecifier, TypeSpecifierKind};

/// Identity of an AST node, unique within one module.
///
/// Ids are handed out by the [`AstBuilder`] the parser threads through its
/// run; analysis uses them as keys into its decoration tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Allocates [`NodeId`]s for one module's tree.
#[derive(Debug, Default)]
pub struct AstBuilder {
    next: u32,
}

impl AstBuilder {
    pub fn new() -> Self {
        AstBuilder::default()
    }

    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::AstBuilder;

    #[test]
    fn test_node_ids_are_unique_and_ordered() {
        let mut builder = AstBuilder::new();
        let a = builder.next_id();
        let b = builder.next_id();
        let c = builder.next_id();

        assert_ne!(a, b);
        assert!(a < b && b < c);
    }
}
