use crate::SourceLocation;

use super::{NodeId, Statement, TypeSpecifier};

/// A parsed MAVL module: record type declarations plus functions, in
/// source order.
#[derive(Debug, Clone)]
pub struct Module {
    pub records: Vec<RecordTypeDeclaration>,
    pub functions: Vec<Function>,
}

/// A function definition. Builtins share this shape but have an empty
/// body and are registered directly in the module environment.
#[derive(Debug, Clone)]
pub struct Function {
    pub id: NodeId,
    pub location: SourceLocation,
    pub name: String,
    pub return_specifier: TypeSpecifier,
    pub parameters: Vec<Declaration>,
    pub body: Vec<Statement>,
}

/// A named binding introduced by a declaration site: a `var`/`val`
/// statement, a formal parameter, a foreach iterator, or a record
/// element. Mutability is explicit; parameters are always mutable.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub id: NodeId,
    pub location: SourceLocation,
    pub name: String,
    pub specifier: TypeSpecifier,
    pub is_variable: bool,
}

/// `record name { elements }`
#[derive(Debug, Clone)]
pub struct RecordTypeDeclaration {
    pub id: NodeId,
    pub location: SourceLocation,
    pub name: String,
    pub elements: Vec<RecordElementDeclaration>,
}

/// One element of a record type declaration.
#[derive(Debug, Clone)]
pub struct RecordElementDeclaration {
    pub id: NodeId,
    pub location: SourceLocation,
    pub name: String,
    pub specifier: TypeSpecifier,
    pub is_variable: bool,
}
