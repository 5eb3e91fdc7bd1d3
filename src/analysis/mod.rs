//! Contextual analysis module for the MAVL compiler.
//!
//! This module contains the semantic pass that runs after parsing. It
//! includes:
//!
//! - scope: the nested identification table used during the tree walk
//! - decorations: side tables holding every derived attribute
//! - environment: the flat module namespace of functions and records
//! - runtime: signatures of the standard runtime builtins
//! - const_eval: the compile-time integer expression evaluator
//! - analysis: the tree walk itself
//!
//! Analysis never mutates the AST; it returns a [`Decorations`] value
//! keyed by node ids.

pub mod analysis;
pub mod const_eval;
pub mod decorations;
pub mod environment;
pub mod runtime;
pub mod scope;


pub use analysis::ContextualAnalysis;
pub use decorations::{DeclId, DeclTable, DeclarationInfo, Decorations};
pub use environment::{FunctionSignature, ModuleEnvironment, RecordElementInfo, RecordInfo};
pub use scope::ScopeStack;
