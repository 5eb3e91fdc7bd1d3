use std::collections::HashMap;

use crate::errors::CompilationError;
use crate::SourceLocation;

use super::decorations::{DeclId, DeclTable};

/// The identification table: a stack of nested lexical scopes mapping
/// names to declarations.
///
/// Each analysis run owns its own stack; nothing here is shared between
/// runs. Functions and record types never pass through this table, they
/// live in the flat module environment instead.
#[derive(Debug, Default)]
pub struct ScopeStack {
    scopes: Vec<HashMap<String, DeclId>>,
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack::default()
    }

    pub fn open_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pops the innermost scope. Calling this without a matching open is
    /// a bug in the tree walk, not a user error.
    pub fn close_scope(&mut self) -> Result<(), CompilationError> {
        self.scopes
            .pop()
            .map(|_| ())
            .ok_or_else(|| CompilationError::internal("scope stack underflow"))
    }

    /// Declares a name in the innermost scope. Shadowing an outer scope
    /// is allowed; redeclaring within the same scope is rejected.
    pub fn declare(
        &mut self,
        name: &str,
        decl: DeclId,
        location: SourceLocation,
        table: &DeclTable,
    ) -> Result<(), CompilationError> {
        let scope = self
            .scopes
            .last_mut()
            .ok_or_else(|| CompilationError::internal("declaration outside any scope"))?;

        if let Some(previous) = scope.get(name) {
            return Err(CompilationError::OverwritingDeclaration {
                location,
                name: name.to_string(),
                previous: table.get(*previous).location,
            });
        }
        scope.insert(name.to_string(), decl);
        Ok(())
    }

    /// Resolves a name through the scope chain, innermost first.
    pub fn resolve(&self, name: &str) -> Option<DeclId> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }
}
