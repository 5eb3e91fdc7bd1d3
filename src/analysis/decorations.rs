use std::collections::HashMap;

use crate::ast::NodeId;
use crate::errors::CompilationError;
use crate::types::Type;
use crate::SourceLocation;

/// Index of a declaration in the [`DeclTable`] arena. Use sites refer to
/// their declarations through these instead of borrowing into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeclId(u32);

/// Everything analysis derives about one declaration site.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationInfo {
    pub name: String,
    pub ty: Type,
    pub is_variable: bool,
    pub location: SourceLocation,
    /// Offset of this binding in its function frame, in words. Unset for
    /// record elements, which are addressed relative to the record value.
    pub local_offset: Option<usize>,
}

/// Arena of all declarations encountered during one analysis run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeclTable {
    entries: Vec<DeclarationInfo>,
}

impl DeclTable {
    pub fn insert(&mut self, info: DeclarationInfo) -> DeclId {
        let id = DeclId(self.entries.len() as u32);
        self.entries.push(info);
        id
    }

    pub fn get(&self, id: DeclId) -> &DeclarationInfo {
        &self.entries[id.0 as usize]
    }

    pub fn set_local_offset(
        &mut self,
        id: DeclId,
        offset: usize,
    ) -> Result<(), CompilationError> {
        let entry = &mut self.entries[id.0 as usize];
        if entry.local_offset.is_some() {
            return Err(CompilationError::internal(format!(
                "local offset of {:?} assigned twice",
                entry.name
            )));
        }
        entry.local_offset = Some(offset);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The side tables produced by contextual analysis.
///
/// Each table is keyed by [`NodeId`] and set-once: inserting twice for the
/// same node, or reading an entry that was never set, is an internal
/// error, never a user-facing diagnostic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Decorations {
    types: HashMap<NodeId, Type>,
    decl_refs: HashMap<NodeId, DeclId>,
    constants: HashMap<NodeId, i64>,
    pub declarations: DeclTable,
}

impl Decorations {
    pub fn new() -> Self {
        Decorations::default()
    }

    pub fn set_type(&mut self, node: NodeId, ty: Type) -> Result<(), CompilationError> {
        if self.types.insert(node, ty).is_some() {
            return Err(CompilationError::internal(format!(
                "type of node {:?} resolved twice",
                node
            )));
        }
        Ok(())
    }

    pub fn type_of(&self, node: NodeId) -> Result<&Type, CompilationError> {
        self.types.get(&node).ok_or_else(|| {
            CompilationError::internal(format!("type of node {:?} read before resolution", node))
        })
    }

    pub fn set_decl_ref(&mut self, node: NodeId, decl: DeclId) -> Result<(), CompilationError> {
        if self.decl_refs.insert(node, decl).is_some() {
            return Err(CompilationError::internal(format!(
                "declaration reference of node {:?} set twice",
                node
            )));
        }
        Ok(())
    }

    pub fn decl_ref_of(&self, node: NodeId) -> Result<DeclId, CompilationError> {
        self.decl_refs.get(&node).copied().ok_or_else(|| {
            CompilationError::internal(format!(
                "declaration reference of node {:?} read before resolution",
                node
            ))
        })
    }

    pub fn set_constant(&mut self, node: NodeId, value: i64) -> Result<(), CompilationError> {
        if self.constants.insert(node, value).is_some() {
            return Err(CompilationError::internal(format!(
                "constant value of node {:?} set twice",
                node
            )));
        }
        Ok(())
    }

    pub fn constant_of(&self, node: NodeId) -> Result<i64, CompilationError> {
        self.constants.get(&node).copied().ok_or_else(|| {
            CompilationError::internal(format!(
                "constant value of node {:?} read before evaluation",
                node
            ))
        })
    }
}
