use std::collections::HashMap;

use crate::errors::CompilationError;
use crate::types::Type;
use crate::SourceLocation;

use super::runtime;

/// The resolved signature of a function, user-defined or builtin.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSignature {
    pub name: String,
    pub parameter_types: Vec<Type>,
    pub return_type: Type,
    pub location: SourceLocation,
}

/// One element of a resolved record type.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordElementInfo {
    pub name: String,
    pub ty: Type,
    pub is_variable: bool,
    pub location: SourceLocation,
}

/// A resolved record type: its elements in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordInfo {
    pub name: String,
    pub location: SourceLocation,
    pub elements: Vec<RecordElementInfo>,
}

impl RecordInfo {
    pub fn element(&self, name: &str) -> Option<&RecordElementInfo> {
        self.elements.iter().find(|element| element.name == name)
    }
}

/// The flat module namespace: function names and record type names.
///
/// MAVL has no nested functions and no overloading, so two plain maps
/// suffice. The environment is seeded with the runtime builtins before
/// any user declarations are registered.
#[derive(Debug, Default)]
pub struct ModuleEnvironment {
    functions: HashMap<String, FunctionSignature>,
    records: HashMap<String, RecordInfo>,
}

impl ModuleEnvironment {
    /// An empty environment with no builtins, used in tests.
    pub fn empty() -> Self {
        ModuleEnvironment::default()
    }

    /// The standard environment, seeded with the runtime builtins.
    pub fn new() -> Self {
        let mut env = ModuleEnvironment::default();
        runtime::register_builtins(&mut env);
        env
    }

    pub fn declare_function(
        &mut self,
        signature: FunctionSignature,
    ) -> Result<(), CompilationError> {
        if let Some(previous) = self.functions.get(&signature.name) {
            return Err(CompilationError::OverwritingDeclaration {
                location: signature.location,
                name: signature.name.clone(),
                previous: previous.location,
            });
        }
        self.functions.insert(signature.name.clone(), signature);
        Ok(())
    }

    pub fn declare_record(&mut self, record: RecordInfo) -> Result<(), CompilationError> {
        if let Some(previous) = self.records.get(&record.name) {
            return Err(CompilationError::OverwritingDeclaration {
                location: record.location,
                name: record.name.clone(),
                previous: previous.location,
            });
        }
        self.records.insert(record.name.clone(), record);
        Ok(())
    }

    pub fn lookup_function(
        &self,
        name: &str,
        location: SourceLocation,
    ) -> Result<&FunctionSignature, CompilationError> {
        self.functions
            .get(name)
            .ok_or_else(|| CompilationError::UndeclaredReference {
                location,
                name: name.to_string(),
            })
    }

    pub fn lookup_record(
        &self,
        name: &str,
        location: SourceLocation,
    ) -> Result<&RecordInfo, CompilationError> {
        self.records
            .get(name)
            .ok_or_else(|| CompilationError::UndeclaredReference {
                location,
                name: name.to_string(),
            })
    }

    /// Storage footprint of a type in words, resolving record types
    /// through this environment. Record elements are member types, so
    /// the recursion is at most one level deep.
    pub fn word_size(&self, ty: &Type) -> Result<usize, CompilationError> {
        match ty {
            Type::Record(name) => {
                let record = self.lookup_record(name, SourceLocation::UNKNOWN)?;
                let mut size = 0;
                for element in &record.elements {
                    size += element.ty.word_size().ok_or_else(|| {
                        CompilationError::internal(format!(
                            "record {:?} contains an unsized element type",
                            record.name
                        ))
                    })?;
                }
                Ok(size)
            }
            other => other.word_size().ok_or_else(|| {
                CompilationError::internal("primitive type without a word size")
            }),
        }
    }
}
