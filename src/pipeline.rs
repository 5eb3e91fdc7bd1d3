//! The compilation pipeline: a stage machine driving one module through
//! the front end.
//!
//! Stages advance strictly `Uninitialized → Parsed → Analyzed`; skipping
//! or repeating a stage is a contract violation reported as an internal
//! error. Code generation and execution are not part of this build and
//! their entry points fail fast.

use crate::analysis::{ContextualAnalysis, Decorations, ModuleEnvironment};
use crate::ast::Module;
use crate::errors::CompilationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Uninitialized,
    Parsed,
    Analyzed,
}

/// Owns one module's journey through the front end.
pub struct Pipeline {
    stage: Stage,
    environment: ModuleEnvironment,
    module: Option<Module>,
    decorations: Option<Decorations>,
    analysis_attempted: bool,
}

impl Pipeline {
    /// A fresh pipeline with the standard runtime environment.
    pub fn new() -> Self {
        Pipeline {
            stage: Stage::Uninitialized,
            environment: ModuleEnvironment::new(),
            module: None,
            decorations: None,
            analysis_attempted: false,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Accepts the external parser's output and advances to `Parsed`.
    pub fn load_module(&mut self, module: Module) -> Result<(), CompilationError> {
        if self.stage != Stage::Uninitialized {
            return Err(CompilationError::internal(
                "a module has already been loaded into this pipeline",
            ));
        }
        self.module = Some(module);
        self.stage = Stage::Parsed;
        Ok(())
    }

    /// Runs contextual analysis, advancing to `Analyzed`. Runs at most
    /// once; a failed run poisons the pipeline.
    pub fn analyze(&mut self) -> Result<&Decorations, CompilationError> {
        if self.stage != Stage::Parsed {
            return Err(CompilationError::internal(
                "analysis requires a parsed, unanalyzed module",
            ));
        }
        if self.analysis_attempted {
            return Err(CompilationError::internal("analysis has already run"));
        }
        self.analysis_attempted = true;

        let module = self
            .module
            .as_ref()
            .ok_or_else(|| CompilationError::internal("parsed stage without a module"))?;
        let decorations = ContextualAnalysis::analyze(module, &mut self.environment)?;
        self.decorations = Some(decorations);
        self.stage = Stage::Analyzed;
        self.decorations()
    }

    pub fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    pub fn environment(&self) -> &ModuleEnvironment {
        &self.environment
    }

    pub fn decorations(&self) -> Result<&Decorations, CompilationError> {
        self.decorations
            .as_ref()
            .ok_or_else(|| CompilationError::internal("decorations requested before analysis"))
    }

    pub fn compile(&self) -> Result<(), CompilationError> {
        Err(CompilationError::internal(
            "code generation is not available in this build",
        ))
    }

    pub fn execute(&self) -> Result<(), CompilationError> {
        Err(CompilationError::internal(
            "interpreter is not available in this build",
        ))
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Pipeline, Stage};
    use crate::ast::Module;

    fn empty_module() -> Module {
        Module {
            records: Vec::new(),
            functions: Vec::new(),
        }
    }

    #[test]
    fn test_stage_progression() {
        let mut pipeline = Pipeline::new();
        assert_eq!(pipeline.stage(), Stage::Uninitialized);

        pipeline.load_module(empty_module()).unwrap();
        assert_eq!(pipeline.stage(), Stage::Parsed);
    }

    #[test]
    fn test_analyze_requires_parsed_module() {
        let mut pipeline = Pipeline::new();
        let error = pipeline.analyze().unwrap_err();
        assert!(error.is_internal());
    }

    #[test]
    fn test_load_module_twice_fails() {
        let mut pipeline = Pipeline::new();
        pipeline.load_module(empty_module()).unwrap();
        let error = pipeline.load_module(empty_module()).unwrap_err();
        assert!(error.is_internal());
    }

    #[test]
    fn test_analysis_runs_once() {
        let mut pipeline = Pipeline::new();
        pipeline.load_module(empty_module()).unwrap();

        // The empty module has no main function
        assert_eq!(pipeline.analyze().unwrap_err().name(), "MissingMain");
        assert!(pipeline.analyze().unwrap_err().is_internal());
    }

    #[test]
    fn test_backend_stubs_fail_fast() {
        let pipeline = Pipeline::new();
        assert!(pipeline.compile().unwrap_err().is_internal());
        assert!(pipeline.execute().unwrap_err().is_internal());
    }
}
