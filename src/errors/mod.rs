//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error variants for the scanning and contextual analysis phases
//! - Source location information on every user-facing variant
//! - Error formatting and display functionality

pub mod errors;

#[cfg(test)]
mod tests;

pub use errors::CompilationError;
