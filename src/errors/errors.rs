use thiserror::Error;

use crate::types::Type;
use crate::SourceLocation;

/// All errors the front end can report.
///
/// Every user-facing variant carries the source location of the offending
/// construct; [`CompilationError::Internal`] is the lone exception and
/// signals a bug in the compiler itself rather than in the compiled program.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompilationError {
    #[error("syntax error at {location}: {message}")]
    Syntax {
        location: SourceLocation,
        message: String,
    },
    #[error("unexpected end of input while scanning the entity starting at {location}")]
    UnexpectedEndOfInput { location: SourceLocation },
    #[error("undeclared reference to {name:?} at {location}")]
    UndeclaredReference {
        location: SourceLocation,
        name: String,
    },
    #[error("redeclaration of {name:?} at {location}, previously declared at {previous}")]
    OverwritingDeclaration {
        location: SourceLocation,
        name: String,
        previous: SourceLocation,
    },
    #[error("type mismatch at {location}: expected {expected}, found {found}")]
    TypeMismatch {
        location: SourceLocation,
        expected: Type,
        found: Type,
    },
    #[error("operation {operation:?} at {location} is not applicable to {found}")]
    InapplicableOperation {
        location: SourceLocation,
        operation: String,
        found: Type,
    },
    #[error("structure dimension error at {location}: {message}")]
    StructureDimension {
        location: SourceLocation,
        message: String,
    },
    #[error("cannot assign to constant {name:?} at {location}")]
    ConstantAssignment {
        location: SourceLocation,
        name: String,
    },
    #[error("record type {record:?} has no element {element:?} (referenced at {location})")]
    RecordElement {
        location: SourceLocation,
        record: String,
        element: String,
    },
    #[error("{}", duplicate_case_message(.is_default, .label, .first, .second))]
    DuplicateCase {
        is_default: bool,
        label: i64,
        first: SourceLocation,
        second: SourceLocation,
    },
    #[error("too many arguments in call to {name:?} at {location}: expected {expected}, received {received}")]
    TooManyArguments {
        location: SourceLocation,
        name: String,
        expected: usize,
        received: usize,
    },
    #[error("too few arguments in call to {name:?} at {location}: expected {expected}, received {received}")]
    TooFewArguments {
        location: SourceLocation,
        name: String,
        expected: usize,
        received: usize,
    },
    #[error("function {function:?} at {location} must end with a return statement")]
    MissingReturn {
        location: SourceLocation,
        function: String,
    },
    #[error("misplaced return statement at {location}")]
    MisplacedReturn { location: SourceLocation },
    #[error("no function 'void main()' found in the module")]
    MissingMain,
    #[error("expression at {location} is not a compile-time constant ({found})")]
    NonConstant {
        location: SourceLocation,
        found: String,
    },
    #[error("internal compiler error: {message}")]
    Internal { message: String },
}

fn duplicate_case_message(
    is_default: &bool,
    label: &i64,
    first: &SourceLocation,
    second: &SourceLocation,
) -> String {
    if *is_default {
        format!(
            "second default section in switch at {}, first occurrence at {}",
            second, first
        )
    } else {
        format!(
            "duplicate case {} in switch at {}, first occurrence at {}",
            label, second, first
        )
    }
}

impl CompilationError {
    /// The short, stable name of this error kind, independent of its payload.
    pub fn name(&self) -> &'static str {
        match self {
            CompilationError::Syntax { .. } => "Syntax",
            CompilationError::UnexpectedEndOfInput { .. } => "UnexpectedEndOfInput",
            CompilationError::UndeclaredReference { .. } => "UndeclaredReference",
            CompilationError::OverwritingDeclaration { .. } => "OverwritingDeclaration",
            CompilationError::TypeMismatch { .. } => "TypeMismatch",
            CompilationError::InapplicableOperation { .. } => "InapplicableOperation",
            CompilationError::StructureDimension { .. } => "StructureDimension",
            CompilationError::ConstantAssignment { .. } => "ConstantAssignment",
            CompilationError::RecordElement { .. } => "RecordElement",
            CompilationError::DuplicateCase { .. } => "DuplicateCase",
            CompilationError::TooManyArguments { .. } => "TooManyArguments",
            CompilationError::TooFewArguments { .. } => "TooFewArguments",
            CompilationError::MissingReturn { .. } => "MissingReturn",
            CompilationError::MisplacedReturn { .. } => "MisplacedReturn",
            CompilationError::MissingMain => "MissingMain",
            CompilationError::NonConstant { .. } => "NonConstant",
            CompilationError::Internal { .. } => "Internal",
        }
    }

    /// The location this error points at. Module-level and internal errors
    /// report [`SourceLocation::UNKNOWN`].
    pub fn location(&self) -> SourceLocation {
        match self {
            CompilationError::Syntax { location, .. }
            | CompilationError::UnexpectedEndOfInput { location }
            | CompilationError::UndeclaredReference { location, .. }
            | CompilationError::OverwritingDeclaration { location, .. }
            | CompilationError::TypeMismatch { location, .. }
            | CompilationError::InapplicableOperation { location, .. }
            | CompilationError::StructureDimension { location, .. }
            | CompilationError::ConstantAssignment { location, .. }
            | CompilationError::RecordElement { location, .. }
            | CompilationError::TooManyArguments { location, .. }
            | CompilationError::TooFewArguments { location, .. }
            | CompilationError::MissingReturn { location, .. }
            | CompilationError::MisplacedReturn { location }
            | CompilationError::NonConstant { location, .. } => *location,
            CompilationError::DuplicateCase { second, .. } => *second,
            CompilationError::MissingMain | CompilationError::Internal { .. } => {
                SourceLocation::UNKNOWN
            }
        }
    }

    /// True for errors that indicate a compiler bug rather than a problem
    /// in the compiled program.
    pub fn is_internal(&self) -> bool {
        matches!(self, CompilationError::Internal { .. })
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CompilationError::Internal {
            message: message.into(),
        }
    }
}
