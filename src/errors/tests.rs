//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::CompilationError;
use crate::types::Type;
use crate::SourceLocation;

#[test]
fn test_error_name() {
    let error = CompilationError::UndeclaredReference {
        location: SourceLocation::new(4, 9),
        name: "foo".to_string(),
    };

    assert_eq!(error.name(), "UndeclaredReference");
}

#[test]
fn test_error_location() {
    let error = CompilationError::MisplacedReturn {
        location: SourceLocation::new(12, 5),
    };

    assert_eq!(error.location(), SourceLocation::new(12, 5));
}

#[test]
fn test_module_level_errors_have_no_location() {
    assert_eq!(CompilationError::MissingMain.location(), SourceLocation::UNKNOWN);
    assert_eq!(
        CompilationError::internal("broken").location(),
        SourceLocation::UNKNOWN
    );
}

#[test]
fn test_duplicate_case_points_at_second_occurrence() {
    let error = CompilationError::DuplicateCase {
        is_default: false,
        label: 3,
        first: SourceLocation::new(2, 9),
        second: SourceLocation::new(5, 9),
    };

    assert_eq!(error.location(), SourceLocation::new(5, 9));
}

#[test]
fn test_duplicate_case_display_names_the_label() {
    let error = CompilationError::DuplicateCase {
        is_default: false,
        label: 3,
        first: SourceLocation::new(2, 9),
        second: SourceLocation::new(5, 9),
    };

    assert_eq!(
        error.to_string(),
        "duplicate case 3 in switch at line 5, column 9, first occurrence at line 2, column 9"
    );
}

#[test]
fn test_duplicate_default_display_is_distinct() {
    let error = CompilationError::DuplicateCase {
        is_default: true,
        label: 0,
        first: SourceLocation::new(2, 9),
        second: SourceLocation::new(8, 9),
    };

    assert_eq!(
        error.to_string(),
        "second default section in switch at line 8, column 9, first occurrence at line 2, column 9"
    );
}

#[test]
fn test_type_mismatch_display() {
    let error = CompilationError::TypeMismatch {
        location: SourceLocation::new(3, 7),
        expected: Type::Int,
        found: Type::Float,
    };

    assert_eq!(
        error.to_string(),
        "type mismatch at line 3, column 7: expected int, found float"
    );
}

#[test]
fn test_internal_flag() {
    assert!(CompilationError::internal("oops").is_internal());
    assert!(!CompilationError::MissingMain.is_internal());
}

#[test]
fn test_argument_count_errors() {
    let too_many = CompilationError::TooManyArguments {
        location: SourceLocation::new(1, 1),
        name: "printInt".to_string(),
        expected: 1,
        received: 2,
    };
    let too_few = CompilationError::TooFewArguments {
        location: SourceLocation::new(1, 1),
        name: "printInt".to_string(),
        expected: 1,
        received: 0,
    };

    assert_eq!(too_many.name(), "TooManyArguments");
    assert_eq!(too_few.name(), "TooFewArguments");
}
