//! Unit tests for error.rs

use crate::error::{Error, Result};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_invalid_argument_display() {
    let err = Error::InvalidArgument {
        function: "TraceScreenRay",
        index: 2,
        expected: "number",
    };
    let display = format!("{}", err);
    assert!(display.contains("Invalid argument"));
    assert!(display.contains("TraceScreenRay()"));
    assert!(display.contains("#2"));
    assert!(display.contains("number"));
}

#[test]
fn test_unsupported_display() {
    let err = Error::Unsupported("decal introspection".to_string());
    assert_eq!(format!("{}", err), "Unsupported: decal introspection");
}

#[test]
fn test_invalid_config_display() {
    let err = Error::InvalidConfig("quad_size must be positive".to_string());
    let display = format!("{}", err);
    assert!(display.starts_with("Invalid config"));
    assert!(display.contains("quad_size"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::Unsupported("x".to_string());
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_and_eq() {
    let err = Error::InvalidConfig("bad".to_string());
    assert_eq!(err.clone(), err);
}

#[test]
fn test_result_question_mark_propagation() {
    fn inner() -> Result<u32> {
        Err(Error::Unsupported("nope".to_string()))
    }

    fn outer() -> Result<u32> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert!(matches!(outer(), Err(Error::Unsupported(_))));
}
