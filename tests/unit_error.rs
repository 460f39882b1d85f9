/// Unit tests for DiError and DiResult types

use ferrous_container::{DiError, DiResult};
use std::error::Error;

#[test]
fn test_error_display_not_found() {
    let error = DiError::NotFound("abc".into());
    let display_str = format!("{}", error);
    assert_eq!(display_str, "Identifier not found: abc");
    assert!(error.is_not_found());
    assert!(!error.is_binding_resolution());
}

#[test]
fn test_error_display_binding_resolution() {
    let error = DiError::BindingResolution("Target [Reference] is not instantiable".into());
    assert_eq!(
        error.to_string(),
        "Binding resolution failed: Target [Reference] is not instantiable"
    );
    assert!(error.is_binding_resolution());
    assert!(!error.is_not_found());
}

#[test]
fn test_error_display_circular() {
    let error = DiError::Circular(vec!["A".into(), "B".into(), "A".into()]);
    assert_eq!(error.to_string(), "Circular dependency: A -> B -> A");
}

#[test]
fn test_error_display_depth_exceeded() {
    let error = DiError::DepthExceeded(1024);
    assert_eq!(error.to_string(), "Max depth 1024 exceeded");
}

#[test]
fn test_error_display_type_mismatch() {
    let error = DiError::TypeMismatch("alloc::string::String".into());
    assert_eq!(error.to_string(), "Type mismatch for: alloc::string::String");
}

#[test]
fn test_error_display_factory() {
    let error = DiError::Factory("connection refused".into());
    assert_eq!(error.to_string(), "Factory failed: connection refused");
}

#[test]
fn test_error_display_config() {
    let error = DiError::Config("FERROUS_CONTAINER_MAX_DEPTH is not an integer: deep".into());
    assert_eq!(
        error.to_string(),
        "Invalid configuration: FERROUS_CONTAINER_MAX_DEPTH is not an integer: deep"
    );
    assert!(!error.is_binding_resolution());
}

#[test]
fn test_error_trait_implementation() {
    let error = DiError::NotFound("svc".into());
    let as_error: &dyn Error = &error;
    assert!(as_error.source().is_none());
}

#[test]
fn test_error_clone() {
    let original = DiError::Circular(vec!["x".into(), "x".into()]);
    let cloned = original.clone();
    assert_eq!(original.to_string(), cloned.to_string());
}

#[test]
fn test_di_result_question_mark() {
    fn inner() -> DiResult<u8> {
        Err(DiError::NotFound("inner".into()))
    }

    fn outer() -> DiResult<u8> {
        let value = inner()?;
        Ok(value + 1)
    }

    assert!(outer().unwrap_err().is_not_found());
}
