//! Error types for the dependency injection container.

use thiserror::Error;

/// Dependency injection errors
///
/// Represents the conditions under which [`Container::get`](crate::Container::get)
/// cannot produce an instance. `NotFound` and `BindingResolution` are the two
/// kinds callers usually branch on; the others describe guard rails and
/// type-erasure failures.
///
/// # Examples
///
/// ```rust
/// use ferrous_container::{Container, DiError};
///
/// let container = Container::new();
/// match container.get("abc") {
///     Err(DiError::NotFound(id)) => assert_eq!(id, "abc"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use ferrous_container::DiError;
///
/// let circular = DiError::Circular(vec!["a".into(), "b".into(), "a".into()]);
/// assert_eq!(circular.to_string(), "Circular dependency: a -> b -> a");
/// ```
#[derive(Debug, Clone, Error)]
pub enum DiError {
    /// Identifier has no binding and names no declared type
    #[error("Identifier not found: {0}")]
    NotFound(String),
    /// Type is not instantiable, or a constructor parameter cannot be satisfied
    #[error("Binding resolution failed: {0}")]
    BindingResolution(String),
    /// Identifier re-entered while it was still being resolved (includes path)
    #[error("Circular dependency: {}", .0.join(" -> "))]
    Circular(Vec<String>),
    /// Maximum recursion depth exceeded
    #[error("Max depth {0} exceeded")]
    DepthExceeded(usize),
    /// Type downcast failed
    #[error("Type mismatch for: {0}")]
    TypeMismatch(String),
    /// A factory reported its own failure
    #[error("Factory failed: {0}")]
    Factory(String),
    /// A configuration value could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DiError {
    /// Returns true for [`DiError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, DiError::NotFound(_))
    }

    /// Returns true for [`DiError::BindingResolution`].
    pub fn is_binding_resolution(&self) -> bool {
        matches!(self, DiError::BindingResolution(_))
    }

    pub(crate) fn not_instantiable(id: &str) -> Self {
        DiError::BindingResolution(format!("Target [{}] is not instantiable", id))
    }

    pub(crate) fn unresolvable(parameter: &str, target: &str) -> Self {
        DiError::BindingResolution(format!(
            "Unresolvable dependency resolving [{}] in {}",
            parameter, target
        ))
    }
}

/// Result type for DI operations
///
/// A convenience alias for `Result<T, DiError>` used throughout the crate.
///
/// ```rust
/// use ferrous_container::{DiError, DiResult};
///
/// fn failing_operation() -> DiResult<()> {
///     Err(DiError::NotFound("some_service".into()))
/// }
///
/// assert!(failing_operation().unwrap_err().is_not_found());
/// ```
pub type DiResult<T> = Result<T, DiError>;
