//! Constructor parameter specs and argument maps.
//!
//! A [`Parameter`] describes one constructor parameter the way reflection would
//! report it: its name, an optional type identifier the container can resolve,
//! and an optional default. [`Arguments`] is the keyed set of values handed to
//! a constructor, and doubles as the explicit override map accepted by
//! [`Container::get_with`](crate::Container::get_with).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::identifier::identifier_of;
use crate::internal::Map;
use crate::registration::Instance;

/// One declared constructor parameter.
///
/// # Examples
///
/// ```rust
/// use ferrous_container::Parameter;
///
/// trait Reference: Send + Sync {}
///
/// let p = Parameter::of::<dyn Reference>("impl").default_null();
/// assert_eq!(p.name(), "impl");
/// assert!(p.type_identifier().unwrap().ends_with("Reference"));
/// assert!(p.has_default());
/// ```
#[derive(Clone)]
pub struct Parameter {
    name: String,
    type_identifier: Option<String>,
    default: Option<Option<Instance>>,
}

impl Parameter {
    /// Untyped parameter with no default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_identifier: None,
            default: None,
        }
    }

    /// Parameter typed against an identifier the container may resolve.
    pub fn typed(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_identifier: Some(identifier.into()),
            default: None,
        }
    }

    /// Parameter typed against a Rust type or trait object.
    pub fn of<T: ?Sized>(name: impl Into<String>) -> Self {
        Self::typed(name, identifier_of::<T>())
    }

    /// Defaults to the null value.
    pub fn default_null(mut self) -> Self {
        self.default = Some(None);
        self
    }

    /// Defaults to `value`.
    pub fn default_value<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.default = Some(Some(Arc::new(value)));
        self
    }

    /// Defaults to an already erased instance.
    pub fn default_instance(mut self, value: Instance) -> Self {
        self.default = Some(Some(value));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_identifier(&self) -> Option<&str> {
        self.type_identifier.as_deref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// `None` when no default is declared; `Some(None)` for a null default.
    pub fn default(&self) -> Option<&Option<Instance>> {
        self.default.as_ref()
    }
}

impl fmt::Debug for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("type_identifier", &self.type_identifier)
            .field("has_default", &self.has_default())
            .finish()
    }
}

/// Keyed constructor arguments. `None` values are nulls.
///
/// # Examples
///
/// ```rust
/// use ferrous_container::Arguments;
///
/// let mut args = Arguments::new().with("port", 8080u16).with_null("tls");
/// assert_eq!(*args.required::<u16>("port").unwrap(), 8080);
/// assert!(args.take::<String>("tls").unwrap().is_none());
/// assert!(args.take::<String>("missing").is_err());
/// ```
#[derive(Clone, Default)]
pub struct Arguments {
    values: Map<String, Option<Instance>>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value, wrapping it in an `Arc`.
    pub fn with<T: Any + Send + Sync>(self, name: impl Into<String>, value: T) -> Self {
        self.with_instance(name, Arc::new(value))
    }

    /// Adds a shared value without re-wrapping it.
    pub fn with_arc<T: Any + Send + Sync>(self, name: impl Into<String>, value: Arc<T>) -> Self {
        self.with_instance(name, value)
    }

    /// Adds a trait object, stored the way trait-typed parameters expect it.
    pub fn with_trait<T>(self, name: impl Into<String>, value: Arc<T>) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.with_instance(name, Arc::new(value))
    }

    pub fn with_instance(mut self, name: impl Into<String>, value: Instance) -> Self {
        self.values.insert(name.into(), Some(value));
        self
    }

    pub fn with_null(mut self, name: impl Into<String>) -> Self {
        self.values.insert(name.into(), None);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Option<Instance>) {
        self.values.insert(name.into(), value);
    }

    /// Overlays `overrides`: every value they carry replaces the one here.
    pub fn merge(&mut self, overrides: Arguments) {
        self.values.extend(overrides.values);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw access; `None` if the name is absent, `Some(None)` for a null.
    pub fn get_raw(&self, name: &str) -> Option<&Option<Instance>> {
        self.values.get(name)
    }

    pub fn take_raw(&mut self, name: &str) -> Option<Option<Instance>> {
        self.values.remove(name)
    }

    /// Takes a concrete value; `Ok(None)` for a null.
    pub fn take<T: Any + Send + Sync>(&mut self, name: &str) -> DiResult<Option<Arc<T>>> {
        match self.take_raw(name) {
            None => Err(missing(name)),
            Some(None) => Ok(None),
            Some(Some(value)) => value
                .downcast::<T>()
                .map(Some)
                .map_err(|_| mismatch::<T>(name)),
        }
    }

    /// Takes a concrete value that must be present and non-null.
    pub fn required<T: Any + Send + Sync>(&mut self, name: &str) -> DiResult<Arc<T>> {
        self.take::<T>(name)?.ok_or_else(|| null(name))
    }

    /// Takes a trait object; `Ok(None)` for a null.
    pub fn take_trait<T>(&mut self, name: &str) -> DiResult<Option<Arc<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        match self.take_raw(name) {
            None => Err(missing(name)),
            Some(None) => Ok(None),
            Some(Some(value)) => value
                .downcast::<Arc<T>>()
                .map(|boxed| Some((*boxed).clone()))
                .map_err(|_| mismatch::<T>(name)),
        }
    }

    /// Takes a trait object that must be present and non-null.
    pub fn required_trait<T>(&mut self, name: &str) -> DiResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.take_trait::<T>(name)?.ok_or_else(|| null(name))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("Arguments").field("names", &names).finish()
    }
}

fn missing(name: &str) -> DiError {
    DiError::BindingResolution(format!("missing argument [{}]", name))
}

fn null(name: &str) -> DiError {
    DiError::BindingResolution(format!("argument [{}] is null", name))
}

fn mismatch<T: ?Sized>(name: &str) -> DiError {
    DiError::TypeMismatch(format!("argument [{}] as {}", name, identifier_of::<T>()))
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    struct Hello;
    impl Greeter for Hello {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    #[test]
    fn trait_values_round_trip() {
        let mut args = Arguments::new().with_trait::<dyn Greeter>("g", Arc::new(Hello));
        let g = args.required_trait::<dyn Greeter>("g").unwrap();
        assert_eq!(g.greet(), "hello");
        assert!(!args.contains("g"));
    }

    #[test]
    fn merge_replaces_and_extends() {
        let mut args = Arguments::new().with("a", 1u8).with("b", 2u8);
        args.merge(Arguments::new().with_null("a").with("c", 3u8));

        assert_eq!(args.len(), 3);
        assert!(matches!(args.get_raw("a"), Some(None)));
        assert_eq!(*args.required::<u8>("b").unwrap(), 2);
        assert_eq!(*args.required::<u8>("c").unwrap(), 3);
    }

    #[test]
    fn wrong_type_is_mismatch() {
        let mut args = Arguments::new().with("n", 1u32);
        assert!(matches!(args.take::<u64>("n"), Err(DiError::TypeMismatch(_))));
    }

    #[test]
    fn required_rejects_null() {
        let mut args = Arguments::new().with_null("n");
        assert!(args.required::<u32>("n").unwrap_err().is_binding_resolution());
    }

    #[test]
    fn parameter_defaults() {
        assert!(!Parameter::new("x").has_default());
        assert!(matches!(Parameter::new("x").default_null().default(), Some(None)));
        assert!(matches!(Parameter::new("x").default_value(3u8).default(), Some(Some(_))));
    }
}
