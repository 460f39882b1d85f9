//! Binding lifetime definitions.

/// Lifetimes controlling whether a binding's first resolution is cached
///
/// # Examples
///
/// ```rust
/// use ferrous_container::{Container, Lifetime, Target};
/// use std::sync::Arc;
///
/// let container = Container::new();
///
/// // Shared: first resolution is cached and returned afterwards
/// container.bind("config", Target::factory(|_| String::from("prod")), Lifetime::Shared);
///
/// // Transient: the factory runs on every resolution
/// container.bind("request", Target::factory(|_| 7u32), Lifetime::Transient);
///
/// let a = container.get("config").unwrap();
/// let b = container.get("config").unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
///
/// let x = container.get("request").unwrap();
/// let y = container.get("request").unwrap();
/// assert!(!Arc::ptr_eq(&x, &y));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Lifetime {
    /// New instance per resolution, never cached
    #[default]
    Transient,
    /// First resolution is seated in the singleton cache under the binding's
    /// identifier and returned on every later lookup until the binding is
    /// removed or replaced.
    Shared,
}

impl Lifetime {
    /// Returns true for [`Lifetime::Shared`].
    #[inline]
    pub fn is_shared(self) -> bool {
        matches!(self, Lifetime::Shared)
    }
}

impl From<bool> for Lifetime {
    fn from(shared: bool) -> Self {
        if shared {
            Lifetime::Shared
        } else {
            Lifetime::Transient
        }
    }
}
