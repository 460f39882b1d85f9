//! Binding descriptors for introspection and diagnostics.

use crate::lifetime::Lifetime;

/// What a binding points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetKind {
    /// Built as a concrete type under its own identifier
    SelfType,
    /// Alias to another identifier
    Alias(String),
    /// Factory callable
    Factory,
    /// Pre-built instance seated directly in the singleton cache
    Instance,
}

/// Snapshot of one registered identifier
///
/// # Examples
///
/// ```rust
/// use ferrous_container::{Container, Lifetime, Target, TargetKind};
///
/// let container = Container::new();
/// container.singleton("clock", Target::factory(|_| 0u64));
/// container.add("time", "clock");
///
/// let descriptors = container.descriptors();
/// let time = descriptors.iter().find(|d| d.identifier == "time").unwrap();
/// assert_eq!(time.target, TargetKind::Alias("clock".into()));
/// assert_eq!(time.lifetime, Lifetime::Transient);
///
/// let clock = descriptors.iter().find(|d| d.identifier == "clock").unwrap();
/// assert!(clock.is_shared());
/// assert!(!clock.seated);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDescriptor {
    pub identifier: String,
    pub target: TargetKind,
    pub lifetime: Lifetime,
    /// Whether a singleton is currently cached for this identifier
    pub seated: bool,
}

impl BindingDescriptor {
    pub fn is_alias(&self) -> bool {
        matches!(self.target, TargetKind::Alias(_))
    }

    pub fn is_shared(&self) -> bool {
        self.lifetime.is_shared()
    }
}
