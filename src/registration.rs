//! Binding registration types.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::container::Container;
use crate::error::DiResult;
use crate::internal::Map;
use crate::lifetime::Lifetime;

/// Type-erased resolved object.
///
/// Identity is `Arc::ptr_eq`. Trait objects travel as `Arc<Arc<dyn Trait>>`
/// erased into this type.
///
/// The container's own slot yields `Arc<Container>` handles that stay
/// pointer-equal only while one of them is alive; compare containers with
/// [`Container::ptr_eq`].
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Type-erased factory signature stored in a [`Target::Factory`].
pub type FactoryFn = dyn Fn(&Container) -> DiResult<Instance> + Send + Sync;

/// What an identifier is bound to.
///
/// # Examples
///
/// ```rust
/// use ferrous_container::{Container, Target};
///
/// let container = Container::new();
/// container.add("status", Target::factory(|_| "ok"));
/// container.add("alias", "status");
///
/// let status = container.get("alias").unwrap();
/// assert_eq!(*status.downcast::<&str>().unwrap(), "ok");
/// ```
#[derive(Clone)]
pub enum Target {
    /// Another identifier. When equal to the binding's own identifier the
    /// binding is self-referential and the identifier is built as a concrete
    /// type; otherwise it is an alias.
    Identifier(String),
    /// Callable invoked with the container; never auto-wired.
    Factory(Arc<FactoryFn>),
}

impl Target {
    /// Alias target pointing at another identifier.
    pub fn alias(id: impl Into<String>) -> Self {
        Target::Identifier(id.into())
    }

    /// Factory target producing a value on every invocation.
    pub fn factory<T, F>(f: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Container) -> T + Send + Sync + 'static,
    {
        Target::Factory(Arc::new(move |c: &Container| Ok(Arc::new(f(c)) as Instance)))
    }

    /// Factory target that may fail; its error is returned from `get` as-is.
    pub fn try_factory<T, F>(f: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Container) -> DiResult<T> + Send + Sync + 'static,
    {
        Target::Factory(Arc::new(move |c: &Container| Ok(Arc::new(f(c)?) as Instance)))
    }

    /// Factory target returning an already type-erased instance.
    pub fn instance_factory<F>(f: F) -> Self
    where
        F: Fn(&Container) -> DiResult<Instance> + Send + Sync + 'static,
    {
        Target::Factory(Arc::new(f))
    }

    /// Returns true if this target is a factory.
    pub fn is_factory(&self) -> bool {
        matches!(self, Target::Factory(_))
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Identifier(id) => f.debug_tuple("Identifier").field(id).finish(),
            Target::Factory(_) => f.write_str("Factory(..)"),
        }
    }
}

impl From<&str> for Target {
    fn from(id: &str) -> Self {
        Target::Identifier(id.to_owned())
    }
}

impl From<String> for Target {
    fn from(id: String) -> Self {
        Target::Identifier(id)
    }
}

/// A binding record
#[derive(Clone, Debug)]
pub(crate) struct Entry {
    pub(crate) target: Target,
    pub(crate) lifetime: Lifetime,
}

/// Contents of a singleton slot
#[derive(Clone)]
pub(crate) enum Slot {
    Instance(Instance),
    /// The owning container itself; materialized as a fresh handle on lookup
    /// so the slot never keeps its own container alive.
    Container,
}

/// Binding registry and singleton cache
#[derive(Default)]
pub(crate) struct Registry {
    entries: Map<String, Entry>,
    singletons: Map<String, Slot>,
}

impl Registry {
    /// Replaces any binding and seated singleton for `id`.
    pub(crate) fn insert(&mut self, id: String, entry: Entry) {
        self.remove(&id);
        self.entries.insert(id, entry);
    }

    /// Seats a singleton without touching the binding for `id`.
    pub(crate) fn seat(&mut self, id: String, slot: Slot) {
        self.singletons.insert(id, slot);
    }

    /// Removes binding and singleton; returns true if either existed.
    pub(crate) fn remove(&mut self, id: &str) -> bool {
        let had_singleton = self.singletons.remove(id).is_some();
        let had_entry = self.entries.remove(id).is_some();
        had_singleton || had_entry
    }

    #[inline]
    pub(crate) fn singleton(&self, id: &str) -> Option<Slot> {
        self.singletons.get(id).cloned()
    }

    #[inline]
    pub(crate) fn entry(&self, id: &str) -> Option<Entry> {
        self.entries.get(id).cloned()
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id) || self.singletons.contains_key(id)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&String, &Entry)> {
        self.entries.iter()
    }

    pub(crate) fn singleton_ids(&self) -> impl Iterator<Item = &String> {
        self.singletons.keys()
    }

    pub(crate) fn has_singleton(&self, id: &str) -> bool {
        self.singletons.contains_key(id)
    }
}
