//! The dependency injection container.
//!
//! This module holds the [`Container`] handle together with its binding
//! registry, singleton cache, type catalog, plan cache and listener lists.
//! Resolution itself lives in the `resolve` submodule.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use crate::catalog::{Catalog, Injectable, TypeDescriptor};
use crate::config::ContainerConfig;
use crate::descriptors::{BindingDescriptor, TargetKind};
use crate::identifier::{identifier_of, CONTAINER};
use crate::internal::Map;
use crate::lifetime::Lifetime;
use crate::listener::{Listener, Listeners};
use crate::registration::{Entry, Instance, Registry, Slot, Target};

mod current;
mod resolve;

pub use resolve::Definition;
use resolve::Plan;

/// Runtime dependency injection container.
///
/// Maps identifiers to construction rules and resolves object graphs on
/// demand. `Container` is a cheap handle: clones share the same registry,
/// singleton cache and listeners, and [`Container::ptr_eq`] tells whether two
/// handles refer to the same container.
///
/// # Thread Safety
///
/// The container is `Send + Sync`. Internal locks are released before any
/// factory, constructor or listener runs, so factories may call back into the
/// container. Mutating bindings while other threads resolve them is
/// last-writer-wins per call; keeping a multi-step registration consistent is
/// the caller's job.
///
/// # Examples
///
/// ```
/// use ferrous_container::{Container, Target};
/// use std::sync::Arc;
///
/// let container = Container::new();
/// container.add("status", Target::factory(|_| "ok"));
/// container.singleton("shared", Target::factory(|_| vec![1, 2, 3]));
///
/// let status = container.get_as::<&str>("status").unwrap();
/// assert_eq!(*status, "ok");
///
/// let a = container.get("shared").unwrap();
/// let b = container.get("shared").unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct Container {
    inner: Arc<ContainerInner>,
}

pub(crate) struct ContainerInner {
    config: ContainerConfig,
    registry: RwLock<Registry>,
    catalog: RwLock<Catalog>,
    solved: Mutex<Map<String, Arc<Plan>>>,
    listeners: RwLock<Listeners>,
    /// Handle last handed out for the self slot; weak so it never owns us
    handle: Mutex<Weak<Container>>,
}

impl Container {
    /// Creates a container with default settings.
    ///
    /// The container seats itself as a singleton under its own type
    /// identifier and under [`CONTAINER`], and becomes the current instance.
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// Creates a container with explicit settings.
    pub fn with_config(config: ContainerConfig) -> Self {
        let mut registry = Registry::default();
        registry.seat(identifier_of::<Container>().to_owned(), Slot::Container);
        registry.seat(CONTAINER.to_owned(), Slot::Container);

        let register_as_current = config.register_as_current;
        let inner = Arc::new(ContainerInner {
            config,
            registry: RwLock::new(registry),
            catalog: RwLock::new(Catalog::default()),
            solved: Mutex::new(Map::default()),
            listeners: RwLock::new(Listeners::default()),
            handle: Mutex::new(Weak::new()),
        });
        if register_as_current {
            current::set(&inner);
        }
        tracing::debug!(register_as_current, "container created");
        Self { inner }
    }

    /// The most recently constructed container that registered itself as
    /// current and is still alive.
    ///
    /// This is a convenience pointer, not a uniqueness guarantee: any number
    /// of containers may coexist and the last one constructed wins.
    pub fn instance() -> Option<Container> {
        current::get().map(|inner| Container { inner })
    }

    /// Makes this container the current instance.
    pub fn set_as_current(&self) {
        current::set(&self.inner);
    }

    /// Clears the current-instance pointer if it refers to this container.
    pub fn unset_as_current(&self) {
        current::clear_if(&self.inner);
    }

    /// Returns true if both handles refer to the same container.
    pub fn ptr_eq(a: &Container, b: &Container) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    // ===== Binding Registry =====

    /// Binds `id` to `target` with the given lifetime.
    ///
    /// Any previous binding and cached singleton for `id` are discarded first.
    pub fn bind(&self, id: impl Into<String>, target: impl Into<Target>, lifetime: Lifetime) {
        let id = id.into();
        let target = target.into();
        tracing::debug!(id = %id, target = ?target, ?lifetime, "binding added");
        self.inner.registry.write().insert(id, Entry { target, lifetime });
        self.invalidate_plans();
    }

    /// Binds `id` to `target` as a transient binding.
    ///
    /// A target equal to `id` makes the binding self-referential.
    pub fn add(&self, id: impl Into<String>, target: impl Into<Target>) {
        self.bind(id, target, Lifetime::Transient);
    }

    /// Binds `id` to building itself as a concrete type.
    pub fn add_self(&self, id: impl Into<String>) {
        let id = id.into();
        self.bind(id.clone(), Target::Identifier(id), Lifetime::Transient);
    }

    /// Binds `id` to `target` as a shared binding.
    pub fn singleton(&self, id: impl Into<String>, target: impl Into<Target>) {
        self.bind(id, target, Lifetime::Shared);
    }

    /// Shared self-referential binding.
    pub fn singleton_self(&self, id: impl Into<String>) {
        let id = id.into();
        self.bind(id.clone(), Target::Identifier(id), Lifetime::Shared);
    }

    /// Seats a pre-built value in the singleton cache under `id`.
    ///
    /// The registry entry for `id`, if any, is left alone; the seated value
    /// short-circuits it until `remove` is called.
    pub fn add_instance<T: Any + Send + Sync>(&self, id: impl Into<String>, value: T) {
        self.add_instance_arc(id, Arc::new(value));
    }

    /// Seats an already shared or erased value in the singleton cache.
    pub fn add_instance_arc(&self, id: impl Into<String>, value: Instance) {
        let id = id.into();
        tracing::debug!(id = %id, "instance seated");
        self.inner.registry.write().seat(id, Slot::Instance(value));
        self.invalidate_plans();
    }

    /// Deletes both the binding and any cached singleton for `id`.
    pub fn remove(&self, id: &str) {
        let removed = self.inner.registry.write().remove(id);
        if removed {
            tracing::debug!(id, "binding removed");
            self.invalidate_plans();
        }
    }

    /// True iff `id` has an explicit binding or a cached singleton.
    ///
    /// Pure membership check; never attempts resolution.
    pub fn exist(&self, id: &str) -> bool {
        self.inner.registry.read().contains(id)
    }

    /// True iff `get(id)` succeeds.
    ///
    /// Performs a full resolution and discards the error kind on failure, so
    /// it carries the same side effects as `get` (a shared binding is cached).
    pub fn has(&self, id: &str) -> bool {
        self.get(id).is_ok()
    }

    // ===== Type catalog =====

    /// Declares a type the resolver may auto-wire.
    ///
    /// Re-declaring an identifier replaces its descriptor.
    pub fn declare(&self, descriptor: TypeDescriptor) {
        tracing::debug!(id = descriptor.identifier(), kind = ?descriptor.kind(), "type declared");
        self.inner.catalog.write().declare(descriptor);
        self.invalidate_plans();
    }

    /// Declares `T` through its [`Injectable`] implementation.
    pub fn declare_type<T: Injectable>(&self) {
        self.declare(TypeDescriptor::concrete::<T>());
    }

    /// Declares `T` as a constructorless type built with `T::default()`.
    pub fn declare_default<T: Default + Any + Send + Sync>(&self) {
        self.declare(TypeDescriptor::constructorless::<T>());
    }

    /// Declares the trait object `T` as a known, non-instantiable interface.
    pub fn declare_interface<T: ?Sized>(&self) {
        self.declare(TypeDescriptor::interface::<T>());
    }

    /// Returns true if `id` names a declared type.
    pub fn is_declared(&self, id: &str) -> bool {
        self.inner.catalog.read().contains(id)
    }

    /// Descriptor declared for `id`, if any.
    pub fn type_descriptor(&self, id: &str) -> Option<TypeDescriptor> {
        self.inner.catalog.read().get(id)
    }

    // ===== Listener Registry =====

    /// Appends a callback fired for every identifier.
    pub fn add_global_listener<F>(&self, callback: F)
    where
        F: Fn(&Instance) + Send + Sync + 'static,
    {
        self.inner.listeners.write().add_global(Arc::new(callback));
    }

    /// Appends a callback fired for `id` only.
    pub fn add_listener<F>(&self, id: impl Into<String>, callback: F)
    where
        F: Fn(&Instance) + Send + Sync + 'static,
    {
        self.inner.listeners.write().add(id.into(), Arc::new(callback));
    }

    /// Invokes the callbacks registered for `id` in registration order, then
    /// the global callbacks in registration order, passing `obj` to each.
    pub fn fire_resolving_callbacks(&self, id: &str, obj: &Instance) {
        let callbacks: Vec<Listener> = {
            let listeners = self.inner.listeners.read();
            if listeners.is_empty() {
                return;
            }
            listeners.for_id(id)
        };
        tracing::trace!(id, count = callbacks.len(), "firing resolving callbacks");
        for callback in callbacks {
            callback(obj);
        }
    }

    // ===== Introspection =====

    /// Snapshot of every registered identifier, sorted by identifier.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        let registry = self.inner.registry.read();
        let mut out: Vec<BindingDescriptor> = registry
            .entries()
            .map(|(id, entry)| BindingDescriptor {
                identifier: id.clone(),
                target: match &entry.target {
                    Target::Factory(_) => TargetKind::Factory,
                    Target::Identifier(t) if t == id => TargetKind::SelfType,
                    Target::Identifier(t) => TargetKind::Alias(t.clone()),
                },
                lifetime: entry.lifetime,
                seated: registry.has_singleton(id),
            })
            .collect();
        out.extend(
            registry
                .singleton_ids()
                .filter(|id| registry.entry(id).is_none())
                .map(|id| BindingDescriptor {
                    identifier: id.clone(),
                    target: TargetKind::Instance,
                    lifetime: Lifetime::Shared,
                    seated: true,
                }),
        );
        out.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        out
    }

    /// Drops every memoized construction plan.
    fn invalidate_plans(&self) {
        let mut solved = self.inner.solved.lock();
        if !solved.is_empty() {
            tracing::trace!(count = solved.len(), "construction plans invalidated");
            solved.clear();
        }
    }

    /// Address identifying this container in the in-flight stack.
    #[inline]
    fn owner(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Container {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("config", &self.inner.config)
            .field("bindings", &self.descriptors().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_registration_yields_same_container() {
        let container = Container::with_config(ContainerConfig::default().with_register_as_current(false));
        let by_type = container.make::<Container>().unwrap();
        let by_abstraction = container.get_as::<Container>(CONTAINER).unwrap();

        assert!(Container::ptr_eq(&by_type, &container));
        assert!(Container::ptr_eq(&by_abstraction, &container));
    }

    #[test]
    fn self_slot_does_not_keep_container_alive() {
        let container = Container::with_config(ContainerConfig::default().with_register_as_current(false));
        let weak = Arc::downgrade(&container.inner);
        drop(container);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn self_slot_identity_is_stable_while_held() {
        let container = Container::with_config(ContainerConfig::default().with_register_as_current(false));
        let a = container.get(CONTAINER).unwrap();
        let b = container.get(identifier_of::<Container>()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));

        drop((a, b));
        let weak = Arc::downgrade(&container.inner);
        drop(container);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn bindings_invalidate_plans() {
        let container = Container::with_config(ContainerConfig::default().with_register_as_current(false));
        container
            .inner
            .solved
            .lock()
            .insert("x".into(), Arc::new(Plan::default()));

        container.add("y", "z");
        assert!(container.inner.solved.lock().is_empty());
    }

    #[test]
    fn descriptors_report_instances_and_self_slots() {
        let container = Container::with_config(ContainerConfig::default().with_register_as_current(false));
        container.add_instance("dog", 3u8);

        let descriptors = container.descriptors();
        let dog = descriptors.iter().find(|d| d.identifier == "dog").unwrap();
        assert_eq!(dog.target, TargetKind::Instance);
        assert!(descriptors.iter().any(|d| d.identifier == CONTAINER));
    }
}
