//! Resolution: alias chasing, building, and constructor auto-wiring.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use super::Container;
use crate::arguments::{Arguments, Parameter};
use crate::catalog::{BlankFn, ConstructFn, Construction};
use crate::error::{DiError, DiResult};
use crate::identifier::identifier_of;
use crate::internal::{guard_trips, InFlightGuard};
use crate::registration::{Instance, Slot, Target};

/// Where one constructor argument comes from
#[derive(Clone)]
pub(crate) enum Source {
    /// Resolve this identifier through the container
    Resolve(String),
    /// Use the declared default (`None` is null)
    Default(Option<Instance>),
}

/// Memoized construction plan for a concrete type: the source chosen for
/// each constructor parameter, in declaration order.
#[derive(Clone, Default)]
pub(crate) struct Plan {
    steps: Vec<(String, Source)>,
}

/// Construction plan for a concrete type with its arguments already resolved.
///
/// Returned by [`Container::definition`]; [`Definition::instantiate`] runs the
/// constructor.
pub struct Definition {
    identifier: String,
    build: Build,
}

enum Build {
    Blank(Arc<BlankFn>),
    Constructor {
        construct: Arc<ConstructFn>,
        arguments: Arguments,
    },
}

impl Definition {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Resolved constructor arguments; `None` for constructorless types.
    pub fn arguments(&self) -> Option<&Arguments> {
        match &self.build {
            Build::Blank(_) => None,
            Build::Constructor { arguments, .. } => Some(arguments),
        }
    }

    /// Runs the constructor with the resolved arguments.
    pub fn instantiate(self) -> DiResult<Instance> {
        match self.build {
            Build::Blank(make) => Ok(make()),
            Build::Constructor {
                construct,
                mut arguments,
            } => construct(&mut arguments),
        }
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("identifier", &self.identifier)
            .field("arguments", &self.arguments())
            .finish()
    }
}

impl Container {
    /// Resolves `id`.
    ///
    /// 1. A cached singleton is returned as-is.
    /// 2. Otherwise the binding's target is looked up, defaulting to `id`
    ///    itself when unbound.
    /// 3. A factory target, or a target equal to `id`, is built; any other
    ///    identifier is an alias and is resolved recursively.
    /// 4. The result is cached when the binding is shared.
    ///
    /// # Errors
    ///
    /// - [`DiError::NotFound`] when the final identifier is unbound and names
    ///   no declared type.
    /// - [`DiError::BindingResolution`] when the type is not instantiable or a
    ///   constructor parameter cannot be satisfied.
    /// - [`DiError::Circular`] / [`DiError::DepthExceeded`] on cyclic or
    ///   runaway alias and dependency chains.
    pub fn get(&self, id: &str) -> DiResult<Instance> {
        self.get_with(id, Arguments::new())
    }

    /// Resolves `id`, using `parameters` to override constructor arguments by
    /// parameter name.
    ///
    /// Overrides follow alias chains to the concrete type that is finally
    /// built. Factories never receive them.
    pub fn get_with(&self, id: &str, parameters: Arguments) -> DiResult<Instance> {
        let cached = self.inner.registry.read().singleton(id);
        if let Some(slot) = cached {
            tracing::trace!(id, "singleton cache hit");
            return Ok(self.materialize(slot));
        }

        let _guard = InFlightGuard::enter(self.owner(), id, self.inner.config.max_depth)?;

        let entry = self.inner.registry.read().entry(id);
        let shared = entry.as_ref().is_some_and(|e| e.lifetime.is_shared());
        let target = entry
            .map(|e| e.target)
            .unwrap_or_else(|| Target::Identifier(id.to_owned()));

        let obj = match &target {
            Target::Identifier(value) if value != id => self.get_with(value, parameters)?,
            _ => self.make_target(&target, parameters)?,
        };

        if shared {
            tracing::trace!(id, "caching shared instance");
            self.inner
                .registry
                .write()
                .seat(id.to_owned(), Slot::Instance(obj.clone()));
        }
        Ok(obj)
    }

    /// Resolves `id` and downcasts the result to `T`.
    pub fn get_as<T: Any + Send + Sync>(&self, id: &str) -> DiResult<Arc<T>> {
        self.get(id)?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(format!("{} as {}", id, identifier_of::<T>())))
    }

    /// Resolves the identifier of `T` and downcasts to `T`.
    pub fn make<T: Any + Send + Sync>(&self) -> DiResult<Arc<T>> {
        self.make_with::<T>(Arguments::new())
    }

    /// Like [`make`](Self::make) with explicit constructor overrides.
    pub fn make_with<T: Any + Send + Sync>(&self, parameters: Arguments) -> DiResult<Arc<T>> {
        let id = identifier_of::<T>();
        self.get_with(id, parameters)?
            .downcast::<T>()
            .map_err(|_| DiError::TypeMismatch(id.to_owned()))
    }

    /// Resolves the trait object `T` by its identifier.
    ///
    /// The bound implementation is upcast through the casts declared with
    /// [`TypeDescriptor::implements`](crate::TypeDescriptor::implements);
    /// factories may instead return `Arc<dyn T>` directly.
    pub fn make_trait<T>(&self) -> DiResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let id = identifier_of::<T>();
        let value = self.coerce(self.get(id)?, id);
        value
            .downcast::<Arc<T>>()
            .map(|boxed| (*boxed).clone())
            .map_err(|_| DiError::TypeMismatch(id.to_owned()))
    }

    /// Derives the construction plan for the concrete type `id` and resolves
    /// its arguments, without running the constructor.
    ///
    /// Every declared parameter goes through dependency resolution first;
    /// values in `parameters` then replace the resolved ones by name. Extra
    /// override names are passed through untouched.
    pub fn definition(&self, id: &str, parameters: Arguments) -> DiResult<Definition> {
        let descriptor = self
            .inner
            .catalog
            .read()
            .get(id)
            .ok_or_else(|| DiError::NotFound(id.to_owned()))?;

        let build = match descriptor.construction() {
            None => return Err(DiError::not_instantiable(id)),
            Some(Construction::Blank(make)) => Build::Blank(make.clone()),
            Some(Construction::Constructor {
                parameters: declared,
                construct,
            }) => Build::Constructor {
                construct: construct.clone(),
                arguments: self.arguments_for(id, declared, parameters)?,
            },
        };

        Ok(Definition {
            identifier: id.to_owned(),
            build,
        })
    }

    /// Build step: invoke a factory, or build a concrete type.
    fn make_target(&self, target: &Target, parameters: Arguments) -> DiResult<Instance> {
        match target {
            Target::Factory(factory) => factory(self),
            Target::Identifier(id) => self.definition(id, parameters)?.instantiate(),
        }
    }

    /// Runs dependency resolution for every declared parameter, then
    /// overlays `overrides` on the result.
    fn arguments_for(
        &self,
        target: &str,
        declared: &[Parameter],
        overrides: Arguments,
    ) -> DiResult<Arguments> {
        let mut arguments = self.planned_arguments(target, declared)?;
        arguments.merge(overrides);
        Ok(arguments)
    }

    fn planned_arguments(&self, target: &str, declared: &[Parameter]) -> DiResult<Arguments> {
        let use_plans = self.inner.config.cache_plans;

        if use_plans {
            let plan = self.inner.solved.lock().get(target).cloned();
            if let Some(plan) = plan {
                match self.replay(&plan) {
                    Ok(arguments) => {
                        tracing::trace!(id = target, "construction plan reused");
                        return Ok(arguments);
                    }
                    Err(err) => {
                        tracing::debug!(id = target, error = %err, "construction plan discarded");
                        self.inner.solved.lock().remove(target);
                    }
                }
            }
        }

        let trips = guard_trips();
        let mut arguments = Arguments::new();
        let mut steps = Vec::with_capacity(declared.len());
        for parameter in declared {
            let (source, value) = self.dependency(target, parameter)?;
            arguments.insert(parameter.name(), value);
            steps.push((parameter.name().to_owned(), source));
        }

        // A cycle or the depth ceiling hit during this derivation makes the
        // chosen sources depend on the resolutions around it.
        if use_plans {
            if guard_trips() == trips {
                self.inner
                    .solved
                    .lock()
                    .insert(target.to_owned(), Arc::new(Plan { steps }));
            } else {
                tracing::trace!(id = target, "construction plan not memoized");
            }
        }
        Ok(arguments)
    }

    /// Dependency resolution for one constructor parameter.
    ///
    /// A typed parameter is resolved through the container; any failure there
    /// is dropped and the declared default is used instead. With neither a
    /// resolvable type nor a default the parameter is unsatisfiable.
    fn dependency(
        &self,
        target: &str,
        parameter: &Parameter,
    ) -> DiResult<(Source, Option<Instance>)> {
        if let Some(type_id) = parameter.type_identifier() {
            match self.get(type_id) {
                Ok(value) => {
                    let value = self.coerce(value, type_id);
                    return Ok((Source::Resolve(type_id.to_owned()), Some(value)));
                }
                Err(err) => {
                    tracing::debug!(
                        id = target,
                        parameter = parameter.name(),
                        dependency = type_id,
                        error = %err,
                        "typed dependency unresolved, falling back to default"
                    );
                }
            }
        }

        match parameter.default() {
            Some(default) => Ok((Source::Default(default.clone()), default.clone())),
            None => Err(DiError::unresolvable(parameter.name(), target)),
        }
    }

    fn replay(&self, plan: &Plan) -> DiResult<Arguments> {
        let mut arguments = Arguments::new();
        for (name, source) in &plan.steps {
            let value = match source {
                Source::Resolve(type_id) => Some(self.coerce(self.get(type_id)?, type_id)),
                Source::Default(default) => default.clone(),
            };
            arguments.insert(name.as_str(), value);
        }
        Ok(arguments)
    }

    /// Upcasts `value` to the trait object `target` when a cast is declared
    /// for its concrete type; otherwise returns it unchanged.
    fn coerce(&self, value: Instance, target: &str) -> Instance {
        let cast = self.inner.catalog.read().cast_for(&value, target);
        match cast {
            Some(cast) => cast(value.clone()).unwrap_or(value),
            None => value,
        }
    }

    /// Turns a singleton slot into an instance. The self slot reuses the
    /// handle handed out last while any caller still holds it.
    fn materialize(&self, slot: Slot) -> Instance {
        match slot {
            Slot::Instance(value) => value,
            Slot::Container => {
                let mut handle = self.inner.handle.lock();
                if let Some(existing) = handle.upgrade() {
                    return existing;
                }
                let fresh = Arc::new(self.clone());
                *handle = Arc::downgrade(&fresh);
                fresh as Instance
            }
        }
    }
}
