//! Declared types available for auto-wiring.
//!
//! Rust has no runtime reflection, so the container only knows how to build a
//! type that was declared through a [`TypeDescriptor`]. A descriptor records
//! whether the type is instantiable, the ordered list of constructor
//! [`Parameter`]s, the constructor itself, and the trait objects the type can
//! be delivered as.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

use crate::arguments::{Arguments, Parameter};
use crate::error::DiResult;
use crate::identifier::identifier_of;
use crate::internal::Map;
use crate::registration::Instance;

/// A type whose constructor the container can drive.
///
/// `parameters` lists the constructor parameters in order; `construct`
/// receives one argument per parameter, keyed by name, plus any extra
/// explicit overrides passed to `get_with`.
///
/// # Examples
///
/// ```rust
/// use ferrous_container::{Arguments, Container, DiResult, Injectable, Parameter};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Database;
///
/// struct Repository {
///     db: Arc<Database>,
///     table: Arc<&'static str>,
/// }
///
/// impl Injectable for Repository {
///     fn parameters() -> Vec<Parameter> {
///         vec![
///             Parameter::of::<Database>("db"),
///             Parameter::new("table").default_value("users"),
///         ]
///     }
///
///     fn construct(args: &mut Arguments) -> DiResult<Self> {
///         Ok(Self {
///             db: args.required("db")?,
///             table: args.required("table")?,
///         })
///     }
/// }
///
/// let container = Container::new();
/// container.declare_default::<Database>();
/// container.declare_type::<Repository>();
///
/// let repo = container.make::<Repository>().unwrap();
/// assert_eq!(*repo.table, "users");
/// ```
pub trait Injectable: Any + Send + Sync + Sized {
    /// Constructor parameters in declaration order.
    fn parameters() -> Vec<Parameter>;

    /// Builds the value from resolved arguments.
    fn construct(args: &mut Arguments) -> DiResult<Self>;
}

pub(crate) type ConstructFn = dyn Fn(&mut Arguments) -> DiResult<Instance> + Send + Sync;
pub(crate) type BlankFn = dyn Fn() -> Instance + Send + Sync;
pub(crate) type CastFn = dyn Fn(Instance) -> Option<Instance> + Send + Sync;

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Instantiable type
    Concrete,
    /// Known type that cannot be instantiated directly
    Abstract,
    /// Trait object identifier
    Interface,
}

#[derive(Clone)]
pub(crate) enum Construction {
    Constructor {
        parameters: Arc<[Parameter]>,
        construct: Arc<ConstructFn>,
    },
    /// No constructor: the value is produced in its default state
    Blank(Arc<BlankFn>),
}

/// Registration-time description of a type
#[derive(Clone)]
pub struct TypeDescriptor {
    identifier: String,
    kind: TypeKind,
    construction: Option<Construction>,
    casts: Vec<(TypeId, String, Arc<CastFn>)>,
}

impl TypeDescriptor {
    /// Concrete type built through its [`Injectable`] implementation.
    pub fn concrete<T: Injectable>() -> Self {
        Self::from_fn::<T, _>(T::parameters(), T::construct)
    }

    /// Concrete type built by an explicit constructor function.
    pub fn from_fn<T, F>(parameters: Vec<Parameter>, construct: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&mut Arguments) -> DiResult<T> + Send + Sync + 'static,
    {
        let construct = move |args: &mut Arguments| -> DiResult<Instance> {
            Ok(Arc::new(construct(args)?))
        };
        Self {
            identifier: identifier_of::<T>().to_owned(),
            kind: TypeKind::Concrete,
            construction: Some(Construction::Constructor {
                parameters: parameters.into(),
                construct: Arc::new(construct),
            }),
            casts: Vec::new(),
        }
    }

    /// Concrete type without a constructor, produced by `T::default()`.
    pub fn constructorless<T: Default + Any + Send + Sync>() -> Self {
        Self {
            identifier: identifier_of::<T>().to_owned(),
            kind: TypeKind::Concrete,
            construction: Some(Construction::Blank(Arc::new(|| {
                Arc::new(T::default()) as Instance
            }))),
            casts: Vec::new(),
        }
    }

    /// Trait object identifier; known but not instantiable.
    pub fn interface<T: ?Sized>() -> Self {
        Self {
            identifier: identifier_of::<T>().to_owned(),
            kind: TypeKind::Interface,
            construction: None,
            casts: Vec::new(),
        }
    }

    /// Named abstract type; known but not instantiable.
    pub fn abstract_type(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            kind: TypeKind::Abstract,
            construction: None,
            casts: Vec::new(),
        }
    }

    /// Declares the type under a different identifier.
    pub fn named(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Registers an upcast so instances of `C` can be delivered as `Arc<I>`.
    ///
    /// ```rust
    /// use ferrous_container::TypeDescriptor;
    /// use std::sync::Arc;
    ///
    /// trait Reference: Send + Sync {}
    /// #[derive(Default)]
    /// struct Implementation;
    /// impl Reference for Implementation {}
    ///
    /// let descriptor = TypeDescriptor::constructorless::<Implementation>()
    ///     .implements(|c: Arc<Implementation>| -> Arc<dyn Reference> { c });
    /// assert_eq!(descriptor.interfaces().count(), 1);
    /// ```
    pub fn implements<I, C, F>(mut self, cast: F) -> Self
    where
        I: ?Sized + Send + Sync + 'static,
        C: Any + Send + Sync,
        F: Fn(Arc<C>) -> Arc<I> + Send + Sync + 'static,
    {
        let erased = move |value: Instance| -> Option<Instance> {
            let concrete = value.downcast::<C>().ok()?;
            Some(Arc::new(cast(concrete)) as Instance)
        };
        self.casts.push((
            TypeId::of::<C>(),
            identifier_of::<I>().to_owned(),
            Arc::new(erased),
        ));
        self
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// Returns true if the container may build this type.
    pub fn is_instantiable(&self) -> bool {
        self.construction.is_some()
    }

    /// Declared constructor parameters; `None` when there is no constructor.
    pub fn parameters(&self) -> Option<&[Parameter]> {
        match &self.construction {
            Some(Construction::Constructor { parameters, .. }) => Some(&parameters[..]),
            _ => None,
        }
    }

    /// Identifiers of the trait objects this type can be delivered as.
    pub fn interfaces(&self) -> impl Iterator<Item = &str> {
        self.casts.iter().map(|(_, id, _)| id.as_str())
    }

    pub(crate) fn construction(&self) -> Option<&Construction> {
        self.construction.as_ref()
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("identifier", &self.identifier)
            .field("kind", &self.kind)
            .field("parameters", &self.parameters())
            .field("interfaces", &self.interfaces().collect::<Vec<_>>())
            .finish()
    }
}

/// Declared types plus the upcasts they contribute
#[derive(Default)]
pub(crate) struct Catalog {
    types: Map<String, TypeDescriptor>,
    casts: Map<(TypeId, String), Arc<CastFn>>,
}

impl Catalog {
    /// Adds `descriptor`, replacing any earlier one for the same identifier
    /// together with the casts it contributed.
    pub(crate) fn declare(&mut self, descriptor: TypeDescriptor) {
        if let Some(previous) = self.types.remove(&descriptor.identifier) {
            for (type_id, interface, _) in &previous.casts {
                self.casts.remove(&(*type_id, interface.clone()));
            }
        }
        for (type_id, interface, cast) in &descriptor.casts {
            self.casts.insert((*type_id, interface.clone()), cast.clone());
        }
        self.types.insert(descriptor.identifier.clone(), descriptor);
    }

    #[inline]
    pub(crate) fn get(&self, id: &str) -> Option<TypeDescriptor> {
        self.types.get(id).cloned()
    }

    pub(crate) fn contains(&self, id: &str) -> bool {
        self.types.contains_key(id)
    }

    /// Upcast registered for the concrete type of `value` into the trait
    /// object named `target`.
    pub(crate) fn cast_for(&self, value: &Instance, target: &str) -> Option<Arc<CastFn>> {
        let type_id = Any::type_id(&**value);
        self.casts.get(&(type_id, target.to_owned())).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Shape: Send + Sync {
        fn sides(&self) -> u8;
    }

    #[derive(Default)]
    struct Square;
    impl Shape for Square {
        fn sides(&self) -> u8 {
            4
        }
    }

    #[test]
    fn registered_cast_upcasts() {
        let mut catalog = Catalog::default();
        catalog.declare(
            TypeDescriptor::constructorless::<Square>()
                .implements(|s: Arc<Square>| -> Arc<dyn Shape> { s }),
        );

        let value: Instance = Arc::new(Square);
        let cast = catalog.cast_for(&value, identifier_of::<dyn Shape>()).unwrap();
        let shape = cast(value).unwrap().downcast::<Arc<dyn Shape>>().unwrap();
        assert_eq!(shape.sides(), 4);
    }

    #[test]
    fn no_cast_for_unrelated_types() {
        let mut catalog = Catalog::default();
        catalog.declare(
            TypeDescriptor::constructorless::<Square>()
                .implements(|s: Arc<Square>| -> Arc<dyn Shape> { s }),
        );
        let value: Instance = Arc::new(5u32);
        assert!(catalog.cast_for(&value, identifier_of::<dyn Shape>()).is_none());
    }

    #[test]
    fn redeclaring_drops_previous_casts() {
        let mut catalog = Catalog::default();
        catalog.declare(
            TypeDescriptor::constructorless::<Square>()
                .implements(|s: Arc<Square>| -> Arc<dyn Shape> { s }),
        );
        catalog.declare(TypeDescriptor::constructorless::<Square>());

        let value: Instance = Arc::new(Square);
        assert!(catalog.cast_for(&value, identifier_of::<dyn Shape>()).is_none());
        assert_eq!(catalog.get(identifier_of::<Square>()).unwrap().interfaces().count(), 0);
    }

    #[test]
    fn interfaces_are_not_instantiable() {
        let descriptor = TypeDescriptor::interface::<dyn Shape>();
        assert_eq!(descriptor.kind(), TypeKind::Interface);
        assert!(!descriptor.is_instantiable());
        assert!(descriptor.parameters().is_none());
    }
}
