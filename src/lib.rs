//! # ferrous-container
//!
//! Runtime dependency injection container keyed by string identifiers.
//!
//! ## Features
//!
//! - **Bindings**: identifiers bound to aliases, factories, or to building
//!   themselves as concrete types
//! - **Shared bindings**: first resolution cached, returned on every later lookup
//! - **Auto-wiring**: declared constructor parameters resolved recursively,
//!   with soft-fail fallback to defaults
//! - **Alias chains** of any depth, with cycle detection
//! - **Resolving callbacks** per identifier and global
//! - **Self-injection**: every container is resolvable from itself
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_container::{Container, Target};
//! use std::sync::Arc;
//!
//! let container = Container::new();
//! container.add("status", Target::factory(|_| "ok"));
//!
//! let status = container.get_as::<&str>("status").unwrap();
//! assert_eq!(*status, "ok");
//! ```
//!
//! ## Auto-wiring
//!
//! Types are declared with their constructor parameters, since Rust has no
//! runtime reflection. A parameter typed against an identifier is resolved
//! through the container; when that fails, its default is used instead.
//!
//! ```rust
//! use ferrous_container::{Arguments, Container, DiResult, Injectable, Parameter, TypeDescriptor};
//! use std::sync::Arc;
//!
//! trait Reference: Send + Sync {
//!     fn name(&self) -> &'static str;
//! }
//!
//! #[derive(Default)]
//! struct Implementation;
//! impl Reference for Implementation {
//!     fn name(&self) -> &'static str { "implementation" }
//! }
//!
//! struct WithParam {
//!     reference: Option<Arc<dyn Reference>>,
//! }
//!
//! impl Injectable for WithParam {
//!     fn parameters() -> Vec<Parameter> {
//!         vec![Parameter::of::<dyn Reference>("reference").default_null()]
//!     }
//!     fn construct(args: &mut Arguments) -> DiResult<Self> {
//!         Ok(Self { reference: args.take_trait::<dyn Reference>("reference")? })
//!     }
//! }
//!
//! let container = Container::new();
//! container.declare_interface::<dyn Reference>();
//! container.declare(
//!     TypeDescriptor::constructorless::<Implementation>()
//!         .implements(|c: Arc<Implementation>| -> Arc<dyn Reference> { c }),
//! );
//! container.declare_type::<WithParam>();
//!
//! // Unbound interface: the null default is used
//! assert!(container.make::<WithParam>().unwrap().reference.is_none());
//!
//! // Bound interface: the implementation is injected
//! container.add(
//!     ferrous_container::identifier_of::<dyn Reference>(),
//!     ferrous_container::identifier_of::<Implementation>(),
//! );
//! let built = container.make::<WithParam>().unwrap();
//! assert_eq!(built.reference.as_ref().unwrap().name(), "implementation");
//! ```
//!
//! ## Shared Bindings
//!
//! ```rust
//! use ferrous_container::{Container, Target};
//! use std::sync::Arc;
//!
//! let container = Container::new();
//! container.singleton("pool", Target::factory(|_| vec![0u8; 16]));
//!
//! let a = container.get("pool").unwrap();
//! let b = container.get("pool").unwrap();
//! assert!(Arc::ptr_eq(&a, &b));
//!
//! container.remove("pool");
//! assert!(!container.has("pool"));
//! ```

pub mod arguments;
pub mod catalog;
pub mod config;
pub mod container;
pub mod descriptors;
pub mod error;
pub mod identifier;
pub mod lifetime;
pub mod listener;

// Internal modules
mod internal;
mod registration;

// Re-export core types
pub use arguments::{Arguments, Parameter};
pub use catalog::{Injectable, TypeDescriptor, TypeKind};
pub use config::ContainerConfig;
pub use container::{Container, Definition};
pub use descriptors::{BindingDescriptor, TargetKind};
pub use error::{DiError, DiResult};
pub use identifier::{identifier_of, CONTAINER};
pub use lifetime::Lifetime;
pub use listener::{tracing_listener, Listener};
pub use registration::{FactoryFn, Instance, Target};
