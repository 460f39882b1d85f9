//! Identifiers used to register and request bindings.
//!
//! An identifier is an opaque string. By convention, identifiers that name a
//! constructible type are the `std::any::type_name` of that type, which is what
//! [`identifier_of`] returns and what typed helpers such as
//! [`Container::make`](crate::Container::make) look up.

/// Abstract identifier under which every container registers itself.
///
/// Constructor parameters typed against this identifier receive the container
/// performing the resolution.
///
/// ```rust
/// use ferrous_container::{Container, CONTAINER};
///
/// let container = Container::new();
/// assert!(container.exist(CONTAINER));
/// ```
pub const CONTAINER: &str = "ferrous_container::ContainerInterface";

/// Identifier for a Rust type, including unsized trait objects.
///
/// ```rust
/// use ferrous_container::identifier_of;
///
/// trait Logger {}
/// assert_eq!(identifier_of::<String>(), "alloc::string::String");
/// assert!(identifier_of::<dyn Logger>().ends_with("Logger"));
/// ```
#[inline(always)]
pub fn identifier_of<T: ?Sized>() -> &'static str {
    std::any::type_name::<T>()
}
