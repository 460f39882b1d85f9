//! Resolving callbacks for observing freshly built objects.
//!
//! Listeners are registered per identifier or globally and fired through
//! [`Container::fire_resolving_callbacks`](crate::Container::fire_resolving_callbacks).
//! `get` does not fire them on its own; the layer that constructs an object
//! decides when it counts as freshly resolved.
//!
//! # Examples
//!
//! ```
//! use ferrous_container::{Container, Target};
//! use std::sync::{Arc, Mutex};
//!
//! let container = Container::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//!
//! let log = seen.clone();
//! container.add_listener("status", move |_| log.lock().unwrap().push("status"));
//! let log = seen.clone();
//! container.add_global_listener(move |_| log.lock().unwrap().push("global"));
//!
//! container.add("status", Target::factory(|_| "ok"));
//! let status = container.get("status").unwrap();
//! container.fire_resolving_callbacks("status", &status);
//!
//! assert_eq!(*seen.lock().unwrap(), vec!["status", "global"]);
//! ```

use std::any::Any;
use std::sync::Arc;

use crate::internal::Map;
use crate::registration::Instance;

/// Callback receiving a resolved object
pub type Listener = Arc<dyn Fn(&Instance) + Send + Sync>;

/// Per-identifier and global listener lists, each in registration order
#[derive(Default)]
pub(crate) struct Listeners {
    by_id: Map<String, Vec<Listener>>,
    global: Vec<Listener>,
}

impl Listeners {
    pub(crate) fn add(&mut self, id: String, listener: Listener) {
        self.by_id.entry(id).or_default().push(listener);
    }

    pub(crate) fn add_global(&mut self, listener: Listener) {
        self.global.push(listener);
    }

    /// Snapshot of the callbacks to fire for `id`: identifier-specific
    /// first, then global.
    pub(crate) fn for_id(&self, id: &str) -> Vec<Listener> {
        self.by_id
            .get(id)
            .into_iter()
            .flatten()
            .chain(self.global.iter())
            .cloned()
            .collect()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.by_id.is_empty() && self.global.is_empty()
    }
}

/// Global listener that records every fired object through `tracing`.
///
/// ```
/// use ferrous_container::{tracing_listener, Container};
///
/// let container = Container::new();
/// container.add_global_listener(tracing_listener("app"));
/// ```
pub fn tracing_listener(label: impl Into<String>) -> impl Fn(&Instance) + Send + Sync + 'static {
    let label = label.into();
    move |instance: &Instance| {
        tracing::debug!(
            label = %label,
            type_id = ?Any::type_id(&**instance),
            "resolved object"
        );
    }
}
