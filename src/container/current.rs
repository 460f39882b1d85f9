//! Process-wide "current container" pointer.
//!
//! Last writer wins. The pointer is weak: it never keeps a container alive.

use std::sync::{Arc, Weak};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::ContainerInner;

static CURRENT: Lazy<RwLock<Weak<ContainerInner>>> = Lazy::new(|| RwLock::new(Weak::new()));

pub(super) fn set(inner: &Arc<ContainerInner>) {
    *CURRENT.write() = Arc::downgrade(inner);
}

pub(super) fn get() -> Option<Arc<ContainerInner>> {
    CURRENT.read().upgrade()
}

pub(super) fn clear_if(inner: &Arc<ContainerInner>) {
    let mut current = CURRENT.write();
    if current.as_ptr() == Arc::as_ptr(inner) {
        *current = Weak::new();
    }
}
