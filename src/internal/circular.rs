//! Circular dependency detection infrastructure.

use std::cell::{Cell, RefCell};

use crate::error::{DiError, DiResult};

// Identifiers currently being resolved on this thread, tagged with the
// address of the owning container so independent containers never collide.
thread_local! {
    static IN_FLIGHT: RefCell<Vec<(usize, String)>> = const { RefCell::new(Vec::new()) };
    static GUARD_TRIPS: Cell<u64> = const { Cell::new(0) };
}

/// Number of times a guard refused entry on this thread.
///
/// A build whose count changed while it ran saw a cycle or the depth
/// ceiling somewhere beneath it, so its outcome depends on what else was in
/// flight.
pub(crate) fn guard_trips() -> u64 {
    GUARD_TRIPS.with(Cell::get)
}

fn trip() {
    GUARD_TRIPS.with(|trips| trips.set(trips.get() + 1));
}

/// Guard marking an identifier as in flight for the duration of one `get`.
pub(crate) struct InFlightGuard {
    owner: usize,
}

impl InFlightGuard {
    /// Pushes `id`, failing if it is already in flight for `owner` or the
    /// stack for `owner` is already `max_depth` deep.
    pub(crate) fn enter(owner: usize, id: &str, max_depth: usize) -> DiResult<Self> {
        IN_FLIGHT.with(|stack| {
            let mut stack = stack.borrow_mut();
            let mut depth = 0;
            let mut cycle_start = None;
            for (i, (o, name)) in stack.iter().enumerate() {
                if *o != owner {
                    continue;
                }
                depth += 1;
                if cycle_start.is_none() && name == id {
                    cycle_start = Some(i);
                }
            }

            if let Some(start) = cycle_start {
                let mut path: Vec<String> = stack[start..]
                    .iter()
                    .filter(|(o, _)| *o == owner)
                    .map(|(_, name)| name.clone())
                    .collect();
                path.push(id.to_owned());
                trip();
                return Err(DiError::Circular(path));
            }

            if depth >= max_depth {
                trip();
                return Err(DiError::DepthExceeded(depth));
            }

            stack.push((owner, id.to_owned()));
            Ok(Self { owner })
        })
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        IN_FLIGHT.with(|stack| {
            let mut stack = stack.borrow_mut();
            if let Some(pos) = stack.iter().rposition(|(o, _)| *o == self.owner) {
                stack.remove(pos);
            }
        });
    }
}
