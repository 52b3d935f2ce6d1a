use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Receiver of dirty signals from an [`InvalidationBus`].
pub trait Observer {
    /// Drop every cache derived from the source that fired.
    fn on_invalidate(&self);
}

/// One-to-many dirty signal from a mutable source to cached observers.
///
/// The bus holds weak handles only: observers never keep their sources' observers alive and a
/// dropped observer simply stops receiving signals. Dead handles are pruned on the next
/// registration or broadcast.
#[derive(Default)]
pub struct InvalidationBus {
    observers: RefCell<Vec<Weak<dyn Observer>>>,
}

impl InvalidationBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `observer`; registering the same observer twice is a no-op.
    pub fn add_observer(&self, observer: Weak<dyn Observer>) {
        let mut observers = self.observers.borrow_mut();
        observers.retain(|o| o.strong_count() > 0);
        if observers.iter().any(|o| Weak::ptr_eq(o, &observer)) {
            return;
        }
        observers.push(observer);
    }

    /// Deregister `observer`. Returns `true` if it was registered.
    pub fn remove_observer(&self, observer: &Weak<dyn Observer>) -> bool {
        let mut observers = self.observers.borrow_mut();
        let before = observers.len();
        observers.retain(|o| o.strong_count() > 0 && !Weak::ptr_eq(o, observer));
        observers.len() != before
    }

    /// Number of live observers.
    pub fn len(&self) -> usize {
        self.observers
            .borrow()
            .iter()
            .filter(|o| o.strong_count() > 0)
            .count()
    }

    /// Registered handles, dead ones included.
    #[cfg(test)]
    pub(crate) fn registered(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Return `true` when no live observer is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call [`Observer::on_invalidate`] on every live observer.
    pub fn invalidate(&self) {
        // Snapshot first: observers may register or deregister while handling the signal.
        let live: Vec<Rc<dyn Observer>> = {
            let mut observers = self.observers.borrow_mut();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in live {
            observer.on_invalidate();
        }
    }
}

impl std::fmt::Debug for InvalidationBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InvalidationBus")
            .field("observers", &self.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/invalidate.rs"]
mod tests;
