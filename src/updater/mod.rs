//! Per-frame controllers that run after animations each frame.
//!
//! Updaters declare a [`Locker`] like animations do; the scene refuses any animation or updater
//! whose locker overlaps the other side.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::debug;

use crate::animation::locker::Locker;
use crate::foundation::error::{SceneError, SceneResult};

/// Bounded-velocity translation follower.
pub mod follow;

/// A per-frame side-effecting callable with a declared locker.
pub trait Updater {
    /// Run once per emitted frame. `t` is seconds since the scene started, `dt` is one frame.
    fn update(&mut self, t: f64, dt: f64) -> SceneResult<()>;

    fn locker(&self) -> &Locker;
}

struct HandleInner {
    updater: RefCell<Box<dyn Updater>>,
    locker: Locker,
    active: Cell<bool>,
}

/// Shared handle to a registered updater that can be paused and resumed.
#[derive(Clone)]
pub struct UpdaterHandle(Rc<HandleInner>);

impl UpdaterHandle {
    /// Wrap `updater`; new handles start active.
    pub fn new(updater: impl Updater + 'static) -> Self {
        let locker = updater.locker().clone();
        Self(Rc::new(HandleInner {
            updater: RefCell::new(Box::new(updater)),
            locker,
            active: Cell::new(true),
        }))
    }

    pub fn is_active(&self) -> bool {
        self.0.active.get()
    }

    pub fn activate(&self) -> SceneResult<()> {
        if self.is_active() {
            return Err(SceneError::UpdaterAlreadyActive);
        }
        self.0.active.set(true);
        debug!("updater activated");
        Ok(())
    }

    pub fn deactivate(&self) -> SceneResult<()> {
        if !self.is_active() {
            return Err(SceneError::UpdaterAlreadyInactive);
        }
        self.0.active.set(false);
        debug!("updater deactivated");
        Ok(())
    }

    pub fn ptr_eq(&self, other: &UpdaterHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for UpdaterHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdaterHandle")
            .field("active", &self.is_active())
            .field("locker", &self.0.locker)
            .finish()
    }
}

impl Updater for UpdaterHandle {
    /// Forward to the wrapped updater while active.
    fn update(&mut self, t: f64, dt: f64) -> SceneResult<()> {
        if !self.is_active() {
            return Ok(());
        }
        self.0.updater.borrow_mut().update(t, dt)
    }

    fn locker(&self) -> &Locker {
        &self.0.locker
    }
}

/// Collection of updaters with a strictly merged locker.
#[derive(Clone, Debug, Default)]
pub struct UpdaterBundle {
    handles: Vec<UpdaterHandle>,
    locker: Locker,
}

impl UpdaterBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handle`. Fails if it writes a property another member already writes.
    pub fn push(&mut self, handle: UpdaterHandle) -> SceneResult<()> {
        self.locker.merge(handle.locker(), false)?;
        self.handles.push(handle);
        Ok(())
    }

    /// Deregister `handle`. Returns `true` if it was a member.
    pub fn remove(&mut self, handle: &UpdaterHandle) -> bool {
        let before = self.handles.len();
        self.handles.retain(|h| !h.ptr_eq(handle));
        if self.handles.len() == before {
            return false;
        }
        self.rebuild_locker();
        true
    }

    pub fn clear(&mut self) {
        self.handles.clear();
        self.locker = Locker::new();
    }

    pub fn iter(&self) -> impl Iterator<Item = &UpdaterHandle> {
        self.handles.iter()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Union of every member's locker, active or not.
    pub fn locker(&self) -> &Locker {
        &self.locker
    }

    /// Run every active member in registration order.
    pub fn update(&mut self, t: f64, dt: f64) -> SceneResult<()> {
        for handle in &mut self.handles {
            handle.update(t, dt)?;
        }
        Ok(())
    }

    fn rebuild_locker(&mut self) {
        let mut locker = Locker::new();
        for handle in &self.handles {
            // Members were conflict-free when pushed.
            let _ = locker.merge(handle.locker(), true);
        }
        self.locker = locker;
    }
}

/// Updater calling a closure with `(t, dt)`.
///
/// The locker is empty unless one is attached with [`FunctionUpdater::locking`]; keeping the
/// closure's writes consistent with it is up to the author.
pub struct FunctionUpdater<F> {
    f: F,
    locker: Locker,
}

impl<F: FnMut(f64, f64)> FunctionUpdater<F> {
    pub fn new(f: F) -> Self {
        Self {
            f,
            locker: Locker::new(),
        }
    }

    /// Declare the pairs the closure writes.
    pub fn locking(mut self, locker: Locker) -> Self {
        self.locker = locker;
        self
    }
}

impl<F: FnMut(f64, f64)> Updater for FunctionUpdater<F> {
    fn update(&mut self, t: f64, dt: f64) -> SceneResult<()> {
        (self.f)(t, dt);
        Ok(())
    }

    fn locker(&self) -> &Locker {
        &self.locker
    }
}

#[cfg(test)]
#[path = "../../tests/unit/updater/mod.rs"]
mod tests;
