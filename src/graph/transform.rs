use std::cell::Cell;
use std::rc::{Rc, Weak};

use crate::animation::property::{Animatable, Value};
use crate::foundation::core::{ObjectId, Vec2};
use crate::foundation::error::{SceneError, SceneResult};
use crate::foundation::math::Transform;
use crate::graph::invalidate::{InvalidationBus, Observer};

/// Property name of [`Transform::translation`].
pub const TRANSLATION: &str = "translation";
/// Property name of [`Transform::scale`].
pub const SCALE: &str = "scale";
/// Property name of [`Transform::rotation`].
pub const ROTATION: &str = "rotation";

struct TransformInner {
    id: ObjectId,
    value: Cell<Transform>,
    bus: InvalidationBus,
}

/// Shared, observable [`Transform`].
///
/// Clones share the same underlying transform and identity. Every write notifies the registered
/// observers before returning.
#[derive(Clone)]
pub struct TransformRef(Rc<TransformInner>);

impl Default for TransformRef {
    fn default() -> Self {
        Self::new(Transform::IDENTITY)
    }
}

impl TransformRef {
    /// Wrap `value` in a fresh shared transform with its own identity.
    pub fn new(value: Transform) -> Self {
        Self(Rc::new(TransformInner {
            id: ObjectId::next(),
            value: Cell::new(value),
            bus: InvalidationBus::new(),
        }))
    }

    /// Shared transform at `translation`.
    pub fn at(translation: Vec2) -> Self {
        Self::new(Transform::translate(translation))
    }

    /// Identity used by lockers.
    pub fn id(&self) -> ObjectId {
        self.0.id
    }

    /// Current value.
    pub fn get(&self) -> Transform {
        self.0.value.get()
    }

    /// Replace all three members at once.
    pub fn set(&self, value: Transform) {
        self.0.value.set(value);
        self.0.bus.invalidate();
    }

    /// Current translation.
    pub fn translation(&self) -> Vec2 {
        self.get().translation
    }

    /// Write the translation.
    pub fn set_translation(&self, translation: Vec2) {
        self.set(Transform {
            translation,
            ..self.get()
        });
    }

    /// Current scale.
    pub fn scale(&self) -> Vec2 {
        self.get().scale
    }

    /// Write the scale.
    pub fn set_scale(&self, scale: Vec2) {
        self.set(Transform {
            scale,
            ..self.get()
        });
    }

    /// Current rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.get().rotation
    }

    /// Write the rotation in degrees.
    pub fn set_rotation(&self, rotation: f64) {
        self.set(Transform {
            rotation,
            ..self.get()
        });
    }

    /// Register a cache that depends on this transform.
    pub fn add_observer(&self, observer: Weak<dyn Observer>) {
        self.0.bus.add_observer(observer);
    }

    /// Deregister a cache.
    pub fn remove_observer(&self, observer: &Weak<dyn Observer>) -> bool {
        self.0.bus.remove_observer(observer)
    }

    /// Number of live observers.
    pub fn observer_count(&self) -> usize {
        self.0.bus.len()
    }

    #[cfg(test)]
    pub(crate) fn registered_observers(&self) -> usize {
        self.0.bus.registered()
    }

    /// Return `true` when both handles share the same transform.
    pub fn ptr_eq(&self, other: &TransformRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::fmt::Debug for TransformRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformRef")
            .field("id", &self.0.id)
            .field("value", &self.get())
            .finish()
    }
}

impl Animatable for TransformRef {
    fn object_id(&self) -> ObjectId {
        self.id()
    }

    fn get_property(&self, property: &str) -> SceneResult<Value> {
        match property {
            TRANSLATION => Ok(Value::Vec2(self.translation())),
            SCALE => Ok(Value::Vec2(self.scale())),
            ROTATION => Ok(Value::Number(self.rotation())),
            _ => Err(SceneError::unknown_property(property)),
        }
    }

    fn set_property(&self, property: &str, value: Value) -> SceneResult<()> {
        match property {
            TRANSLATION => self.set_translation(value.into_vec2(property)?),
            SCALE => self.set_scale(value.into_vec2(property)?),
            ROTATION => self.set_rotation(value.into_number(property)?),
            _ => return Err(SceneError::unknown_property(property)),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/transform.rs"]
mod tests;
