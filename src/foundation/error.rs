use crate::foundation::core::ObjectId;

/// Convenience result type used across svgreel.
pub type SceneResult<T> = Result<T, SceneError>;

/// Error taxonomy surfaced to scene authors.
///
/// Everything except [`SceneError::Sink`] is raised while a scene is being built or configured;
/// once frames are streaming only the sink itself may fail.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    /// Attempted cycle or self-parent in the scene graph.
    #[error("invalid hierarchy: {0}")]
    InvalidHierarchy(String),

    /// Attempted removal of a node that is not a child of the receiver.
    #[error("node {child} is not a child of node {parent}")]
    NotAChild {
        /// Node the removal was requested on.
        parent: ObjectId,
        /// Node that was expected to be a child.
        child: ObjectId,
    },

    /// Two writers claim the same property of the same object at the same time.
    #[error("property '{property}' of object {object} is already locked")]
    LockedProperty {
        /// Identity of the contended object.
        object: ObjectId,
        /// Contended property name (`*` for the whole object).
        property: String,
    },

    /// The property's value type has no interpolation.
    #[error("property '{property}' is not interpolable")]
    NotInterpolable {
        /// Property name.
        property: String,
    },

    /// `activate` on an updater that is already active.
    #[error("updater is already active")]
    UpdaterAlreadyActive,

    /// `deactivate` on an updater that is already inactive.
    #[error("updater is already inactive")]
    UpdaterAlreadyInactive,

    /// Element-wise operation between values of different length.
    #[error("size mismatch: expected {expected} elements, got {actual}")]
    SizeMismatch {
        /// Expected element count.
        expected: usize,
        /// Provided element count.
        actual: usize,
    },

    /// Component-wise division by a divisor with a zero component.
    #[error("division by zero")]
    DivisionByZero,

    /// Query outside the valid domain (path length, organizer index).
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// Speed factors must be positive integers.
    #[error("bad speed {0}: speed must be a positive integer")]
    BadSpeed(f64),

    /// The object exposes no property with this name.
    #[error("unknown property '{property}'")]
    UnknownProperty {
        /// Property name.
        property: String,
    },

    /// A value of the wrong type was written to or read from a property.
    #[error("property '{property}' expects a {expected} value")]
    PropertyType {
        /// Property name.
        property: String,
        /// Expected value kind.
        expected: &'static str,
    },

    /// Player-only or animations-only API used on a scene in the other mode.
    #[error("scene mode mismatch: {0}")]
    ModeMismatch(String),

    /// Invalid user-provided configuration or arguments.
    #[error("validation error: {0}")]
    Validation(String),

    /// Frame sink write failure.
    #[error("frame sink error: {0}")]
    Sink(#[from] std::io::Error),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SceneError {
    /// Build a [`SceneError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`SceneError::OutOfBounds`] value.
    pub fn out_of_bounds(msg: impl Into<String>) -> Self {
        Self::OutOfBounds(msg.into())
    }

    /// Build a [`SceneError::InvalidHierarchy`] value.
    pub fn hierarchy(msg: impl Into<String>) -> Self {
        Self::InvalidHierarchy(msg.into())
    }

    /// Build a [`SceneError::LockedProperty`] value.
    pub fn locked(object: ObjectId, property: impl Into<String>) -> Self {
        Self::LockedProperty {
            object,
            property: property.into(),
        }
    }

    /// Build a [`SceneError::UnknownProperty`] value.
    pub fn unknown_property(property: impl Into<String>) -> Self {
        Self::UnknownProperty {
            property: property.into(),
        }
    }

    /// Build a [`SceneError::PropertyType`] value.
    pub fn property_type(property: impl Into<String>, expected: &'static str) -> Self {
        Self::PropertyType {
            property: property.into(),
            expected,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
