//! Vector geometry consumed by drawables and path animations.

/// Piecewise paths with arc-length queries.
pub mod path;
