//! Scene graph: observable transforms, paint components, shape metrics and drawable nodes.

/// Dirty-signal fan-out from mutable sources to cached observers.
pub mod invalidate;
/// Drawable nodes with cached global state.
pub mod node;
/// Anchors and bounding shapes.
pub mod shape;
/// Fill and stroke components.
pub mod style;
/// Shared observable transforms.
pub mod transform;
