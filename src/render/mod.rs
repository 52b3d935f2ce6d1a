//! Frame rendering: turn the live scene graph into one SVG document.

/// SVG document renderer.
pub mod svg;
