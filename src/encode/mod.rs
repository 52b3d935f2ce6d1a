//! Frame sinks.
//!
//! Sinks consume rendered SVG documents in emission order and are driven by the scene's frame
//! loop.

/// Generic frame sink trait and built-in sinks.
pub mod sink;
