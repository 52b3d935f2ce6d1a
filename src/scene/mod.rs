//! Scene ownership and the frame loop.

/// Frame driver: drawables, animation and updater bundles, renderer and sink.
pub mod driver;
