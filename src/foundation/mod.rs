//! Value types, errors and configuration shared by every other module.

/// Scene configuration record.
pub mod config;
/// Frame/identity/color primitives.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Transforms and interpolation.
pub mod math;
