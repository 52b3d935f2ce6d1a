//! Organizers: pure functions from an index or cell to a local transform.

/// Row-major grid of equal cells.
pub mod grid;
/// Array-backed binary tree placement.
pub mod tree;
