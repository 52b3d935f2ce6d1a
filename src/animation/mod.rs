//! Animation engine: lockers, lazy arguments, the frame-stepped [`anim::Animation`] trait,
//! property animations and the sequence/bundle combinators.

/// Frame stepping, speed control, lazy construction and compression.
pub mod anim;
/// Easing curves.
pub mod ease;
/// Deferred reads of live state.
pub mod lazy;
/// Property ownership arbitration.
pub mod locker;
/// Combinators and utility animations.
pub mod ops;
/// Movement along a path.
pub mod path_anim;
/// Property values, the animatable trait and interpolating animations.
pub mod property;
