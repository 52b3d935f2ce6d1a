//! External collaborators consumed by drawables: font metrics and image payloads.

/// Image decoding into embeddable payloads.
pub mod image;
/// Text measurement backends.
pub mod text;
