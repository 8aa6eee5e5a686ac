/// Board geometry, pixel type and the premultiplied canvas.
pub mod core;
/// Crate error type.
pub mod error;
