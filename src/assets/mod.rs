//! Sprite IO: PNG decoding, resampling and the fixed role catalog.
//!
//! All file reads happen here, before compositing starts.

/// PNG decode, aspect-preserving resize and premultiplication.
pub mod decode;
/// Role table, byte sources and the loaded catalog.
pub mod sprites;
