//! fenboard renders the piece-placement field of a FEN string onto a chess board image.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: placement string -> [`Board`] (fixed 8x8 grid of [`PieceCode`])
//! 2. **Load**: 12 piece sprites + 1 background -> [`SpriteCatalog`] (decoded once, pieces
//!    pre-resized)
//! 3. **Composite**: background resized to the canvas width, optional debug grid, pieces blended
//!    centered in their cells -> [`Canvas`]
//! 4. **Encode**: [`Canvas`] -> PNG bytes
//!
//! [`render_png`] runs all four stages. Each stage is also exposed on its own.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic**: identical placement, config and assets give byte-identical PNGs.
//! - **No IO while compositing**: all reads happen in [`SpriteCatalog::load`].
//! - **Premultiplied RGBA8** on the canvas; straight alpha only at decode and encode.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod board;
mod foundation;
mod render;

pub use assets::decode::{Sprite, decode_png, resize_to_width, scaled_height};
pub use assets::sprites::{DirSource, ResampleFilters, SpriteCatalog, SpriteRole, SpriteSource};
pub use board::fen::{
    BOARD_SIZE, Board, FenError, NotAPiece, PieceCode, RankPolicy, START_PLACEMENT,
    parse_placement,
};
pub use foundation::core::{BoardGeometry, Canvas, PremulRgba8};
pub use foundation::error::{FenboardError, FenboardResult};
pub use render::composite::{blend_sprite, over, stroke_rect};
pub use render::compositor::{
    DEBUG_HIGHLIGHT, base_canvas, compose, draw_debug_grid, draw_pieces, encode_png,
};
pub use render::pipeline::{RenderConfig, render_png};
