//! FEN placement parsing into a fixed 8x8 grid.

/// Piece codes, the board grid and the placement parser.
pub mod fen;
