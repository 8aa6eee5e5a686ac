/// Pixel-level blending and line drawing.
pub mod composite;
/// Background, debug grid, pieces and PNG encoding.
pub mod compositor;
/// One-shot parse, load, composite and encode.
pub mod pipeline;
