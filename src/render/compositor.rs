use std::io::Write;

use image::{ImageEncoder, codecs::png::PngEncoder};

use crate::{
    assets::{
        decode::{self, Sprite},
        sprites::{ResampleFilters, SpriteCatalog},
    },
    board::fen::{BOARD_SIZE, Board},
    foundation::core::{BoardGeometry, Canvas, PremulRgba8},
    foundation::error::{FenboardError, FenboardResult},
    render::composite,
};

/// Color of the calibration overlay.
pub const DEBUG_HIGHLIGHT: PremulRgba8 = [255, 0, 0, 255];

/// Resize the background to the canvas width and use it as the base layer.
pub fn base_canvas(
    catalog: &SpriteCatalog,
    geometry: &BoardGeometry,
    filters: &ResampleFilters,
) -> FenboardResult<Canvas> {
    let resized =
        decode::resize_to_width(catalog.background(), geometry.canvas_width, filters.background);
    let base = Sprite::from_straight(resized);
    Canvas::from_premul(base.width, base.height, base.rgba8_premul)
}

/// Board boundary plus one outline per cell, written straight into the canvas.
pub fn draw_debug_grid(canvas: &mut Canvas, geometry: &BoardGeometry) {
    composite::stroke_rect(
        canvas,
        geometry.min_x,
        geometry.min_y,
        geometry.max_x,
        geometry.max_y,
        DEBUG_HIGHLIGHT,
    );
    for row in 0..BOARD_SIZE {
        for col in 0..BOARD_SIZE {
            let (x1, y1, x2, y2) = geometry.cell_rect(row, col);
            composite::stroke_rect(canvas, x1, y1, x2, y2, DEBUG_HIGHLIGHT);
        }
    }
}

/// Blend every occupied cell's sprite, centered in its cell.
pub fn draw_pieces(
    canvas: &mut Canvas,
    board: &Board,
    catalog: &SpriteCatalog,
    geometry: &BoardGeometry,
) {
    for (row, col, pc) in board.occupied() {
        let sprite = catalog.sprite(pc);
        let (x, y) = geometry.sprite_origin(row, col, sprite.width, sprite.height);
        tracing::debug!(%pc, row, col, x, y, "place piece");
        composite::blend_sprite(canvas, sprite, x, y);
    }
}

/// Build the finished canvas: background, optional debug grid, then pieces.
#[tracing::instrument(skip_all, fields(debug = show_grid))]
pub fn compose(
    board: &Board,
    catalog: &SpriteCatalog,
    geometry: &BoardGeometry,
    filters: &ResampleFilters,
    show_grid: bool,
) -> FenboardResult<Canvas> {
    let mut canvas = base_canvas(catalog, geometry, filters)?;
    tracing::debug!(
        width = canvas.width(),
        height = canvas.height(),
        "base canvas"
    );

    if show_grid {
        draw_debug_grid(&mut canvas, geometry);
    }
    draw_pieces(&mut canvas, board, catalog, geometry);

    Ok(canvas)
}

/// Encode the canvas as an 8-bit RGBA PNG.
pub fn encode_png<W: Write>(canvas: &Canvas, out: W) -> FenboardResult<()> {
    let straight = canvas.to_straight_rgba8();
    PngEncoder::new(out)
        .write_image(
            &straight,
            canvas.width(),
            canvas.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| FenboardError::encode(e.to_string()))
}
