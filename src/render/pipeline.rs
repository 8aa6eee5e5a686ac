use crate::{
    assets::sprites::{ResampleFilters, SpriteCatalog, SpriteSource},
    board::fen::{RankPolicy, parse_placement},
    foundation::core::BoardGeometry,
    foundation::error::{FenboardError, FenboardResult},
    render::compositor,
};

/// Everything a render needs besides the placement string and the assets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderConfig {
    /// Grid calibration for the background asset.
    pub geometry: BoardGeometry,
    /// Background and sprite resampling filters.
    pub filters: ResampleFilters,
    /// Overlay calibration rectangles.
    pub debug: bool,
    /// Rank accounting used by the parser.
    pub rank_policy: RankPolicy,
}

/// Parse, load, composite and encode a placement into PNG bytes.
///
/// Pipeline:
/// 1. [`parse_placement`](crate::parse_placement)
/// 2. [`SpriteCatalog::load`](crate::SpriteCatalog::load)
/// 3. [`compose`](crate::compose)
/// 4. [`encode_png`](crate::encode_png)
///
/// Nothing is returned unless every stage succeeds.
#[tracing::instrument(skip(cfg, source))]
pub fn render_png(
    placement: &str,
    cfg: &RenderConfig,
    source: &dyn SpriteSource,
) -> FenboardResult<Vec<u8>> {
    let board = parse_placement(placement, cfg.rank_policy)
        .map_err(|e| FenboardError::fen(placement, e))?;
    tracing::debug!("parsed board:\n{board}");

    let catalog = SpriteCatalog::load(source, &cfg.geometry, &cfg.filters)?;
    let canvas = compositor::compose(&board, &catalog, &cfg.geometry, &cfg.filters, cfg.debug)?;

    let mut out = Vec::new();
    compositor::encode_png(&canvas, &mut out)?;
    tracing::info!(
        width = canvas.width(),
        height = canvas.height(),
        bytes = out.len(),
        "rendered board"
    );
    Ok(out)
}
