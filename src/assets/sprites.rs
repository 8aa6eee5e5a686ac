use std::{
    collections::HashMap,
    path::PathBuf,
};

use anyhow::Context;
use image::{RgbaImage, imageops::FilterType};

use crate::{
    assets::decode::{self, Sprite},
    board::fen::PieceCode,
    foundation::core::BoardGeometry,
    foundation::error::{FenboardError, FenboardResult},
};

/// One of the 13 fixed image roles: a piece or the board background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteRole {
    /// Sprite for a piece code.
    Piece(PieceCode),
    /// Board background.
    Background,
}

impl SpriteRole {
    /// All roles in load order: background first, then pieces.
    pub fn all() -> impl Iterator<Item = SpriteRole> {
        std::iter::once(SpriteRole::Background)
            .chain(PieceCode::ALL.into_iter().map(SpriteRole::Piece))
    }

    /// Asset path relative to the asset root.
    pub fn rel_path(self) -> &'static str {
        match self {
            SpriteRole::Background => "imgs/background.png",
            SpriteRole::Piece(pc) => match pc {
                PieceCode::WhiteKing => "imgs/wK.png",
                PieceCode::WhiteQueen => "imgs/wQ.png",
                PieceCode::WhiteRook => "imgs/wR.png",
                PieceCode::WhiteBishop => "imgs/wB.png",
                PieceCode::WhiteKnight => "imgs/wN.png",
                PieceCode::WhitePawn => "imgs/wP.png",
                PieceCode::BlackKing => "imgs/bK.png",
                PieceCode::BlackQueen => "imgs/bQ.png",
                PieceCode::BlackRook => "imgs/bR.png",
                PieceCode::BlackBishop => "imgs/bB.png",
                PieceCode::BlackKnight => "imgs/bN.png",
                PieceCode::BlackPawn => "imgs/bP.png",
            },
        }
    }
}

/// Resampling filters. The background uses the slower, sharper filter; piece
/// sprites use the faster one. Collapsing them changes the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResampleFilters {
    /// Filter for the background resize to canvas width.
    pub background: FilterType,
    /// Filter for piece sprites resized to cell width.
    pub sprite: FilterType,
}

impl Default for ResampleFilters {
    fn default() -> Self {
        Self {
            background: FilterType::Lanczos3,
            sprite: FilterType::Triangle,
        }
    }
}

/// Where asset bytes come from.
pub trait SpriteSource {
    /// Read the full contents of `rel_path`.
    fn read(&self, rel_path: &str) -> FenboardResult<Vec<u8>>;
}

/// Reads assets from a directory on disk.
#[derive(Clone, Debug)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    /// Source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SpriteSource for DirSource {
    fn read(&self, rel_path: &str) -> FenboardResult<Vec<u8>> {
        let path = self.root.join(rel_path);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read '{}'", path.display()))?;
        Ok(bytes)
    }
}

/// Immutable set of decoded images for one render.
#[derive(Clone, Debug)]
pub struct SpriteCatalog {
    background: RgbaImage,
    pieces: HashMap<PieceCode, Sprite>,
}

impl SpriteCatalog {
    /// Read, decode and resize every role once.
    ///
    /// The background stays at native resolution; pieces are resized to
    /// [`BoardGeometry::sprite_width`] and premultiplied. The first failing
    /// asset aborts the load.
    #[tracing::instrument(skip_all)]
    pub fn load(
        source: &dyn SpriteSource,
        geometry: &BoardGeometry,
        filters: &ResampleFilters,
    ) -> FenboardResult<Self> {
        geometry.validate()?;
        let sprite_width = geometry.sprite_width();

        let mut background = None;
        let mut pieces = HashMap::with_capacity(PieceCode::ALL.len());
        for role in SpriteRole::all() {
            let path = role.rel_path();
            let img = source
                .read(path)
                .and_then(|bytes| decode::decode_png(&bytes))
                .map_err(|e| FenboardError::asset(path, e))?;
            tracing::debug!(
                path,
                width = img.width(),
                height = img.height(),
                "loaded asset"
            );

            match role {
                SpriteRole::Background => background = Some(img),
                SpriteRole::Piece(pc) => {
                    let resized = decode::resize_to_width(&img, sprite_width, filters.sprite);
                    pieces.insert(pc, Sprite::from_straight(resized));
                }
            }
        }

        let background = background.ok_or_else(|| {
            FenboardError::asset(
                SpriteRole::Background.rel_path(),
                anyhow::anyhow!("background was never loaded"),
            )
        })?;
        Self::from_parts(background, pieces)
    }

    /// Assemble a catalog from already prepared images.
    ///
    /// Every piece code must be present and every sprite buffer must hold
    /// exactly `width * height` premultiplied pixels.
    pub fn from_parts(
        background: RgbaImage,
        pieces: HashMap<PieceCode, Sprite>,
    ) -> FenboardResult<Self> {
        for pc in PieceCode::ALL {
            let path = SpriteRole::Piece(pc).rel_path();
            let Some(sprite) = pieces.get(&pc) else {
                return Err(FenboardError::asset(
                    path,
                    anyhow::anyhow!("no sprite for piece '{pc}'"),
                ));
            };
            let expected = (sprite.width as usize)
                .checked_mul(sprite.height as usize)
                .and_then(|n| n.checked_mul(4));
            if expected != Some(sprite.rgba8_premul.len()) {
                return Err(FenboardError::asset(
                    path,
                    anyhow::anyhow!(
                        "sprite for '{pc}' is {}x{} but holds {} bytes",
                        sprite.width,
                        sprite.height,
                        sprite.rgba8_premul.len()
                    ),
                ));
            }
        }
        Ok(Self { background, pieces })
    }

    /// Background at native resolution, straight alpha.
    pub fn background(&self) -> &RgbaImage {
        &self.background
    }

    /// Resized, premultiplied sprite for `pc`.
    pub fn sprite(&self, pc: PieceCode) -> &Sprite {
        // from_parts guarantees every code is present
        &self.pieces[&pc]
    }
}
