use crate::foundation::error::{FenboardError, FenboardResult};

/// Premultiplied RGBA8 pixel (r,g,b already multiplied by a).
pub type PremulRgba8 = [u8; 4];

/// Calibration of the 8x8 grid inside the background image.
///
/// The values are not derived from the background; they must be tuned to the
/// specific asset (render with `--debug` to check the grid lines). Coordinates
/// are in canvas pixels, i.e. after the background has been resized to
/// `canvas_width`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardGeometry {
    /// Left edge of the board.
    pub min_x: i64,
    /// Top edge of the board.
    pub min_y: i64,
    /// Right edge of the board.
    pub max_x: i64,
    /// Bottom edge of the board.
    pub max_y: i64,
    /// Width of one cell.
    pub cell_width: u32,
    /// Height of one cell.
    pub cell_height: u32,
    /// Width the background is resized to; the canvas height follows its aspect ratio.
    pub canvas_width: u32,
    /// Piece sprite width as a fraction of `cell_width`.
    pub sprite_scale: f64,
}

impl Default for BoardGeometry {
    fn default() -> Self {
        Self {
            min_x: 40,
            min_y: 15,
            max_x: 783,
            max_y: 760,
            cell_width: 93,
            cell_height: 93,
            canvas_width: 800,
            sprite_scale: 0.8,
        }
    }
}

impl BoardGeometry {
    /// Reject calibrations that cannot produce a canvas or a sprite.
    pub fn validate(&self) -> FenboardResult<()> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(FenboardError::validation("cell size must be > 0"));
        }
        if self.canvas_width == 0 {
            return Err(FenboardError::validation("canvas width must be > 0"));
        }
        if !(self.sprite_scale > 0.0 && self.sprite_scale <= 1.0) {
            return Err(FenboardError::validation(format!(
                "sprite scale must be in (0, 1], got {}",
                self.sprite_scale
            )));
        }
        if self.sprite_width() == 0 {
            return Err(FenboardError::validation("sprite width rounds down to 0"));
        }
        Ok(())
    }

    /// Target width of every piece sprite: `floor(cell_width * sprite_scale)`.
    pub fn sprite_width(&self) -> u32 {
        (f64::from(self.cell_width) * self.sprite_scale).floor() as u32
    }

    /// Top-left corner of cell `(row, col)`.
    pub fn cell_origin(&self, row: usize, col: usize) -> (i64, i64) {
        (
            self.min_x + col as i64 * i64::from(self.cell_width),
            self.min_y + row as i64 * i64::from(self.cell_height),
        )
    }

    /// Inclusive outline corners `(x1, y1, x2, y2)` of cell `(row, col)`.
    pub fn cell_rect(&self, row: usize, col: usize) -> (i64, i64, i64, i64) {
        let (x1, y1) = self.cell_origin(row, col);
        let (x2, y2) = self.cell_origin(row + 1, col + 1);
        (x1, y1, x2, y2)
    }

    /// Top-left corner at which a `width` x `height` sprite is centered in cell `(row, col)`.
    ///
    /// Halves use truncating integer division on each term separately.
    pub fn sprite_origin(&self, row: usize, col: usize, width: u32, height: u32) -> (i64, i64) {
        let (cx, cy) = self.cell_origin(row, col);
        (
            cx + i64::from(self.cell_width) / 2 - i64::from(width) / 2,
            cy + i64::from(self.cell_height) / 2 - i64::from(height) / 2,
        )
    }
}

/// Owned premultiplied RGBA8 pixel buffer, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Canvas {
    /// Wrap premultiplied bytes; `data` must hold exactly `width * height * 4` bytes.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> FenboardResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if data.len() != expected {
            return Err(FenboardError::validation(format!(
                "canvas {width}x{height} expects {expected} bytes, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Canvas filled with a single premultiplied color.
    #[cfg(test)]
    pub(crate) fn filled(width: u32, height: u32, px: PremulRgba8) -> Self {
        let data = px
            .iter()
            .copied()
            .cycle()
            .take((width as usize) * (height as usize) * 4)
            .collect();
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw premultiplied bytes.
    pub fn as_premul_bytes(&self) -> &[u8] {
        &self.data
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i64, y: i64) -> Option<PremulRgba8> {
        let i = self.offset(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrite the pixel at `(x, y)`. Out-of-bounds writes are dropped.
    pub fn set_pixel(&mut self, x: i64, y: i64, px: PremulRgba8) {
        if let Some(i) = self.offset(x, y) {
            self.data[i..i + 4].copy_from_slice(&px);
        }
    }

    /// Convert to straight (non-premultiplied) RGBA8 bytes for encoding.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}
