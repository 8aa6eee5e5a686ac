use crate::{
    assets::decode::Sprite,
    foundation::core::{Canvas, PremulRgba8},
};

/// Premultiplied source-over.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);

    let mut out = [0u8; 4];
    for i in 0..4 {
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = src[i].saturating_add(dc);
    }
    out
}

/// Blend `sprite` over `canvas` with its top-left at `(x, y)`.
///
/// Parts outside the canvas are clipped.
pub fn blend_sprite(canvas: &mut Canvas, sprite: &Sprite, x: i64, y: i64) {
    let cw = i64::from(canvas.width());
    let ch = i64::from(canvas.height());
    let sw = i64::from(sprite.width);

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(cw);
    let y1 = (y + i64::from(sprite.height)).min(ch);

    for py in y0..y1 {
        for px in x0..x1 {
            let si = (((py - y) * sw + (px - x)) * 4) as usize;
            let s = &sprite.rgba8_premul[si..si + 4];
            if let Some(d) = canvas.pixel(px, py) {
                canvas.set_pixel(px, py, over(d, [s[0], s[1], s[2], s[3]]));
            }
        }
    }
}

/// Overwrite a horizontal run from `x1` to `x2` inclusive.
pub fn hline(canvas: &mut Canvas, x1: i64, y: i64, x2: i64, px: PremulRgba8) {
    for x in x1..=x2 {
        canvas.set_pixel(x, y, px);
    }
}

/// Overwrite a vertical run from `y1` to `y2` inclusive.
pub fn vline(canvas: &mut Canvas, x: i64, y1: i64, y2: i64, px: PremulRgba8) {
    for y in y1..=y2 {
        canvas.set_pixel(x, y, px);
    }
}

/// Outline of the rectangle with inclusive corners `(x1, y1)` and `(x2, y2)`.
pub fn stroke_rect(canvas: &mut Canvas, x1: i64, y1: i64, x2: i64, y2: i64, px: PremulRgba8) {
    hline(canvas, x1, y1, x2, px);
    hline(canvas, x1, y2, x2, px);
    vline(canvas, x1, y1, y2, px);
    vline(canvas, x2, y1, y2, px);
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}
