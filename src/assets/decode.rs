use anyhow::Context;
use image::{RgbaImage, imageops::FilterType};

use crate::foundation::error::FenboardResult;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded sprite in premultiplied RGBA8 form.
pub struct Sprite {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Vec<u8>,
}

impl Sprite {
    /// Premultiply a straight-alpha image.
    pub fn from_straight(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let mut rgba8_premul = img.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            width,
            height,
            rgba8_premul,
        }
    }
}

/// Decode PNG bytes into straight RGBA8. The format is fixed, not sniffed.
pub fn decode_png(bytes: &[u8]) -> FenboardResult<RgbaImage> {
    let dyn_img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .context("decode png from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Height that keeps the aspect ratio when `old_w x old_h` is resized to `new_w`.
///
/// Rounds as `floor(0.7 + old_h * new_w / old_w)`, never below 1.
pub fn scaled_height(old_w: u32, old_h: u32, new_w: u32) -> u32 {
    if old_w == 0 {
        return 1;
    }
    let h = 0.7 + f64::from(old_h) * f64::from(new_w) / f64::from(old_w);
    (h.floor() as u32).max(1)
}

/// Resize to `width`, deriving the height from the aspect ratio.
pub fn resize_to_width(img: &RgbaImage, width: u32, filter: FilterType) -> RgbaImage {
    let (w, h) = img.dimensions();
    let height = scaled_height(w, h, width);
    if (w, h) == (width, height) {
        return img.clone();
    }
    image::imageops::resize(img, width, height, filter)
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn png_bytes(img: RgbaImage) -> Vec<u8> {
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn decode_png_dimensions() {
        let img = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 4]));
        let decoded = decode_png(&png_bytes(img.clone())).unwrap();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded, img);
    }

    #[test]
    fn decode_png_rejects_garbage() {
        assert!(decode_png(b"not a png").is_err());
    }

    #[test]
    fn premultiplies_on_sprite_construction() {
        let img = RgbaImage::from_raw(1, 1, vec![100, 50, 200, 128]).unwrap();
        let sprite = Sprite::from_straight(img);
        assert_eq!(
            sprite.rgba8_premul,
            vec![
                ((100u16 * 128 + 127) / 255) as u8,
                ((50u16 * 128 + 127) / 255) as u8,
                ((200u16 * 128 + 127) / 255) as u8,
                128u8
            ]
        );

        let clear = RgbaImage::from_raw(1, 1, vec![9, 9, 9, 0]).unwrap();
        assert_eq!(Sprite::from_straight(clear).rgba8_premul, vec![0, 0, 0, 0]);
    }

    #[test]
    fn scaled_height_keeps_aspect() {
        assert_eq!(scaled_height(100, 100, 74), 74);
        assert_eq!(scaled_height(200, 100, 74), 37);
        assert_eq!(scaled_height(1000, 960, 800), 768);
        // 0.7 bias: 37.5 -> 38.2 -> 38, 37.0 -> 37.7 -> 37
        assert_eq!(scaled_height(100, 50, 75), 38);
        assert_eq!(scaled_height(100, 50, 74), 37);
        assert_eq!(scaled_height(1000, 1, 10), 1);
    }

    #[test]
    fn resize_to_width_derives_height() {
        let img = RgbaImage::from_pixel(150, 120, image::Rgba([0, 0, 255, 255]));
        let out = resize_to_width(&img, 74, FilterType::Triangle);
        assert_eq!(out.dimensions(), (74, scaled_height(150, 120, 74)));
    }
}
