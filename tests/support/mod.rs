use std::{collections::BTreeMap, io::Cursor, path::Path};

use image::{Rgba, RgbaImage};

pub const BACKGROUND: [u8; 4] = [181, 136, 99, 255];

pub fn png_bytes(img: &RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img.clone())
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Round piece on a transparent square, tinted by color.
pub fn piece_image(white: bool) -> RgbaImage {
    let fill = if white {
        [240, 240, 240, 255]
    } else {
        [20, 20, 20, 255]
    };
    RgbaImage::from_fn(100, 100, |x, y| {
        let dx = x as i32 - 50;
        let dy = y as i32 - 50;
        if dx * dx + dy * dy <= 40 * 40 {
            Rgba(fill)
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

/// Every asset keyed by its relative path.
pub fn asset_files() -> BTreeMap<String, Vec<u8>> {
    fenboard::SpriteRole::all()
        .map(|role| {
            let img = match role {
                fenboard::SpriteRole::Background => {
                    RgbaImage::from_pixel(1000, 960, Rgba(BACKGROUND))
                }
                fenboard::SpriteRole::Piece(pc) => piece_image(pc.is_white()),
            };
            (role.rel_path().to_string(), png_bytes(&img))
        })
        .collect()
}

#[allow(dead_code)]
pub fn write_assets(root: &Path) {
    for (rel, bytes) in asset_files() {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, bytes).unwrap();
    }
}
