use crate::atlas::PackedAtlas;
use crate::buffer::PixelBuffer;
use crate::error::Result;
use image::{Rgba, RgbaImage};
use serde_json::{Value, json};
use std::path::Path;

/// 16-entry RGB palette.
pub type Palette = [[u8; 3]; 16];

/// Standard 16-colour EGA palette, used when no game palette is at hand.
pub const DEFAULT_PALETTE: Palette = [
    [0x00, 0x00, 0x00],
    [0x00, 0x00, 0xAA],
    [0x00, 0xAA, 0x00],
    [0x00, 0xAA, 0xAA],
    [0xAA, 0x00, 0x00],
    [0xAA, 0x00, 0xAA],
    [0xAA, 0x55, 0x00],
    [0xAA, 0xAA, 0xAA],
    [0x55, 0x55, 0x55],
    [0x55, 0x55, 0xFF],
    [0x55, 0xFF, 0x55],
    [0x55, 0xFF, 0xFF],
    [0xFF, 0x55, 0x55],
    [0xFF, 0x55, 0xFF],
    [0xFF, 0xFF, 0x55],
    [0xFF, 0xFF, 0xFF],
];

/// Expands an indexed buffer to RGBA. Pixels equal to `color_key` become
/// fully transparent; only the low 4 bits of each index are used.
pub fn to_rgba_image(buf: &PixelBuffer, palette: &Palette, color_key: Option<u8>) -> RgbaImage {
    let (w, h) = buf.dimensions();
    RgbaImage::from_fn(w, h, |x, y| {
        let c = buf.get(x, y);
        if Some(c) == color_key {
            Rgba([0, 0, 0, 0])
        } else {
            let [r, g, b] = palette[(c & 15) as usize];
            Rgba([r, g, b, 255])
        }
    })
}

/// Writes an indexed buffer as a PNG file.
pub fn save_png(
    buf: &PixelBuffer,
    palette: &Palette,
    color_key: Option<u8>,
    path: impl AsRef<Path>,
) -> Result<()> {
    to_rgba_image(buf, palette, color_key).save(path)?;
    Ok(())
}

/// Serializes an atlas as `{ kind, width, height, frames: [..], stats }`,
/// frames in frame-number order.
pub fn to_json(atlas: &PackedAtlas) -> Value {
    let frames: Vec<Value> = atlas
        .rects
        .iter()
        .enumerate()
        .map(|(i, r)| json!({"frame": i, "x": r.x, "y": r.y, "w": r.w, "h": r.h}))
        .collect();
    json!({
        "kind": atlas.kind,
        "width": atlas.width(),
        "height": atlas.height(),
        "frames": frames,
        "stats": atlas.stats(),
    })
}
