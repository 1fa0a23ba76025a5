use crate::buffer::PixelBuffer;
use crate::config::AtlasConfig;
use crate::error::{GfxError, Result};
use crate::model::{AtlasKind, AtlasStats, Rect};
use crate::packer::{
    Packer,
    grid::GridPacker,
    shelf::{ShelfPacker, decode_sprite_width},
};
use crate::planar::{OPAQUE, PlanarImage, decode_planar, encoded_len};
use crate::tile::{TILE_BYTES, TILE_SIZE, tile_count};
use tracing::{debug, instrument};

/// Foreground tile sheet width.
pub const FRONT_SHEET_W: u32 = 256;
/// Foreground tile sheet height.
pub const FRONT_SHEET_H: u32 = 192;
/// Maximum number of foreground tiles.
pub const MAX_FRONT_TILES: usize = 168;

/// A decoded atlas ready to be handed to a render back-end.
#[derive(Debug, Clone)]
pub struct PackedAtlas {
    pub kind: AtlasKind,
    /// Atlas pixels; the buffer height is the occupied height.
    pub pixels: PixelBuffer,
    /// One rectangle per frame, in frame-number order.
    pub rects: Vec<Rect>,
    /// Planar bytes consumed from the source.
    pub source_bytes: usize,
}

impl PackedAtlas {
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn stats(&self) -> AtlasStats {
        AtlasStats::from_rects(
            &self.rects,
            self.pixels.width(),
            self.pixels.height(),
            self.source_bytes,
        )
    }
}

/// Reads entry `i` of the sprite size table as `(width_px, height)`.
pub fn sprite_size(sizes: &[u8], i: usize) -> Result<(u32, u32)> {
    let j = i * 2;
    match sizes.get(j..j + 2) {
        Some(&[w, h]) => Ok((decode_sprite_width(w), h as u32)),
        _ => Err(GfxError::SourceTooShort {
            needed: j + 2,
            available: sizes.len(),
        }),
    }
}

/// Decodes `count` sprites into one shelf-packed atlas.
///
/// `sizes` is the two-bytes-per-entry size table and `sprites` the planar
/// sprite data, each sprite following the previous one. Table indices in
/// `cfg.skip` have no data and do not take a frame number.
///
/// Fails if the frames do not fit in `cfg.max_width x cfg.max_height` or if
/// more than `cfg.max_sprites` are requested; the atlas budget is fixed.
#[instrument(skip_all, fields(count = count))]
pub fn pack_sprites(
    sizes: &[u8],
    sprites: &[u8],
    count: usize,
    cfg: &AtlasConfig,
) -> Result<PackedAtlas> {
    cfg.validate()?;
    if count > cfg.max_sprites {
        return Err(GfxError::TooManySprites {
            count,
            max: cfg.max_sprites,
        });
    }

    let mut pixels = PixelBuffer::try_new(cfg.max_width, cfg.max_height)?;
    let mut packer = ShelfPacker::new(cfg.max_width, cfg.max_height);
    let mut rects = Vec::with_capacity(count);
    let mut offset = 0usize;

    let mut i = 0usize;
    while rects.len() < count {
        if i >= sizes.len() / 2 {
            return Err(GfxError::SourceTooShort {
                needed: i * 2 + 2,
                available: sizes.len(),
            });
        }
        if cfg.is_skipped(i) {
            i += 1;
            continue;
        }
        let (w, h) = sprite_size(sizes, i)?;
        let Some(rect) = packer.pack(&Rect::new(0, 0, w, h)) else {
            let (x, y) = packer.cursor();
            return Err(GfxError::OutOfSpace {
                x,
                y,
                w,
                h,
                atlas_w: cfg.max_width,
                atlas_h: cfg.max_height,
            });
        };

        let size = encoded_len(w, h);
        let data = sprites
            .get(offset..offset + size)
            .ok_or(GfxError::SourceTooShort {
                needed: offset + size,
                available: sprites.len(),
            })?;
        let image = PlanarImage::new(data, w, h)?;
        let mut dst = pixels.region_mut(rect.x, rect.y, w, h)?;
        decode_planar(&image, &mut dst, OPAQUE);
        offset += size;

        rects.push(rect);
        i += 1;
    }

    let (used_w, used_h) = packer.extent();
    debug_assert!(used_w <= cfg.max_width && used_h <= cfg.max_height);
    pixels.truncate_rows(used_h);
    debug!(total_size = offset, count = rects.len(), used_w, used_h, "sprites packed");

    Ok(PackedAtlas {
        kind: AtlasKind::Game,
        pixels,
        rects,
        source_bytes: offset,
    })
}

/// Decodes a sheet of planar 16x16 foreground tiles onto a fixed 256x192 grid.
///
/// The sheet length must be a whole number of tiles, at most
/// [`MAX_FRONT_TILES`]. The returned atlas always spans the full grid.
#[instrument(skip_all)]
pub fn pack_front_tiles(tiles: &[u8]) -> Result<PackedAtlas> {
    if tiles.len() % TILE_BYTES != 0 {
        return Err(GfxError::InvalidInput(format!(
            "foreground tile data ({} bytes) is not a multiple of {}",
            tiles.len(),
            TILE_BYTES
        )));
    }
    let count = tile_count(tiles.len());
    if count > MAX_FRONT_TILES {
        return Err(GfxError::TooManySprites {
            count,
            max: MAX_FRONT_TILES,
        });
    }

    let mut pixels = PixelBuffer::try_new(FRONT_SHEET_W, FRONT_SHEET_H)?;
    let mut packer = GridPacker::new(FRONT_SHEET_W, FRONT_SHEET_H, TILE_SIZE, TILE_SIZE);
    let mut rects = Vec::with_capacity(count);
    let tile = Rect::new(0, 0, TILE_SIZE, TILE_SIZE);

    for chunk in tiles.chunks_exact(TILE_BYTES) {
        let rect = packer.pack(&tile).ok_or(GfxError::OutOfSpace {
            x: 0,
            y: FRONT_SHEET_H,
            w: TILE_SIZE,
            h: TILE_SIZE,
            atlas_w: FRONT_SHEET_W,
            atlas_h: FRONT_SHEET_H,
        })?;
        let image = PlanarImage::new(chunk, TILE_SIZE, TILE_SIZE)?;
        let mut dst = pixels.region_mut(rect.x, rect.y, rect.w, rect.h)?;
        decode_planar(&image, &mut dst, 0);
        rects.push(rect);
    }
    debug!(count, "foreground tiles packed");

    Ok(PackedAtlas {
        kind: AtlasKind::Foreground,
        pixels,
        rects,
        source_bytes: tiles.len(),
    })
}
