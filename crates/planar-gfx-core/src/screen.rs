//! Render context: display buffers, asset views and the render back-end.

use std::fmt;

use crate::atlas::{FRONT_SHEET_H, FRONT_SHEET_W, PackedAtlas, pack_front_tiles, pack_sprites};
use crate::blit;
use crate::config::{AtlasConfig, DisplayConfig};
use crate::display::DisplayState;
use crate::error::Result;
use crate::model::{AtlasKind, AtlasStats};
use crate::planar::{OPAQUE, PlanarImage, decode_planar, encoded_len};
use crate::render::{PresentMode, RenderBackend};
use crate::text::{self, Spacing, SpriteText};
use crate::tile::TILE_BYTES;
use tracing::{debug, instrument};

/// Long-lived planar asset data the context decodes from. Nothing here is
/// ever written or freed by the context.
#[derive(Debug, Clone, Copy, Default)]
pub struct Assets<'a> {
    /// Font blob: text glyphs, digits and panel digits.
    pub fonts: &'a [u8],
    /// Planar sprite frames, back to back.
    pub sprites: &'a [u8],
    /// Two bytes per sprite: encoded width, height.
    pub sprite_sizes: &'a [u8],
    /// Number of frames to pack into the game atlas.
    pub sprite_count: usize,
    /// Planar 16x16 foreground tiles.
    pub front_tiles: &'a [u8],
}

/// Screen compositor and frame buffer owner.
///
/// All draw calls take `&mut self`; the caller serializes them against any
/// renderer reading the frame through [`Screen::present`].
pub struct Screen<'a, B: RenderBackend> {
    display: DisplayState,
    atlas_cfg: AtlasConfig,
    assets: Assets<'a>,
    backend: B,
}

impl<'a, B: RenderBackend> Screen<'a, B> {
    pub fn new(
        display: DisplayConfig,
        atlas_cfg: AtlasConfig,
        assets: Assets<'a>,
        backend: B,
    ) -> Result<Self> {
        atlas_cfg.validate()?;
        Ok(Self {
            display: DisplayState::new(display)?,
            atlas_cfg,
            assets,
            backend,
        })
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut DisplayState {
        &mut self.display
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    fn config(&self) -> &DisplayConfig {
        self.display.config()
    }

    // ---------- atlases ----------

    /// Packs the sprite table into the game atlas and registers it.
    pub fn load_sprites(&mut self) -> Result<AtlasStats> {
        self.backend.unload_atlas(AtlasKind::Game);
        let atlas = pack_sprites(
            self.assets.sprite_sizes,
            self.assets.sprites,
            self.assets.sprite_count,
            &self.atlas_cfg,
        )?;
        let stats = atlas.stats();
        self.upload(&atlas, atlas.width(), atlas.height());
        Ok(stats)
    }

    /// Decodes the foreground tiles onto their grid atlas and registers it.
    /// Returns the number of tiles; nothing is registered for an empty sheet.
    pub fn load_front_tiles(&mut self) -> Result<usize> {
        self.backend.unload_atlas(AtlasKind::Foreground);
        let atlas = pack_front_tiles(self.assets.front_tiles)?;
        if atlas.rects.is_empty() {
            debug!("no foreground tiles to load");
            return Ok(0);
        }
        self.upload(&atlas, FRONT_SHEET_W, FRONT_SHEET_H);
        Ok(atlas.rects.len())
    }

    fn upload(&mut self, atlas: &PackedAtlas, width: u32, height: u32) {
        self.backend.load_atlas(
            atlas.kind,
            &atlas.rects,
            atlas.pixels.as_bytes(),
            width,
            height,
            0,
            true,
        );
    }

    // ---------- lifecycle ----------

    /// Applies a pending resize, then re-decodes the sprite atlas if a
    /// rehint was requested.
    #[instrument(skip_all)]
    pub fn resize(&mut self) -> Result<()> {
        self.display.reallocate()?;
        if self.display.rehint() {
            self.load_sprites()?;
            self.display.set_rehint(false);
        }
        Ok(())
    }

    /// Resize path when a resize is pending, plain zero-fill otherwise.
    pub fn clear(&mut self) -> Result<()> {
        if self.display.resize_pending() {
            self.resize()
        } else {
            self.display.frame_mut().clear();
            Ok(())
        }
    }

    /// Hands the frame buffer to the back-end.
    pub fn present(&mut self, mode: PresentMode) {
        self.backend.present_frame(self.display.frame(), mode);
    }

    // ---------- copies ----------

    /// Decodes a full-screen planar picture into the background buffer.
    pub fn copy_img(&mut self, src: &[u8]) -> Result<()> {
        let bg = self.display.background_mut();
        let image = PlanarImage::new(src, bg.width(), bg.height())?;
        decode_planar(&image, &mut bg.view_mut(), OPAQUE);
        Ok(())
    }

    /// Decodes a planar level map into the map buffer.
    pub fn copy_map(&mut self, src: &[u8]) -> Result<()> {
        let map = self.display.map_mut();
        let image = PlanarImage::new(src, map.width(), map.height())?;
        decode_planar(&image, &mut map.view_mut(), OPAQUE);
        Ok(())
    }

    /// Copies `w x h` decoded pixels into the frame at `(x, y)`. The block
    /// must fit in the frame.
    pub fn copy_offset(&mut self, src: &[u8], w: u32, h: u32, x: u32, y: u32) {
        blit::copy_rows(self.display.frame_mut(), src, w, h, x, y);
    }

    pub fn copy(&mut self, src: &[u8], w: u32, h: u32) {
        self.copy_offset(src, w, h, 0, 0);
    }

    /// Copies `w x h` decoded pixels to the centre of the frame.
    pub fn copy_centred(&mut self, src: &[u8], w: u32, h: u32) {
        let (x, y) = blit::centred_offset(self.display.frame(), w, h);
        debug_assert!(x >= 0 && y >= 0, "centred copy larger than frame");
        self.copy_offset(src, w, h, x.max(0) as u32, y.max(0) as u32);
    }

    /// Copies the background into the frame. A frame larger than the
    /// original screen gets the background repeated horizontally and its
    /// last row repeated downwards.
    pub fn copy_background(&mut self) -> Result<()> {
        let mode = (self.config().width, self.config().height);
        if !self.display.resize_pending() && mode == self.display.background().dimensions() {
            let (frame, background, _) = self.display.split_mut();
            frame.as_bytes_mut().copy_from_slice(background.as_bytes());
            return Ok(());
        }
        self.clear()?;
        let (frame, background, cfg) = self.display.split_mut();
        let rows = cfg.orig_height.max(cfg.tilemap_height());
        blit::tile_background(frame, background, rows);
        Ok(())
    }

    // ---------- planar blits ----------

    /// Decodes the status panel below the tilemap, centred horizontally.
    pub fn draw_panel(&mut self, src: &[u8]) -> Result<()> {
        let cfg = self.config();
        let (w, h) = (cfg.orig_width, cfg.panel_height - 1);
        let x = (cfg.width - cfg.orig_width) / 2;
        let y = cfg.tilemap_height();
        let image = PlanarImage::new(src, w, h)?;
        let mut dst = self.display.frame_mut().region_mut(x, y, w, h)?;
        decode_planar(&image, &mut dst, OPAQUE);
        Ok(())
    }

    /// Decodes the full-frame picture stored in the font blob.
    pub fn draw_fonts(&mut self) -> Result<()> {
        let (w, h) = (self.config().width, self.config().height);
        let offset = (w + h) as usize;
        let src = self.assets.fonts.get(offset..).unwrap_or_default();
        let image = PlanarImage::new(src, w, h)?;
        decode_planar(&image, &mut self.display.frame_mut().view_mut(), 0);
        Ok(())
    }

    /// Draws a nibble-packed tile clipped to the tilemap region.
    pub fn draw_tile(&mut self, tile: &[u8; TILE_BYTES], x: i32, y: i32) {
        let (cw, ch) = (self.config().tilemap_width(), self.config().tilemap_height());
        blit::draw_tile(self.display.frame_mut(), tile, x, y, cw, ch);
    }

    /// Decodes one planar glyph from the font blob at `(x, y)` with colour 0
    /// transparent. Glyphs outside the font data or the frame are skipped.
    fn draw_glyph(&mut self, src_offset: usize, w: u32, h: u32, x: i32, y: i32) {
        let len = encoded_len(w, h);
        let Some(src) = self.assets.fonts.get(src_offset..src_offset + len) else {
            debug!(src_offset, len, "glyph outside font data");
            return;
        };
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            debug!(x, y, "glyph left of or above the frame");
            return;
        };
        let (Ok(image), Ok(mut dst)) = (
            PlanarImage::new(src, w, h),
            self.display.frame_mut().region_mut(x, y, w, h),
        ) else {
            debug!(x, y, w, h, "glyph does not fit the frame");
            return;
        };
        decode_planar(&image, &mut dst, 0);
    }

    /// Planar text at a linear grid offset, centred on the frame.
    pub fn draw_string(&mut self, offset: i32, hspace: i32, s: &str) {
        let cfg = self.config();
        let font = cfg.font.clone();
        let (gx, gy) = text::grid_position(offset.saturating_add(hspace), cfg.orig_width);
        let mut x = gx.saturating_add((cfg.width as i32 - cfg.orig_width as i32) / 2);
        let y = gy.saturating_add((cfg.height as i32 - cfg.orig_height as i32) / 2);
        let glyph_bytes = encoded_len(font.string_w, font.string_h);
        for chr in s.bytes() {
            if let Some(code) = text::string_glyph_index(chr) {
                self.draw_glyph(code as usize * glyph_bytes, font.string_w, font.string_h, x, y);
            }
            x = x.saturating_add(font.string_w as i32);
        }
    }

    /// Large digit at a linear grid offset (not centred).
    pub fn draw_number(&mut self, offset: i32, num: u32) {
        let cfg = self.config();
        let font = cfg.font.clone();
        let (x, y) = text::grid_position(offset, cfg.orig_width);
        let src = font.digits_offset + num as usize * encoded_len(font.number_w, font.number_h);
        self.draw_glyph(src, font.number_w, font.number_h, x, y);
    }

    /// Status panel digit; the grid is anchored to the bottom of the frame.
    pub fn draw_panel_number(&mut self, offset: i32, num: u32) {
        let cfg = self.config();
        let font = cfg.font.clone();
        let (gx, gy) = text::grid_position(offset, cfg.orig_width);
        let x = gx.saturating_add((cfg.width as i32 - cfg.orig_width as i32) / 2);
        let y = gy.saturating_add(cfg.height as i32 - cfg.orig_height as i32);
        let src = font.panel_digits_offset
            + num as usize * encoded_len(font.panel_number_w, font.panel_number_h);
        self.draw_glyph(src, font.panel_number_w, font.panel_number_h, x, y);
    }

    pub fn put_pixel(&mut self, x: u32, y: u32, color: u8) {
        self.display.frame_mut().put(x, y, color);
    }

    // ---------- sprite text ----------

    /// Queues a game-atlas sprite. Negative frame numbers are ignored.
    pub fn draw_sprite(&mut self, num: i32, x: i32, y: i32, flag: i32, centred: bool) {
        let Ok(frame) = usize::try_from(num) else {
            debug!(num, "negative sprite frame");
            return;
        };
        self.backend
            .draw_sprite(AtlasKind::Game, frame, x, y, flag != 0, centred);
    }

    /// Sprite for character code `chr` at a linear grid offset.
    pub fn draw_character_sprite(&mut self, offset: i32, chr: u8) {
        let (x, y) = text::grid_position(offset, self.config().orig_width);
        let base = self.config().font.character_sprite_base;
        self.draw_sprite(base.wrapping_add(chr as i32), x, y, 0, false);
    }

    fn draw_sprite_text(&mut self, laid: &SpriteText, clip: bool) {
        if clip {
            let c = laid.clip;
            self.backend.set_sprite_clipping_rect(c.x, c.y, c.w, c.h);
        }
        for g in &laid.glyphs {
            self.draw_sprite(g.frame, g.x, g.y, 0, false);
        }
    }

    /// Sprite string at `(x, y)`, optionally clipped to its own extent.
    pub fn draw_string_clipped(&mut self, s: &str, x: i32, y: i32, clip: bool) {
        let laid = text::layout_sprite_string(s.as_bytes(), x, y, &self.config().font);
        self.draw_sprite_text(&laid, clip);
    }

    /// Formats and draws a sprite string at a linear grid offset.
    pub fn draw_format_string(&mut self, offset: i32, args: fmt::Arguments<'_>) {
        let s = fmt::format(args);
        let (x, y) = text::grid_position(offset, self.config().orig_width);
        self.draw_string_clipped(&s, x, y, false);
    }

    /// Sprite string centred in the tilemap region.
    pub fn draw_string_centred(&mut self, s: &str, clip: bool) {
        let cfg = self.config();
        let gw = cfg.font.sprite_glyph_w as i32;
        let x = (cfg.tilemap_width() as i32 - gw * s.len() as i32) / 2;
        let y = (cfg.tilemap_height() as i32 - cfg.font.sprite_glyph_h as i32) / 2;
        self.draw_string_clipped(s, x, y, clip);
    }

    /// Bold, optionally letter-spaced sprite string centred in the tilemap
    /// region, shifted down by `y_offset`.
    pub fn draw_motif_string(&mut self, s: &str, clip: bool, y_offset: i32, wspace: i32) {
        let cfg = self.config();
        let laid = text::layout_spaced_string(
            s.as_bytes(),
            &Spacing::motif(y_offset, wspace),
            cfg.tilemap_width(),
            cfg.tilemap_height(),
            &cfg.font,
        );
        self.draw_sprite_text(&laid, clip);
    }
}
