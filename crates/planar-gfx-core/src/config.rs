use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::{GfxError, Result};

/// Glyph geometry and offsets inside the font blob.
///
/// Offsets are byte offsets into planar font data; a planar glyph of `w x h`
/// pixels occupies `w * h / 2` bytes (four planes of `w / 8 * h` bytes).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FontLayout {
    /// Text glyph size (`draw_string`).
    pub string_w: u32,
    pub string_h: u32,
    /// Large digit size (`draw_number`).
    pub number_w: u32,
    pub number_h: u32,
    /// Byte offset of the first large digit.
    pub digits_offset: usize,
    /// Status panel digit size (`draw_panel_number`).
    pub panel_number_w: u32,
    pub panel_number_h: u32,
    /// Byte offset of the first panel digit.
    pub panel_digits_offset: usize,
    /// Sprite glyph size used by sprite strings.
    pub sprite_glyph_w: u32,
    pub sprite_glyph_h: u32,
    /// Index of the first character frame in the game atlas.
    pub character_sprite_base: i32,
}

impl Default for FontLayout {
    fn default() -> Self {
        Self {
            string_w: 8,
            string_h: 12,
            number_w: 16,
            number_h: 20,
            digits_offset: 48 * 41,
            panel_number_w: 8,
            panel_number_h: 8,
            panel_digits_offset: 48 * 41 + 160 * 23,
            sprite_glyph_w: 16,
            sprite_glyph_h: 16,
            character_sprite_base: 0,
        }
    }
}

impl FontLayout {
    pub fn validate(&self) -> Result<()> {
        for (name, w) in [
            ("string_w", self.string_w),
            ("number_w", self.number_w),
            ("panel_number_w", self.panel_number_w),
        ] {
            if w == 0 || w % 8 != 0 {
                return Err(GfxError::InvalidConfig(format!(
                    "{name} ({w}) must be a non-zero multiple of 8"
                )));
            }
        }
        Ok(())
    }
}

/// Screen geometry. The frame buffer may be larger than the original
/// resolution (hybrid/wide display modes); background and map buffers keep
/// their original size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Original screen resolution.
    pub orig_width: u32,
    pub orig_height: u32,
    /// Live frame buffer size.
    pub width: u32,
    pub height: u32,
    /// Height of the status panel below the tilemap.
    pub panel_height: u32,
    /// Decoded level map size.
    pub map_width: u32,
    pub map_height: u32,
    #[serde(default)]
    pub font: FontLayout,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            orig_width: 320,
            orig_height: 200,
            width: 320,
            height: 200,
            panel_height: 24,
            map_width: 320,
            map_height: 200,
            font: FontLayout::default(),
        }
    }
}

impl DisplayConfig {
    /// Width of the visible tilemap region.
    pub fn tilemap_width(&self) -> u32 {
        self.width
    }

    /// Height of the visible tilemap region (frame minus status panel).
    pub fn tilemap_height(&self) -> u32 {
        self.height - self.panel_height
    }

    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - Any dimension is zero
    /// - Planar widths are not multiples of 8
    /// - The frame is smaller than the original resolution
    /// - The status panel leaves no tilemap rows
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(GfxError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.orig_width == 0 || self.orig_height == 0 {
            return Err(GfxError::InvalidDimensions {
                width: self.orig_width,
                height: self.orig_height,
            });
        }
        if self.map_width == 0 || self.map_height == 0 {
            return Err(GfxError::InvalidDimensions {
                width: self.map_width,
                height: self.map_height,
            });
        }
        for (name, w) in [
            ("width", self.width),
            ("orig_width", self.orig_width),
            ("map_width", self.map_width),
        ] {
            if w % 8 != 0 {
                return Err(GfxError::InvalidConfig(format!(
                    "{name} ({w}) must be a multiple of 8"
                )));
            }
        }
        if self.width < self.orig_width || self.height < self.orig_height {
            return Err(GfxError::InvalidConfig(format!(
                "frame {}x{} is smaller than original resolution {}x{}",
                self.width, self.height, self.orig_width, self.orig_height
            )));
        }
        if self.panel_height == 0 || self.panel_height >= self.orig_height {
            return Err(GfxError::InvalidConfig(format!(
                "panel_height ({}) must be in 1..{}",
                self.panel_height, self.orig_height
            )));
        }
        self.font.validate()
    }

    /// Create a fluent builder for `DisplayConfig`.
    pub fn builder() -> DisplayConfigBuilder {
        DisplayConfigBuilder::new()
    }
}

/// Builder for `DisplayConfig`.
#[derive(Debug, Default, Clone)]
pub struct DisplayConfigBuilder {
    cfg: DisplayConfig,
}

impl DisplayConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: DisplayConfig::default(),
        }
    }
    pub fn with_screen_size(mut self, w: u32, h: u32) -> Self {
        self.cfg.width = w;
        self.cfg.height = h;
        self
    }
    pub fn with_original_size(mut self, w: u32, h: u32) -> Self {
        self.cfg.orig_width = w;
        self.cfg.orig_height = h;
        self
    }
    pub fn with_map_size(mut self, w: u32, h: u32) -> Self {
        self.cfg.map_width = w;
        self.cfg.map_height = h;
        self
    }
    pub fn panel_height(mut self, v: u32) -> Self {
        self.cfg.panel_height = v;
        self
    }
    pub fn font(mut self, v: FontLayout) -> Self {
        self.cfg.font = v;
        self
    }
    pub fn build(self) -> DisplayConfig {
        self.cfg
    }
}

/// Sprite atlas budget. The dimensions are a fixed budget; packing fails
/// rather than growing the atlas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AtlasConfig {
    /// Atlas buffer width (also its pitch).
    pub max_width: u32,
    /// Atlas buffer height.
    pub max_height: u32,
    /// Maximum number of frames.
    pub max_sprites: usize,
    /// Size-table index ranges that are absent from the sprite data.
    #[serde(default)]
    pub skip: Vec<Range<usize>>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            max_width: 2048,
            max_height: 1024,
            max_sprites: 480,
            skip: Vec::new(),
        }
    }
}

impl AtlasConfig {
    /// Preset for the reduced asset set, which lacks the 7 monster frames
    /// at table indices 305..312.
    pub fn reduced_variant() -> Self {
        Self {
            skip: vec![305..312],
            ..Self::default()
        }
    }

    /// True if size-table index `i` has no sprite data.
    pub fn is_skipped(&self, i: usize) -> bool {
        self.skip.iter().any(|r| r.contains(&i))
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(GfxError::InvalidDimensions {
                width: self.max_width,
                height: self.max_height,
            });
        }
        if self.max_width % 8 != 0 {
            return Err(GfxError::InvalidConfig(format!(
                "atlas width ({}) must be a multiple of 8",
                self.max_width
            )));
        }
        if self.max_sprites == 0 {
            return Err(GfxError::InvalidConfig("max_sprites must be non-zero".into()));
        }
        if let Some(r) = self.skip.iter().find(|r| r.start > r.end) {
            return Err(GfxError::InvalidConfig(format!(
                "skip range {}..{} is reversed",
                r.start, r.end
            )));
        }
        Ok(())
    }

    /// Create a fluent builder for `AtlasConfig`.
    pub fn builder() -> AtlasConfigBuilder {
        AtlasConfigBuilder::new()
    }
}

/// Builder for `AtlasConfig`.
#[derive(Debug, Default, Clone)]
pub struct AtlasConfigBuilder {
    cfg: AtlasConfig,
}

impl AtlasConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: AtlasConfig::default(),
        }
    }
    pub fn with_max_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.max_width = w;
        self.cfg.max_height = h;
        self
    }
    pub fn max_sprites(mut self, v: usize) -> Self {
        self.cfg.max_sprites = v;
        self
    }
    pub fn skip(mut self, range: Range<usize>) -> Self {
        self.cfg.skip.push(range);
        self
    }
    pub fn build(self) -> AtlasConfig {
        self.cfg
    }
}
