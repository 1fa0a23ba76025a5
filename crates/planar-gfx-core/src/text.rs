//! Character-code to glyph arithmetic and sprite string layout.
//!
//! Planar text is addressed through a linear offset into an 8-pixel-wide
//! character grid of the original screen. Sprite text draws frames of the
//! game atlas; only geometry is computed here, the back-end does the drawing.

use crate::config::FontLayout;

/// Highest character treated as a digit by plain sprite strings.
pub const DIGITS_LIMIT_PLAIN: u8 = b'9';
/// Highest character treated as a digit by motif strings.
pub const DIGITS_LIMIT_MOTIF: u8 = b'0' + 0xF;

const UPPERCASE_BASE: i32 = 65;
const LOWERCASE_SHIFT: i32 = 32;
const NUMBER_BASE: i32 = 6;

/// Grid cell of a linear text offset as `(x, y)` pixels on the original screen.
///
/// Computed in 64 bits and saturated, so far-off offsets stay far off-screen.
pub fn grid_position(offset: i32, orig_width: u32) -> (i32, i32) {
    let p = i64::from(offset) * 8;
    let w = i64::from(orig_width.max(1));
    let sat = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    (sat(p % w), sat(p / w))
}

/// Glyph number of a character in the planar text font, `None` for a space.
///
/// Digits map to 0..=9; codes above `'9'` skip two slots.
pub fn string_glyph_index(chr: u8) -> Option<u8> {
    if chr == b' ' {
        return None;
    }
    let mut code = chr.wrapping_sub(0x30);
    if code > 9 {
        code = code.wrapping_sub(2);
    }
    Some(code)
}

/// Sprite frame of a character relative to the first character frame.
///
/// Letters start at 0 (upper and lower case share frames), digits follow
/// at 42.
pub fn sprite_glyph_frame(chr: u8, digits_limit: u8) -> i32 {
    let mut base = if chr > digits_limit {
        UPPERCASE_BASE
    } else {
        NUMBER_BASE
    };
    if chr as i32 > LOWERCASE_SHIFT + UPPERCASE_BASE - 1 {
        base += LOWERCASE_SHIFT;
    }
    chr as i32 - base
}

/// Clipping rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

/// One sprite glyph to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphDraw {
    /// Absolute frame number in the game atlas.
    pub frame: i32,
    pub x: i32,
    pub y: i32,
}

/// Laid-out sprite string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpriteText {
    pub clip: ClipRect,
    pub glyphs: Vec<GlyphDraw>,
}

/// Left-aligned sprite string starting at `(x, y)`.
pub fn layout_sprite_string(text: &[u8], x: i32, y: i32, font: &FontLayout) -> SpriteText {
    let gw = font.sprite_glyph_w as i32;
    let clip = ClipRect {
        x,
        y,
        w: gw.saturating_mul(text.len() as i32),
        h: font.sprite_glyph_h as i32,
    };
    let mut glyphs = Vec::with_capacity(text.len());
    let mut cx = x;
    for &chr in text {
        if chr != b' ' {
            glyphs.push(GlyphDraw {
                frame: font
                    .character_sprite_base
                    .wrapping_add(sprite_glyph_frame(chr, DIGITS_LIMIT_PLAIN)),
                x: cx,
                y,
            });
        }
        cx = cx.saturating_add(gw);
    }
    SpriteText { clip, glyphs }
}

/// Spacing options for horizontally centred sprite strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacing {
    /// Vertical shift from the centre line.
    pub y_offset: i32,
    /// Divisor for the extra gap between drawn characters; 0 acts as 1.
    pub wspace: i32,
    /// Draw a shadow copy one pixel down-right and shift left by one.
    pub bold: bool,
    /// Add `glyph_w / wspace` after every drawn character.
    pub chr_spacing: bool,
}

impl Spacing {
    /// Bold motif strings: spacing is enabled whenever `wspace` is non-zero.
    pub fn motif(y_offset: i32, wspace: i32) -> Self {
        Self {
            y_offset,
            wspace,
            bold: true,
            chr_spacing: wspace != 0,
        }
    }
}

/// Rendered width of a spaced string.
pub fn spaced_width(text: &[u8], glyph_w: u32, wspace: i32, chr_spacing: bool) -> i32 {
    let wspace = if wspace == 0 { 1 } else { wspace };
    let len = text.len() as i32;
    let spaces = text.iter().filter(|&&c| c == b' ').count() as i32;
    let extra = chr_spacing as i32 * (len - spaces - 1) / wspace;
    (glyph_w as i32 * (len + extra)).max(0)
}

/// Sprite string centred in a `region_w x region_h` area.
pub fn layout_spaced_string(
    text: &[u8],
    spacing: &Spacing,
    region_w: u32,
    region_h: u32,
    font: &FontLayout,
) -> SpriteText {
    let gw = font.sprite_glyph_w as i32;
    let gh = font.sprite_glyph_h as i32;
    let wspace = if spacing.wspace == 0 { 1 } else { spacing.wspace };
    let width = spaced_width(text, font.sprite_glyph_w, wspace, spacing.chr_spacing);
    let y = (region_h as i32 - gh) / 2 + spacing.y_offset;
    let mut x = (region_w as i32 - width) / 2;
    if spacing.bold {
        x -= 1;
    }
    let clip = ClipRect { x, y, w: width, h: gh };

    let mut glyphs = Vec::with_capacity(text.len() * if spacing.bold { 2 } else { 1 });
    for &chr in text {
        if chr != b' ' {
            let frame = font
                .character_sprite_base
                .wrapping_add(sprite_glyph_frame(chr, DIGITS_LIMIT_MOTIF));
            if spacing.bold {
                glyphs.push(GlyphDraw {
                    frame,
                    x: x.saturating_add(1),
                    y: y.saturating_add(1),
                });
            }
            glyphs.push(GlyphDraw { frame, x, y });
            x = x.saturating_add(spacing.chr_spacing as i32 * gw / wspace);
        }
        x = x.saturating_add(gw);
    }
    SpriteText { clip, glyphs }
}
