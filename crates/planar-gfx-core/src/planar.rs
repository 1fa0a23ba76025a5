//! 4-plane bitmap decoding.
//!
//! A planar image stores each of the four color bits in its own bitmap. Each
//! plane is `width / 8 * height` bytes, planes follow one another, and within
//! a byte the leftmost pixel is bit 7.

use crate::buffer::PixelViewMut;
use crate::error::{GfxError, Result};

/// Number of bit-planes (4 bits per pixel).
pub const PLANES: usize = 4;

/// Transparent color that never matches a 4-bit color: every pixel is written.
pub const OPAQUE: u8 = 0xFF;

/// Read-only view of planar image bytes.
#[derive(Debug, Clone, Copy)]
pub struct PlanarImage<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PlanarImage<'a> {
    /// Validates geometry and that `data` holds all four planes.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        if width % 8 != 0 {
            return Err(GfxError::InvalidInput(format!(
                "planar width {width} is not a multiple of 8"
            )));
        }
        let needed = encoded_len(width, height);
        if data.len() < needed {
            return Err(GfxError::SourceTooShort {
                needed,
                available: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes in one plane.
    pub fn plane_size(&self) -> usize {
        plane_size(self.width, self.height)
    }

    /// Bytes covered by all four planes.
    pub fn byte_len(&self) -> usize {
        encoded_len(self.width, self.height)
    }

    /// Color index of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> u8 {
        let stride = (self.width / 8) as usize;
        let i = (y as usize) * stride + (x / 8) as usize;
        let ps = self.plane_size();
        let planes = [
            self.data[i],
            self.data[i + ps],
            self.data[i + 2 * ps],
            self.data[i + 3 * ps],
        ];
        compose(&planes, 7 - (x % 8))
    }
}

/// Bytes in one plane of a `width x height` image.
#[inline]
pub fn plane_size(width: u32, height: u32) -> usize {
    (height as usize) * (width as usize) / 8
}

/// Bytes needed for all four planes of a `width x height` image.
#[inline]
pub fn encoded_len(width: u32, height: u32) -> usize {
    plane_size(width, height) * PLANES
}

/// Builds a 4-bit color from bit `bit` of each plane byte.
#[inline(always)]
pub(crate) fn compose(planes: &[u8; PLANES], bit: u32) -> u8 {
    let mask = 1u8 << bit;
    let mut color = 0u8;
    for (b, byte) in planes.iter().enumerate() {
        if byte & mask != 0 {
            color |= 1 << b;
        }
    }
    color
}

/// Decodes `src` into `dst`, skipping pixels whose color equals
/// `transparent_color` so earlier content shows through.
///
/// `dst` must be at least as large as `src`.
pub fn decode_planar(src: &PlanarImage<'_>, dst: &mut PixelViewMut<'_>, transparent_color: u8) {
    debug_assert!(dst.width() >= src.width && dst.height() >= src.height);
    let ps = src.plane_size();
    let stride = (src.width / 8) as usize;
    let data = src.data;
    for y in 0..src.height {
        let row = dst.row_mut(y);
        let base = (y as usize) * stride;
        for x in 0..stride {
            let i = base + x;
            let planes = [data[i], data[i + ps], data[i + 2 * ps], data[i + 3 * ps]];
            for bit in 0..8 {
                let color = compose(&planes, 7 - bit as u32);
                if color != transparent_color {
                    row[x * 8 + bit] = color;
                }
            }
        }
    }
}

/// Encodes a byte-per-pixel grid (`width * height` color indices) into four
/// planes. Only the low 4 bits of each pixel are kept.
pub fn encode_planar(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    if width % 8 != 0 {
        return Err(GfxError::InvalidInput(format!(
            "planar width {width} is not a multiple of 8"
        )));
    }
    let count = (width as usize) * (height as usize);
    if pixels.len() < count {
        return Err(GfxError::SourceTooShort {
            needed: count,
            available: pixels.len(),
        });
    }
    let ps = plane_size(width, height);
    let mut out = vec![0u8; ps * PLANES];
    for (p, &color) in pixels[..count].iter().enumerate() {
        let byte = p / 8;
        let mask = 1u8 << (7 - (p % 8));
        for b in 0..PLANES {
            if color & (1 << b) != 0 {
                out[b * ps + byte] |= mask;
            }
        }
    }
    Ok(out)
}
