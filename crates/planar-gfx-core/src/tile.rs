//! 16x16 planar tiles and their nibble-packed form.
//!
//! A planar tile is 128 bytes (4 planes of 16 rows x 2 bytes). The packed
//! form is also 128 bytes: 16 rows of 8 bytes, two pixels per byte with the
//! left pixel in the high nibble.

use crate::planar::{PLANES, compose};

/// Tile edge in pixels.
pub const TILE_SIZE: u32 = 16;
/// Bytes per tile, planar or packed.
pub const TILE_BYTES: usize = 128;
/// Bytes per row of a packed tile.
pub const PACKED_TILE_PITCH: usize = 8;

const PLANE_SIZE: usize = 16 * (16 / 8);

/// Converts one planar tile into the nibble-packed layout.
pub fn convert_planar_tile(src: &[u8; TILE_BYTES]) -> [u8; TILE_BYTES] {
    let mut dst = [0u8; TILE_BYTES];
    for y in 0..TILE_SIZE as usize {
        let row = &mut dst[y * PACKED_TILE_PITCH..(y + 1) * PACKED_TILE_PITCH];
        for x in 0..(TILE_SIZE / 8) as usize {
            let i = y * 2 + x;
            let planes: [u8; PLANES] = [
                src[i],
                src[i + PLANE_SIZE],
                src[i + 2 * PLANE_SIZE],
                src[i + 3 * PLANE_SIZE],
            ];
            // Even pixel sets the byte, the following odd pixel fills the low nibble.
            for bit in 0..8usize {
                let color = compose(&planes, 7 - bit as u32);
                let out = &mut row[x * 4 + (bit >> 1)];
                if bit & 1 != 0 {
                    *out |= color;
                } else {
                    *out = color << 4;
                }
            }
        }
    }
    dst
}

/// Converts a sheet of planar tiles in place. A trailing partial tile is left
/// untouched.
pub fn convert_tiles(data: &mut [u8]) {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        data.par_chunks_exact_mut(TILE_BYTES).for_each(convert_chunk);
    }
    #[cfg(not(feature = "parallel"))]
    {
        data.chunks_exact_mut(TILE_BYTES).for_each(convert_chunk);
    }
}

fn convert_chunk(chunk: &mut [u8]) {
    let mut tile = [0u8; TILE_BYTES];
    tile.copy_from_slice(chunk);
    chunk.copy_from_slice(&convert_planar_tile(&tile));
}

/// Number of complete tiles in `len` bytes.
pub fn tile_count(len: usize) -> usize {
    len / TILE_BYTES
}
