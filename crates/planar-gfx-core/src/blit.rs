use crate::buffer::PixelBuffer;
use crate::tile::{PACKED_TILE_PITCH, TILE_BYTES, TILE_SIZE};

/// Copies a `w x h` block of packed rows from `src` into `dst` at `(x, y)`.
///
/// No clipping: the block must fit inside `dst`.
pub fn copy_rows(dst: &mut PixelBuffer, src: &[u8], w: u32, h: u32, x: u32, y: u32) {
    debug_assert!(x + w <= dst.width() && y + h <= dst.height(), "copy does not fit");
    debug_assert!(src.len() >= (w as usize) * (h as usize), "copy source too short");
    let (x, w) = (x as usize, w as usize);
    for (row, line) in src.chunks_exact(w.max(1)).take(h as usize).enumerate() {
        dst.row_mut(y + row as u32)[x..x + w].copy_from_slice(&line[..w]);
    }
}

/// Offset that centers a `w x h` block in `dst`.
pub fn centred_offset(dst: &PixelBuffer, w: u32, h: u32) -> (i32, i32) {
    (
        (dst.width() as i32 - w as i32) / 2,
        (dst.height() as i32 - h as i32) / 2,
    )
}

/// Fills the first `rows` rows of `dst` by repeating each background row
/// across the frame width; rows past the background reuse its last row.
pub fn tile_background(dst: &mut PixelBuffer, background: &PixelBuffer, rows: u32) {
    let (fw, fh) = dst.dimensions();
    let (bw, bh) = background.dimensions();
    if bw == 0 || bh == 0 {
        return;
    }
    for y in 0..rows.min(fh) {
        let src = background.row(y.min(bh - 1));
        let line = dst.row_mut(y);
        for x in (0..fw).step_by(bw as usize) {
            let n = bw.min(fw - x) as usize;
            let x = x as usize;
            line[x..x + n].copy_from_slice(&src[..n]);
        }
    }
}

/// Draws a nibble-packed 16x16 tile at a signed offset, clipped to the
/// `clip_w x clip_h` region at the top-left of `dst`.
///
/// Nibble 0 is transparent. A tile left of the region skips `-x / 2` source
/// bytes (two pixels per byte); one above it skips `-y` source rows. A tile
/// that ends up with no visible width or height draws nothing.
pub fn draw_tile(
    dst: &mut PixelBuffer,
    src: &[u8; TILE_BYTES],
    mut x: i32,
    mut y: i32,
    clip_w: u32,
    clip_h: u32,
) {
    let clip_w = clip_w.min(dst.width()).min(i32::MAX as u32) as i32;
    let clip_h = clip_h.min(dst.height()).min(i32::MAX as u32) as i32;
    let size = TILE_SIZE as i32;
    // Entirely outside: nothing to draw, and the clamps below cannot overflow.
    if x >= clip_w || y >= clip_h || x <= -size || y <= -size {
        return;
    }
    let mut start = 0i32;

    let mut tile_w = TILE_SIZE as i32;
    if x < 0 {
        tile_w += x;
        start -= x / 2;
        x = 0;
    }
    if x + tile_w > clip_w {
        tile_w = clip_w - x;
    }
    if tile_w <= 0 {
        return;
    }

    let mut tile_h = TILE_SIZE as i32;
    if y < 0 {
        tile_h += y;
        start -= y * PACKED_TILE_PITCH as i32;
        y = 0;
    }
    if y + tile_h > clip_h {
        tile_h = clip_h - y;
    }
    if tile_h <= 0 {
        return;
    }

    let pairs = (tile_w / 2) as usize;
    let x = x as usize;
    for row in 0..tile_h as usize {
        let s = start as usize + row * PACKED_TILE_PITCH;
        let line = dst.row_mut(y as u32 + row as u32);
        for (p, &color) in src[s..s + pairs].iter().enumerate() {
            let c1 = color >> 4;
            if c1 != 0 {
                line[x + p * 2] = c1;
            }
            let c2 = color & 15;
            if c2 != 0 {
                line[x + p * 2 + 1] = c2;
            }
        }
    }
}
