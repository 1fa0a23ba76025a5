//! Byte-per-pixel indexed buffers and bounds-aware 2D views over them.
//!
//! Every buffer carries a pitch (row stride in bytes) separate from its
//! logical width, so a view can address a sub-rectangle of a larger canvas
//! without any pointer arithmetic at the call site.

use crate::error::{GfxError, Result};

/// Owned rectangular buffer of 4-bit color indices, one byte per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pitch: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Zero-filled buffer with `pitch == width`.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pitch: width,
            data: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Zero-filled buffer that reports allocation failure instead of aborting.
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        let bytes = (width as usize)
            .checked_mul(height as usize)
            .ok_or(GfxError::Allocation { bytes: usize::MAX })?;
        let mut data = Vec::new();
        data.try_reserve_exact(bytes)
            .map_err(|_| GfxError::Allocation { bytes })?;
        data.resize(bytes, 0);
        Ok(Self {
            width,
            height,
            pitch: width,
            data,
        })
    }

    /// Wraps existing pixel bytes; `data` must hold exactly `width * height` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let needed = (width as usize) * (height as usize);
        if data.len() != needed {
            return Err(GfxError::InvalidInput(format!(
                "pixel data is {} bytes, expected {} for {}x{}",
                data.len(),
                needed,
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pitch: width,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pitch(&self) -> u32 {
        self.pitch
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[self.index(x, y)]
    }

    #[inline]
    pub fn put(&mut self, x: u32, y: u32, color: u8) {
        let i = self.index(x, y);
        self.data[i] = color;
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        (y as usize) * (self.pitch as usize) + x as usize
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let start = (y as usize) * (self.pitch as usize);
        &self.data[start..start + self.width as usize]
    }

    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = (y as usize) * (self.pitch as usize);
        &mut self.data[start..start + self.width as usize]
    }

    /// Zero-fill.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    pub fn fill(&mut self, color: u8) {
        self.data.fill(color);
    }

    /// Drops every row from `height` on. Used to hand a renderer only the
    /// occupied part of an atlas.
    pub fn truncate_rows(&mut self, height: u32) {
        if height < self.height {
            self.height = height;
            self.data.truncate((height as usize) * (self.pitch as usize));
        }
    }

    /// Mutable view of the whole buffer.
    pub fn view_mut(&mut self) -> PixelViewMut<'_> {
        PixelViewMut {
            width: self.width,
            height: self.height,
            pitch: self.pitch as usize,
            data: &mut self.data,
        }
    }

    /// Mutable view of the `w x h` region whose top-left corner is `(x, y)`.
    pub fn region_mut(&mut self, x: u32, y: u32, w: u32, h: u32) -> Result<PixelViewMut<'_>> {
        let fits = x.checked_add(w).is_some_and(|r| r <= self.width)
            && y.checked_add(h).is_some_and(|b| b <= self.height);
        if !fits {
            return Err(GfxError::RegionOutOfBounds {
                x,
                y,
                w,
                h,
                width: self.width,
                height: self.height,
            });
        }
        let start = (y as usize) * (self.pitch as usize) + x as usize;
        Ok(PixelViewMut {
            width: w,
            height: h,
            pitch: self.pitch as usize,
            data: &mut self.data[start..],
        })
    }
}

/// Mutable `width x height` window into a pitched buffer.
#[derive(Debug)]
pub struct PixelViewMut<'a> {
    data: &'a mut [u8],
    width: u32,
    height: u32,
    pitch: usize,
}

impl<'a> PixelViewMut<'a> {
    /// Wraps a raw byte slice. `data` must cover `(height - 1) * pitch + width` bytes.
    pub fn new(data: &'a mut [u8], width: u32, height: u32, pitch: u32) -> Result<Self> {
        if pitch < width {
            return Err(GfxError::InvalidConfig(format!(
                "pitch ({pitch}) is smaller than width ({width})"
            )));
        }
        let needed = if height == 0 {
            0
        } else {
            (height as usize - 1) * pitch as usize + width as usize
        };
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
            pitch: pitch as usize,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pitch(&self) -> u32 {
        self.pitch as u32
    }

    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        debug_assert!(y < self.height, "row {y} out of bounds");
        let start = (y as usize) * self.pitch;
        &mut self.data[start..start + self.width as usize]
    }
}
