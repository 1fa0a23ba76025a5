use crate::buffer::PixelBuffer;
use crate::config::DisplayConfig;
use crate::error::Result;
use tracing::{debug, error};

/// Owned display buffers plus the pending resize and rehint flags.
///
/// The frame buffer follows the current display mode; the background and map
/// buffers keep the original resolution for the whole lifetime.
#[derive(Debug)]
pub struct DisplayState {
    config: DisplayConfig,
    frame: PixelBuffer,
    background: PixelBuffer,
    map: PixelBuffer,
    resize_pending: bool,
    rehint: bool,
}

impl DisplayState {
    pub fn new(config: DisplayConfig) -> Result<Self> {
        config.validate()?;
        let frame = PixelBuffer::try_new(config.width, config.height)?;
        let background = PixelBuffer::try_new(config.orig_width, config.orig_height)?;
        let map = PixelBuffer::try_new(config.map_width, config.map_height)?;
        Ok(Self {
            config,
            frame,
            background,
            map,
            resize_pending: false,
            rehint: false,
        })
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut PixelBuffer {
        &mut self.frame
    }

    pub fn background(&self) -> &PixelBuffer {
        &self.background
    }

    pub fn background_mut(&mut self) -> &mut PixelBuffer {
        &mut self.background
    }

    pub fn map(&self) -> &PixelBuffer {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut PixelBuffer {
        &mut self.map
    }

    /// Frame, background and configuration borrowed together.
    pub(crate) fn split_mut(&mut self) -> (&mut PixelBuffer, &PixelBuffer, &DisplayConfig) {
        (&mut self.frame, &self.background, &self.config)
    }

    pub fn resize_pending(&self) -> bool {
        self.resize_pending
    }

    pub fn rehint(&self) -> bool {
        self.rehint
    }

    /// Requests that the atlas be decoded again on the next resize.
    pub fn set_rehint(&mut self, v: bool) {
        self.rehint = v;
    }

    /// Records a new frame size. The buffer is replaced by the next
    /// [`DisplayState::reallocate`], even if the size did not change.
    pub fn request_resize(&mut self, width: u32, height: u32) -> Result<()> {
        let mut next = self.config.clone();
        next.width = width;
        next.height = height;
        next.validate()?;
        debug!(width, height, "resize requested");
        self.config = next;
        self.resize_pending = true;
        Ok(())
    }

    /// Replaces the frame buffer with a zeroed one of the configured size if
    /// a resize is pending. Returns whether a reallocation took place.
    pub fn reallocate(&mut self) -> Result<bool> {
        if !self.resize_pending {
            return Ok(false);
        }
        let (w, h) = (self.config.width, self.config.height);
        // Release the old buffer before allocating the new one.
        self.frame = PixelBuffer::new(0, 0);
        match PixelBuffer::try_new(w, h) {
            Ok(frame) => {
                self.frame = frame;
                self.resize_pending = false;
                Ok(true)
            }
            Err(e) => {
                error!(bytes = (w as usize) * (h as usize), "failed to reallocate frame buffer");
                Err(e)
            }
        }
    }
}
