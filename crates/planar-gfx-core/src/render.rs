//! Render back-end abstraction.
//!
//! The core never draws sprites or talks to a window itself. It registers
//! atlases, queues sprite draws and hands frame buffers to a [`RenderBackend`].

use crate::buffer::PixelBuffer;
use crate::model::{AtlasKind, Rect};
use serde::{Deserialize, Serialize};

/// How a frame buffer handed to the back-end should be shown.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PresentMode {
    /// Upload the pixels but do not flip yet.
    Upload,
    /// Upload and present immediately.
    Present,
}

pub trait RenderBackend {
    /// Registers a packed atlas. The pixels are only borrowed for the call;
    /// implementations must copy or upload them before returning.
    #[allow(clippy::too_many_arguments)]
    fn load_atlas(
        &mut self,
        kind: AtlasKind,
        rects: &[Rect],
        pixels: &[u8],
        width: u32,
        height: u32,
        color_key: u8,
        update_palette: bool,
    );

    /// Invalidates a previously loaded atlas.
    fn unload_atlas(&mut self, kind: AtlasKind);

    /// Queues frame `frame` of atlas `kind` at screen position `(x, y)`.
    fn draw_sprite(
        &mut self,
        kind: AtlasKind,
        frame: usize,
        x: i32,
        y: i32,
        flip_horizontal: bool,
        centred: bool,
    );

    /// Restricts subsequent sprite draws to the given region.
    fn set_sprite_clipping_rect(&mut self, x: i32, y: i32, w: i32, h: i32);

    /// Hands the frame buffer to the display.
    fn present_frame(&mut self, frame: &PixelBuffer, mode: PresentMode);
}

/// One recorded back-end call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    LoadAtlas {
        kind: AtlasKind,
        rects: Vec<Rect>,
        pixels: Vec<u8>,
        width: u32,
        height: u32,
        color_key: u8,
        update_palette: bool,
    },
    UnloadAtlas(AtlasKind),
    DrawSprite {
        kind: AtlasKind,
        frame: usize,
        x: i32,
        y: i32,
        flip_horizontal: bool,
        centred: bool,
    },
    SetClip {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
    },
    Present {
        width: u32,
        height: u32,
        mode: PresentMode,
    },
}

/// Back-end that records every call, keeping a copy of atlas pixels.
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    pub commands: Vec<RenderCommand>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Most recent atlas load for `kind`.
    pub fn last_load(&self, kind: AtlasKind) -> Option<&RenderCommand> {
        self.commands
            .iter()
            .rev()
            .find(|c| matches!(c, RenderCommand::LoadAtlas { kind: k, .. } if *k == kind))
    }

    /// Recorded sprite draws as `(frame, x, y)`.
    pub fn sprite_draws(&self) -> Vec<(usize, i32, i32)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawSprite { frame, x, y, .. } => Some((*frame, *x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl RenderBackend for RecordingBackend {
    fn load_atlas(
        &mut self,
        kind: AtlasKind,
        rects: &[Rect],
        pixels: &[u8],
        width: u32,
        height: u32,
        color_key: u8,
        update_palette: bool,
    ) {
        self.commands.push(RenderCommand::LoadAtlas {
            kind,
            rects: rects.to_vec(),
            pixels: pixels.to_vec(),
            width,
            height,
            color_key,
            update_palette,
        });
    }

    fn unload_atlas(&mut self, kind: AtlasKind) {
        self.commands.push(RenderCommand::UnloadAtlas(kind));
    }

    fn draw_sprite(
        &mut self,
        kind: AtlasKind,
        frame: usize,
        x: i32,
        y: i32,
        flip_horizontal: bool,
        centred: bool,
    ) {
        self.commands.push(RenderCommand::DrawSprite {
            kind,
            frame,
            x,
            y,
            flip_horizontal,
            centred,
        });
    }

    fn set_sprite_clipping_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.commands.push(RenderCommand::SetClip { x, y, w, h });
    }

    fn present_frame(&mut self, frame: &PixelBuffer, mode: PresentMode) {
        self.commands.push(RenderCommand::Present {
            width: frame.width(),
            height: frame.height(),
            mode,
        });
    }
}
