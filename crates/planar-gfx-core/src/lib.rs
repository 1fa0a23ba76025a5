//! Core library for legacy 4-plane indexed graphics.
//!
//! - Decoding: `decode_planar` turns 4 bit-planes into byte-per-pixel color indices
//! - Tiles: `convert_tiles` repacks 16x16 planar tiles into two pixels per byte
//! - Atlases: `pack_sprites` shelf-packs a sprite size table into one fixed-size atlas
//! - Compositing: `Screen` owns the frame buffer and blits tiles, text and panels into it
//!
//! Rendering itself is delegated to a [`render::RenderBackend`].
//!
//! Quick example:
//! ```ignore
//! use planar_gfx_core::prelude::*;
//! # fn main() -> planar_gfx_core::Result<()> {
//! let assets = Assets { sprite_sizes: &sizes, sprites: &data, sprite_count: 12, ..Default::default() };
//! let mut screen = Screen::new(DisplayConfig::default(), AtlasConfig::default(), assets, RecordingBackend::new())?;
//! let stats = screen.load_sprites()?;
//! println!("{}", stats.summary());
//! # Ok(()) }
//! ```

pub mod atlas;
pub mod blit;
pub mod buffer;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod model;
pub mod packer;
pub mod planar;
pub mod render;
pub mod screen;
pub mod text;
pub mod tile;

pub use atlas::*;
pub use buffer::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use model::*;
pub use packer::*;
pub use planar::*;

/// Convenience prelude for common types and functions.
/// Importing `planar_gfx_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::atlas::{PackedAtlas, pack_front_tiles, pack_sprites};
    pub use crate::buffer::{PixelBuffer, PixelViewMut};
    pub use crate::config::{AtlasConfig, AtlasConfigBuilder, DisplayConfig, DisplayConfigBuilder, FontLayout};
    pub use crate::display::DisplayState;
    pub use crate::error::{GfxError, Result};
    pub use crate::model::{AtlasKind, AtlasStats, Rect};
    pub use crate::packer::{Packer, grid::GridPacker, shelf::{ShelfPacker, decode_sprite_width}};
    pub use crate::planar::{OPAQUE, PlanarImage, decode_planar, encode_planar};
    pub use crate::render::{PresentMode, RecordingBackend, RenderBackend, RenderCommand};
    pub use crate::screen::{Assets, Screen};
    pub use crate::tile::{TILE_BYTES, TILE_SIZE, convert_planar_tile, convert_tiles};
}
