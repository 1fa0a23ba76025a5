use thiserror::Error;

#[derive(Debug, Error)]
pub enum GfxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Region {w}x{h} at ({x}, {y}) is outside a {width}x{height} buffer")]
    RegionOutOfBounds {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        width: u32,
        height: u32,
    },
    #[error("Source data too short: need {needed} bytes, have {available}")]
    SourceTooShort { needed: usize, available: usize },
    #[error("Atlas out of space: {w}x{h} frame at ({x}, {y}) exceeds {atlas_w}x{atlas_h}")]
    OutOfSpace {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        atlas_w: u32,
        atlas_h: u32,
    },
    #[error("Too many frames for atlas: {count} > {max}")]
    TooManySprites { count: usize, max: usize },
    #[error("Failed to allocate {bytes} bytes for pixel buffer")]
    Allocation { bytes: usize },
}

pub type Result<T> = std::result::Result<T, GfxError>;
