use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Exclusive right edge (`x + w`).
    pub fn right(&self) -> u32 {
        self.x + self.w
    }
    /// Exclusive bottom edge (`y + h`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h
    }
    pub fn area(&self) -> u64 {
        (self.w as u64) * (self.h as u64)
    }
    /// Returns true if `r` lies fully inside `self`.
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// True when the two rectangles share at least one pixel.
    pub fn overlaps(&self, r: &Rect) -> bool {
        self.x < r.right() && r.x < self.right() && self.y < r.bottom() && r.y < self.bottom()
    }
}

/// Atlas slots understood by the render back-end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AtlasKind {
    /// Player and monster sprites.
    Game,
    /// Foreground tiles.
    Foreground,
}

/// Statistics about one packed atlas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtlasStats {
    /// Number of frames placed.
    pub num_frames: usize,
    /// Atlas buffer dimensions handed to the renderer.
    pub atlas_width: u32,
    pub atlas_height: u32,
    /// Widest shelf actually used.
    pub used_width: u32,
    /// Height covered by all shelves.
    pub used_height: u32,
    /// Sum of frame areas.
    pub used_frame_area: u64,
    /// used_frame_area / (atlas_width * atlas_height), 0.0 to 1.0.
    pub occupancy: f64,
    /// Planar source bytes consumed.
    pub source_bytes: usize,
}

impl AtlasStats {
    pub fn from_rects(rects: &[Rect], atlas_width: u32, atlas_height: u32, source_bytes: usize) -> Self {
        let used_width = rects.iter().map(Rect::right).max().unwrap_or(0);
        let used_height = rects.iter().map(Rect::bottom).max().unwrap_or(0);
        let used_frame_area: u64 = rects.iter().map(Rect::area).sum();
        let total = (atlas_width as u64) * (atlas_height as u64);
        let occupancy = if total > 0 {
            used_frame_area as f64 / total as f64
        } else {
            0.0
        };
        Self {
            num_frames: rects.len(),
            atlas_width,
            atlas_height,
            used_width,
            used_height,
            used_frame_area,
            occupancy,
            source_bytes,
        }
    }

    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Frames: {}, Atlas: {}x{}, Used: {}x{}, Occupancy: {:.2}%, Source: {} bytes",
            self.num_frames,
            self.atlas_width,
            self.atlas_height,
            self.used_width,
            self.used_height,
            self.occupancy * 100.0,
            self.source_bytes,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        ((self.atlas_width as u64) * (self.atlas_height as u64)).saturating_sub(self.used_frame_area)
    }
}
