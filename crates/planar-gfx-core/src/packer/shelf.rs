use super::Packer;
use crate::model::Rect;

/// Recovers a sprite's pixel width from its size-table byte.
///
/// The byte is rotated right by 3 within 8 bits. When bits 5..7 of the
/// result are set they are cleared and the value is bumped by one; that
/// correction is part of the table encoding and must stay as is.
pub fn decode_sprite_width(encoded: u8) -> u32 {
    let mut value = (encoded >> 3) | ((encoded & 7) << 5);
    if (value & 0xE0) != 0 {
        value &= !0xE0;
        value += 1;
    }
    value as u32 * 8
}

/// Greedy next-fit shelf packer.
///
/// Frames go left to right; when the next frame would cross the right edge a
/// new shelf starts below the tallest frame of the current one.
#[derive(Debug, Clone)]
pub struct ShelfPacker {
    width: u32,
    height: u32,
    current_x: u32,
    current_y: u32,
    max_w: u32,
    max_h: u32,
}

struct Slot {
    rect: Rect,
    new_shelf: bool,
}

impl ShelfPacker {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            current_x: 0,
            current_y: 0,
            max_w: 0,
            max_h: 0,
        }
    }

    /// Atlas bounds.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Next free position on the current shelf.
    pub fn cursor(&self) -> (u32, u32) {
        (self.current_x, self.current_y)
    }

    /// Height of the tallest frame on the current shelf.
    pub fn shelf_height(&self) -> u32 {
        self.max_h
    }

    fn slot(&self, w: u32, h: u32) -> Slot {
        if self.current_x + w > self.width {
            Slot {
                rect: Rect::new(0, self.current_y + self.max_h, w, h),
                new_shelf: true,
            }
        } else {
            Slot {
                rect: Rect::new(self.current_x, self.current_y, w, h),
                new_shelf: false,
            }
        }
    }
}

impl Packer for ShelfPacker {
    fn can_pack(&self, rect: &Rect) -> bool {
        let slot = self.slot(rect.w, rect.h);
        self.bounds().contains(&slot.rect)
    }

    fn pack(&mut self, rect: &Rect) -> Option<Rect> {
        let slot = self.slot(rect.w, rect.h);
        if !self.bounds().contains(&slot.rect) {
            return None;
        }
        if slot.new_shelf {
            self.current_y = slot.rect.y;
            self.max_w = self.max_w.max(self.current_x);
            self.current_x = 0;
            self.max_h = rect.h;
        } else {
            self.max_h = self.max_h.max(rect.h);
        }
        self.current_x += rect.w;
        Some(slot.rect)
    }

    fn extent(&self) -> (u32, u32) {
        (self.max_w.max(self.current_x), self.current_y + self.max_h)
    }
}
