use super::Packer;
use crate::model::Rect;

/// Fixed-cell grid packer: cells are handed out row-major, one frame per cell.
#[derive(Debug, Clone)]
pub struct GridPacker {
    width: u32,
    height: u32,
    cell_w: u32,
    cell_h: u32,
    next: u32,
}

impl GridPacker {
    pub fn new(width: u32, height: u32, cell_w: u32, cell_h: u32) -> Self {
        Self {
            width,
            height,
            cell_w,
            cell_h,
            next: 0,
        }
    }

    fn columns(&self) -> u32 {
        self.width / self.cell_w.max(1)
    }

    /// Total number of cells.
    pub fn capacity(&self) -> u32 {
        self.columns() * (self.height / self.cell_h.max(1))
    }

    /// Cells handed out so far.
    pub fn len(&self) -> u32 {
        self.next
    }

    pub fn is_empty(&self) -> bool {
        self.next == 0
    }

    fn cell(&self, n: u32) -> Rect {
        let cols = self.columns();
        Rect::new(
            (n % cols) * self.cell_w,
            (n / cols) * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }
}

impl Packer for GridPacker {
    fn can_pack(&self, rect: &Rect) -> bool {
        rect.w <= self.cell_w && rect.h <= self.cell_h && self.next < self.capacity()
    }

    fn pack(&mut self, rect: &Rect) -> Option<Rect> {
        if !self.can_pack(rect) {
            return None;
        }
        let cell = self.cell(self.next);
        self.next += 1;
        Some(Rect::new(cell.x, cell.y, rect.w, rect.h))
    }

    fn extent(&self) -> (u32, u32) {
        if self.next == 0 {
            return (0, 0);
        }
        let cols = self.columns();
        let rows = self.next.div_ceil(cols);
        let used_cols = self.next.min(cols);
        (used_cols * self.cell_w, rows * self.cell_h)
    }
}
