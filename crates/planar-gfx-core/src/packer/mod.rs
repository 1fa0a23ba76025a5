use crate::model::Rect;

pub mod grid;
pub mod shelf;

/// A packer places frames into a fixed-size atlas.
///
/// Only `w`/`h` of the requested rectangle are read. `pack` returns `None`
/// when the frame does not fit and leaves the packer state untouched.
pub trait Packer {
    fn can_pack(&self, rect: &Rect) -> bool;
    fn pack(&mut self, rect: &Rect) -> Option<Rect>;
    /// Width and height covered by the frames placed so far.
    fn extent(&self) -> (u32, u32);
}
