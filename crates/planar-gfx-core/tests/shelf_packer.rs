use planar_gfx_core::prelude::*;

#[test]
fn width_byte_rotation() {
    // Plain multiples of 8 decode to themselves.
    assert_eq!(decode_sprite_width(0x00), 0);
    assert_eq!(decode_sprite_width(0x08), 8);
    assert_eq!(decode_sprite_width(0x10), 16);
    assert_eq!(decode_sprite_width(0x50), 80);
    assert_eq!(decode_sprite_width(0xF8), 248);
}

#[test]
fn width_byte_overflow_correction() {
    // Low bits rotate into bits 5..7, get cleared and add one unit.
    assert_eq!(decode_sprite_width(0x01), 8);
    assert_eq!(decode_sprite_width(0x07), 8);
    assert_eq!(decode_sprite_width(0x09), 16);
    assert_eq!(decode_sprite_width(0xF9), 256);
    assert_eq!(decode_sprite_width(0xFF), 256);
}

#[test]
fn full_shelf_starts_new_row_below_tallest() {
    let mut p = ShelfPacker::new(64, 128);
    let a = p.pack(&Rect::new(0, 0, 32, 32)).unwrap();
    let b = p.pack(&Rect::new(0, 0, 32, 16)).unwrap();
    let c = p.pack(&Rect::new(0, 0, 16, 16)).unwrap();
    assert_eq!(a, Rect::new(0, 0, 32, 32));
    assert_eq!(b, Rect::new(32, 0, 32, 16));
    assert_eq!(c, Rect::new(0, 32, 16, 16));
    assert_eq!(p.cursor(), (16, 32));
    assert_eq!(p.shelf_height(), 16);
    assert_eq!(p.extent(), (64, 48));
}

#[test]
fn equal_height_shelf_scenario() {
    let mut p = ShelfPacker::new(64, 128);
    for _ in 0..2 {
        p.pack(&Rect::new(0, 0, 32, 32)).unwrap();
    }
    let third = p.pack(&Rect::new(0, 0, 16, 16)).unwrap();
    assert_eq!((third.x, third.y), (0, 32));
}

#[test]
fn shelf_height_grows_with_taller_frames() {
    let mut p = ShelfPacker::new(64, 128);
    p.pack(&Rect::new(0, 0, 16, 8)).unwrap();
    p.pack(&Rect::new(0, 0, 16, 24)).unwrap();
    p.pack(&Rect::new(0, 0, 32, 4)).unwrap();
    assert_eq!(p.shelf_height(), 24);
    let next = p.pack(&Rect::new(0, 0, 8, 8)).unwrap();
    assert_eq!((next.x, next.y), (0, 24));
}

#[test]
fn rejects_frames_outside_bounds() {
    let mut p = ShelfPacker::new(64, 32);
    assert!(!p.can_pack(&Rect::new(0, 0, 72, 8)));
    assert!(p.pack(&Rect::new(0, 0, 72, 8)).is_none());

    p.pack(&Rect::new(0, 0, 64, 32)).unwrap();
    assert!(!p.can_pack(&Rect::new(0, 0, 8, 1)));
    assert!(p.pack(&Rect::new(0, 0, 8, 1)).is_none());
    // A refused frame leaves the cursor where it was.
    assert_eq!(p.cursor(), (64, 0));
    assert_eq!(p.extent(), (64, 32));
}

#[test]
fn grid_packer_hands_out_cells_row_major() {
    let mut g = GridPacker::new(64, 32, 16, 16);
    assert_eq!(g.capacity(), 8);
    let cells: Vec<Rect> = (0..6)
        .map(|_| g.pack(&Rect::new(0, 0, 16, 16)).unwrap())
        .collect();
    assert_eq!(cells[3], Rect::new(48, 0, 16, 16));
    assert_eq!(cells[4], Rect::new(0, 16, 16, 16));
    assert_eq!(g.extent(), (64, 32));
    assert!(!g.can_pack(&Rect::new(0, 0, 17, 16)));
    g.pack(&Rect::new(0, 0, 16, 16)).unwrap();
    g.pack(&Rect::new(0, 0, 16, 16)).unwrap();
    assert!(g.pack(&Rect::new(0, 0, 16, 16)).is_none());
    assert_eq!(g.len(), 8);
}
