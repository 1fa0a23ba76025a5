use planar_gfx_core::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_grid(rng: &mut StdRng, w: u32, h: u32) -> Vec<u8> {
    (0..w * h).map(|_| rng.gen_range(0..16u8)).collect()
}

#[test]
fn decode_reproduces_encoded_grid() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for &(w, h) in &[(8, 1), (16, 16), (40, 7), (320, 3)] {
        let grid = random_grid(&mut rng, w, h);
        let planar = encode_planar(&grid, w, h).expect("encode");
        assert_eq!(planar.len(), (w * h / 2) as usize);

        let image = PlanarImage::new(&planar, w, h).expect("image");
        let mut out = PixelBuffer::new(w, h);
        decode_planar(&image, &mut out.view_mut(), OPAQUE);
        assert_eq!(out.as_bytes(), &grid[..], "{w}x{h}");
    }
}

#[test]
fn pixel_accessor_matches_decode() {
    let mut rng = StdRng::seed_from_u64(3);
    let grid = random_grid(&mut rng, 24, 5);
    let planar = encode_planar(&grid, 24, 5).unwrap();
    let image = PlanarImage::new(&planar, 24, 5).unwrap();
    for y in 0..5 {
        for x in 0..24 {
            assert_eq!(image.pixel(x, y), grid[(y * 24 + x) as usize]);
        }
    }
}

#[test]
fn bit_seven_is_leftmost_pixel() {
    // plane 0 = 0x80, plane 2 = 0x01 -> pixel 0 has color 1, pixel 7 has color 4
    let mut planar = vec![0u8; 4];
    planar[0] = 0x80;
    planar[2] = 0x01;
    let image = PlanarImage::new(&planar, 8, 1).unwrap();
    let mut out = PixelBuffer::new(8, 1);
    decode_planar(&image, &mut out.view_mut(), OPAQUE);
    assert_eq!(out.as_bytes(), &[1, 0, 0, 0, 0, 0, 0, 4]);
}

#[test]
fn transparent_color_only_changes_matching_pixels() {
    let mut rng = StdRng::seed_from_u64(11);
    let (w, h) = (32, 8);
    let grid = random_grid(&mut rng, w, h);
    let planar = encode_planar(&grid, w, h).unwrap();
    let image = PlanarImage::new(&planar, w, h).unwrap();

    for (t1, t2) in [(0u8, 0xFFu8), (3, 9), (15, 0)] {
        let mut a = PixelBuffer::new(w, h);
        a.fill(0xAA);
        let mut b = a.clone();
        decode_planar(&image, &mut a.view_mut(), t1);
        decode_planar(&image, &mut b.view_mut(), t2);
        for (i, &c) in grid.iter().enumerate() {
            let differs = a.as_bytes()[i] != b.as_bytes()[i];
            assert_eq!(differs, c == t1 || c == t2, "pixel {i} color {c}");
        }
    }
}

#[test]
fn transparent_pixels_keep_existing_content() {
    let grid: Vec<u8> = (0..16).map(|i| if i % 2 == 0 { 0 } else { 7 }).collect();
    let planar = encode_planar(&grid, 16, 1).unwrap();
    let image = PlanarImage::new(&planar, 16, 1).unwrap();
    let mut out = PixelBuffer::new(16, 1);
    out.fill(9);
    decode_planar(&image, &mut out.view_mut(), 0);
    for (i, &c) in out.as_bytes().iter().enumerate() {
        assert_eq!(c, if i % 2 == 0 { 9 } else { 7 });
    }
}

#[test]
fn decode_into_sub_region_respects_pitch() {
    let grid = vec![5u8; 8 * 2];
    let planar = encode_planar(&grid, 8, 2).unwrap();
    let image = PlanarImage::new(&planar, 8, 2).unwrap();
    let mut canvas = PixelBuffer::new(32, 4);
    let mut dst = canvas.region_mut(8, 1, 8, 2).unwrap();
    decode_planar(&image, &mut dst, OPAQUE);

    for y in 0..4 {
        for x in 0..32 {
            let inside = (8..16).contains(&x) && (1..3).contains(&y);
            assert_eq!(canvas.get(x, y), if inside { 5 } else { 0 }, "({x}, {y})");
        }
    }
}

#[test]
fn raw_view_with_wide_pitch() {
    let grid = vec![12u8; 8];
    let planar = encode_planar(&grid, 8, 1).unwrap();
    let image = PlanarImage::new(&planar, 8, 1).unwrap();
    let mut raw = vec![0u8; 20];
    let mut view = PixelViewMut::new(&mut raw[4..], 8, 1, 16).unwrap();
    decode_planar(&image, &mut view, OPAQUE);
    assert_eq!(&raw[4..12], &[12; 8]);
    assert!(raw[..4].iter().chain(&raw[12..]).all(|&b| b == 0));
}

#[test]
fn planar_image_rejects_bad_geometry() {
    let data = vec![0u8; 64];
    assert!(matches!(
        PlanarImage::new(&data, 12, 2),
        Err(GfxError::InvalidInput(_))
    ));
    match PlanarImage::new(&data, 16, 32) {
        Err(GfxError::SourceTooShort { needed, available }) => {
            assert_eq!(needed, 256);
            assert_eq!(available, 64);
        }
        other => panic!("expected SourceTooShort, got {other:?}"),
    }
    let image = PlanarImage::new(&data, 16, 8).unwrap();
    assert_eq!(image.plane_size(), 16);
    assert_eq!(image.byte_len(), 64);
}

#[test]
fn encode_rejects_short_input() {
    assert!(encode_planar(&[0; 7], 8, 1).is_err());
    assert!(encode_planar(&[0; 10], 10, 1).is_err());
}
