use planar_gfx_core::planar::encoded_len;
use planar_gfx_core::prelude::*;

fn screen_with(cfg: DisplayConfig) -> Screen<'static, RecordingBackend> {
    Screen::new(cfg, AtlasConfig::default(), Assets::default(), RecordingBackend::new()).unwrap()
}

fn wide_config() -> DisplayConfig {
    DisplayConfig::builder().with_screen_size(400, 240).build()
}

/// Background picture whose pixel value encodes its column and row.
fn gradient(w: u32, h: u32) -> Vec<u8> {
    (0..h)
        .flat_map(|y| (0..w).map(move |x| ((x / 8 + y) % 16) as u8))
        .collect()
}

#[test]
fn centred_copy_lands_in_the_middle() {
    let cfg = DisplayConfig::builder()
        .with_screen_size(256, 256)
        .with_original_size(256, 256)
        .with_map_size(256, 256)
        .build();
    let mut screen = screen_with(cfg);
    screen.copy_centred(&[7u8; 64 * 64], 64, 64);
    let f = screen.display().frame();
    assert_eq!(f.get(96, 96), 7);
    assert_eq!(f.get(159, 159), 7);
    assert_eq!(f.get(95, 96), 0);
    assert_eq!(f.get(160, 159), 0);
}

#[test]
fn offset_copy_and_plain_copy() {
    let mut screen = screen_with(DisplayConfig::default());
    let block: Vec<u8> = (0..24).collect();
    screen.copy_offset(&block, 6, 4, 100, 50);
    screen.copy(&[3u8; 4], 2, 2);
    let f = screen.display().frame();
    assert_eq!(f.get(100, 50), 0);
    assert_eq!(f.get(105, 50), 5);
    assert_eq!(f.get(100, 53), 18);
    assert_eq!(f.get(106, 50), 0);
    assert_eq!(f.get(1, 1), 3);
    assert_eq!(f.get(2, 0), 0);
}

#[test]
fn same_size_background_is_copied_whole() {
    let mut screen = screen_with(DisplayConfig::default());
    let pic = gradient(320, 200);
    screen.copy_img(&encode_planar(&pic, 320, 200).unwrap()).unwrap();
    screen.copy_background().unwrap();
    assert_eq!(screen.display().frame().as_bytes(), &pic[..]);
}

#[test]
fn wide_frame_repeats_background() {
    let mut screen = screen_with(wide_config());
    let pic = gradient(320, 200);
    screen.copy_img(&encode_planar(&pic, 320, 200).unwrap()).unwrap();
    screen.put_pixel(5, 230, 9);
    screen.copy_background().unwrap();

    let f = screen.display().frame();
    // Horizontal repeat: column 320 shows background column 0.
    assert_eq!(f.get(320, 0), pic[0]);
    assert_eq!(f.get(399, 10), pic[10 * 320 + 79]);
    // Rows below the background reuse its last row, up to the tilemap height.
    let tilemap_h = 240 - 24;
    assert_eq!(f.get(16, tilemap_h - 1), pic[199 * 320 + 16]);
    assert_eq!(f.get(16, tilemap_h), 0);
    assert_eq!(f.get(5, 230), 0);
}

#[test]
fn background_copy_applies_pending_resize() {
    let mut screen = screen_with(DisplayConfig::default());
    screen.display_mut().request_resize(400, 240).unwrap();
    screen.copy_background().unwrap();
    assert_eq!(screen.display().frame().dimensions(), (400, 240));
    assert!(!screen.display().resize_pending());
}

#[test]
fn map_is_decoded_opaque() {
    let mut screen = screen_with(DisplayConfig::default());
    let pic = gradient(320, 200);
    screen.copy_map(&encode_planar(&pic, 320, 200).unwrap()).unwrap();
    assert_eq!(screen.display().map().as_bytes(), &pic[..]);
    assert!(matches!(
        screen.copy_map(&[0u8; 100]),
        Err(GfxError::SourceTooShort { .. })
    ));
}

#[test]
fn panel_sits_below_tilemap_centred() {
    let mut screen = screen_with(wide_config());
    let panel = vec![12u8; 320 * 23];
    screen.draw_panel(&encode_planar(&panel, 320, 23).unwrap()).unwrap();
    let f = screen.display().frame();
    assert_eq!(f.get(40, 216), 12);
    assert_eq!(f.get(359, 238), 12);
    assert_eq!(f.get(39, 216), 0);
    assert_eq!(f.get(360, 216), 0);
    assert_eq!(f.get(40, 215), 0);
    assert_eq!(f.get(40, 239), 0);
}

#[test]
fn font_picture_keeps_colour_zero_transparent() {
    let mut picture = vec![0u8; 320 * 200];
    for y in 0..200 {
        for x in 0..160 {
            picture[y * 320 + x] = 3;
        }
    }
    let mut fonts = vec![0u8; 320 + 200];
    fonts.extend(encode_planar(&picture, 320, 200).unwrap());
    assert_eq!(fonts.len(), 520 + encoded_len(320, 200));

    let assets = Assets {
        fonts: &fonts,
        ..Default::default()
    };
    let mut screen = Screen::new(
        DisplayConfig::default(),
        AtlasConfig::default(),
        assets,
        RecordingBackend::new(),
    )
    .unwrap();
    screen.display_mut().frame_mut().fill(5);
    screen.draw_fonts().unwrap();
    let f = screen.display().frame();
    assert_eq!(f.get(0, 0), 3);
    assert_eq!(f.get(159, 199), 3);
    assert_eq!(f.get(160, 0), 5);
}

#[test]
fn font_picture_missing_is_an_error() {
    let mut screen = screen_with(DisplayConfig::default());
    assert!(matches!(
        screen.draw_fonts(),
        Err(GfxError::SourceTooShort { .. })
    ));
}
