use planar_gfx_core::prelude::*;

fn sprite_table() -> (Vec<u8>, Vec<u8>) {
    let mut sizes = Vec::new();
    let mut data = Vec::new();
    for (w, h, c) in [(16u32, 16u32, 1u8), (32, 8, 2), (8, 24, 3)] {
        sizes.extend([w as u8, h as u8]);
        data.extend(encode_planar(&vec![c; (w * h) as usize], w, h).unwrap());
    }
    (sizes, data)
}

fn screen<'a>(sizes: &'a [u8], data: &'a [u8]) -> Screen<'a, RecordingBackend> {
    let assets = Assets {
        sprite_sizes: sizes,
        sprites: data,
        sprite_count: 3,
        ..Default::default()
    };
    Screen::new(
        DisplayConfig::default(),
        AtlasConfig::default(),
        assets,
        RecordingBackend::new(),
    )
    .unwrap()
}

#[test]
fn resize_yields_zeroed_frame_of_new_size() {
    let (sizes, data) = sprite_table();
    let mut s = screen(&sizes, &data);
    s.put_pixel(10, 10, 4);
    s.display_mut().request_resize(400, 240).unwrap();
    assert!(s.display().resize_pending());
    // Nothing happens to the frame until the resize is applied.
    assert_eq!(s.display().frame().dimensions(), (320, 200));

    s.clear().unwrap();
    let frame = s.display().frame();
    assert_eq!(frame.dimensions(), (400, 240));
    assert_eq!(frame.as_bytes().len(), 400 * 240);
    assert!(frame.as_bytes().iter().all(|&b| b == 0));
    assert!(!s.display().resize_pending());
    assert_eq!(s.display().config().tilemap_height(), 216);
}

#[test]
fn duplicate_resize_still_reallocates() {
    let (sizes, data) = sprite_table();
    let mut s = screen(&sizes, &data);
    s.put_pixel(1, 1, 7);
    s.display_mut().request_resize(320, 200).unwrap();
    s.resize().unwrap();
    assert_eq!(s.display().frame().get(1, 1), 0);
    assert_eq!(s.display().frame().dimensions(), (320, 200));
}

#[test]
fn invalid_resize_is_rejected() {
    let (sizes, data) = sprite_table();
    let mut s = screen(&sizes, &data);
    assert!(s.display_mut().request_resize(256, 200).is_err());
    assert!(s.display_mut().request_resize(321, 200).is_err());
    assert!(!s.display().resize_pending());
    assert_eq!(s.display().config().width, 320);
}

#[test]
fn clear_without_resize_zero_fills() {
    let (sizes, data) = sprite_table();
    let mut s = screen(&sizes, &data);
    s.display_mut().frame_mut().fill(8);
    s.clear().unwrap();
    assert!(s.display().frame().as_bytes().iter().all(|&b| b == 0));
    assert!(s.backend().commands.is_empty());
}

#[test]
fn load_sprites_registers_game_atlas() {
    let (sizes, data) = sprite_table();
    let mut s = screen(&sizes, &data);
    let stats = s.load_sprites().unwrap();
    assert_eq!(stats.num_frames, 3);

    let backend = s.backend();
    assert_eq!(backend.commands[0], RenderCommand::UnloadAtlas(AtlasKind::Game));
    match backend.last_load(AtlasKind::Game) {
        Some(RenderCommand::LoadAtlas {
            rects,
            pixels,
            width,
            height,
            color_key,
            update_palette,
            ..
        }) => {
            assert_eq!(rects.len(), 3);
            assert_eq!(rects[1], Rect::new(16, 0, 32, 8));
            assert_eq!((*width, *height), (2048, 24));
            assert_eq!(pixels.len(), 2048 * 24);
            assert_eq!(pixels[16], 2);
            assert_eq!(*color_key, 0);
            assert!(*update_palette);
        }
        other => panic!("expected a game atlas load, got {other:?}"),
    }
}

#[test]
fn rehint_reloads_sprites_once() {
    let (sizes, data) = sprite_table();
    let mut s = screen(&sizes, &data);
    s.display_mut().set_rehint(true);
    s.display_mut().request_resize(400, 240).unwrap();
    s.resize().unwrap();
    assert!(!s.display().rehint());
    assert!(s.backend().last_load(AtlasKind::Game).is_some());

    s.backend_mut().clear();
    s.resize().unwrap();
    assert!(s.backend().commands.is_empty());
}

#[test]
fn rehint_failure_is_reported() {
    let sizes = [16u8, 16];
    let mut s = {
        let assets = Assets {
            sprite_sizes: &sizes,
            sprites: &[],
            sprite_count: 1,
            ..Default::default()
        };
        Screen::new(
            DisplayConfig::default(),
            AtlasConfig::default(),
            assets,
            RecordingBackend::new(),
        )
        .unwrap()
    };
    s.display_mut().set_rehint(true);
    assert!(matches!(s.resize(), Err(GfxError::SourceTooShort { .. })));
    assert!(s.display().rehint());
}

#[test]
fn front_tiles_load_only_when_present() {
    let (sizes, data) = sprite_table();
    let mut s = screen(&sizes, &data);
    assert_eq!(s.load_front_tiles().unwrap(), 0);
    assert_eq!(
        s.backend().commands,
        vec![RenderCommand::UnloadAtlas(AtlasKind::Foreground)]
    );

    let mut sheet = encode_planar(&[5u8; 256], 16, 16).unwrap();
    sheet.extend(encode_planar(&[6u8; 256], 16, 16).unwrap());
    let assets = Assets {
        front_tiles: &sheet,
        ..Default::default()
    };
    let mut s = Screen::new(
        DisplayConfig::default(),
        AtlasConfig::default(),
        assets,
        RecordingBackend::new(),
    )
    .unwrap();
    assert_eq!(s.load_front_tiles().unwrap(), 2);
    match s.backend().last_load(AtlasKind::Foreground) {
        Some(RenderCommand::LoadAtlas {
            rects,
            width,
            height,
            ..
        }) => {
            assert_eq!(rects.len(), 2);
            assert_eq!((*width, *height), (256, 192));
        }
        other => panic!("expected a foreground load, got {other:?}"),
    }
}

#[test]
fn present_hands_over_the_frame() {
    let (sizes, data) = sprite_table();
    let mut s = screen(&sizes, &data);
    s.present(PresentMode::Upload);
    s.display_mut().request_resize(400, 240).unwrap();
    s.clear().unwrap();
    s.present(PresentMode::Present);
    assert_eq!(
        s.into_backend().commands,
        vec![
            RenderCommand::Present {
                width: 320,
                height: 200,
                mode: PresentMode::Upload
            },
            RenderCommand::Present {
                width: 400,
                height: 240,
                mode: PresentMode::Present
            },
        ]
    );
}
