use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use image::imageops::{self, FilterType};
use planar_gfx_core::prelude::*;
use planar_gfx_core::{DEFAULT_PALETTE, save_png, to_json, to_rgba_image};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "planar-gfx",
    about = "Decode 4-plane indexed graphics and pack sprite atlases",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a planar picture to PNG
    Decode(DecodeArgs),
    /// Pack a sprite size table and its planar data into the game atlas
    Sprites(SpritesArgs),
    /// Lay a foreground tile sheet out on its 256x192 grid atlas
    Tiles(TilesArgs),
}

#[derive(Parser, Debug, Clone)]
struct DecodeArgs {
    /// Planar input file
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Picture width in pixels (multiple of 8)
    #[arg(long, help_heading = "Layout")]
    width: u32,
    /// Picture height in pixels
    #[arg(long, help_heading = "Layout")]
    height: u32,
    /// Byte offset of the picture inside the input
    #[arg(long, default_value_t = 0, help_heading = "Input/Output")]
    offset: usize,
    /// Output PNG path
    #[arg(short, long, default_value = "out.png", help_heading = "Input/Output")]
    out: PathBuf,
    /// Palette index written as transparent
    #[arg(long, help_heading = "Export")]
    color_key: Option<u8>,
    /// Integer upscale factor (nearest neighbour)
    #[arg(long, default_value_t = 1, help_heading = "Export")]
    scale: u32,
}

#[derive(Parser, Debug, Clone)]
struct SpritesArgs {
    /// Sprite size table (two bytes per sprite)
    #[arg(long, help_heading = "Input/Output")]
    table: PathBuf,
    /// Planar sprite data
    #[arg(long, help_heading = "Input/Output")]
    sprites: PathBuf,
    /// Number of frames to pack
    #[arg(long, help_heading = "Layout")]
    count: usize,
    /// Reduced asset set (no data for table entries 305..312)
    #[arg(long, default_value_t = false, help_heading = "Layout")]
    reduced: bool,
    /// Atlas width budget
    #[arg(long, help_heading = "Layout")]
    max_width: Option<u32>,
    /// Atlas height budget
    #[arg(long, help_heading = "Layout")]
    max_height: Option<u32>,
    /// YAML config file path (overrides atlas and display options)
    #[arg(long, help_heading = "Input/Output")]
    config: Option<PathBuf>,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Atlas base name (files will be name.png/.json)
    #[arg(short, long, default_value = "sprites", help_heading = "Input/Output")]
    name: String,
    /// Print the merged configuration (after CLI/YAML) and exit
    #[arg(long, default_value_t = false, help_heading = "Export")]
    print_config: bool,
    /// Output format for --print-config: json|yaml
    #[arg(long, default_value = "json", value_parser = ["json", "yaml"], help_heading = "Export")]
    print_config_format: String,
}

#[derive(Parser, Debug, Clone)]
struct TilesArgs {
    /// Planar foreground tile sheet
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = "out", help_heading = "Input/Output")]
    out_dir: PathBuf,
    /// Atlas base name (files will be name.png/.json)
    #[arg(short, long, default_value = "tiles", help_heading = "Input/Output")]
    name: String,
    /// Also write the sheet converted to nibble-packed tiles (name.bin)
    #[arg(long, default_value_t = false, help_heading = "Export")]
    packed: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Decode(args) => run_decode(args),
        Commands::Sprites(args) => run_sprites(args),
        Commands::Tiles(args) => run_tiles(args),
    }
}

fn run_decode(args: &DecodeArgs) -> anyhow::Result<()> {
    let data = read_input(&args.input)?;
    let src = data.get(args.offset..).with_context(|| {
        format!(
            "offset {} is past the end of {} ({} bytes)",
            args.offset,
            args.input.display(),
            data.len()
        )
    })?;
    let image = PlanarImage::new(src, args.width, args.height)?;
    if src.len() > image.byte_len() {
        info!(
            trailing = src.len() - image.byte_len(),
            "input has bytes past the picture"
        );
    }

    let mut pixels = PixelBuffer::try_new(args.width, args.height)?;
    decode_planar(&image, &mut pixels.view_mut(), OPAQUE);
    let mut rgba = to_rgba_image(&pixels, &DEFAULT_PALETTE, args.color_key);
    if args.scale > 1 {
        rgba = imageops::resize(
            &rgba,
            args.width * args.scale,
            args.height * args.scale,
            FilterType::Nearest,
        );
    }
    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create out dir {}", parent.display()))?;
    }
    rgba.save(&args.out)
        .with_context(|| format!("write {}", args.out.display()))?;
    info!(
        width = rgba.width(),
        height = rgba.height(),
        out = %args.out.display(),
        "decoded picture"
    );
    Ok(())
}

fn run_sprites(args: &SpritesArgs) -> anyhow::Result<()> {
    let mut cfg = if args.reduced {
        AtlasConfig::reduced_variant()
    } else {
        AtlasConfig::default()
    };
    if let Some(v) = args.max_width {
        cfg.max_width = v;
    }
    if let Some(v) = args.max_height {
        cfg.max_height = v;
    }
    let mut display = DisplayConfig::default();
    if let Some(path) = &args.config {
        let file = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let y: YamlConfig = serde_yaml::from_str(&file)
            .with_context(|| format!("parse config {}", path.display()))?;
        (cfg, display) = y.merge(cfg, display);
    }
    cfg.validate()?;
    display.validate()?;

    if args.print_config {
        let merged = MergedConfig {
            atlas: &cfg,
            display: &display,
        };
        match args.print_config_format.as_str() {
            "yaml" => println!("{}", serde_yaml::to_string(&merged)?),
            _ => println!("{}", serde_json::to_string_pretty(&merged)?),
        }
        return Ok(());
    }

    let sizes = read_input(&args.table)?;
    let data = read_input(&args.sprites)?;
    let assets = Assets {
        sprite_sizes: &sizes,
        sprites: &data,
        sprite_count: args.count,
        ..Default::default()
    };
    let mut screen = Screen::new(
        display,
        cfg,
        assets,
        RecordingBackend::new(),
    )?;
    let stats = screen.load_sprites()?;
    info!("{}", stats.summary());
    if stats.source_bytes < data.len() {
        warn!(
            unused = data.len() - stats.source_bytes,
            "sprite data not consumed by the requested frames"
        );
    }

    let backend = screen.into_backend();
    let Some(RenderCommand::LoadAtlas {
        kind,
        rects,
        pixels,
        width,
        height,
        ..
    }) = backend.last_load(AtlasKind::Game).cloned()
    else {
        anyhow::bail!("no game atlas was registered");
    };
    let atlas = PackedAtlas {
        kind,
        pixels: PixelBuffer::from_raw(width, height, pixels)?,
        rects,
        source_bytes: stats.source_bytes,
    };
    write_atlas(&atlas, &args.out_dir, &args.name)
}

fn run_tiles(args: &TilesArgs) -> anyhow::Result<()> {
    let sheet = read_input(&args.input)?;
    let atlas = pack_front_tiles(&sheet)?;
    info!("{}", atlas.stats().summary());
    write_atlas(&atlas, &args.out_dir, &args.name)?;

    if args.packed {
        let mut packed = sheet;
        convert_tiles(&mut packed);
        let bin_path = args.out_dir.join(format!("{}.bin", args.name));
        fs::write(&bin_path, &packed)
            .with_context(|| format!("write {}", bin_path.display()))?;
        info!(tiles = atlas.rects.len(), out = %bin_path.display(), "wrote packed tiles");
    }
    Ok(())
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}

fn write_atlas(atlas: &PackedAtlas, out_dir: &Path, name: &str) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("create out_dir {}", out_dir.display()))?;

    let png_path = out_dir.join(format!("{}.png", name));
    save_png(&atlas.pixels, &DEFAULT_PALETTE, Some(0), &png_path)
        .with_context(|| format!("write {}", png_path.display()))?;

    let json_path = out_dir.join(format!("{}.json", name));
    let json = serde_json::to_string_pretty(&to_json(atlas))?;
    fs::write(&json_path, json).with_context(|| format!("write {}", json_path.display()))?;

    info!(
        frames = atlas.rects.len(),
        png = %png_path.display(),
        json = %json_path.display(),
        "wrote atlas"
    );
    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}

#[derive(Debug, Serialize)]
struct MergedConfig<'a> {
    atlas: &'a AtlasConfig,
    display: &'a DisplayConfig,
}

#[derive(Debug, Deserialize, Default)]
struct YamlConfig {
    max_width: Option<u32>,
    max_height: Option<u32>,
    max_sprites: Option<usize>,
    reduced: Option<bool>,
    /// Extra skipped table ranges as `[start, end]` pairs.
    skip: Option<Vec<[usize; 2]>>,
    display: Option<YamlDisplay>,
}

#[derive(Debug, Deserialize, Default)]
struct YamlDisplay {
    orig_width: Option<u32>,
    orig_height: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
    panel_height: Option<u32>,
    map_width: Option<u32>,
    map_height: Option<u32>,
    /// Replaces the whole font layout.
    font: Option<FontLayout>,
}

impl YamlConfig {
    fn merge(self, atlas: AtlasConfig, display: DisplayConfig) -> (AtlasConfig, DisplayConfig) {
        let display = match &self.display {
            Some(d) => d.apply(display),
            None => display,
        };
        (self.into_atlas_config(atlas), display)
    }

    fn into_atlas_config(self, mut cfg: AtlasConfig) -> AtlasConfig {
        if let Some(v) = self.max_width {
            cfg.max_width = v;
        }
        if let Some(v) = self.max_height {
            cfg.max_height = v;
        }
        if let Some(v) = self.max_sprites {
            cfg.max_sprites = v;
        }
        if let Some(true) = self.reduced {
            cfg.skip.extend(AtlasConfig::reduced_variant().skip);
        }
        if let Some(v) = self.skip {
            cfg.skip.extend(v.into_iter().map(|[start, end]| start..end));
        }
        cfg
    }
}

impl YamlDisplay {
    fn apply(&self, mut cfg: DisplayConfig) -> DisplayConfig {
        let fields = [
            (self.orig_width, &mut cfg.orig_width),
            (self.orig_height, &mut cfg.orig_height),
            (self.width, &mut cfg.width),
            (self.height, &mut cfg.height),
            (self.panel_height, &mut cfg.panel_height),
            (self.map_width, &mut cfg.map_width),
            (self.map_height, &mut cfg.map_height),
        ];
        for (v, slot) in fields {
            if let Some(v) = v {
                *slot = v;
            }
        }
        if let Some(font) = &self.font {
            cfg.font = font.clone();
        }
        cfg
    }
}
