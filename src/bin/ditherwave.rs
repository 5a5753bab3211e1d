use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use ditherwave::{
    Canvas, DitherResult, EngineOpts, EngineOptsBuilder, FrameRGBA, FrameSink, OfflineTarget,
    Point, Preset, Rgb8,
};

#[derive(Parser, Debug)]
#[command(name = "ditherwave", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render consecutive frames as numbered PNGs.
    Sequence(SequenceArgs),
    /// Print preset options as JSON.
    Presets(PresetsArgs),
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    /// Section preset to start from.
    #[arg(long, default_value_t = Preset::Hero)]
    preset: Preset,

    /// Options JSON; replaces the preset.
    #[arg(long = "opts")]
    opts_path: Option<PathBuf>,

    /// Container width in CSS pixels.
    #[arg(long, default_value_t = 320.0)]
    width: f64,

    /// Container height in CSS pixels.
    #[arg(long, default_value_t = 180.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Wave randomization seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Foreground color (`#rrggbb` or `#rgb`).
    #[arg(long)]
    fg: Option<Rgb8>,

    /// Background color (`#rrggbb` or `#rgb`).
    #[arg(long)]
    bg: Option<Rgb8>,

    /// Hover position as normalized `x,y`.
    #[arg(long, value_parser = parse_pointer)]
    pointer: Option<Point>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Engine time in seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Number of frames.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Output directory for `frame_NNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct PresetsArgs {
    /// Only print this preset.
    #[arg(long)]
    name: Option<Preset>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Presets(args) => cmd_presets(args),
    }
}

fn parse_pointer(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected \"x,y\", got \"{s}\""))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid coordinate \"{v}\": {e}"))
    };
    Ok(Point::new(parse(x)?, parse(y)?))
}

fn resolve(args: &SurfaceArgs) -> anyhow::Result<(EngineOpts, OfflineTarget)> {
    let base = match &args.opts_path {
        Some(path) => EngineOpts::from_path(path)?,
        None => args.preset.opts(),
    };
    let palette = base.palette;
    let mut b = EngineOptsBuilder::from(base);
    if let Some(seed) = args.seed {
        b = b.seed(seed);
    }
    if args.fg.is_some() || args.bg.is_some() {
        b = b.palette(
            args.fg.unwrap_or(palette.foreground),
            args.bg.unwrap_or(palette.background),
        );
    }
    let opts = b.build().context("invalid engine options")?;

    let mut target = OfflineTarget::new(args.width, args.height).with_device_pixel_ratio(args.dpr);
    if let Some(p) = args.pointer {
        target = target.with_pointer(p);
    }
    Ok((opts, target))
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (opts, target) = resolve(&args.surface)?;
    let frame = ditherwave::render_frame(&opts, target, args.time)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    write_png(&args.out, &frame)?;

    eprintln!(
        "wrote {} ({}x{}, fingerprint {:016x})",
        args.out.display(),
        frame.width,
        frame.height,
        frame.fingerprint()
    );
    Ok(())
}

struct PngDirSink {
    dir: PathBuf,
    written: u64,
}

impl FrameSink for PngDirSink {
    fn begin(&mut self, _canvas: Canvas) -> DitherResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        Ok(())
    }

    fn push_frame(&mut self, index: u64, _elapsed: f64, frame: &FrameRGBA) -> DitherResult<()> {
        let path = self.dir.join(format!("frame_{index:04}.png"));
        write_png(&path, frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> DitherResult<()> {
        Ok(())
    }
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let (opts, target) = resolve(&args.surface)?;
    let mut sink = PngDirSink {
        dir: args.out_dir,
        written: 0,
    };
    let stats = ditherwave::render_frames(&opts, target, args.frames, &mut sink)?;
    eprintln!(
        "wrote {} frames to {} ({} skipped)",
        sink.written,
        sink.dir.display(),
        stats.frames_skipped
    );
    Ok(())
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    let out = match args.name {
        Some(p) => serde_json::to_string_pretty(&p.opts())?,
        None => {
            let mut all = serde_json::Map::new();
            for p in Preset::ALL {
                all.insert(p.name().to_owned(), serde_json::to_value(p.opts())?);
            }
            serde_json::to_string_pretty(&all)?
        }
    };
    println!("{out}");
    Ok(())
}
