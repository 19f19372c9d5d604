use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};

use particle_field::{
    CpuRenderer, FieldConfig, FieldSurface, FrameLoop, FrameRGBA, IconArt, InitState, LoopExit,
    LoopOpts, ManualClock, Point, RenderBackend, RenderSettings, RepelConfig, SceneConfig,
    SceneSignals, SurfaceSize,
};

const CLEAR_RGBA: [u8; 4] = [18, 20, 28, 255];

#[derive(Parser, Debug)]
#[command(name = "particle-field", version)]
struct Cli {
    /// Log at DEBUG instead of INFO.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a scene for a number of ticks and write the last frame as a PNG.
    Frame(FrameArgs),
    /// Sample an icon set into design target points and plot them as a PNG.
    Targets(TargetsArgs),
    /// Run the frame loop offline and write a numbered PNG sequence.
    Sequence(SequenceArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Built-in scene.
    #[arg(long, value_enum, conflicts_with = "config")]
    preset: Option<Preset>,

    /// Scene config JSON (`{"morph": {...}}` or `{"repel": {...}}`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fix the RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 500)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 500)]
    height: u32,
}

#[derive(Args, Debug)]
struct InteractionArgs {
    /// Turn hover on from this tick (0-based) onwards.
    #[arg(long)]
    hover_from: Option<u64>,

    /// Pointer position `X,Y` for repel scenes.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Point>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    interaction: InteractionArgs,

    /// Ticks to simulate before capturing.
    #[arg(long, default_value_t = 120)]
    ticks: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TargetsArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of target points (defaults to the config's design count).
    #[arg(long)]
    count: Option<usize>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(flatten)]
    interaction: InteractionArgs,

    /// Number of frames to write.
    #[arg(long, default_value_t = 60)]
    frames: u64,

    /// Output directory for `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    Supplier,
    Warehouse,
    Architecture,
    Cta,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Targets(args) => cmd_targets(args),
        Command::Sequence(args) => cmd_sequence(args),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x '{x}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y '{y}': {e}"))?;
    Ok(Point::new(x, y))
}

/// Resolve the scene and the directory external artwork is relative to.
fn load_scene(args: &SceneArgs) -> anyhow::Result<(SceneConfig, PathBuf)> {
    let (mut cfg, root) = match (&args.config, args.preset) {
        (Some(path), _) => {
            let cfg = SceneConfig::from_path(path)?;
            let root = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            (cfg, root)
        }
        (None, preset) => {
            let cfg = match preset.unwrap_or(Preset::Supplier) {
                Preset::Supplier => SceneConfig::Morph(FieldConfig::supplier()),
                Preset::Warehouse => SceneConfig::Morph(FieldConfig::warehouse()),
                Preset::Architecture => SceneConfig::Morph(FieldConfig::architecture()),
                Preset::Cta => SceneConfig::Repel(RepelConfig::default()),
            };
            (cfg, PathBuf::from("."))
        }
    };
    if let Some(seed) = args.seed {
        cfg = match cfg {
            SceneConfig::Morph(c) => SceneConfig::Morph(c.with_seed(seed)),
            SceneConfig::Repel(c) => SceneConfig::Repel(c.with_seed(seed)),
        };
    }
    Ok((cfg, root))
}

fn surface_size(args: &SceneArgs) -> SurfaceSize {
    SurfaceSize::new(args.width, args.height)
}

fn write_png(path: &Path, width: u32, height: u32, rgba: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn write_frame(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    write_png(path, frame.width, frame.height, &frame.to_straight_rgba8())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (cfg, root) = load_scene(&args.scene)?;
    let size = surface_size(&args.scene);
    let signals = SceneSignals::default();
    if let Some(p) = args.interaction.pointer {
        signals.pointer.move_to(p);
    }

    let mut scene = cfg.build(&root, &signals)?;
    if scene.start(size)? == InitState::Deferred {
        anyhow::bail!("surface {}x{} has zero area", size.width, size.height);
    }
    for tick in 0..args.ticks {
        if args.interaction.hover_from.is_some_and(|h| tick >= h) {
            signals.hover.set(true);
        }
        scene.step();
    }

    let mut renderer = CpuRenderer::new(RenderSettings {
        clear_rgba: Some(CLEAR_RGBA),
    });
    let frame = renderer.render_scene(scene.as_ref(), size)?;
    write_frame(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_targets(args: TargetsArgs) -> anyhow::Result<()> {
    let (cfg, root) = load_scene(&args.scene)?;
    let SceneConfig::Morph(cfg) = cfg else {
        anyhow::bail!("targets needs a morph scene; repel scenes have no icon artwork");
    };
    let size = surface_size(&args.scene);
    let art = IconArt::load(&cfg.icons, &root)?;
    let count = args.count.unwrap_or(cfg.design_count);
    let mut rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mask = art.rasterize(size)?;
    let candidates = particle_field::scan_candidates(&mask, cfg.alpha_threshold).len();
    let points =
        particle_field::generate_design_points(&art, size, count, cfg.alpha_threshold, &mut rng)?;

    let mut img = image::RgbaImage::from_pixel(size.width, size.height, image::Rgba(CLEAR_RGBA));
    let ink = image::Rgba([cfg.color.r, cfg.color.g, cfg.color.b, 255]);
    for p in &points {
        let (x, y) = (p.x.round(), p.y.round());
        if x >= 0.0 && y >= 0.0 && x < size.w() && y < size.h() {
            img.put_pixel(x as u32, y as u32, ink);
        }
    }
    write_png(&args.out, size.width, size.height, img.as_raw())?;

    println!("candidates={candidates} targets={}", points.len());
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

/// Writes each presented frame as a numbered PNG and plays back the scripted hover.
struct PngSequence {
    dir: PathBuf,
    size: SurfaceSize,
    written: u64,
    hover_from: Option<u64>,
    signals: SceneSignals,
}

impl FieldSurface for PngSequence {
    fn size(&self) -> Option<SurfaceSize> {
        Some(self.size)
    }

    fn present(&mut self, frame: &FrameRGBA) -> particle_field::FieldResult<()> {
        let path = self.dir.join(format!("frame_{:05}.png", self.written));
        write_frame(&path, frame)?;
        self.written += 1;
        if self.hover_from.is_some_and(|h| self.written >= h) {
            self.signals.hover.set(true);
        }
        Ok(())
    }
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let (cfg, root) = load_scene(&args.scene)?;
    let signals = SceneSignals::default();
    if let Some(p) = args.interaction.pointer {
        signals.pointer.move_to(p);
    }
    if args.interaction.hover_from == Some(0) {
        signals.hover.set(true);
    }
    let size = surface_size(&args.scene);
    if size.is_zero_area() {
        anyhow::bail!("surface {}x{} has zero area", size.width, size.height);
    }
    let opts = LoopOpts {
        max_frames: Some(args.frames),
        ..LoopOpts::for_scene(&cfg)
    };

    let mut scene = cfg.build(&root, &signals)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let mut surface = PngSequence {
        dir: args.out_dir.clone(),
        size,
        written: 0,
        hover_from: args.interaction.hover_from,
        signals: signals.clone(),
    };
    let mut renderer = CpuRenderer::new(RenderSettings {
        clear_rgba: Some(CLEAR_RGBA),
    });
    let mut frame_loop = FrameLoop::new(
        ManualClock::default(),
        particle_field::CancelToken::new(),
        opts,
    );

    let stats = frame_loop.run(scene.as_mut(), &mut surface, &mut renderer);
    match stats.exit {
        LoopExit::FrameLimit | LoopExit::Cancelled => {}
        LoopExit::SurfaceUnavailable => anyhow::bail!("surface unavailable"),
        LoopExit::Failed(msg) => anyhow::bail!("animation failed: {msg}"),
    }

    eprintln!(
        "wrote {} frames to {} (virtual time {:.2}s)",
        stats.frames,
        args.out_dir.display(),
        frame_loop.clock().elapsed().as_secs_f64()
    );
    Ok(())
}
