use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "squish", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one stimulus as a JPEG.
    Stimulus(StimulusArgs),
    /// Render the full parameter sweep.
    Sweep(SweepArgs),
    /// Print the degradation plan for a step count.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct StimulusArgs {
    /// 224x224 background image.
    #[arg(long)]
    background: PathBuf,

    /// TrueType/OpenType font file.
    #[arg(long)]
    font: PathBuf,

    /// Target letter.
    #[arg(long)]
    letter: char,

    /// Flanker letter.
    #[arg(long)]
    flanker: char,

    /// Font size in px (20 or 26).
    #[arg(long, default_value_t = 26)]
    size: u32,

    /// Target color, `rgb(r, g, b)` or `#rrggbb`.
    #[arg(long, default_value = "rgb(200, 200, 200)")]
    target_color: String,

    /// Flanker color, `rgb(r, g, b)` or `#rrggbb`.
    #[arg(long, default_value = "rgb(200, 200, 200)")]
    flanker_color: String,

    /// Flanker angle in degrees; pass twice for a flanker pair.
    #[arg(long = "angle", required = true)]
    angles: Vec<f64>,

    /// Target-to-flanker distance in px.
    #[arg(long)]
    radius: f64,

    /// Number of degradation steps.
    #[arg(long, default_value_t = 20)]
    steps: usize,

    /// Resampling filter.
    #[arg(long, value_enum, default_value_t = squish::ResampleFilter::Nearest)]
    filter: squish::ResampleFilter,

    /// JPEG quality (1-100).
    #[arg(long, default_value_t = squish::DEFAULT_JPEG_QUALITY)]
    quality: u8,

    /// Output JPEG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SweepArgs {
    /// Sweep configuration JSON; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the background image path.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Override the font path.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Override the output root directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Count images without rendering anything.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Number of degradation steps.
    #[arg(long, default_value_t = 20)]
    steps: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Stimulus(args) => cmd_stimulus(args),
        Command::Sweep(args) => cmd_sweep(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn cmd_stimulus(args: StimulusArgs) -> anyhow::Result<()> {
    let spec = squish::StimulusSpec {
        letter: args.letter,
        flanker: args.flanker,
        size: squish::FontSize::try_from(args.size)?,
        target_color: args.target_color.parse()?,
        flanker_color: args.flanker_color.parse()?,
        arrangement: squish::Arrangement::from_angles(&args.angles)?,
        radius: args.radius,
        degrade: squish::DegradeOpts {
            steps: args.steps,
            filter: args.filter,
        },
    };

    let background = squish::load_background(&args.background)?;
    let font = squish::FontFace::from_path(&args.font)?;
    let img = squish::render_stimulus(&background, &font, &spec)?;
    squish::save_jpeg(&img, &args.out, args.quality)
        .with_context(|| format!("write jpeg '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sweep(args: SweepArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => squish::SweepConfig::from_path(path)?,
        None => squish::SweepConfig::default(),
    };
    if let Some(p) = args.background {
        cfg.background = p;
    }
    if let Some(p) = args.font {
        cfg.font = p;
    }
    if let Some(p) = args.out {
        cfg.out_dir = p;
    }
    cfg.validate()?;

    let opts = squish::SweepOpts {
        threads: args.threads,
        dry_run: args.dry_run,
    };

    let stats = if args.dry_run {
        // Nothing is drawn, so skip loading inputs that may not exist yet.
        let placeholder = image::RgbImage::new(squish::STIMULUS_DIM, squish::STIMULUS_DIM);
        squish::run_sweep(&cfg, &placeholder, &NoGlyphs, &opts)?
    } else {
        let background = squish::load_background(&cfg.background)?;
        let font = squish::FontFace::from_path(&cfg.font)?;
        squish::run_sweep(&cfg, &background, &font, &opts)?
    };

    eprintln!(
        "{} targets, {} images planned, {} written under {}",
        stats.targets,
        stats.images_planned,
        stats.images_written,
        cfg.out_dir.display()
    );
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let plan = squish::DegradationPlan::new(args.steps, squish::STIMULUS_DIM)?;
    println!("step  scalar    scale_px  crop_px  paste_at");
    for i in 0..plan.steps() {
        let (off, _) = plan.paste_offset(i);
        println!(
            "{:>4}  {:<8.6}  {:>8}  {:>7}  {:>8}",
            i, plan.scalars[i], plan.scale_px[i], plan.crop_px[i], off
        );
    }
    Ok(())
}

struct NoGlyphs;

impl squish::GlyphSource for NoGlyphs {
    fn rasterize(&self, ch: char, _px: f32) -> squish::SquishResult<squish::GlyphBitmap> {
        Err(squish::SquishError::font(format!(
            "dry run does not rasterize {ch:?}"
        )))
    }
}
