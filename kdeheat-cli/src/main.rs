use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use kdeheat::{
    AnimateOpts, Colormap, CropBox, FrameThreading, GifOpts, HeatmapParams, Interpolation,
    TraceCtx,
};

#[derive(Parser, Debug)]
#[command(name = "kdeheat", version, about = "Kernel density heatmaps from point clouds")]
struct Cli {
    /// Log debug details.
    #[arg(long, short, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a heatmap PNG from a JSON file of points.
    Generate(GenerateArgs),
    /// Render a random-walk heatmap animation as a GIF.
    Animate(AnimateArgs),
    /// Composite a heatmap over a background image.
    Overlay(OverlayArgs),
    /// Assemble image files into an animated GIF.
    Gif(GifArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Input JSON: an array of {"x": .., "y": ..} objects.
    #[arg(long, short)]
    input: PathBuf,

    /// Output image path (use .png to keep transparency).
    #[arg(long, short)]
    output: PathBuf,

    /// Grid cell size in data units [default: 1.0].
    #[arg(long)]
    grid_size: Option<f64>,

    /// Kernel bandwidth in data units [default: 10.0].
    #[arg(long)]
    bandwidth: Option<f64>,

    /// Colormap name [default: jet].
    #[arg(long)]
    colormap: Option<Colormap>,

    /// Interpolation: nearest, bilinear, bicubic or gaussian [default: gaussian].
    #[arg(long)]
    interpolation: Option<Interpolation>,

    /// Pixels per grid cell [default: 4].
    #[arg(long)]
    pixels_per_cell: Option<u32>,

    /// JSON file with heatmap parameters; flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct AnimateArgs {
    /// Output GIF path.
    #[arg(long, short)]
    output: PathBuf,

    /// Number of frames.
    #[arg(long, default_value_t = 100)]
    frames: usize,

    /// Number of points in the random walk.
    #[arg(long, default_value_t = 100)]
    points: usize,

    /// Background image every frame is composited over.
    #[arg(long)]
    background: Option<PathBuf>,

    /// Crop box as left,top,right,bottom.
    #[arg(long)]
    crop: Option<CropBox>,

    /// Frame duration in milliseconds.
    #[arg(long, default_value_t = 20)]
    duration: u32,

    /// Grid cell size in data units.
    #[arg(long, default_value_t = 10.0)]
    grid_size: f64,

    /// Kernel bandwidth in data units.
    #[arg(long, default_value_t = 10.0)]
    bandwidth: f64,

    /// Random seed; a fresh one is drawn and logged when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Render frames in parallel.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Keep the rendered PNG frames in this directory.
    #[arg(long)]
    keep_frames: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct OverlayArgs {
    /// Background image.
    #[arg(long)]
    background: PathBuf,

    /// Heatmap image with an alpha channel.
    #[arg(long)]
    heatmap: PathBuf,

    /// Output image path.
    #[arg(long, short)]
    output: PathBuf,

    /// Crop box as left,top,right,bottom.
    #[arg(long)]
    crop: Option<CropBox>,
}

#[derive(Args, Debug)]
struct GifArgs {
    /// Frame file pattern, e.g. "frames/frame_*.png".
    #[arg(long, short)]
    input: String,

    /// Output GIF path.
    #[arg(long, short)]
    output: PathBuf,

    /// Frame duration in milliseconds.
    #[arg(long, default_value_t = 20)]
    duration: u32,

    /// Loop count; 0 loops forever.
    #[arg(long = "loop", default_value_t = 0)]
    loop_count: u16,

    /// Palette quality from 1 to 100.
    #[arg(long, default_value_t = 50)]
    quality: u8,

    /// Merge identical consecutive frames.
    #[arg(long, default_value_t = false)]
    optimize: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    let ctx = TraceCtx::root();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args, &ctx),
        Command::Animate(args) => cmd_animate(args, &ctx),
        Command::Overlay(args) => cmd_overlay(args, &ctx),
        Command::Gif(args) => cmd_gif(args, &ctx),
    }
}

fn init_tracing(verbose: bool, quiet: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else if quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_generate(args: GenerateArgs, ctx: &TraceCtx) -> anyhow::Result<()> {
    let mut params = match &args.config {
        Some(path) => HeatmapParams::from_json_file(path)?,
        None => HeatmapParams::default(),
    };
    if let Some(v) = args.grid_size {
        params.grid_size = v;
    }
    if let Some(v) = args.bandwidth {
        params.bandwidth = v;
    }
    if let Some(v) = args.colormap {
        params.colormap = v;
    }
    if let Some(v) = args.interpolation {
        params.interpolation = v;
    }
    if let Some(v) = args.pixels_per_cell {
        params.pixels_per_cell = v;
    }
    let resolved = serde_json::to_string(&params)?;
    tracing::debug!(params = %resolved, "heatmap parameters");

    kdeheat::generate_from_file(&args.input, &params, &args.output, ctx)?;
    eprintln!("wrote {}", args.output.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs, ctx: &TraceCtx) -> anyhow::Result<()> {
    let defaults = AnimateOpts::default();
    let opts = AnimateOpts {
        frames: args.frames,
        points: args.points,
        seed: args.seed,
        heatmap: HeatmapParams {
            grid_size: args.grid_size,
            bandwidth: args.bandwidth,
            ..defaults.heatmap
        },
        background: args.background,
        crop: args.crop,
        gif: GifOpts {
            frame_delay_ms: args.duration,
            ..GifOpts::default()
        },
        threading: FrameThreading {
            parallel: args.parallel,
            threads: args.threads,
        },
        keep_frames: args.keep_frames,
    };
    let summary = kdeheat::animate_random_walk(&args.output, &opts, ctx)?;
    eprintln!(
        "wrote {} ({} frames)",
        args.output.display(),
        summary.gif_frames
    );
    Ok(())
}

fn cmd_overlay(args: OverlayArgs, ctx: &TraceCtx) -> anyhow::Result<()> {
    kdeheat::overlay_images(
        &args.background,
        &args.heatmap,
        &args.output,
        args.crop,
        ctx,
    )?;
    eprintln!("wrote {}", args.output.display());
    Ok(())
}

fn cmd_gif(args: GifArgs, ctx: &TraceCtx) -> anyhow::Result<()> {
    let opts = GifOpts {
        frame_delay_ms: args.duration,
        loop_count: args.loop_count,
        quality: args.quality,
        optimize: args.optimize,
    };
    let frames = kdeheat::create_gif_from_pattern(&args.input, &args.output, &opts, ctx)?;
    eprintln!("wrote {} ({frames} frames)", args.output.display());
    Ok(())
}
