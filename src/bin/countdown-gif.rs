use std::{
    fs::File,
    io::{BufReader, BufWriter, Read as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "countdown-gif", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the animated countdown GIF.
    Render(RenderArgs),
    /// Render the first frame as a PNG preview.
    Frame(FrameArgs),
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// Request JSON; flags given alongside it override its fields.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Target time (e.g. `2026-12-31T23:59:59Z`, `2026-12-31 18:00`, `2026-12-31`).
    #[arg(long)]
    time: Option<String>,

    /// Canvas width in pixels (clamped to 150..=600).
    #[arg(long)]
    width: Option<u32>,

    /// Canvas height in pixels (clamped to 150..=600).
    #[arg(long)]
    height: Option<u32>,

    /// Text color, `RRGGBB`.
    #[arg(long)]
    color: Option<String>,

    /// Background color, `RRGGBB`.
    #[arg(long)]
    bg: Option<String>,

    /// Number of one-second frames (clamped to 1..=90).
    #[arg(long)]
    frames: Option<u32>,

    /// Countdown template, e.g. `[%d:%d days ]%H:%M:%S`.
    #[arg(long)]
    format: Option<String>,

    /// Text shown once the target has passed.
    #[arg(long)]
    message: Option<String>,

    /// Font file (defaults to $COUNTDOWN_GIF_FONT, then common system fonts).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Shades between background and text color (clamped to 4..=32).
    #[arg(long, default_value_t = 8)]
    antialias: u8,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    request: RequestArgs,

    /// Output GIF path, or `-` for stdout.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    request: RequestArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_request_json(path: &Path) -> anyhow::Result<countdown_gif::CountdownRequest> {
    let f = File::open(path).with_context(|| format!("open request '{}'", path.display()))?;
    let mut s = String::new();
    BufReader::new(f)
        .read_to_string(&mut s)
        .with_context(|| format!("read request '{}'", path.display()))?;
    countdown_gif::CountdownRequest::from_json_str(&s).with_context(|| "parse request JSON")
}

fn build_request(
    args: &RequestArgs,
) -> anyhow::Result<(countdown_gif::CountdownRequest, countdown_gif::RenderOptions)> {
    let mut req = match (&args.in_path, &args.time) {
        (Some(path), _) => read_request_json(path)?,
        (None, Some(time)) => countdown_gif::CountdownRequest::new(time.clone()),
        (None, None) => anyhow::bail!("--time is required (or pass --in request.json)"),
    };

    if let Some(time) = &args.time {
        req.time = time.clone();
    }
    if let Some(width) = args.width {
        req.width = width;
    }
    if let Some(height) = args.height {
        req.height = height;
    }
    if let Some(color) = &args.color {
        req.color = color.clone();
    }
    if let Some(bg) = &args.bg {
        req.bg = bg.clone();
    }
    if let Some(frames) = args.frames {
        req.frames = frames;
    }
    if let Some(format) = &args.format {
        req.format = format.clone();
    }
    if let Some(message) = &args.message {
        req.message = message.clone();
    }

    let opts = countdown_gif::RenderOptions {
        antialias_levels: args.antialias,
        font_path: args.font.clone(),
    };
    Ok((req, opts))
}

/// Resolve the session and font before any output is created.
fn prepare(
    args: &RequestArgs,
) -> anyhow::Result<(countdown_gif::EncodeSession, countdown_gif::CpuTextRasterizer)> {
    let (req, opts) = build_request(args)?;
    let session = countdown_gif::EncodeSession::from_request(&req, &opts, chrono::Utc::now())?;

    let font = countdown_gif::FontSource::discover(opts.font_path.as_deref())?;
    let rasterizer = countdown_gif::CpuTextRasterizer::new(&font)
        .with_context(|| format!("load font '{}'", font.origin()))?;
    tracing::debug!(font = font.origin(), family = rasterizer.family_name(), "font loaded");
    Ok((session, rasterizer))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (session, rasterizer) = prepare(&args.request)?;

    let stats = if args.out.as_os_str() == "-" {
        let sink = countdown_gif::WriterSink::new(BufWriter::new(std::io::stdout()));
        countdown_gif::render_session(session, rasterizer, sink)?
    } else {
        ensure_parent_dir(&args.out)?;
        let f = File::create(&args.out)
            .with_context(|| format!("create output '{}'", args.out.display()))?;
        let sink = countdown_gif::WriterSink::new(BufWriter::new(f));
        let stats = countdown_gif::render_session(session, rasterizer, sink)?;
        eprintln!(
            "wrote {} ({} frames, {} bytes)",
            args.out.display(),
            stats.frames,
            stats.bytes
        );
        stats
    };

    tracing::info!(frames = stats.frames, bytes = stats.bytes, "done");
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (session, rasterizer) = prepare(&args.request)?;

    let frame = countdown_gif::preview_frame(&session, rasterizer)?;
    let rgb = frame.to_rgb8(session.palette())?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &rgb,
        frame.width,
        frame.height,
        image::ColorType::Rgb8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
