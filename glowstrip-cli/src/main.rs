use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "glowstrip", version)]
struct Cli {
    /// Log session transitions and skips to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one tick of a scene script as a PNG.
    Frame(FrameArgs),
    /// Validate a scene script and print a JSON summary.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Logic tick to render (defaults to the scene's last tick).
    #[arg(long)]
    tick: Option<u64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Check(args) => cmd_check(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let scene = glowstrip::Scene::from_path(&args.in_path)?;
    let tick = args.tick.unwrap_or_else(|| scene.last_tick());
    let out = scene
        .render(tick)
        .with_context(|| format!("render tick {tick}"))?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let mut data = out.frame.data;
    if out.frame.premultiplied {
        unpremultiply_in_place(&mut data);
    }
    image::save_buffer_with_format(
        &args.out,
        &data,
        out.frame.width,
        out.frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} (tick {tick}, {} drawn, {} skipped, {} failed)",
        args.out.display(),
        out.report.drawn,
        out.report.skipped,
        out.report.failed
    );
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let scene = glowstrip::Scene::from_path(&args.in_path)?;
    let summary = serde_json::json!({
        "canvas": scene.canvas,
        "sessions": scene.sessions.len(),
        "arcs": scene.arcs.len(),
        "last_tick": scene.last_tick(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn unpremultiply_in_place(data: &mut [u8]) {
    for px in data.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            let straight = (u16::from(*c) * 255 + a / 2) / a;
            *c = straight.min(255) as u8;
        }
    }
}
