use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "celebration", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate confetti and fireworks and write a looping GIF.
    Gif(GifArgs),
    /// Write the rock/paper/scissors icon PNGs.
    Icons(IconsArgs),
    /// Print the default scene configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct GifArgs {
    /// Output GIF path.
    #[arg(long, default_value = "celebration.gif")]
    out: PathBuf,

    /// Scene configuration JSON; omitted fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct IconsArgs {
    /// Directory the PNGs are written into.
    #[arg(long, default_value = "images")]
    out_dir: PathBuf,
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
        Command::Gif(args) => cmd_gif(args),
        Command::Icons(args) => cmd_icons(args),
        Command::Config => cmd_config(),
    }
}

fn cmd_gif(args: GifArgs) -> anyhow::Result<()> {
    let cfg = match &args.config {
        Some(path) => celebration::CelebrationConfig::load(path)?,
        None => celebration::CelebrationConfig::default(),
    };

    let summary = celebration::generate_gif(cfg, &args.out)
        .with_context(|| format!("generate '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames, {} bursts)",
        args.out.display(),
        summary.frames,
        summary.totals.explosions
    );
    Ok(())
}

fn cmd_icons(args: IconsArgs) -> anyhow::Result<()> {
    let written = celebration::icons::write_icons(&args.out_dir)?;
    for path in written {
        eprintln!("wrote {}", path.display());
    }
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&celebration::CelebrationConfig::default())
        .context("serialize default config")?;
    println!("{json}");
    Ok(())
}
