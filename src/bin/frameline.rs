use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, filter::LevelFilter, fmt};

#[derive(Parser, Debug)]
#[command(name = "frameline", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a recorded callback stream into a timeline document.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input replay script JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output timeline JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Encoder config JSON (defaults apply when omitted).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed.
    #[arg(long, default_value_t = false)]
    compact: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match cli.cmd {
        Command::Replay(args) => cmd_replay(args),
    }
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => frameline::EncoderConfig::from_path(path)?,
        None => frameline::EncoderConfig::default(),
    };
    let script = frameline::ReplayScript::from_path(&args.in_path)?;
    let timeline = script
        .run(&config)
        .with_context(|| format!("replay '{}'", args.in_path.display()))?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    timeline.write_json(&args.out, !args.compact)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
