/// OutRun Player: desktop front-end for the racer simulation core
///
/// Architecture:
///   engine/  Window, input polling, rasterizer, music
///   score    Best-lap persistence

mod engine;
mod score;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use outrun_common::LoadedOptions;

#[derive(Parser, Debug)]
#[command(name = "outrun", version, about = "Pseudo-3D sprite-scaling racer")]
struct Cli {
    /// Race options file (.json or .toml); missing file means defaults
    #[arg(short, long, default_value = "options.json")]
    options: PathBuf,

    /// Seed for scenery, traffic and the engine bounce
    #[arg(long)]
    seed: Option<u64>,

    /// Directory holding score.json
    #[arg(long, default_value = ".")]
    score_dir: PathBuf,

    /// Music files, cycled with the 1 key
    #[arg(short, long)]
    music: Vec<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("outrun=debug".parse()?))
        .init();

    tracing::info!("OutRun Player v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();

    let options = LoadedOptions::from_file(&cli.options).unwrap_or_else(|e| {
        tracing::warn!("Failed to load options from {}: {}; using defaults", cli.options.display(), e);
        LoadedOptions::default()
    });

    let seed = cli.seed.unwrap_or_else(rand::random);
    tracing::info!("World seed: {}", seed);

    engine::run(engine::EngineConfig {
        options_path: cli.options,
        options,
        seed,
        score_dir: cli.score_dir,
        music: cli.music,
    })
}
