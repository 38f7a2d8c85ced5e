use std::fs::File;
use std::io::{stdout, BufWriter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use earth_defense::terminal::TerminalPresenter;
use earth_defense::{GameConfig, ScreenController};

#[derive(Parser, Debug)]
#[command(name = "earth_defense", about = "Defend Earth from descending enemy ships")]
struct Args {
    /// TOML file overriding the default tuning.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed the RNG for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Where to write logs; the terminal itself is taken by the game.
    #[arg(long, default_value = "earth_defense.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("earth_defense=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_file)?;

    let config = match &args.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::info!(seed = ?args.seed, "starting earth defense");

    let presenter = TerminalPresenter::open(BufWriter::new(stdout()))
        .context("failed to set up the terminal")?;

    // If setup fails the presenter is dropped, which restores the terminal.
    let result = ScreenController::new(presenter, config, rng).and_then(|mut controller| {
        let outcome = controller.run();
        controller.presenter_mut().finish(outcome)
    });

    if let Err(err) = &result {
        tracing::error!(%err, "game aborted");
    } else {
        tracing::info!("bye");
    }
    result.context("game aborted")
}
