//! blocktui — minimal falling-block puzzle in the terminal.

mod app;
mod block;
mod engine;
mod field;
mod input;
mod theme;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

/// Which loop drives the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LoopMode {
    /// Poll keys and apply gravity on a fixed interval.
    #[default]
    Gravity,
    /// Block on key reads; the block only moves when a key is pressed.
    Input,
}

/// Options derived from CLI that affect game timing and start-up.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub gravity_interval: Duration,
    pub poll_interval: Duration,
    pub loop_mode: LoopMode,
    pub seed: Option<u64>,
}

impl GameConfig {
    fn from_args(args: &Args) -> Self {
        Self {
            gravity_interval: Duration::from_millis(args.gravity_ms),
            poll_interval: Duration::from_millis(args.poll_ms),
            loop_mode: args.mode,
            seed: args.seed,
        }
    }
}

fn init_logging(path: &Path, level: tracing::Level) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = args.log_file.as_deref() {
        init_logging(path, args.log_level)?;
    }
    let theme = theme::Theme::load(args.theme.as_deref(), args.ascii).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "theme not loaded, using defaults");
        theme::Theme::base(args.ascii)
    });
    let config = GameConfig::from_args(&args);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    tracing::debug!(?config, "configuration");
    let mut app = App::new(config, theme, &mut rng);
    app.run()?;
    Ok(())
}

/// Minimal falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blocktui",
    version,
    about = "Minimal falling-block puzzle in the terminal.",
    long_about = "blocktui drops a single block into a walled field. Steer and rotate it \
        until it comes to rest.\n\n\
        CONTROLS:\n  a / Left    Move left\n  d / Right   Move right\n  s / Down    Move down\n  \
        any other   Rotate\n  Ctrl-C      Quit"
)]
pub struct Args {
    /// Loop: gravity (timed fall + polled keys) or input (moves only on key presses).
    #[arg(short, long, default_value = "gravity")]
    pub mode: LoopMode,

    /// Gravity interval in milliseconds.
    #[arg(long, default_value = "1000", value_name = "MS")]
    pub gravity_ms: u64,

    /// Sleep between loop iterations in milliseconds.
    #[arg(long, default_value = "100", value_name = "MS")]
    pub poll_ms: u64,

    /// Seed for shape selection (random if not set).
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]=\"value\"): glyphs empty/hard/falling, colours.
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<PathBuf>,

    /// ASCII glyphs instead of full-width characters.
    #[arg(long)]
    pub ascii: bool,

    /// Write logs to this file (nothing is logged otherwise).
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level: error, warn, info, debug or trace.
    #[arg(long, default_value = "info", value_name = "LEVEL")]
    pub log_level: tracing::Level,
}
