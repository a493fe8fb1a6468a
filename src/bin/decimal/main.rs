//! decimal - play the decimal keyboard in a terminal
//!
//! Run with: cargo run -- --scale 5 --zoom 2
//!
//! Click a key to sound it, drag sideways to slide, let go to release.

mod app;
mod ui;

use std::{fs::File, path::Path, path::PathBuf, sync::Mutex};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use decimal_synth::{KeyboardConfig, Scale, Waveform, ZoomLevel};
use tracing_subscriber::EnvFilter;

use app::App;

#[derive(Parser, Debug)]
#[command(version, about = "Microtonal decimal keyboard with glissando")]
struct Cli {
    /// Starting scale (octave band), 1 to 10.
    #[arg(short, long, default_value_t = Scale::default())]
    scale: Scale,
    /// Oscillator waveform: sine, square, triangle or sawtooth.
    #[arg(short, long, default_value_t = Waveform::default())]
    waveform: Waveform,
    /// Subdivisions per tone: 1, 2, 5 or 10.
    #[arg(short, long, default_value_t = ZoomLevel::default())]
    zoom: ZoomLevel,
    /// Write logs to this file (the terminal belongs to the UI).
    #[arg(long)]
    log: Option<PathBuf>,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    if let Some(path) = &cli.log {
        init_logging(path)?;
    }

    let config = KeyboardConfig::new()
        .scale(cli.scale)
        .waveform(cli.waveform)
        .zoom(cli.zoom);

    App::new(config).run()
}

fn init_logging(path: &Path) -> EyreResult<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
