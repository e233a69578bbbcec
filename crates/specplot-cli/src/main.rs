//! Specplot CLI - speech analysis panels from a WAV file.

mod summary;

use anyhow::{Context, bail};
use clap::Parser;
use specplot_core::{AnalysisConfig, Analyzer};
use specplot_io::{
    RenderOptions, Segment, export_all, export_tracks_csv, export_waveform_wav, load_signal,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "specplot")]
#[command(author, version, about = "Speech spectrogram and feature tracks", long_about = None)]
struct Cli {
    /// Input WAV file
    #[arg(value_name = "WAV", required_unless_present = "dump_config")]
    wav: Option<PathBuf>,

    /// Start time in seconds
    #[arg(short, long, default_value_t = 0.0)]
    start: f64,

    /// End time in seconds (-1 = end of file)
    #[arg(short, long, default_value_t = -1.0, allow_negative_numbers = true)]
    end: f64,

    /// Output file: .pgm panels (plus companion files), .csv tracks or
    /// .wav conditioned waveform. Prints a summary when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Analysis configuration (TOML)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Total height of the panel image in pixels
    #[arg(long, default_value_t = 640)]
    height: usize,

    /// Pixel columns per frame in the panel image
    #[arg(long, default_value_t = 1)]
    scale: usize,

    /// Seconds between time ticks in the panel image (0 disables)
    #[arg(long, default_value_t = 0.1)]
    ticks: f32,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if cli.dump_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let Some(wav) = &cli.wav else {
        bail!("no input WAV file given");
    };

    let analyzer = Analyzer::new(config).context("invalid analysis configuration")?;

    let signal = load_signal(wav, analyzer.config().sample_rate)
        .with_context(|| format!("failed to load {}", wav.display()))?;
    let signal = Segment::from_bounds(cli.start, cli.end).apply(&signal)?;

    tracing::info!(
        file = %wav.display(),
        samples = signal.len(),
        duration_s = signal.duration_secs(),
        "analyzing"
    );
    let output = analyzer.analyze(&signal)?;

    let Some(path) = &cli.output else {
        summary::print(wav, &output);
        return Ok(());
    };

    match extension(path).as_deref() {
        Some("pgm") => {
            let options = RenderOptions::from_config(analyzer.config())
                .with_height(cli.height)
                .with_horizontal_scale(cli.scale)
                .with_tick_secs(cli.ticks);
            let files = export_all(&output, path.with_extension(""), &options)
                .with_context(|| format!("failed to export to {}", path.display()))?;
            for file in files.iter() {
                println!("Wrote {}", file.display());
            }
        }
        Some("csv") => {
            export_tracks_csv(&output, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        Some("wav") => {
            export_waveform_wav(&output.waveform, path)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote {}", path.display());
        }
        _ => bail!(
            "unsupported output '{}': use a .pgm, .csv or .wav extension",
            path.display()
        ),
    }

    Ok(())
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}
