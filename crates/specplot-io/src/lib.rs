//! File I/O for the Specplot speech analyzer.
//!
//! This crate provides:
//!
//! - **Loading**: [`read_wav`] decodes any PCM or float WAV to mono,
//!   [`load_signal`] additionally resamples to the analysis rate
//! - **Resampling**: [`resample_to`] for rational rate conversion
//! - **Segments**: [`Segment`] cuts a `[start, end)` window out of a signal
//! - **Export**: CSV tracks, PGM spectrogram and float WAV waveform, plus
//!   [`render_panels`] for the stacked five-panel image
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use specplot_core::{AnalysisConfig, Analyzer};
//! use specplot_io::{RenderOptions, Segment, export_all, load_signal};
//!
//! let config = AnalysisConfig::default();
//! let signal = load_signal("speech.wav", config.sample_rate)?;
//! let signal = Segment::new(0.5, Some(2.0)).apply(&signal)?;
//!
//! let output = Analyzer::new(config.clone())?.analyze(&signal)?;
//! export_all(&output, "out/speech", &RenderOptions::from_config(&config))?;
//! ```

pub mod export;
pub mod load;
pub mod render;
pub mod resample;
pub mod segment;
mod wav;

pub use export::{
    ExportedFiles, export_all, export_spectrogram_pgm, export_tracks_csv, export_waveform_wav,
};
pub use load::load_signal;
pub use render::{GrayImage, RenderOptions, render_panels};
pub use resample::{resample, resample_to};
pub use segment::Segment;
pub use wav::{WavSpec, read_wav, write_wav};

use std::path::PathBuf;

/// Error types for loading, exporting and rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Analysis or configuration error.
    #[error(transparent)]
    Core(#[from] specplot_core::Error),

    /// The requested time window contains no samples.
    #[error("segment [{start_secs}, {end_secs}) s selects no samples of a {duration_secs:.3} s signal")]
    InvalidSegment {
        /// Requested start in seconds.
        start_secs: f64,
        /// Requested end in seconds, after resolving "to the end".
        end_secs: f64,
        /// Duration of the signal being cut.
        duration_secs: f64,
    },

    /// The WAV file decoded to zero samples.
    #[error("no audio samples in '{}'", path.display())]
    EmptyAudio {
        /// File that was read.
        path: PathBuf,
    },
}

/// Convenience result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
