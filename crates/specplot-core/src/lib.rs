//! Specplot Core - acoustic descriptor tracks for speech visualization
//!
//! Turns a mono waveform at a fixed working rate into five time-aligned
//! tracks:
//!
//! - a conditioned waveform (DC removed, hum notched, pre-emphasized)
//! - a wide-band log-power spectrogram clipped to a fixed dB window
//! - a smoothed zero-crossing-rate track
//! - a smoothed total-energy track
//! - a smoothed low-band (125-750 Hz) energy track
//!
//! ## Modules
//!
//! - [`config`] - [`AnalysisConfig`], the single parameter record
//! - [`conditioner`] - DC removal, notch, pre-emphasis
//! - [`filter`] - notch design and biquad filtering
//! - [`grid`] - frame/hop/transform geometry
//! - [`fft`] - FFT wrapper and analysis windows
//! - [`spectrum`] - short-time power spectrum
//! - [`kernel`] - Gaussian smoothing kernel
//! - [`normalize`] - the shared dB normalize/clip/smooth/rebase recipe
//! - [`features`] - zero-crossing rate and band energies
//! - [`image`] - clipped, frequency-flipped log spectrogram
//! - [`pipeline`] - [`Analyzer`], wiring all of the above
//!
//! ## Example
//!
//! ```rust,ignore
//! use specplot_core::{AnalysisConfig, Analyzer, Signal};
//!
//! let analyzer = Analyzer::new(AnalysisConfig::default())?;
//! let out = analyzer.analyze(&Signal::new(samples, 16000))?;
//!
//! for (frame, energy) in out.total_energy.iter().enumerate() {
//!     println!("{:.3}s {energy:.1} dB", out.grid.frame_to_time(frame));
//! }
//! ```
//!
//! ## Logging
//!
//! Enable the `tracing` feature to get `debug` events for geometry and
//! per-call summaries, and a `warn` when the input has zero variance.

pub mod conditioner;
pub mod config;
pub mod error;
pub mod features;
pub mod fft;
pub mod filter;
pub mod grid;
pub mod image;
pub mod kernel;
pub mod normalize;
pub mod pipeline;
pub mod signal;
pub mod spectrum;

pub use conditioner::SignalConditioner;
pub use config::AnalysisConfig;
pub use error::{Error, Result};
pub use features::{FeatureExtractor, power_to_db, raw_zero_crossing_rate};
pub use fft::{Fft, Window};
pub use filter::{Biquad, Coefficients, FilterSpec};
pub use grid::FrameGrid;
pub use image::LogSpectrogramImage;
pub use kernel::SmoothingKernel;
pub use normalize::{NormalizeMode, TrackNormalizer};
pub use pipeline::{AnalysisOutput, Analyzer};
pub use signal::Signal;
pub use spectrum::{PowerSpectrum, SpectralAnalyzer};
