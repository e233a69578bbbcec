//! Analysis configuration.
//!
//! Every constant the pipeline depends on lives in [`AnalysisConfig`]. An
//! [`Analyzer`](crate::Analyzer) is built from one validated instance and hands
//! it explicitly to each stage; there is no global state.
//!
//! # TOML Format
//!
//! ```toml
//! sample_rate = 16000
//! notch_frequency = 60.0
//! notch_q = 30.0
//! pre_emphasis = 0.97
//! window_size = 0.004
//! window_stride = 0.001
//! n_fft = 1024
//! window = "hamming"
//! db_spread = 40.0
//! db_cutoff = 3.0
//! kernel_length = 41
//! kernel_std = 6.0
//! low_band_min_hz = 125.0
//! low_band_max_hz = 750.0
//! power_floor = 1e-10
//! ```
//!
//! Keys may be omitted; missing keys take the defaults above.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::fft::Window;

/// Immutable parameter set for one analysis pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Working sample rate in Hz. Input signals must already be at this rate.
    pub sample_rate: u32,
    /// Center frequency of the interference notch in Hz (mains hum).
    pub notch_frequency: f32,
    /// Quality factor of the notch.
    pub notch_q: f32,
    /// First-order pre-emphasis coefficient.
    pub pre_emphasis: f32,
    /// Analysis window duration in seconds.
    pub window_size: f32,
    /// Hop duration in seconds.
    pub window_stride: f32,
    /// Transform size in samples (power of two, at least the window length).
    pub n_fft: usize,
    /// Analysis window shape.
    pub window: Window,
    /// Dynamic range in dB kept by every dB-domain clip.
    pub db_spread: f32,
    /// Headroom in dB cut from the top of the spectrogram image.
    pub db_cutoff: f32,
    /// Smoothing kernel length in frames (odd).
    pub kernel_length: usize,
    /// Smoothing kernel standard deviation in frames.
    pub kernel_std: f32,
    /// Lower edge of the low-band energy track in Hz.
    pub low_band_min_hz: f32,
    /// Upper edge of the low-band energy track in Hz.
    pub low_band_max_hz: f32,
    /// Smallest power fed to `log10`; zero power is raised to this value.
    pub power_floor: f32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: 16000,
            notch_frequency: 60.0,
            notch_q: 30.0,
            pre_emphasis: 0.97,
            window_size: 0.004,
            window_stride: 0.001,
            n_fft: 1024,
            window: Window::Hamming,
            db_spread: 40.0,
            db_cutoff: 3.0,
            kernel_length: 41,
            kernel_std: 6.0,
            low_band_min_hz: 125.0,
            low_band_max_hz: 750.0,
            power_floor: 1e-10,
        }
    }
}

impl AnalysisConfig {
    /// Set the working sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set window and hop durations in seconds.
    pub fn with_window(mut self, window_size: f32, window_stride: f32) -> Self {
        self.window_size = window_size;
        self.window_stride = window_stride;
        self
    }

    /// Set the transform size.
    pub fn with_n_fft(mut self, n_fft: usize) -> Self {
        self.n_fft = n_fft;
        self
    }

    /// Set the notch center frequency and Q.
    pub fn with_notch(mut self, frequency: f32, q: f32) -> Self {
        self.notch_frequency = frequency;
        self.notch_q = q;
        self
    }

    /// Set the dB spread and cutoff.
    pub fn with_db_range(mut self, spread: f32, cutoff: f32) -> Self {
        self.db_spread = spread;
        self.db_cutoff = cutoff;
        self
    }

    /// Set the low-band edges in Hz.
    pub fn with_low_band(mut self, min_hz: f32, max_hz: f32) -> Self {
        self.low_band_min_hz = min_hz;
        self.low_band_max_hz = max_hz;
        self
    }

    /// Nyquist frequency of the working rate.
    pub fn nyquist(&self) -> f32 {
        self.sample_rate as f32 / 2.0
    }

    /// Check every field against what the pipeline needs.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::invalid_config("sample_rate", "must be positive"));
        }
        let nyquist = self.nyquist();

        positive("notch_q", self.notch_q)?;
        positive("notch_frequency", self.notch_frequency)?;
        if self.notch_frequency >= nyquist {
            return Err(Error::invalid_config(
                "notch_frequency",
                format!("{} Hz is not below Nyquist ({nyquist} Hz)", self.notch_frequency),
            ));
        }
        if !self.pre_emphasis.is_finite() {
            return Err(Error::invalid_config("pre_emphasis", "must be finite"));
        }

        positive("window_size", self.window_size)?;
        positive("window_stride", self.window_stride)?;
        let win_length = (self.sample_rate as f32 * self.window_size).round() as usize;
        let hop_length = (self.sample_rate as f32 * self.window_stride).round() as usize;
        if win_length == 0 {
            return Err(Error::invalid_config("window_size", "rounds to zero samples"));
        }
        if hop_length == 0 {
            return Err(Error::invalid_config("window_stride", "rounds to zero samples"));
        }
        if !self.n_fft.is_power_of_two() {
            return Err(Error::invalid_config(
                "n_fft",
                format!("{} is not a power of two", self.n_fft),
            ));
        }
        if self.n_fft < win_length {
            return Err(Error::invalid_config(
                "n_fft",
                format!("{} is shorter than the {win_length}-sample window", self.n_fft),
            ));
        }

        positive("db_spread", self.db_spread)?;
        if !(self.db_cutoff >= 0.0 && self.db_cutoff < self.db_spread) {
            return Err(Error::invalid_config(
                "db_cutoff",
                format!("{} is outside [0, db_spread)", self.db_cutoff),
            ));
        }

        if self.kernel_length == 0 || self.kernel_length % 2 == 0 {
            return Err(Error::invalid_config(
                "kernel_length",
                format!("{} is not a positive odd length", self.kernel_length),
            ));
        }
        positive("kernel_std", self.kernel_std)?;

        if !(self.low_band_min_hz >= 0.0 && self.low_band_min_hz < self.low_band_max_hz) {
            return Err(Error::invalid_config(
                "low_band_min_hz",
                format!(
                    "band [{}, {}) Hz is empty or inverted",
                    self.low_band_min_hz, self.low_band_max_hz
                ),
            ));
        }
        if self.low_band_max_hz > nyquist {
            return Err(Error::invalid_config(
                "low_band_max_hz",
                format!("{} Hz is above Nyquist ({nyquist} Hz)", self.low_band_max_hz),
            ));
        }
        positive("power_floor", self.power_floor)?;

        Ok(())
    }

    /// Load a config from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse a config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize the config as pretty TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save the config to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| Error::write_file(path, e))
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_config(
            field,
            format!("{value} is not a positive finite number"),
        ))
    }
}
