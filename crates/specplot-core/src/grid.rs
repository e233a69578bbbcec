//! Frame and hop geometry shared by every frame-based computation.

use crate::config::AnalysisConfig;

/// Window, hop and transform sizes in samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGrid {
    /// Samples per analysis window.
    pub win_length: usize,
    /// Samples between consecutive frame starts.
    pub hop_length: usize,
    /// Transform size (power of two, `>= win_length`).
    pub n_fft: usize,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl FrameGrid {
    /// Derive the grid from a config's rate, durations and transform size.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        let rate = config.sample_rate as f32;
        Self {
            win_length: (rate * config.window_size).round() as usize,
            hop_length: (rate * config.window_stride).round() as usize,
            n_fft: config.n_fft,
            sample_rate: config.sample_rate,
        }
    }

    /// Number of frames over an `n`-sample signal.
    ///
    /// `(n - win_length) / hop_length + 1` for signals of at least one
    /// window; a shorter non-empty signal yields one zero-padded frame and an
    /// empty signal yields none.
    pub fn frame_count(&self, n: usize) -> usize {
        match n {
            0 => 0,
            n if n < self.win_length => 1,
            n => (n - self.win_length) / self.hop_length + 1,
        }
    }

    /// First sample of frame `frame`.
    pub fn frame_start(&self, frame: usize) -> usize {
        frame * self.hop_length
    }

    /// Frequency bins produced by the transform (`n_fft / 2 + 1`).
    pub fn num_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Center frequency of `bin` in Hz.
    pub fn bin_to_freq(&self, bin: usize) -> f32 {
        bin as f32 * self.sample_rate as f32 / self.n_fft as f32
    }

    /// Start time of `frame` in seconds.
    pub fn frame_to_time(&self, frame: usize) -> f32 {
        self.frame_start(frame) as f32 / self.sample_rate as f32
    }

    /// Bin index for `freq` Hz: `round(freq / nyquist * num_bins)`.
    pub fn freq_to_bin(&self, freq: f32) -> usize {
        let nyquist = self.sample_rate as f32 / 2.0;
        (freq / nyquist * self.num_bins() as f32).round() as usize
    }
}
