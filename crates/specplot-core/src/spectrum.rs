//! Short-time power spectrum.
//!
//! Frames of `win_length` samples are taken every `hop_length` samples,
//! multiplied by the analysis window, zero-padded to `n_fft` and transformed.
//! Frames that run past the end of the signal are zero-padded.

use std::ops::Range;

use crate::fft::{Fft, Window};
use crate::grid::FrameGrid;

/// Power per `[frequency bin, frame]`, bins ordered low to high.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerSpectrum {
    /// Per-frame power, `frames[frame][bin]`.
    frames: Vec<Vec<f64>>,
    num_bins: usize,
}

impl PowerSpectrum {
    /// Assemble a spectrum from per-frame power vectors of equal length.
    pub fn from_frames(frames: Vec<Vec<f64>>, num_bins: usize) -> Self {
        debug_assert!(frames.iter().all(|f| f.len() == num_bins));
        Self { frames, num_bins }
    }

    /// Number of frequency bins.
    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    /// Number of frames.
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Power at `bin` in `frame`, `None` when out of bounds.
    pub fn get(&self, bin: usize, frame: usize) -> Option<f64> {
        self.frames.get(frame).and_then(|f| f.get(bin)).copied()
    }

    /// Iterate over frames in time order.
    pub fn frames(&self) -> impl Iterator<Item = &[f64]> {
        self.frames.iter().map(Vec::as_slice)
    }

    /// Largest power anywhere in the spectrum, 0.0 when empty.
    pub fn max_power(&self) -> f64 {
        self.frames
            .iter()
            .flatten()
            .fold(0.0f64, |acc, &p| acc.max(p))
    }

    /// Per-frame power summed over `bins` (clamped to the available range).
    pub fn band_sums(&self, bins: Range<usize>) -> Vec<f64> {
        let start = bins.start.min(self.num_bins);
        let end = bins.end.min(self.num_bins);
        self.frames
            .iter()
            .map(|f| f[start..end.max(start)].iter().sum())
            .collect()
    }
}

/// Computes [`PowerSpectrum`]s on a fixed [`FrameGrid`].
#[derive(Debug)]
pub struct SpectralAnalyzer {
    grid: FrameGrid,
    fft: Fft,
    window_coeffs: Vec<f32>,
}

impl SpectralAnalyzer {
    /// Create an analyzer for `grid` using `window` as the analysis shape.
    pub fn new(grid: FrameGrid, window: Window) -> Self {
        Self {
            grid,
            fft: Fft::new(grid.n_fft),
            window_coeffs: window.coefficients(grid.win_length),
        }
    }

    /// Compute the power spectrum of `samples`.
    pub fn analyze(&self, samples: &[f32]) -> PowerSpectrum {
        let num_frames = self.grid.frame_count(samples.len());
        let frames = (0..num_frames)
            .map(|frame_idx| {
                let frame = frame_samples(samples, &self.grid, frame_idx);
                let windowed: Vec<f32> = frame
                    .iter()
                    .zip(&self.window_coeffs)
                    .map(|(&x, &w)| x * w)
                    .collect();
                self.fft.power(&windowed)
            })
            .collect();

        PowerSpectrum::from_frames(frames, self.grid.num_bins())
    }
}

/// Samples of frame `frame_idx`, zero-padded to `win_length`.
pub(crate) fn frame_samples(samples: &[f32], grid: &FrameGrid, frame_idx: usize) -> Vec<f32> {
    let start = grid.frame_start(frame_idx).min(samples.len());
    let end = (start + grid.win_length).min(samples.len());
    let mut frame = samples[start..end].to_vec();
    frame.resize(grid.win_length, 0.0);
    frame
}
