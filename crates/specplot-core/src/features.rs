//! Per-frame feature tracks: zero-crossing rate, total and low-band energy.

use std::ops::Range;

use crate::grid::FrameGrid;
use crate::normalize::{NormalizeMode, TrackNormalizer};
use crate::spectrum::{PowerSpectrum, frame_samples};

/// Samples with magnitude at or below this count as zero.
const ZERO_THRESHOLD: f32 = 1e-10;

/// Computes the three feature tracks on a shared [`FrameGrid`].
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    grid: FrameGrid,
    normalizer: TrackNormalizer,
    low_band: Range<usize>,
    power_floor: f32,
}

impl FeatureExtractor {
    /// Create an extractor.
    ///
    /// `low_band_hz` is converted to the bin range
    /// `[round(f0/nyquist * bins), round(f1/nyquist * bins))`.
    pub fn new(
        grid: FrameGrid,
        normalizer: TrackNormalizer,
        low_band_hz: (f32, f32),
        power_floor: f32,
    ) -> Self {
        let low_band = grid.freq_to_bin(low_band_hz.0)..grid.freq_to_bin(low_band_hz.1);
        Self {
            grid,
            normalizer,
            low_band,
            power_floor,
        }
    }

    /// Bin range summed by [`low_band_energy`](Self::low_band_energy).
    pub fn low_band(&self) -> Range<usize> {
        self.low_band.clone()
    }

    /// Smoothed zero-crossing rate of the mean-removed signal, minimum at 0.
    pub fn zero_crossing_rate(&self, centered: &[f32]) -> Vec<f32> {
        let raw = raw_zero_crossing_rate(centered, &self.grid);
        self.normalizer.normalize(&raw, NormalizeMode::RATE)
    }

    /// Normalized total energy track in dB, peak at 0.
    pub fn total_energy(&self, spectrum: &PowerSpectrum) -> Vec<f32> {
        self.band_energy(spectrum, 0..spectrum.num_bins())
    }

    /// Normalized energy of the low band in dB, peak at 0.
    pub fn low_band_energy(&self, spectrum: &PowerSpectrum) -> Vec<f32> {
        self.band_energy(spectrum, self.low_band.clone())
    }

    fn band_energy(&self, spectrum: &PowerSpectrum, bins: Range<usize>) -> Vec<f32> {
        let raw: Vec<f32> = spectrum
            .band_sums(bins)
            .into_iter()
            .map(|power| power_to_db(power, self.power_floor))
            .collect();
        self.normalizer.normalize(&raw, NormalizeMode::DECIBEL)
    }
}

/// `10 * log10(power)` with `power` raised to at least `floor`.
///
/// Power stays in `f64` until it is in dB; the result always fits `f32`.
pub fn power_to_db(power: f64, floor: f32) -> f32 {
    (10.0 * power.max(f64::from(floor)).log10()) as f32
}

/// Per-frame fraction of sign changes between consecutive samples.
///
/// Each frame holds `win_length` samples (zero-padded past the end); the
/// count of changes is divided by `win_length`, so the rate lies in `[0, 1)`.
/// Zero is treated as non-negative.
pub fn raw_zero_crossing_rate(samples: &[f32], grid: &FrameGrid) -> Vec<f32> {
    let is_negative = |x: f32| x.abs() > ZERO_THRESHOLD && x < 0.0;

    (0..grid.frame_count(samples.len()))
        .map(|frame_idx| {
            let frame = frame_samples(samples, grid, frame_idx);
            let crossings = frame
                .windows(2)
                .filter(|pair| is_negative(pair[0]) != is_negative(pair[1]))
                .count();
            crossings as f32 / grid.win_length as f32
        })
        .collect()
}
