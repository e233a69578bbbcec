//! Shared normalize/clip/smooth/rebase recipe for per-frame tracks.
//!
//! The dB recipe runs, in this order:
//!
//! 1. subtract the track maximum (peak at 0 dB)
//! 2. clip to `[-spread, 0]`
//! 3. subtract the track minimum (floor at 0, peak at `spread`)
//! 4. smooth with the Gaussian kernel, same length
//! 5. subtract the smoothed maximum (final peak at exactly 0)
//!
//! The rate recipe used for zero-crossing rate only smooths and then
//! subtracts the minimum.

use crate::kernel::SmoothingKernel;

/// Which optional stages of the recipe run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeMode {
    /// Clip to `[-spread, 0]` and rebase to the minimum before smoothing.
    pub db_clip: bool,
    /// Reference to the maximum before clipping and after smoothing.
    /// When off, the smoothed track is rebased to its minimum instead.
    pub max_reference: bool,
}

impl NormalizeMode {
    /// Full recipe for dB-domain energy tracks.
    pub const DECIBEL: Self = Self {
        db_clip: true,
        max_reference: true,
    };

    /// Reduced recipe for bounded rates: smooth, then subtract the minimum.
    pub const RATE: Self = Self {
        db_clip: false,
        max_reference: false,
    };
}

/// Applies [`NormalizeMode`] recipes with one kernel and dB spread.
#[derive(Debug, Clone)]
pub struct TrackNormalizer {
    kernel: SmoothingKernel,
    spread: f32,
}

impl TrackNormalizer {
    /// Create a normalizer smoothing with `kernel` and clipping to `spread` dB.
    pub fn new(kernel: SmoothingKernel, spread: f32) -> Self {
        Self { kernel, spread }
    }

    /// Run the recipe selected by `mode` over `track`.
    ///
    /// Input values must be finite. The output has the same length.
    pub fn normalize(&self, track: &[f32], mode: NormalizeMode) -> Vec<f32> {
        debug_assert!(track.iter().all(|v| v.is_finite()));
        if track.is_empty() {
            return Vec::new();
        }

        let mut values = track.to_vec();
        if mode.max_reference {
            shift_by_max(&mut values);
        }
        if mode.db_clip {
            for v in &mut values {
                *v = v.clamp(-self.spread, 0.0);
            }
            shift_by_min(&mut values);
        }

        let mut smoothed = self.kernel.convolve_same(&values);
        if mode.max_reference {
            shift_by_max(&mut smoothed);
        } else {
            shift_by_min(&mut smoothed);
        }
        smoothed
    }
}

fn shift_by_max(values: &mut [f32]) {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    for v in values {
        *v -= max;
    }
}

fn shift_by_min(values: &mut [f32]) {
    let min = values.iter().copied().fold(f32::INFINITY, f32::min);
    for v in values {
        *v -= min;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> TrackNormalizer {
        TrackNormalizer::new(SmoothingKernel::gaussian(41, 6.0), 40.0)
    }

    fn ramp(len: usize, lo: f32, hi: f32) -> Vec<f32> {
        (0..len)
            .map(|i| lo + (hi - lo) * i as f32 / (len - 1) as f32)
            .collect()
    }

    #[test]
    fn decibel_peak_is_zero() {
        let track = ramp(300, -120.0, -20.0);
        let out = normalizer().normalize(&track, NormalizeMode::DECIBEL);
        assert_eq!(out.len(), track.len());
        let max = out.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(max, 0.0);
        assert!(out.iter().all(|&v| v <= 0.0));
    }

    #[test]
    fn decibel_range_bounded_by_spread() {
        // smoothing never widens the clipped range
        let track: Vec<f32> = (0..400).map(|i| if i % 50 < 25 { -90.0 } else { -5.0 }).collect();
        let out = normalizer().normalize(&track, NormalizeMode::DECIBEL);
        assert!(out.iter().all(|&v| v >= -40.0 - 1e-4 && v <= 0.0));
    }

    #[test]
    fn stage_order_matters() {
        // Clipping runs before smoothing, so everything below -40 dB becomes
        // one flat floor instead of a smoothed ramp.
        let track = ramp(500, -100.0, 0.0);
        let out = normalizer().normalize(&track, NormalizeMode::DECIBEL);
        let floor = out[20];
        assert!(floor >= -40.0 && floor < -30.0, "floor {floor}");
        assert!(out[20..=270].iter().all(|&v| v == floor));
        assert!(out[300] > floor);
    }

    #[test]
    fn rate_min_is_zero() {
        let track: Vec<f32> = (0..200).map(|i| 0.1 + 0.3 * ((i as f32) * 0.05).sin().abs()).collect();
        let out = normalizer().normalize(&track, NormalizeMode::RATE);
        let min = out.iter().copied().fold(f32::INFINITY, f32::min);
        assert_eq!(min, 0.0);
        assert!(out.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn constant_tracks_normalize_to_zero() {
        let n = normalizer();
        assert!(n.normalize(&[-100.0; 64], NormalizeMode::DECIBEL).iter().all(|&v| v == 0.0));
        assert!(n.normalize(&[0.0; 64], NormalizeMode::RATE).iter().all(|&v| v == 0.0));
    }

    #[test]
    fn empty_and_single_value_tracks() {
        let n = normalizer();
        assert!(n.normalize(&[], NormalizeMode::DECIBEL).is_empty());
        assert_eq!(n.normalize(&[-12.0], NormalizeMode::DECIBEL), vec![0.0]);
        assert_eq!(n.normalize(&[0.4], NormalizeMode::RATE), vec![0.0]);
    }
}
