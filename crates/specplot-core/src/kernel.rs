//! Gaussian smoothing kernel and same-length convolution.

/// Normalized, symmetric Gaussian weights.
///
/// ```text
/// g[n] = exp(-0.5 * ((n - c) / std)^2),  c = (len - 1) / 2
/// ```
///
/// scaled so the weights sum to 1. The length is odd, so the kernel has a
/// single center tap at index `c`.
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothingKernel {
    weights: Vec<f32>,
}

impl SmoothingKernel {
    /// Build a kernel of `length` taps with standard deviation `std` (in taps).
    ///
    /// `length` must be odd and `std` positive; the analyzer's config
    /// validation guarantees both.
    pub fn gaussian(length: usize, std: f32) -> Self {
        debug_assert!(length % 2 == 1, "kernel length must be odd");
        let center = (length as f64 - 1.0) / 2.0;
        let std = f64::from(std);

        let raw: Vec<f64> = (0..length)
            .map(|n| {
                let x = (n as f64 - center) / std;
                (-0.5 * x * x).exp()
            })
            .collect();
        let sum: f64 = raw.iter().sum();

        Self {
            weights: raw.iter().map(|&w| (w / sum) as f32).collect(),
        }
    }

    /// Kernel weights.
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Number of taps.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether the kernel has no taps.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Taps on each side of the center.
    pub fn radius(&self) -> usize {
        self.weights.len() / 2
    }

    /// Smooth `track`, returning exactly `track.len()` values.
    ///
    /// Output `i` is the kernel centered on input `i`; positions beyond
    /// either end of the track read as zero. Edge values therefore sag
    /// toward zero over the first and last `radius()` frames.
    pub fn convolve_same(&self, track: &[f32]) -> Vec<f32> {
        let radius = self.radius() as isize;
        let len = track.len() as isize;

        (0..len)
            .map(|i| {
                self.weights
                    .iter()
                    .enumerate()
                    .filter_map(|(k, &w)| {
                        // symmetric kernel: correlation == convolution
                        let j = i + k as isize - radius;
                        (0..len).contains(&j).then(|| w * track[j as usize])
                    })
                    .sum()
            })
            .collect()
    }
}
