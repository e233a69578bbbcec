//! FFT wrapper with windowing functions

use rustfft::{FftPlanner, num_complex::Complex};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::sync::Arc;

/// Analysis window shapes.
///
/// Coefficients are symmetric (`w[0] == w[len-1]`), the filter-design
/// convention, rather than the periodic DFT convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    /// Rectangular (no windowing)
    Rectangular,
    /// Hann window (raised cosine)
    Hann,
    /// Hamming window
    #[default]
    Hamming,
}

impl Window {
    /// Window coefficients of length `size`.
    pub fn coefficients(&self, size: usize) -> Vec<f32> {
        if size == 1 {
            return vec![1.0];
        }
        let denom = size.saturating_sub(1) as f32;
        (0..size)
            .map(|i| {
                let phase = 2.0 * PI * i as f32 / denom;
                match self {
                    Window::Rectangular => 1.0,
                    Window::Hann => 0.5 - 0.5 * phase.cos(),
                    Window::Hamming => 0.54 - 0.46 * phase.cos(),
                }
            })
            .collect()
    }

    /// Multiply `buffer` by the window in place.
    pub fn apply(&self, buffer: &mut [f32]) {
        let coeffs = self.coefficients(buffer.len());
        for (sample, w) in buffer.iter_mut().zip(coeffs) {
            *sample *= w;
        }
    }
}

/// Forward real FFT of a fixed size.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl std::fmt::Debug for Fft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fft").field("size", &self.size).finish()
    }
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Perform forward FFT on real input
    ///
    /// Input shorter than the FFT size is zero-padded at the end, longer
    /// input is truncated. Returns `size/2 + 1` bins (DC to Nyquist).
    pub fn forward(&self, input: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.size / 2 + 1);
        buffer
    }

    /// Squared magnitude of [`forward`](Self::forward), in `f64` so that
    /// large finite input cannot overflow.
    pub fn power(&self, input: &[f32]) -> Vec<f64> {
        self.forward(input)
            .iter()
            .map(|c| f64::from(c.re).powi(2) + f64::from(c.im).powi(2))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_hamming_symmetric() {
        let w = Window::Hamming.coefficients(64);
        assert!((w[0] - 0.08).abs() < 1e-6);
        assert!((w[63] - 0.08).abs() < 1e-6);
        for i in 0..32 {
            assert!((w[i] - w[63 - i]).abs() < 1e-6);
        }
        assert!(w.iter().all(|&x| x <= 1.0));
    }

    #[test]
    fn test_window_hann() {
        let mut buffer = vec![1.0; 101];
        Window::Hann.apply(&mut buffer);

        // Hann window should be 0 at edges, 1 at center
        assert!(buffer[0] < 0.01);
        assert!(buffer[100] < 0.01);
        assert!((buffer[50] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_window_degenerate_sizes() {
        assert!(Window::Hamming.coefficients(0).is_empty());
        assert_eq!(Window::Hamming.coefficients(1), vec![1.0]);
        assert_eq!(Window::Rectangular.coefficients(3), vec![1.0; 3]);
    }

    #[test]
    fn test_dc_detection() {
        let fft = Fft::new(256);

        // DC signal
        let input = vec![1.0; 256];
        let spectrum = fft.forward(&input);
        assert_eq!(spectrum.len(), 129);

        // DC bin should be large, others small
        let dc_mag = spectrum[0].norm();
        let other_mag: f32 = spectrum[1..].iter().map(|c| c.norm()).sum();

        assert!(dc_mag > other_mag * 10.0);
    }

    #[test]
    fn test_power_of_padded_tone() {
        let fft = Fft::new(1024);
        // 16 cycles in 256 samples -> bin 64 of a 1024-point transform
        let input: Vec<f32> = (0..256)
            .map(|i| (2.0 * PI * 16.0 * i as f32 / 256.0).sin())
            .collect();
        let power = fft.power(&input);
        let peak = power
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 64);
        // Parseval for the bin: |X|^2 = (N/2)^2 for a unit sine
        assert!((power[64] - 128.0 * 128.0).abs() / (128.0 * 128.0) < 1e-3);
    }
}
