//! Notch filter design and recursive filtering.
//!
//! The notch removes a narrow band around one frequency (mains hum) while
//! leaving the rest of the spectrum at unity gain. It is a single biquad run
//! across the whole signal from zero initial state.

use std::f64::consts::PI;

/// Parameters of a second-order notch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    /// Center frequency in Hz.
    pub frequency: f32,
    /// Quality factor; the -3 dB rejection band is `frequency / q` wide.
    pub q: f32,
    /// Sample rate in Hz.
    pub sample_rate: f32,
}

/// Normalized biquad coefficients (`a[0] == 1`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    /// Feedforward coefficients `b0, b1, b2`.
    pub b: [f32; 3],
    /// Feedback coefficients `1, a1, a2`.
    pub a: [f32; 3],
}

impl FilterSpec {
    /// Describe a notch at `frequency` Hz with quality `q`.
    pub fn notch(frequency: f32, q: f32, sample_rate: f32) -> Self {
        Self {
            frequency,
            q,
            sample_rate,
        }
    }

    /// Derive the notch coefficients.
    ///
    /// ```text
    /// w0 = 2*pi*f0/fs     bw = w0/Q     beta = tan(bw/2)     g = 1/(1+beta)
    /// b  = g * [1, -2*cos(w0), 1]
    /// a  = [1, -2*g*cos(w0), 2*g - 1]
    /// ```
    ///
    /// The -3 dB points sit at `f0 ± f0/(2Q)`. Designed in f64 since the
    /// poles sit very close to the unit circle for high Q.
    pub fn coefficients(&self) -> Coefficients {
        let w0 = 2.0 * PI * f64::from(self.frequency) / f64::from(self.sample_rate);
        let bw = w0 / f64::from(self.q);
        let beta = (bw / 2.0).tan();
        let gain = 1.0 / (1.0 + beta);
        let cos_w0 = w0.cos();

        Coefficients {
            b: [
                gain as f32,
                (-2.0 * gain * cos_w0) as f32,
                gain as f32,
            ],
            a: [1.0, (-2.0 * gain * cos_w0) as f32, (2.0 * gain - 1.0) as f32],
        }
    }

    /// Magnitude response at `frequency` Hz.
    pub fn magnitude_at(&self, frequency: f32) -> f32 {
        let c = self.coefficients();
        let w = 2.0 * PI * f64::from(frequency) / f64::from(self.sample_rate);
        let eval = |p: [f32; 3]| {
            let re = f64::from(p[0]) + f64::from(p[1]) * w.cos() + f64::from(p[2]) * (2.0 * w).cos();
            let im = -(f64::from(p[1]) * w.sin() + f64::from(p[2]) * (2.0 * w).sin());
            (re * re + im * im).sqrt()
        };
        (eval(c.b) / eval(c.a)) as f32
    }
}

/// Direct Form I biquad.
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
#[derive(Debug, Clone)]
pub struct Biquad {
    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Create a biquad with zeroed state.
    pub fn new(coefficients: Coefficients) -> Self {
        let Coefficients { b, a } = coefficients;
        Self {
            b0: b[0],
            b1: b[1],
            b2: b[2],
            a1: a[1],
            a2: a[2],
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Process one sample.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    /// Filter a whole buffer causally, returning a buffer of equal length.
    pub fn filter(&mut self, input: &[f32]) -> Vec<f32> {
        input.iter().map(|&x| self.process(x)).collect()
    }

    /// Clear the delay lines.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hum_notch() -> FilterSpec {
        FilterSpec::notch(60.0, 30.0, 16000.0)
    }

    fn tone(freq: f32, sample_rate: f32, len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    fn rms(x: &[f32]) -> f32 {
        (x.iter().map(|v| v * v).sum::<f32>() / x.len() as f32).sqrt()
    }

    #[test]
    fn coefficients_are_symmetric_and_stable() {
        let c = hum_notch().coefficients();
        assert_eq!(c.b[0], c.b[2]);
        assert_eq!(c.b[1], c.a[1]);
        assert_eq!(c.a[0], 1.0);
        // poles inside the unit circle
        assert!(c.a[2] > 0.0 && c.a[2] < 1.0);
    }

    #[test]
    fn unit_gain_away_from_center() {
        let spec = hum_notch();
        assert!((spec.magnitude_at(0.0) - 1.0).abs() < 5e-3);
        assert!((spec.magnitude_at(1000.0) - 1.0).abs() < 1e-3);
        assert!((spec.magnitude_at(7999.0) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn deep_null_at_center() {
        assert!(hum_notch().magnitude_at(60.0) < 0.01);
    }

    #[test]
    fn half_power_at_band_edges() {
        let spec = hum_notch();
        let edge = spec.magnitude_at(60.0 + 1.0);
        assert!((edge - std::f32::consts::FRAC_1_SQRT_2).abs() < 0.05, "edge gain {edge}");
    }

    #[test]
    fn filtering_removes_hum_keeps_speech_band() {
        let sr = 16000.0;
        let len = 32000;
        let mut biquad = Biquad::new(hum_notch().coefficients());
        let hum = biquad.filter(&tone(60.0, sr, len));
        biquad.clear();
        let voice = biquad.filter(&tone(1000.0, sr, len));

        // Skip the settling transient.
        let tail = len / 2..;
        assert!(rms(&hum[tail.clone()]) < 0.05, "hum rms {}", rms(&hum[tail.clone()]));
        assert!((rms(&voice[tail.clone()]) - std::f32::consts::FRAC_1_SQRT_2).abs() < 0.01);
    }

    #[test]
    fn filter_preserves_length() {
        let mut biquad = Biquad::new(hum_notch().coefficients());
        assert_eq!(biquad.filter(&[0.5; 37]).len(), 37);
        assert!(biquad.filter(&[]).is_empty());
    }
}
