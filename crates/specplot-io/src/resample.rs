//! Rational sample-rate conversion to the analysis rate.
//!
//! Resampling by P/Q is equivalent to upsampling by P, lowpass filtering at
//! `min(1/P, 1/Q)` (normalized), then downsampling by Q. The polyphase form
//! below only computes the output samples that survive the downsampling.
//!
//! The anti-aliasing lowpass is a windowed sinc:
//!   `h[n] = sinc(cutoff * (n - M/2)) * w[n]`
//! with a Blackman `w[n]`, normalized to unity DC gain. Its group delay of
//! `M/2` upsampled samples is compensated so output sample `m` lines up with
//! input time `m * Q / P`.
//!
//! # Example
//!
//! ```rust
//! use specplot_io::resample_to;
//!
//! let signal = vec![0.0f32; 44100];
//! let resampled = resample_to(&signal, 44100, 16000);
//! assert_eq!(resampled.len(), 16000);
//! ```

use std::f32::consts::PI;

/// Compute windowed-sinc lowpass FIR coefficients.
///
/// `cutoff` is normalized to Nyquist (1.0 = fs/2). The Blackman window is
///   `w[n] = 0.42 - 0.5·cos(2πn/M) + 0.08·cos(4πn/M)`
/// and the result sums to 1.0.
pub fn design_lowpass(num_taps: usize, cutoff: f32) -> Vec<f32> {
    if num_taps == 0 {
        return Vec::new();
    }

    let m = num_taps - 1;
    let mut coeffs: Vec<f32> = (0..num_taps)
        .map(|n| {
            let x = n as f32 - m as f32 / 2.0;
            let sinc = if x.abs() < 1e-7 {
                cutoff
            } else {
                (PI * cutoff * x).sin() / (PI * x)
            };
            let window = if m == 0 {
                1.0
            } else {
                let phase = 2.0 * PI * n as f32 / m as f32;
                0.42 - 0.5 * phase.cos() + 0.08 * (2.0 * phase).cos()
            };
            sinc * window
        })
        .collect();

    let sum: f32 = coeffs.iter().sum();
    if sum.abs() > 1e-10 {
        for c in &mut coeffs {
            *c /= sum;
        }
    }

    coeffs
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Rational resampling by the factor P/Q.
///
/// `p` and `q` are reduced by their GCD first; `1/1` returns the input
/// unchanged. `filter_order` is the prototype FIR length, `0` for the default
/// of `4 * max(P, Q) * 10 + 1` taps.
///
/// Output length is `ceil(signal.len() * P / Q)`. Returns the input
/// unchanged when either factor is zero.
pub fn resample(signal: &[f32], p: usize, q: usize, filter_order: usize) -> Vec<f32> {
    if p == 0 || q == 0 {
        return signal.to_vec();
    }

    let g = gcd(p, q);
    let p = p / g;
    let q = q / g;

    if p == 1 && q == 1 {
        return signal.to_vec();
    }

    let num_taps = if filter_order == 0 {
        4 * p.max(q) * 10 + 1
    } else {
        filter_order
    };

    // 10% guard band below the lower of the two Nyquists
    let cutoff = 0.9 / p.max(q) as f32;
    let prototype = design_lowpass(num_taps, cutoff);

    let out_len = (signal.len() * p).div_ceil(q);
    let taps_per_phase = num_taps.div_ceil(p);
    let delay = (num_taps - 1) / 2;

    // polyphase[k][i] = prototype[k + i*P]
    let mut polyphase = vec![vec![0.0f32; taps_per_phase]; p];
    for (tap_idx, &coeff) in prototype.iter().enumerate() {
        polyphase[tap_idx % p][tap_idx / p] = coeff;
    }

    (0..out_len)
        .map(|m| {
            // position in the P-upsampled, delay-compensated sequence
            let full_idx = m * q + delay;
            let n = full_idx / p;
            let sub_filter = &polyphase[full_idx % p];

            let acc: f32 = sub_filter
                .iter()
                .enumerate()
                .filter(|&(i, _)| n >= i && n - i < signal.len())
                .map(|(i, &coeff)| coeff * signal[n - i])
                .sum();

            // zero-insertion costs a factor P in gain
            acc * p as f32
        })
        .collect()
}

/// Convert `samples` from `from_rate` to `to_rate` Hz.
///
/// Identity when the rates already match.
pub fn resample_to(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate {
        return samples.to_vec();
    }
    resample(samples, to_rate as usize, from_rate as usize, 0)
}
