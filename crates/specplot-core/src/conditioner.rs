//! Signal conditioning: DC removal, hum notch, pre-emphasis.
//!
//! The three steps always run in this order. Each returns a new [`Signal`] of
//! the same length; the input is never modified.

use crate::config::AnalysisConfig;
use crate::filter::{Biquad, FilterSpec};
use crate::signal::Signal;

/// Conditions raw speech before spectral analysis.
#[derive(Debug, Clone)]
pub struct SignalConditioner {
    notch: FilterSpec,
    pre_emphasis: f32,
}

impl SignalConditioner {
    /// Build the conditioner described by `config`.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            notch: FilterSpec::notch(
                config.notch_frequency,
                config.notch_q,
                config.sample_rate as f32,
            ),
            pre_emphasis: config.pre_emphasis,
        }
    }

    /// Run all three conditioning steps.
    pub fn condition(&self, signal: &Signal) -> Signal {
        let centered = Self::remove_dc(signal);
        let filtered = self.apply_notch(&centered);
        self.pre_emphasize(&filtered)
    }

    /// Subtract the arithmetic mean of all samples.
    pub fn remove_dc(signal: &Signal) -> Signal {
        let mean = signal.mean();
        signal.map_samples(|s| s.iter().map(|&x| x - mean).collect())
    }

    /// Run the notch as a causal recursive filter from zero state.
    pub fn apply_notch(&self, signal: &Signal) -> Signal {
        let mut biquad = Biquad::new(self.notch.coefficients());
        signal.map_samples(|s| biquad.filter(s))
    }

    /// First-order pre-emphasis: `y[0] = x[0]`, `y[n] = x[n] - coeff * x[n-1]`.
    pub fn pre_emphasize(&self, signal: &Signal) -> Signal {
        let coeff = self.pre_emphasis;
        signal.map_samples(|s| {
            let mut out = Vec::with_capacity(s.len());
            if let Some(&first) = s.first() {
                out.push(first);
                out.extend(s.windows(2).map(|pair| pair[1] - coeff * pair[0]));
            }
            out
        })
    }
}
