//! Mono sample buffer tagged with its sample rate.

/// An immutable mono waveform.
///
/// Processing stages never mutate a `Signal`; each one returns a new buffer
/// of the same rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    samples: Vec<f32>,
    sample_rate: u32,
}

impl Signal {
    /// Wrap samples recorded at `sample_rate` Hz.
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Sample data.
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the signal holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate)
    }

    /// Arithmetic mean of the samples, 0.0 for an empty signal.
    pub fn mean(&self) -> f32 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.samples.iter().map(|&x| f64::from(x)).sum();
        (sum / self.samples.len() as f64) as f32
    }

    /// True when every sample has the same value (silence, a constant DC level).
    pub fn is_constant(&self) -> bool {
        match self.samples.first() {
            Some(&first) => self.samples.iter().all(|&x| x == first),
            None => true,
        }
    }

    /// Build a new signal at the same rate by mapping the sample buffer.
    pub fn map_samples(&self, f: impl FnOnce(&[f32]) -> Vec<f32>) -> Signal {
        Signal::new(f(&self.samples), self.sample_rate)
    }

    /// Consume the signal and return its samples.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}
