//! Time-window selection on a loaded signal.

use std::ops::Range;

use specplot_core::Signal;

use crate::{Error, Result};

/// A `[start, end)` window in seconds.
///
/// `end_secs` of `None`, or any negative value, means "to the end of the
/// signal". Bounds past either end are clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Start time in seconds.
    pub start_secs: f64,
    /// End time in seconds; `None` or negative selects through the end.
    pub end_secs: Option<f64>,
}

impl Default for Segment {
    fn default() -> Self {
        Self::full()
    }
}

impl Segment {
    /// Create a segment.
    pub fn new(start_secs: f64, end_secs: Option<f64>) -> Self {
        Self {
            start_secs,
            end_secs,
        }
    }

    /// The whole signal.
    pub fn full() -> Self {
        Self::new(0.0, None)
    }

    /// Segment from command-line style arguments, where a negative end means
    /// "to the end".
    pub fn from_bounds(start_secs: f64, end_secs: f64) -> Self {
        Self::new(start_secs, (end_secs >= 0.0).then_some(end_secs))
    }

    /// Whether this segment keeps every sample of any signal.
    pub fn is_full(&self) -> bool {
        self.start_secs <= 0.0 && self.end_secs.is_none_or(|end| end < 0.0)
    }

    /// Sample range selected in a signal of `len` samples at `sample_rate`.
    ///
    /// Bounds are truncated to whole samples: `[int(start * rate), int(end * rate))`.
    pub fn sample_range(&self, len: usize, sample_rate: u32) -> Result<Range<usize>> {
        let rate = f64::from(sample_rate);
        let to_index = |secs: f64| ((secs * rate).max(0.0) as usize).min(len);

        let start = to_index(self.start_secs);
        let end = match self.end_secs {
            Some(end) if end >= 0.0 => to_index(end),
            _ => len,
        };

        if start >= end {
            return Err(Error::InvalidSegment {
                start_secs: self.start_secs,
                end_secs: end as f64 / rate,
                duration_secs: len as f64 / rate,
            });
        }
        Ok(start..end)
    }

    /// Cut the segment out of `signal`.
    pub fn apply(&self, signal: &Signal) -> Result<Signal> {
        let range = self.sample_range(signal.len(), signal.sample_rate())?;

        tracing::debug!(start = range.start, end = range.end, "segment selected");

        Ok(signal.map_samples(|s| s[range].to_vec()))
    }
}
