//! Decode, mix down and resample a WAV file to the analysis rate.

use std::path::Path;

use specplot_core::Signal;

use crate::resample::resample_to;
use crate::wav::read_wav;
use crate::{Error, Result};

/// Load `path` as a mono [`Signal`] at `sample_rate` Hz.
///
/// Fails when the file cannot be decoded or holds no samples.
pub fn load_signal(path: impl AsRef<Path>, sample_rate: u32) -> Result<Signal> {
    let path = path.as_ref();
    let (samples, spec) = read_wav(path)?;
    if samples.is_empty() {
        return Err(Error::EmptyAudio {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(
        path = %path.display(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        bits = spec.bits_per_sample,
        frames = samples.len(),
        "decoded wav"
    );

    let samples = if spec.sample_rate == sample_rate {
        samples
    } else {
        tracing::info!(from = spec.sample_rate, to = sample_rate, "resampling");
        resample_to(&samples, spec.sample_rate, sample_rate)
    };

    Ok(Signal::new(samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::{WavSpec, write_wav};
    use tempfile::NamedTempFile;

    #[test]
    fn native_rate_loads_unchanged() {
        let samples: Vec<f32> = (0..800).map(|i| (i as f32 * 0.01).sin()).collect();
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &samples, WavSpec::mono_float(16000)).unwrap();

        let signal = load_signal(file.path(), 16000).unwrap();
        assert_eq!(signal.sample_rate(), 16000);
        assert_eq!(signal.samples(), samples.as_slice());
    }

    #[test]
    fn other_rates_are_converted() {
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[0.25; 4800], WavSpec::mono_float(48000)).unwrap();

        let signal = load_signal(file.path(), 16000).unwrap();
        assert_eq!(signal.sample_rate(), 16000);
        assert_eq!(signal.len(), 1600);
        // DC passes the anti-aliasing filter away from the edges
        assert!((signal.samples()[800] - 0.25).abs() < 1e-3);
    }

    #[test]
    fn empty_file_is_error() {
        let file = NamedTempFile::new().unwrap();
        write_wav(file.path(), &[], WavSpec::mono_float(16000)).unwrap();

        let err = load_signal(file.path(), 16000).unwrap_err();
        assert!(matches!(err, Error::EmptyAudio { .. }));
    }
}
