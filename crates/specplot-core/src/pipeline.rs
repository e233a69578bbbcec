//! End-to-end analysis: raw samples in, five aligned tracks out.

use std::ops::Range;

use crate::conditioner::SignalConditioner;
use crate::config::AnalysisConfig;
use crate::error::{Error, Result};
use crate::features::FeatureExtractor;
use crate::grid::FrameGrid;
use crate::image::LogSpectrogramImage;
use crate::kernel::SmoothingKernel;
use crate::normalize::TrackNormalizer;
use crate::signal::Signal;
use crate::spectrum::SpectralAnalyzer;

/// Result of one analysis call.
///
/// The three tracks and the image share one frame axis of
/// [`num_frames`](Self::num_frames) columns.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutput {
    /// DC-removed, notch-filtered, pre-emphasized waveform (input length).
    pub waveform: Signal,
    /// Log-power image in `[-spread, -cutoff]` dB, highest frequency in row 0.
    pub spectrogram: LogSpectrogramImage,
    /// Smoothed zero-crossing rate, minimum 0, within `[0, 1]`.
    pub zero_crossing_rate: Vec<f32>,
    /// Smoothed total energy in dB, maximum 0.
    pub total_energy: Vec<f32>,
    /// Smoothed low-band energy in dB, maximum 0.
    pub low_band_energy: Vec<f32>,
    /// Geometry the tracks were computed on.
    pub grid: FrameGrid,
    /// Bin range summed into `low_band_energy`.
    pub low_band_bins: Range<usize>,
}

impl AnalysisOutput {
    /// Number of frames shared by the tracks and the image.
    pub fn num_frames(&self) -> usize {
        self.spectrogram.num_frames()
    }

    /// Number of image rows (frequency bins).
    pub fn num_rows(&self) -> usize {
        self.spectrogram.num_rows()
    }
}

/// The analysis pipeline, built once per configuration.
///
/// ```rust
/// use specplot_core::{AnalysisConfig, Analyzer, Signal};
///
/// let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();
/// let tone: Vec<f32> = (0..16000)
///     .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 16000.0).sin())
///     .collect();
/// let out = analyzer.analyze(&Signal::new(tone, 16000)).unwrap();
///
/// assert_eq!(out.num_frames(), (16000 - 64) / 16 + 1);
/// assert_eq!(out.total_energy.iter().copied().fold(f32::MIN, f32::max), 0.0);
/// ```
#[derive(Debug)]
pub struct Analyzer {
    config: AnalysisConfig,
    grid: FrameGrid,
    conditioner: SignalConditioner,
    spectral: SpectralAnalyzer,
    features: FeatureExtractor,
}

impl Analyzer {
    /// Validate `config` and build every stage from it.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        config.validate()?;

        let grid = FrameGrid::from_config(&config);
        let conditioner = SignalConditioner::new(&config);
        let spectral = SpectralAnalyzer::new(grid, config.window);
        let normalizer = TrackNormalizer::new(
            SmoothingKernel::gaussian(config.kernel_length, config.kernel_std),
            config.db_spread,
        );
        let features = FeatureExtractor::new(
            grid,
            normalizer,
            (config.low_band_min_hz, config.low_band_max_hz),
            config.power_floor,
        );

        #[cfg(feature = "tracing")]
        tracing::debug!(
            win_length = grid.win_length,
            hop_length = grid.hop_length,
            n_fft = grid.n_fft,
            low_band = ?features.low_band(),
            "analyzer geometry"
        );

        Ok(Self {
            config,
            grid,
            conditioner,
            spectral,
            features,
        })
    }

    /// Configuration in use.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze one signal.
    ///
    /// Fails only for an empty signal or one recorded at a different rate.
    /// Silent or constant input, and input shorter than a window, still
    /// produce finite tracks.
    pub fn analyze(&self, signal: &Signal) -> Result<AnalysisOutput> {
        if signal.is_empty() {
            return Err(Error::EmptySignal);
        }
        if signal.sample_rate() != self.config.sample_rate {
            return Err(Error::SampleRateMismatch {
                expected: self.config.sample_rate,
                actual: signal.sample_rate(),
            });
        }

        #[cfg(feature = "tracing")]
        if signal.is_constant() {
            tracing::warn!(samples = signal.len(), "input has zero variance; tracks will be flat");
        }

        let centered = SignalConditioner::remove_dc(signal);
        let filtered = self.conditioner.apply_notch(&centered);
        let waveform = self.conditioner.pre_emphasize(&filtered);

        let spectrum = self.spectral.analyze(waveform.samples());
        let spectrogram = LogSpectrogramImage::from_spectrum(
            &spectrum,
            self.config.db_spread,
            self.config.db_cutoff,
            self.config.power_floor,
        );

        let zero_crossing_rate = self.features.zero_crossing_rate(centered.samples());
        let total_energy = self.features.total_energy(&spectrum);
        let low_band_energy = self.features.low_band_energy(&spectrum);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            samples = signal.len(),
            frames = spectrum.num_frames(),
            "analysis complete"
        );

        Ok(AnalysisOutput {
            waveform,
            spectrogram,
            zero_crossing_rate,
            total_energy,
            low_band_energy,
            grid: self.grid,
            low_band_bins: self.features.low_band(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> Analyzer {
        Analyzer::new(AnalysisConfig::default()).unwrap()
    }

    #[test]
    fn rejects_empty_signal() {
        let err = analyzer().analyze(&Signal::new(vec![], 16000)).unwrap_err();
        assert!(matches!(err, Error::EmptySignal));
    }

    #[test]
    fn rejects_wrong_rate() {
        let err = analyzer()
            .analyze(&Signal::new(vec![0.0; 100], 44100))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::SampleRateMismatch {
                expected: 16000,
                actual: 44100
            }
        ));
    }

    #[test]
    fn rejects_invalid_config() {
        let config = AnalysisConfig::default().with_n_fft(48);
        assert!(matches!(
            Analyzer::new(config),
            Err(Error::InvalidConfig { field: "n_fft", .. })
        ));
    }

    #[test]
    fn output_shapes_align() {
        let samples: Vec<f32> = (0..3000).map(|i| ((i * 31) % 17) as f32 / 17.0 - 0.5).collect();
        let out = analyzer().analyze(&Signal::new(samples, 16000)).unwrap();
        let frames = (3000 - 64) / 16 + 1;
        assert_eq!(out.waveform.len(), 3000);
        assert_eq!(out.num_frames(), frames);
        assert_eq!(out.num_rows(), 513);
        assert_eq!(out.zero_crossing_rate.len(), frames);
        assert_eq!(out.total_energy.len(), frames);
        assert_eq!(out.low_band_energy.len(), frames);
        assert_eq!(out.low_band_bins, 8..48);
    }

    #[test]
    fn single_sample_signal() {
        let out = analyzer().analyze(&Signal::new(vec![0.3], 16000)).unwrap();
        assert_eq!(out.num_frames(), 1);
        assert_eq!(out.waveform.samples(), &[0.0]);
        assert_eq!(out.total_energy, vec![0.0]);
        assert_eq!(out.zero_crossing_rate, vec![0.0]);
    }
}
