//! End-to-end scenarios for the analysis pipeline.

use specplot_core::{AnalysisConfig, Analyzer, Error, Signal};
use std::f32::consts::PI;

const SR: u32 = 16000;

fn analyzer() -> Analyzer {
    Analyzer::new(AnalysisConfig::default()).unwrap()
}

fn sine(freq: f32, len: usize) -> Vec<f32> {
    (0..len)
        .map(|i| (2.0 * PI * freq * i as f32 / SR as f32).sin())
        .collect()
}

fn noise(len: usize) -> Vec<f32> {
    let mut state = 0x2468_ace1u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as i32 as f32) / (i32::MAX as f32)
        })
        .collect()
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

fn rms(values: &[f32]) -> f32 {
    (values.iter().map(|v| v * v).sum::<f32>() / values.len() as f32).sqrt()
}

#[test]
fn one_second_of_silence() {
    let out = analyzer().analyze(&Signal::new(vec![0.0; 16000], SR)).unwrap();
    let frames = (16000 - 64) / 16 + 1;

    assert_eq!(out.num_frames(), frames);
    assert!(out.waveform.samples().iter().all(|&v| v == 0.0));
    assert!(out.zero_crossing_rate.iter().all(|&v| v == 0.0));
    for track in [&out.total_energy, &out.low_band_energy] {
        assert_eq!(track.len(), frames);
        assert!(track.iter().all(|&v| v == 0.0));
    }
    assert!(out.spectrogram.pixels().iter().all(|&v| v == -3.0));
}

#[test]
fn constant_input_matches_silence() {
    let silent = analyzer().analyze(&Signal::new(vec![0.0; 4000], SR)).unwrap();
    let constant = analyzer().analyze(&Signal::new(vec![0.7; 4000], SR)).unwrap();
    assert_eq!(silent, constant);
}

#[test]
fn tone_peaks_at_its_bin() {
    let out = analyzer().analyze(&Signal::new(sine(440.0, 16000), SR)).unwrap();
    let image = &out.spectrogram;

    // 440 Hz / 8000 Hz * 513 bins
    let tone_row = image.row_for_bin(28);
    let far_row = image.row_for_bin(448);

    let near_peak = (0..out.num_frames())
        .filter(|&frame| {
            let column_max = (0..image.num_rows())
                .filter_map(|row| image.get(row, frame))
                .fold(f32::NEG_INFINITY, f32::max);
            image.get(tone_row, frame).unwrap() >= column_max - 3.0
        })
        .count();
    assert!(near_peak * 2 > out.num_frames(), "{near_peak} of {}", out.num_frames());

    let tone_level = mean(image.row(tone_row).unwrap());
    let far_level = mean(image.row(far_row).unwrap());
    assert!(
        tone_level > far_level + 20.0,
        "tone row {tone_level} dB vs far row {far_level} dB"
    );
    assert!(far_level < -35.0, "far row {far_level} dB");
}

#[test]
fn signal_shorter_than_window() {
    let samples: Vec<f32> = (0..10).map(|i| i as f32 * 0.1 - 0.45).collect();
    let out = analyzer().analyze(&Signal::new(samples, SR)).unwrap();

    assert_eq!(out.num_frames(), 1);
    assert_eq!(out.waveform.len(), 10);
    assert_eq!(out.total_energy, vec![0.0]);
    assert_eq!(out.low_band_energy, vec![0.0]);
    assert_eq!(out.zero_crossing_rate, vec![0.0]);
    assert_eq!(out.spectrogram.num_rows(), 513);
    assert!(out.spectrogram.pixels().iter().all(|v| (-40.0..=-3.0).contains(v)));
}

#[test]
fn low_band_follows_low_tone() {
    // 300 Hz for the first half, 3 kHz for the second
    let mut samples = sine(300.0, 16000);
    samples.extend(sine(3000.0, 16000));
    let out = analyzer().analyze(&Signal::new(samples, SR)).unwrap();

    let frames = out.num_frames();
    let early = frames / 4;
    let late = 3 * frames / 4;
    assert_eq!(out.low_band_bins, 8..48);
    assert!(
        out.low_band_energy[early] > out.low_band_energy[late] + 20.0,
        "low band {} vs {}",
        out.low_band_energy[early],
        out.low_band_energy[late]
    );
}

#[test]
fn zero_crossing_rate_rises_with_noise() {
    let mut samples: Vec<f32> = sine(200.0, 16000).iter().map(|v| v * 0.5).collect();
    samples.extend(noise(16000).iter().map(|v| v * 0.5));
    let out = analyzer().analyze(&Signal::new(samples, SR)).unwrap();

    let frames = out.num_frames();
    let tonal = out.zero_crossing_rate[frames / 4];
    let noisy = out.zero_crossing_rate[3 * frames / 4];
    assert!(noisy > tonal + 0.2, "noisy {noisy} vs tonal {tonal}");
}

#[test]
fn mains_hum_is_notched() {
    let hum = sine(60.0, 32000);
    let out = analyzer().analyze(&Signal::new(hum.clone(), SR)).unwrap();

    let tail = &out.waveform.samples()[28000..];
    assert!(rms(tail) < 0.01 * rms(&hum[28000..]), "residual rms {}", rms(tail));
}

#[test]
fn rate_mismatch_is_reported() {
    let err = analyzer().analyze(&Signal::new(vec![0.1; 800], 8000)).unwrap_err();
    assert!(matches!(err, Error::SampleRateMismatch { expected: 16000, actual: 8000 }));
}

#[test]
fn config_from_toml_drives_analysis() {
    let config = AnalysisConfig::from_toml(
        "window_size = 0.008\nwindow_stride = 0.002\nn_fft = 512\nwindow = \"hann\"\n",
    )
    .unwrap();
    let out = Analyzer::new(config).unwrap().analyze(&Signal::new(sine(440.0, 8000), SR)).unwrap();

    // 128-sample window, 32-sample hop
    assert_eq!(out.num_frames(), (8000 - 128) / 32 + 1);
    assert_eq!(out.num_rows(), 257);
    assert_eq!(out.grid.win_length, 128);
}

#[test]
fn large_amplitude_stays_finite() {
    for amplitude in [1e20f32, 1e30] {
        let loud: Vec<f32> = sine(440.0, 4000).iter().map(|v| v * amplitude).collect();
        let out = analyzer().analyze(&Signal::new(loud, SR)).unwrap();

        assert!(out.waveform.samples().iter().all(|v| v.is_finite()));
        assert!(out.spectrogram.pixels().iter().all(|v| (-40.0..=-3.0).contains(v)));
        assert!(out.zero_crossing_rate.iter().all(|v| v.is_finite()));
        for track in [&out.total_energy, &out.low_band_energy] {
            assert!(track.iter().all(|&v| v.is_finite() && v <= 0.0), "{amplitude}");
            assert_eq!(track.iter().copied().fold(f32::MIN, f32::max), 0.0);
        }
    }
}

#[test]
fn loudness_does_not_change_the_image() {
    let quiet = analyzer().analyze(&Signal::new(sine(440.0, 4000), SR)).unwrap();
    let loud: Vec<f32> = sine(440.0, 4000).iter().map(|v| v * 1e20).collect();
    let loud = analyzer().analyze(&Signal::new(loud, SR)).unwrap();

    let tone_row = quiet.spectrogram.row_for_bin(28);
    let quiet_level = mean(quiet.spectrogram.row(tone_row).unwrap());
    let loud_level = mean(loud.spectrogram.row(tone_row).unwrap());
    assert!((quiet_level - loud_level).abs() < 0.5, "{quiet_level} vs {loud_level}");
}
