//! Criterion benchmarks for specplot-core stages
//!
//! Run with: cargo bench -p specplot-core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use specplot_core::{
    AnalysisConfig, Analyzer, FrameGrid, NormalizeMode, Signal, SignalConditioner,
    SmoothingKernel, SpectralAnalyzer, TrackNormalizer, Window,
};
use std::f32::consts::PI;

const SAMPLE_RATE: u32 = 16000;

/// Vowel-like test signal: a few harmonics of 120 Hz plus light noise
fn generate_voiced(size: usize) -> Vec<f32> {
    let mut state = 0x1357_9bdfu32;
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE as f32;
            let voiced = (1..=8)
                .map(|h| (2.0 * PI * 120.0 * h as f32 * t).sin() / h as f32)
                .sum::<f32>();
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let noise = (state as i32 as f32) / (i32::MAX as f32);
            0.3 * voiced + 0.02 * noise
        })
        .collect()
}

// ============================================================================
// Stage benchmarks
// ============================================================================

fn bench_conditioning(c: &mut Criterion) {
    let config = AnalysisConfig::default();
    let conditioner = SignalConditioner::new(&config);
    let signal = Signal::new(generate_voiced(16000), SAMPLE_RATE);

    c.bench_function("Condition_1s", |b| {
        b.iter(|| black_box(conditioner.condition(black_box(&signal))))
    });
}

fn bench_power_spectrum(c: &mut Criterion) {
    let mut group = c.benchmark_group("PowerSpectrum");
    let grid = FrameGrid::from_config(&AnalysisConfig::default());
    let analyzer = SpectralAnalyzer::new(grid, Window::Hamming);

    for &seconds in &[1usize, 4] {
        let samples = generate_voiced(seconds * SAMPLE_RATE as usize);
        group.bench_with_input(BenchmarkId::from_parameter(seconds), &seconds, |b, _| {
            b.iter(|| black_box(analyzer.analyze(black_box(&samples))))
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = TrackNormalizer::new(SmoothingKernel::gaussian(41, 6.0), 40.0);
    let track: Vec<f32> = (0..4000).map(|i| -60.0 * ((i % 300) as f32 / 300.0)).collect();

    c.bench_function("Normalize_4000_frames", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(&track), NormalizeMode::DECIBEL)))
    });
}

// ============================================================================
// Full pipeline
// ============================================================================

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Analyze");
    group.sample_size(20);
    let analyzer = Analyzer::new(AnalysisConfig::default()).unwrap();

    for &seconds in &[1usize, 4] {
        let signal = Signal::new(generate_voiced(seconds * SAMPLE_RATE as usize), SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::from_parameter(seconds), &seconds, |b, _| {
            b.iter(|| black_box(analyzer.analyze(black_box(&signal))))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_conditioning,
    bench_power_spectrum,
    bench_normalize,
    bench_full_pipeline,
);

criterion_main!(benches);
