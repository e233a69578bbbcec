//! Text summary printed when no output file is requested.

use specplot_core::AnalysisOutput;
use std::path::Path;

/// Min, mean and max of a track.
struct TrackStats {
    min: f32,
    mean: f32,
    max: f32,
}

impl TrackStats {
    fn of(track: &[f32]) -> Self {
        let min = track.iter().copied().fold(f32::INFINITY, f32::min);
        let max = track.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let mean = track.iter().sum::<f32>() / track.len().max(1) as f32;
        Self { min, mean, max }
    }
}

/// Print geometry and per-track statistics for `output`.
pub fn print(file: &Path, output: &AnalysisOutput) {
    let grid = &output.grid;
    let waveform = &output.waveform;

    println!("File:        {}", file.display());
    println!(
        "Duration:    {:.3}s ({} samples at {} Hz)",
        waveform.duration_secs(),
        waveform.len(),
        waveform.sample_rate()
    );
    println!(
        "Frames:      {} (window {} / hop {} samples, {}-point FFT)",
        output.num_frames(),
        grid.win_length,
        grid.hop_length,
        grid.n_fft
    );
    println!(
        "Low band:    bins {}..{} ({:.0}-{:.0} Hz)",
        output.low_band_bins.start,
        output.low_band_bins.end,
        grid.bin_to_freq(output.low_band_bins.start),
        grid.bin_to_freq(output.low_band_bins.end),
    );

    println!();
    println!("{:<18} {:>10} {:>10} {:>10}", "Track", "Min", "Mean", "Max");
    println!("{}", "-".repeat(51));
    let tracks = [
        ("Zero-crossing", &output.zero_crossing_rate),
        ("Total energy dB", &output.total_energy),
        ("Low-band dB", &output.low_band_energy),
    ];
    for (name, track) in tracks {
        let stats = TrackStats::of(track);
        println!(
            "{:<18} {:>10.3} {:>10.3} {:>10.3}",
            name, stats.min, stats.mean, stats.max
        );
    }

    if let Some(loudest) = output.total_energy.iter().position(|&v| v == 0.0) {
        println!();
        println!("Loudest frame: {} at {:.3}s", loudest, grid.frame_to_time(loudest));
    }
}
