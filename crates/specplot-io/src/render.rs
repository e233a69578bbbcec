//! Five-panel grayscale rendering of an analysis.
//!
//! Panels are stacked top to bottom on one shared frame axis with height
//! ratios 1:1:1:12:1:
//!
//! | panel              | content                                   |
//! |--------------------|-------------------------------------------|
//! | zero-crossing rate | filled from the track floor to the value  |
//! | total energy       | filled from the track floor to the value  |
//! | low-band energy    | filled from the track floor to the value  |
//! | spectrogram        | inverted gray, loud = dark                |
//! | waveform           | min/max envelope around a center line     |
//!
//! Time ticks every [`RenderOptions::tick_secs`] mark the waveform's bottom
//! edge and continue as a dotted grid over the spectrogram, which also gets a
//! dotted line every kilohertz.

use std::io::{BufWriter, Write};
use std::path::Path;

use specplot_core::{AnalysisConfig, AnalysisOutput, LogSpectrogramImage};

use crate::Result;

const PANEL_RATIOS: [usize; 5] = [1, 1, 1, 12, 1];
const TOTAL_RATIO: usize = 16;

const BACKGROUND: u8 = 255;
const INK: u8 = 0;
const AXIS: u8 = 160;

/// Spacing of the spectrogram's horizontal grid lines.
const GRID_HZ: f32 = 1000.0;

/// Size and dB mapping for [`render_panels`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Pixel columns per frame.
    pub horizontal_scale: usize,
    /// Total image height in pixels, split across panels by ratio.
    pub height: usize,
    /// dB value drawn white in the spectrogram (as a positive spread).
    pub db_spread: f32,
    /// dB value drawn black in the spectrogram (as a positive cutoff).
    pub db_cutoff: f32,
    /// Seconds between time ticks; zero or less draws none.
    pub tick_secs: f32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl RenderOptions {
    /// Options matching the clip window of `config`.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            horizontal_scale: 1,
            height: 640,
            db_spread: config.db_spread,
            db_cutoff: config.db_cutoff,
            tick_secs: 0.1,
        }
    }

    /// Set the pixel columns per frame.
    pub fn with_horizontal_scale(mut self, scale: usize) -> Self {
        self.horizontal_scale = scale;
        self
    }

    /// Set the total image height.
    pub fn with_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Set the time tick spacing.
    pub fn with_tick_secs(mut self, tick_secs: f32) -> Self {
        self.tick_secs = tick_secs;
        self
    }

    /// Heights of the five panels, top to bottom.
    ///
    /// Every panel gets at least one row; the spectrogram absorbs rounding.
    pub fn panel_heights(&self) -> [usize; 5] {
        let height = self.height.max(TOTAL_RATIO);
        let mut heights = PANEL_RATIOS.map(|ratio| height * ratio / TOTAL_RATIO);
        let others: usize = heights.iter().sum::<usize>() - heights[3];
        heights[3] = height - others;
        heights
    }

    /// Map a spectrogram dB value to a gray level: `-spread` white, `-cutoff` black.
    pub fn gray_level(&self, db: f32) -> u8 {
        let range = self.db_spread - self.db_cutoff;
        let t = ((db + self.db_spread) / range).clamp(0.0, 1.0);
        (255.0 * (1.0 - t)).round() as u8
    }
}

/// 8-bit grayscale raster, row-major, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayImage {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl GrayImage {
    /// Blank image filled with `value`.
    pub fn new(width: usize, height: usize, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width * height],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `x`, `y`; `None` when out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Set pixel `x`, `y`; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = value;
        }
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Render a spectrogram at one pixel per frame and row.
    pub fn from_spectrogram(image: &LogSpectrogramImage, options: &RenderOptions) -> Self {
        let mut gray = Self::new(image.num_frames(), image.num_rows(), BACKGROUND);
        for (dst, &db) in gray.pixels.iter_mut().zip(image.pixels()) {
            *dst = options.gray_level(db);
        }
        gray
    }

    /// Write as a plain (P2) PGM file.
    pub fn write_pgm(&self, path: impl AsRef<Path>, comment: &str) -> Result<()> {
        let mut file = BufWriter::new(std::fs::File::create(path)?);

        writeln!(file, "P2")?;
        writeln!(file, "# {comment}")?;
        writeln!(file, "{} {}", self.width, self.height)?;
        writeln!(file, "255")?;

        if self.width > 0 {
            for row in self.pixels.chunks(self.width) {
                for (i, &pixel) in row.iter().enumerate() {
                    if i > 0 {
                        write!(file, " ")?;
                    }
                    write!(file, "{pixel}")?;
                }
                writeln!(file)?;
            }
        }

        file.flush()?;
        Ok(())
    }
}

/// Compose the five stacked panels for `output`.
///
/// Width is `num_frames * horizontal_scale`.
pub fn render_panels(output: &AnalysisOutput, options: &RenderOptions) -> GrayImage {
    let scale = options.horizontal_scale.max(1);
    let width = output.num_frames() * scale;
    let heights = options.panel_heights();
    let mut image = GrayImage::new(width, heights.iter().sum(), BACKGROUND);

    let mut top = 0;
    let tracks = [
        &output.zero_crossing_rate,
        &output.total_energy,
        &output.low_band_energy,
    ];
    for (track, &height) in tracks.iter().zip(&heights) {
        draw_track(&mut image, track, top, height, scale);
        top += height;
    }

    let ticks = tick_times(output.waveform.duration_secs(), options.tick_secs);

    draw_spectrogram(&mut image, &output.spectrogram, top, heights[3], scale, options);
    draw_spectrogram_grid(&mut image, output, &ticks, top, heights[3], scale);
    top += heights[3];

    draw_waveform_ticks(&mut image, output, &ticks, top, heights[4]);
    draw_waveform(&mut image, output.waveform.samples(), top, heights[4]);

    tracing::debug!(
        width = image.width(),
        height = image.height(),
        "rendered panels"
    );
    image
}

/// Fill each column from the bottom of the panel up to the track value,
/// scaled so the track minimum is empty and its maximum is full.
fn draw_track(image: &mut GrayImage, track: &[f32], top: usize, height: usize, scale: usize) {
    let lo = track.iter().copied().fold(f32::INFINITY, f32::min);
    let hi = track.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let range = hi - lo;

    for (frame, &value) in track.iter().enumerate() {
        let fraction = if range > 0.0 { (value - lo) / range } else { 0.0 };
        let filled = (fraction * height as f32).round() as usize;
        for x in frame * scale..(frame + 1) * scale {
            for y in top + height - filled.min(height)..top + height {
                image.set(x, y, INK);
            }
        }
    }
}

fn draw_spectrogram(
    image: &mut GrayImage,
    spectrogram: &LogSpectrogramImage,
    top: usize,
    height: usize,
    scale: usize,
    options: &RenderOptions,
) {
    let rows = spectrogram.num_rows();
    for y in 0..height {
        // nearest source row; row 0 stays the highest frequency
        let src_row = (y * rows / height).min(rows.saturating_sub(1));
        let Some(row) = spectrogram.row(src_row) else {
            continue;
        };
        for (frame, &db) in row.iter().enumerate() {
            let level = options.gray_level(db);
            for x in frame * scale..(frame + 1) * scale {
                image.set(x, top + y, level);
            }
        }
    }
}

/// Tick times `0, tick, 2 * tick, ...` before `duration` seconds.
fn tick_times(duration: f64, tick_secs: f32) -> Vec<f64> {
    if tick_secs.is_nan() || tick_secs <= 0.0 {
        return Vec::new();
    }
    let tick = f64::from(tick_secs);
    (0u32..)
        .map(|k| f64::from(k) * tick)
        .take_while(|&t| t < duration)
        .collect()
}

/// Dotted columns at each tick and dotted rows every [`GRID_HZ`].
fn draw_spectrogram_grid(
    image: &mut GrayImage,
    output: &AnalysisOutput,
    ticks: &[f64],
    top: usize,
    height: usize,
    scale: usize,
) {
    let grid = &output.grid;
    let rows = output.spectrogram.num_rows();
    if rows == 0 || height == 0 {
        return;
    }

    let frames_per_sec = f64::from(grid.sample_rate) / grid.hop_length.max(1) as f64;
    for &t in ticks {
        let frame = (t * frames_per_sec).round() as usize;
        if frame >= output.num_frames() {
            continue;
        }
        for y in (0..height).step_by(2) {
            image.set(frame * scale, top + y, AXIS);
        }
    }

    let nyquist = grid.sample_rate as f32 / 2.0;
    let width = image.width();
    for k in 1u16.. {
        let freq = f32::from(k) * GRID_HZ;
        if freq >= nyquist {
            break;
        }
        let bin = (freq * grid.n_fft as f32 / grid.sample_rate as f32).round() as usize;
        let row = output.spectrogram.row_for_bin(bin.min(rows - 1));
        let y = row * height / rows;
        for x in (0..width).step_by(2) {
            image.set(x, top + y, AXIS);
        }
    }
}

/// Short marks rising from the bottom of the waveform panel at each tick.
fn draw_waveform_ticks(
    image: &mut GrayImage,
    output: &AnalysisOutput,
    ticks: &[f64],
    top: usize,
    height: usize,
) {
    let width = image.width();
    let num_samples = output.waveform.len();
    if width == 0 || num_samples == 0 || height == 0 {
        return;
    }

    let length = (height / 8).max(1);
    let rate = f64::from(output.waveform.sample_rate());
    for &t in ticks {
        let sample = (t * rate).round() as usize;
        let x = sample * width / num_samples;
        for y in top + height - length..top + height {
            image.set(x, y, AXIS);
        }
    }
}

/// Min/max envelope of the samples falling in each column, scaled to the
/// waveform's peak magnitude.
fn draw_waveform(image: &mut GrayImage, samples: &[f32], top: usize, height: usize) {
    let width = image.width();
    if width == 0 || height == 0 {
        return;
    }

    let center = top + height / 2;
    for x in 0..width {
        image.set(x, center, AXIS);
    }

    let peak = samples.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
    if peak == 0.0 || samples.is_empty() {
        return;
    }

    let half = (height as f32 - 1.0) / 2.0;
    let to_y = |v: f32| {
        let offset = (v / peak * half).round() as isize;
        (center as isize - offset).clamp(top as isize, (top + height - 1) as isize) as usize
    };

    for x in 0..width {
        let start = x * samples.len() / width;
        let end = ((x + 1) * samples.len() / width).max(start + 1).min(samples.len());
        let (lo, hi) = samples[start..end]
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        for y in to_y(hi)..=to_y(lo) {
            image.set(x, y, INK);
        }
    }
}
