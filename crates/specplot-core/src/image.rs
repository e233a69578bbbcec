//! Clipped log-power spectrogram image.

use crate::spectrum::PowerSpectrum;

/// Power spectrum in dB relative to its global maximum, clipped to
/// `[-spread, -cutoff]`, with row 0 holding the highest frequency bin.
#[derive(Debug, Clone, PartialEq)]
pub struct LogSpectrogramImage {
    /// Row-major pixels, `num_rows * num_frames`.
    data: Vec<f32>,
    num_rows: usize,
    num_frames: usize,
}

impl LogSpectrogramImage {
    /// Render `spectrum` with the given clip window and power floor.
    ///
    /// Every power (and the reference maximum) is raised to `power_floor`
    /// before `log10`, so silent input yields a finite image.
    pub fn from_spectrum(spectrum: &PowerSpectrum, spread: f32, cutoff: f32, power_floor: f32) -> Self {
        let num_rows = spectrum.num_bins();
        let num_frames = spectrum.num_frames();
        let floor = f64::from(power_floor);
        let ref_db = 10.0 * spectrum.max_power().max(floor).log10();

        // bin-major, low frequency first
        let mut data = vec![0.0f32; num_rows * num_frames];
        for (frame_idx, frame) in spectrum.frames().enumerate() {
            for (bin, &power) in frame.iter().enumerate() {
                let db = (10.0 * power.max(floor).log10() - ref_db) as f32;
                data[bin * num_frames + frame_idx] = db.clamp(-spread, -cutoff);
            }
        }

        let mut image = Self {
            data,
            num_rows,
            num_frames,
        };
        image.flip_frequency_axis();
        image
    }

    /// Reverse the row order in place.
    fn flip_frequency_axis(&mut self) {
        if self.num_frames == 0 {
            return;
        }
        let rows: Vec<&[f32]> = self.data.chunks(self.num_frames).rev().collect();
        self.data = rows.concat();
    }

    /// Number of rows (frequency bins).
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Number of columns (frames).
    pub fn num_frames(&self) -> usize {
        self.num_frames
    }

    /// Pixel at `row`, `frame`; `None` when out of bounds.
    pub fn get(&self, row: usize, frame: usize) -> Option<f32> {
        if row < self.num_rows && frame < self.num_frames {
            Some(self.data[row * self.num_frames + frame])
        } else {
            None
        }
    }

    /// One row across all frames.
    pub fn row(&self, row: usize) -> Option<&[f32]> {
        (row < self.num_rows).then(|| &self.data[row * self.num_frames..(row + 1) * self.num_frames])
    }

    /// Row that displays frequency bin `bin`.
    pub fn row_for_bin(&self, bin: usize) -> usize {
        self.num_rows - 1 - bin
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[f32] {
        &self.data
    }
}
