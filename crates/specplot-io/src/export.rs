//! Export formats for analysis results.
//!
//! - CSV for the three feature tracks
//! - PGM for the spectrogram and the composed panel image
//! - 32-bit float WAV for the conditioned waveform

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use specplot_core::{AnalysisOutput, LogSpectrogramImage, Signal};

use crate::Result;
use crate::render::{GrayImage, RenderOptions, render_panels};
use crate::wav::{WavSpec, write_wav};

/// Header row written by [`export_tracks_csv`].
pub const TRACKS_CSV_HEADER: &str = "frame,time_s,zcr,total_energy_db,low_band_energy_db";

/// Paths written by [`export_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    /// Composed five-panel image.
    pub panels: PathBuf,
    /// Feature tracks.
    pub tracks_csv: PathBuf,
    /// Full-resolution spectrogram.
    pub spectrogram_pgm: PathBuf,
    /// Conditioned waveform.
    pub waveform_wav: PathBuf,
}

impl ExportedFiles {
    /// Paths derived from `prefix`: `<prefix>.pgm`, `<prefix>.csv`,
    /// `<prefix>_spectrogram.pgm`, `<prefix>_waveform.wav`.
    pub fn from_prefix(prefix: impl AsRef<Path>) -> Self {
        let prefix = prefix.as_ref();
        let with_suffix = |suffix: &str| {
            let mut name = prefix.as_os_str().to_owned();
            name.push(suffix);
            PathBuf::from(name)
        };
        Self {
            panels: with_suffix(".pgm"),
            tracks_csv: with_suffix(".csv"),
            spectrogram_pgm: with_suffix("_spectrogram.pgm"),
            waveform_wav: with_suffix("_waveform.wav"),
        }
    }

    /// Every path, panels first.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [
            &self.panels,
            &self.tracks_csv,
            &self.spectrogram_pgm,
            &self.waveform_wav,
        ]
        .into_iter()
        .map(PathBuf::as_path)
    }
}

/// Write the three feature tracks as CSV, one row per frame.
///
/// Columns are [`TRACKS_CSV_HEADER`]; `time_s` is the frame start time.
pub fn export_tracks_csv(output: &AnalysisOutput, path: impl AsRef<Path>) -> Result<()> {
    let mut file = BufWriter::new(std::fs::File::create(path)?);

    writeln!(file, "{TRACKS_CSV_HEADER}")?;
    for frame in 0..output.num_frames() {
        writeln!(
            file,
            "{},{:.6},{:.6},{:.6},{:.6}",
            frame,
            output.grid.frame_to_time(frame),
            output.zero_crossing_rate[frame],
            output.total_energy[frame],
            output.low_band_energy[frame],
        )?;
    }

    file.flush()?;
    Ok(())
}

/// Write the spectrogram as a plain PGM, one pixel per frame and bin.
///
/// Row 0 is the highest frequency; `-db_spread` maps to 255 and `-db_cutoff`
/// to 0.
pub fn export_spectrogram_pgm(
    image: &LogSpectrogramImage,
    path: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<()> {
    let comment = format!(
        "Spectrogram export from specplot: {} frames, {} bins",
        image.num_frames(),
        image.num_rows()
    );
    GrayImage::from_spectrogram(image, options).write_pgm(path, &comment)
}

/// Write the conditioned waveform as mono 32-bit float WAV.
pub fn export_waveform_wav(waveform: &Signal, path: impl AsRef<Path>) -> Result<()> {
    write_wav(path, waveform.samples(), WavSpec::mono_float(waveform.sample_rate()))
}

/// Write the panel image and every companion artefact next to each other.
///
/// See [`ExportedFiles::from_prefix`] for the file names.
pub fn export_all(
    output: &AnalysisOutput,
    prefix: impl AsRef<Path>,
    options: &RenderOptions,
) -> Result<ExportedFiles> {
    let files = ExportedFiles::from_prefix(prefix);

    render_panels(output, options).write_pgm(&files.panels, "Panels from specplot")?;
    export_tracks_csv(output, &files.tracks_csv)?;
    export_spectrogram_pgm(&output.spectrogram, &files.spectrogram_pgm, options)?;
    export_waveform_wav(&output.waveform, &files.waveform_wav)?;

    tracing::info!(panels = %files.panels.display(), "exported analysis");
    Ok(files)
}
