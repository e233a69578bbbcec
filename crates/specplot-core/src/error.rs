//! Error types for analysis and configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by the analysis pipeline and its configuration layer.
///
/// Only structural precondition violations end up here. Silent input, signals
/// shorter than one window and zero-power frames are absorbed by the pipeline
/// and never produce an error.
#[derive(Debug, Error)]
pub enum Error {
    /// The input signal has no samples.
    #[error("input signal is empty")]
    EmptySignal,

    /// A configuration field holds a value the pipeline cannot work with.
    #[error("invalid config field '{field}': {reason}")]
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// Description of why the value is rejected.
        reason: String,
    },

    /// The signal was produced at a different rate than the pipeline runs at.
    #[error("sample rate mismatch: analyzer runs at {expected} Hz, signal is {actual} Hz")]
    SampleRateMismatch {
        /// Working rate of the analyzer.
        expected: u32,
        /// Rate attached to the signal.
        actual: u32,
    },

    /// Failed to read a config file
    #[error("failed to read file '{path}': {source}")]
    ReadFile {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a config file
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        /// Path of the file that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to serialize TOML
    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl Error {
    /// Create an invalid config error.
    pub fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    /// Create a read file error.
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Create a write file error.
    pub fn write_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::WriteFile {
            path: path.into(),
            source,
        }
    }
}

/// Convenience result type for analysis operations.
pub type Result<T> = std::result::Result<T, Error>;
