use std::path::PathBuf;
use thiserror::Error;

/// Fatal failures of the spectrogram tool. None of these are retried.
#[derive(Debug, Error)]
pub enum SpectrogramError {
    #[error("no input file given (use --in <path>)")]
    InputMissing,

    #[error("unsupported file format: {extension:?} (expected .wav or .mp3)")]
    UnsupportedFormat { extension: String },

    #[error("failed to decode {}: {}", .path.display(), .reason)]
    DecodeFailure { path: PathBuf, reason: String },

    #[error("I/O failure on {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid analysis parameters: {0}")]
    InvalidParameters(String),
}

impl SpectrogramError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn decode(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::DecodeFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpectrogramError>;
