/// Metadata extraction errors
use std::path::PathBuf;
use thiserror::Error;

/// Why a single file could not be turned into `Metadata`.
///
/// Extraction failures are per-file: the reconcilers log them and move on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The file could not be opened or its container could not be parsed
    #[error("Unreadable file {path}: {reason}")]
    Unreadable { path: PathBuf, reason: String },

    /// The detected container is not one of MP3, FLAC or AAC
    #[error("Unsupported format for {path}: {detected}")]
    UnsupportedFormat { path: PathBuf, detected: String },

    /// A required tag is absent or empty
    #[error("Missing required field '{field}' in {path}")]
    MissingField { path: PathBuf, field: &'static str },

    /// A numeric or date tag could not be parsed
    #[error("Malformed field '{field}' in {path}: {value:?}")]
    MalformedField {
        path: PathBuf,
        field: &'static str,
        value: String,
    },
}

impl ExtractionError {
    /// The file the failure refers to
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Unreadable { path, .. }
            | Self::UnsupportedFormat { path, .. }
            | Self::MissingField { path, .. }
            | Self::MalformedField { path, .. } => path,
        }
    }
}
