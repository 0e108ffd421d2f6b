//! Error types for the importer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] kyofu_storage::StorageError),

    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Library not found: {0}")]
    LibraryNotFound(String),

    #[error("Library already exists: {0}")]
    LibraryExists(String),

    #[error("Path hint not found: {0}")]
    HintNotFound(String),

    #[error("Invalid path hint: {0}")]
    InvalidHint(String),

    #[error("Invalid file path: {0}")]
    InvalidPath(String),
}

impl ImportError {
    /// Whether the error was raised before anything was read or staged
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::LibraryNotFound(_)
                | Self::LibraryExists(_)
                | Self::HintNotFound(_)
                | Self::InvalidHint(_)
                | Self::InvalidPath(_)
        )
    }
}
