/// Core traits for Kyofu
use crate::error::ExtractionError;
use crate::types::Metadata;
use std::path::Path;

/// Metadata extractor trait
///
/// Implementers turn one audio file into a `Metadata` record. Each call is
/// independent of every other call.
pub trait MetadataExtractor {
    /// Extract tag and file metadata from the file at `path`
    ///
    /// # Errors
    /// Returns an `ExtractionError` describing why this particular file was
    /// rejected. Callers treat it as a per-file failure.
    fn extract(&self, path: &Path) -> Result<Metadata, ExtractionError>;
}

impl<T: MetadataExtractor + ?Sized> MetadataExtractor for &T {
    fn extract(&self, path: &Path) -> Result<Metadata, ExtractionError> {
        (**self).extract(path)
    }
}
