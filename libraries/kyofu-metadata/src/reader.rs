/// Metadata extractor implementation using lofty
use crate::fields::song_fields_from_tag;
use chrono::{DateTime, Utc};
use kyofu_core::{ExtractionError, FileMetadata, FileType, Metadata, MetadataExtractor};
use lofty::error::ErrorKind;
use lofty::TaggedFileExt;
use std::path::Path;

/// Map a lofty container type onto the catalog's file types
pub fn detect_file_type(file_type: lofty::FileType) -> FileType {
    match file_type {
        lofty::FileType::Mpeg => FileType::Mp3,
        lofty::FileType::Flac => FileType::Flac,
        lofty::FileType::Aac => FileType::Aac,
        _ => FileType::Unknown,
    }
}

/// Metadata extractor using the lofty library
#[derive(Debug, Default, Clone, Copy)]
pub struct LoftyExtractor;

impl LoftyExtractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self
    }
}

fn unreadable(path: &Path, reason: impl ToString) -> ExtractionError {
    ExtractionError::Unreadable {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

impl MetadataExtractor for LoftyExtractor {
    fn extract(&self, path: &Path) -> Result<Metadata, ExtractionError> {
        let resolved = path.canonicalize().map_err(|e| unreadable(path, e))?;

        let tagged_file = lofty::read_from_path(&resolved).map_err(|e| match e.kind() {
            ErrorKind::UnknownFormat => ExtractionError::UnsupportedFormat {
                path: resolved.clone(),
                detected: "unknown".to_string(),
            },
            _ => unreadable(&resolved, e),
        })?;

        let file_type = detect_file_type(tagged_file.file_type());
        if !file_type.is_supported() {
            return Err(ExtractionError::UnsupportedFormat {
                path: resolved,
                detected: format!("{:?}", tagged_file.file_type()),
            });
        }

        // Prefer the format's native tag (ID3v2 for MP3, Vorbis comments for FLAC)
        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .ok_or_else(|| ExtractionError::MissingField {
                path: resolved.clone(),
                field: "title",
            })?;

        let song = song_fields_from_tag(tag, &resolved)?;

        let modified_at = std::fs::metadata(&resolved)
            .and_then(|m| m.modified())
            .map(DateTime::<Utc>::from)
            .map_err(|e| unreadable(&resolved, e))?;

        tracing::debug!(
            "extracted: path={}, type={}, title={:?}",
            resolved.display(),
            file_type,
            song.title
        );

        Ok(Metadata {
            song,
            file: FileMetadata {
                path: resolved,
                file_type,
                modified_at,
            },
        })
    }
}
