//! Transient metadata produced by an extractor
//!
//! Never persisted as-is: the reconcilers fold it into a `Song` or a
//! `CreateSong` and drop it.

use super::song::SongFields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Audio container detected for a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Mp3,
    Flac,
    Aac,
    Unknown,
}

impl FileType {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Flac => "flac",
            Self::Aac => "aac",
            Self::Unknown => "unknown",
        }
    }

    /// Whether tags can be extracted for this type
    #[must_use]
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Filesystem facts about an extracted file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    /// Resolved absolute path
    pub path: PathBuf,
    pub file_type: FileType,
    /// Filesystem modification time
    pub modified_at: DateTime<Utc>,
}

/// Tag fields paired with file facts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub song: SongFields,
    pub file: FileMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_strings() {
        for (file_type, s) in [
            (FileType::Mp3, "mp3"),
            (FileType::Flac, "flac"),
            (FileType::Aac, "aac"),
            (FileType::Unknown, "unknown"),
        ] {
            assert_eq!(file_type.as_str(), s);
            assert_eq!(file_type.to_string(), s);
        }
    }

    #[test]
    fn only_unknown_is_unsupported() {
        assert!(FileType::Mp3.is_supported());
        assert!(FileType::Flac.is_supported());
        assert!(FileType::Aac.is_supported());
        assert!(!FileType::Unknown.is_supported());
    }

    #[test]
    fn file_type_serializes_lowercase() {
        let json = serde_json::to_string(&FileType::Flac).unwrap();
        assert_eq!(json, "\"flac\"");
    }
}
