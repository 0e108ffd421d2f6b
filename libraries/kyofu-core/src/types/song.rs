//! Song types
//!
//! One `Song` row exists per `(library_id, file_path)`.

use super::library::{Library, LibraryId};
use super::metadata::Metadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type SongId = i64;

/// Tag fields stored for every song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongFields {
    pub title: String,
    pub album: String,
    pub artist: String,
    pub album_artist: Option<String>,
    pub genre: String,
    pub track_number: u32,
    pub disc_number: u32,
    pub release_year: i32,
}

/// A cataloged song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub library_id: LibraryId,
    /// Path relative to the library root
    pub file_path: String,
    #[serde(flatten)]
    pub fields: SongFields,
    /// Modification time of the source file at last import
    pub modified: DateTime<Utc>,
}

impl Song {
    /// Overwrite every song field and `modified` from freshly extracted
    /// metadata, keeping the song's identity.
    pub fn apply(&mut self, metadata: Metadata) {
        self.fields = metadata.song;
        self.modified = metadata.file.modified_at;
    }

    /// Returns a copy of this song refreshed from `metadata`
    #[must_use]
    pub fn refreshed(&self, metadata: Metadata) -> Self {
        let mut song = self.clone();
        song.apply(metadata);
        song
    }
}

/// Data for creating a new song
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSong {
    pub library_id: LibraryId,
    pub file_path: String,
    #[serde(flatten)]
    pub fields: SongFields,
    /// `None` lets the catalog stamp the write time
    pub modified: Option<DateTime<Utc>>,
}

impl CreateSong {
    pub fn from_metadata(library: &Library, file_path: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            library_id: library.id,
            file_path: file_path.into(),
            fields: metadata.song,
            modified: Some(metadata.file.modified_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FileMetadata, FileType};
    use chrono::TimeZone;
    use std::path::PathBuf;

    fn fields(title: &str) -> SongFields {
        SongFields {
            title: title.to_string(),
            album: "Album".to_string(),
            artist: "Artist".to_string(),
            album_artist: None,
            genre: "Rock".to_string(),
            track_number: 1,
            disc_number: 1,
            release_year: 1999,
        }
    }

    fn metadata(title: &str, secs: i64) -> Metadata {
        Metadata {
            song: fields(title),
            file: FileMetadata {
                path: PathBuf::from("/music/a/01.flac"),
                file_type: FileType::Flac,
                modified_at: Utc.timestamp_opt(secs, 0).unwrap(),
            },
        }
    }

    #[test]
    fn apply_keeps_identity() {
        let mut song = Song {
            id: 7,
            library_id: 3,
            file_path: "a/01.flac".to_string(),
            fields: fields("Old"),
            modified: Utc.timestamp_opt(100, 0).unwrap(),
        };

        song.apply(metadata("New", 200));

        assert_eq!(song.id, 7);
        assert_eq!(song.library_id, 3);
        assert_eq!(song.file_path, "a/01.flac");
        assert_eq!(song.fields.title, "New");
        assert_eq!(song.modified.timestamp(), 200);
    }

    #[test]
    fn create_song_takes_library_and_mtime() {
        let library = Library::new(4, "main", PathBuf::from("/music"));
        let create = CreateSong::from_metadata(&library, "a/01.flac", metadata("T", 300));

        assert_eq!(create.library_id, 4);
        assert_eq!(create.file_path, "a/01.flac");
        assert_eq!(create.modified.map(|m| m.timestamp()), Some(300));
    }
}
