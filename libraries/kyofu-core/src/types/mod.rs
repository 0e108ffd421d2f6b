mod library;
mod metadata;
mod song;

pub use library::{normalize_relative_path, Library, LibraryId};
pub use metadata::{FileMetadata, FileType, Metadata};
pub use song::{CreateSong, Song, SongFields, SongId};
