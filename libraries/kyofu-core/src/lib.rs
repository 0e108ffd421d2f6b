//! Kyofu Core
//!
//! Domain types and the metadata extraction seam shared by every Kyofu
//! crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Library`, `Song`, `CreateSong`, `Metadata`
//! - **Core Traits**: `MetadataExtractor`
//! - **Error Handling**: `ExtractionError`, the per-file extraction failure
//!
//! # Example
//!
//! ```rust
//! use kyofu_core::types::Library;
//! use std::path::{Path, PathBuf};
//!
//! let library = Library::new(1, "main", PathBuf::from("/music"));
//! assert_eq!(
//!     library.relative_path(Path::new("/music/Artist/01.flac")).as_deref(),
//!     Some("Artist/01.flac")
//! );
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

pub use error::ExtractionError;
pub use traits::MetadataExtractor;

pub use types::{
    normalize_relative_path, CreateSong, FileMetadata, FileType, Library, LibraryId, Metadata,
    Song, SongFields, SongId,
};
