//! Kyofu Metadata
//!
//! Tag extraction for the catalog.
//!
//! This crate provides:
//! - Container detection (MP3, FLAC, AAC; everything else is rejected)
//! - Mapping of lofty tags onto `SongFields`, with typed failures for
//!   missing and malformed fields
//!
//! # Example
//!
//! ```rust,no_run
//! use kyofu_core::MetadataExtractor;
//! use kyofu_metadata::LoftyExtractor;
//! use std::path::Path;
//!
//! let extractor = LoftyExtractor::new();
//! match extractor.extract(Path::new("/music/song.flac")) {
//!     Ok(metadata) => println!("{} - {}", metadata.song.artist, metadata.song.title),
//!     Err(e) => eprintln!("skipped: {e}"),
//! }
//! ```

mod fields;
mod reader;

pub use fields::{parse_number, parse_year, song_fields_from_tag};
pub use reader::{detect_file_type, LoftyExtractor};
