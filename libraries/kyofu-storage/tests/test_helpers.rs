//! Test helpers and fixtures for storage integration tests
//!
//! These helpers create test databases using real SQLite files (not in-memory)
//! so migrations, constraints and indexes behave as in production.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use kyofu_core::{CreateSong, Library, SongFields};
use sqlx::SqlitePool;
use std::path::Path;
use std::sync::Once;
use tempfile::TempDir;

static TRACING: Once = Once::new();

/// Test database wrapper that cleans up on drop
pub struct TestDb {
    pub pool: SqlitePool,
    _temp_dir: TempDir,
}

impl TestDb {
    /// Create a new test database with migrations applied
    pub async fn new() -> Self {
        TRACING.call_once(|| {
            let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        });

        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = kyofu_storage::create_pool(&db_url)
            .await
            .expect("Failed to create pool");

        kyofu_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            _temp_dir: temp_dir,
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Test fixture: Create a library rooted at a fake path
pub async fn create_test_library(pool: &SqlitePool, name: &str) -> Library {
    kyofu_storage::libraries::create(pool, name, Path::new("/srv/music"))
        .await
        .expect("Failed to create library")
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

pub fn song_fields(title: &str) -> SongFields {
    SongFields {
        title: title.to_string(),
        album: "Selected Ambient Works".to_string(),
        artist: "Aphex Twin".to_string(),
        album_artist: None,
        genre: "Electronic".to_string(),
        track_number: 1,
        disc_number: 1,
        release_year: 1992,
    }
}

pub fn new_song(library: &Library, file_path: &str, modified: i64) -> CreateSong {
    CreateSong {
        library_id: library.id,
        file_path: file_path.to_string(),
        fields: song_fields(file_path),
        modified: Some(at(modified)),
    }
}

/// Test fixture: Insert songs directly through the pool
pub async fn insert_songs(pool: &SqlitePool, library: &Library, paths: &[&str]) {
    for (i, path) in paths.iter().enumerate() {
        kyofu_storage::songs::insert(pool, &new_song(library, path, 1_000 + i as i64))
            .await
            .expect("Failed to insert song");
    }
}
