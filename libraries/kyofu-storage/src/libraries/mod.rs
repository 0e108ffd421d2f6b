//! Library storage
//!
//! Libraries are created once by `init` and never mutated afterward.

use crate::{Result, StorageError};
use kyofu_core::Library;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use std::path::{Path, PathBuf};

fn library_from_row(row: &SqliteRow) -> Library {
    Library::new(
        row.get::<i64, _>("id"),
        row.get::<String, _>("name"),
        PathBuf::from(row.get::<String, _>("base_path")),
    )
}

/// Find a library by its unique name
pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Library>> {
    let row = sqlx::query("SELECT id, name, base_path FROM libraries WHERE name = ?")
        .bind(name)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(library_from_row))
}

/// Create a library
///
/// `base_path` is stored as given; callers canonicalize it first. A root
/// that is not valid UTF-8 is rejected.
pub async fn create(pool: &SqlitePool, name: &str, base_path: &Path) -> Result<Library> {
    let base = base_path.to_str().ok_or_else(|| {
        StorageError::InvalidData(format!("Non UTF-8 base path: {}", base_path.display()))
    })?;

    let result = sqlx::query("INSERT INTO libraries (name, base_path) VALUES (?, ?)")
        .bind(name)
        .bind(base)
        .execute(pool)
        .await?;

    tracing::info!("Library created: name={} base_path={}", name, base);

    Ok(Library::new(
        result.last_insert_rowid(),
        name,
        PathBuf::from(base),
    ))
}
