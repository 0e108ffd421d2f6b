//! Kyofu Storage
//!
//! `SQLite` catalog store for libraries and their songs.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: `libraries` and `songs` own their queries
//! - **Staged Writes**: reconciliation stages changes into a [`CatalogSession`]
//!   and commits them in a single transaction
//!
//! # Example
//!
//! ```rust,no_run
//! use kyofu_storage::{create_pool, libraries, run_migrations, songs};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://kyofu.db").await?;
//! run_migrations(&pool).await?;
//!
//! if let Some(library) = libraries::find_by_name(&pool, "main").await? {
//!     let tracked = songs::count(&pool, library.id).await?;
//!     println!("{} songs in {}", tracked, library.name);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod pattern;
mod session;

// Vertical slices
pub mod libraries;
pub mod songs;

pub use error::{Result, StorageError};
pub use pattern::escape_for_like;
pub use session::{CatalogSession, ChangeCounts};

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `sqlite://kyofu.db`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating pool: url={}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Convert a stored epoch-seconds column into a UTC timestamp
pub(crate) fn timestamp_from_db(secs: i64) -> Result<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| StorageError::InvalidData(format!("Invalid timestamp: {}", secs)))
}
