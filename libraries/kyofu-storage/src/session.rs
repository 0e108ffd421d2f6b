//! Catalog session
//!
//! Changes are staged in memory and written in one transaction on
//! [`CatalogSession::commit`]. Nothing touches the database before that, so
//! an interrupted run leaves the catalog as it was.

use crate::{songs, Result};
use kyofu_core::{CreateSong, Song};
use sqlx::SqlitePool;
use std::fmt;

/// A change waiting for commit
#[derive(Debug, Clone, PartialEq, Eq)]
enum StagedChange {
    Insert(CreateSong),
    Update(Song),
    Delete(Song),
}

impl StagedChange {
    /// Library-relative path the change applies to
    fn file_path(&self) -> &str {
        match self {
            Self::Insert(song) => &song.file_path,
            Self::Update(song) | Self::Delete(song) => &song.file_path,
        }
    }
}

/// Number of inserts, updates and deletes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChangeCounts {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl ChangeCounts {
    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.deleted
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for ChangeCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inserted, {} updated, {} deleted",
            self.inserted, self.updated, self.deleted
        )
    }
}

/// Staged changes against one catalog plus their atomic commit
pub struct CatalogSession {
    pool: SqlitePool,
    staged: Vec<StagedChange>,
}

impl CatalogSession {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            staged: Vec::new(),
        }
    }

    /// Pool used for reads and for the commit transaction
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn stage_insert(&mut self, song: CreateSong) {
        self.staged.push(StagedChange::Insert(song));
    }

    pub fn stage_update(&mut self, song: Song) {
        self.staged.push(StagedChange::Update(song));
    }

    pub fn stage_delete(&mut self, song: Song) {
        self.staged.push(StagedChange::Delete(song));
    }

    /// Counts of the staged changes
    pub fn pending(&self) -> ChangeCounts {
        let mut counts = ChangeCounts::default();
        for change in &self.staged {
            match change {
                StagedChange::Insert(_) => counts.inserted += 1,
                StagedChange::Update(_) => counts.updated += 1,
                StagedChange::Delete(_) => counts.deleted += 1,
            }
        }
        counts
    }

    pub fn has_pending(&self) -> bool {
        !self.staged.is_empty()
    }

    /// Paths of the staged deletions
    pub fn deleted_paths(&self) -> Vec<&str> {
        self.staged
            .iter()
            .filter(|change| matches!(change, StagedChange::Delete(_)))
            .map(StagedChange::file_path)
            .collect()
    }

    /// Write every staged change in one transaction.
    ///
    /// The staged set is consumed either way. On error the transaction is
    /// rolled back and the catalog is left in its pre-commit state.
    pub async fn commit(&mut self) -> Result<ChangeCounts> {
        let counts = self.pending();
        let staged = std::mem::take(&mut self.staged);
        if staged.is_empty() {
            return Ok(counts);
        }

        let mut tx = self.pool.begin().await?;
        for change in &staged {
            match change {
                StagedChange::Insert(song) => {
                    songs::insert(&mut *tx, song).await?;
                }
                StagedChange::Update(song) => {
                    songs::update(&mut *tx, song).await?;
                }
                StagedChange::Delete(song) => {
                    songs::delete(&mut *tx, song.id).await?;
                }
            }
        }
        tx.commit().await?;

        tracing::info!("Committed: {}", counts);
        Ok(counts)
    }

    /// Discard every staged change, returning what was dropped
    pub fn rollback(&mut self) -> ChangeCounts {
        let counts = self.pending();
        self.staged.clear();
        if !counts.is_empty() {
            tracing::info!("Rolled back: {}", counts);
        }
        counts
    }
}

impl fmt::Debug for CatalogSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogSession")
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_display() {
        let counts = ChangeCounts {
            inserted: 2,
            updated: 1,
            deleted: 0,
        };
        assert_eq!(counts.to_string(), "2 inserted, 1 updated, 0 deleted");
        assert_eq!(counts.total(), 3);
        assert!(!counts.is_empty());
        assert!(ChangeCounts::default().is_empty());
    }
}
