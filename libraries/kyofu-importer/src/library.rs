//! Library-level operations
//!
//! Each function resolves the library by name, runs one reconciliation and
//! hands the result to a [`ChangeApplicator`].

use crate::apply::{ApplyOutcome, ChangeApplicator};
use crate::full::FullReconciler;
use crate::incremental::IncrementalReconciler;
use crate::prune::delete_by_prefix;
use crate::types::{ScanStats, SyncReport};
use crate::{ImportError, Result};
use kyofu_core::{Library, MetadataExtractor};
use kyofu_storage::{libraries, CatalogSession};
use sqlx::SqlitePool;
use std::path::Path;

/// Look up a library by name
pub async fn find_library(pool: &SqlitePool, name: &str) -> Result<Library> {
    libraries::find_by_name(pool, name)
        .await?
        .ok_or_else(|| ImportError::LibraryNotFound(name.to_string()))
}

/// Register a new library and run a full scan over it.
///
/// The library row is committed before the scan, so a declined scan still
/// leaves the library registered.
pub async fn init_library<E: MetadataExtractor>(
    pool: &SqlitePool,
    name: &str,
    base_path: &Path,
    extractor: E,
    applicator: &mut ChangeApplicator,
) -> Result<SyncReport> {
    let base_path = tokio::fs::canonicalize(base_path)
        .await
        .map_err(|e| ImportError::InvalidPath(format!("{}: {}", base_path.display(), e)))?;
    if !tokio::fs::metadata(&base_path).await?.is_dir() {
        return Err(ImportError::InvalidPath(format!(
            "{} is not a directory",
            base_path.display()
        )));
    }

    if libraries::find_by_name(pool, name).await?.is_some() {
        return Err(ImportError::LibraryExists(name.to_string()));
    }

    let library = match libraries::create(pool, name, &base_path).await {
        Ok(library) => library,
        Err(e) if e.is_unique_violation() => {
            return Err(ImportError::LibraryExists(name.to_string()))
        }
        Err(e) => return Err(e.into()),
    };

    let mut session = CatalogSession::new(pool.clone());
    let plan = FullReconciler::new(extractor)
        .plan(&session, &library)
        .await?;
    let outcome = applicator.apply(&mut session, plan.decisions).await?;

    Ok(SyncReport {
        library,
        stats: plan.stats,
        outcome,
    })
}

/// Full scan of an existing library
pub async fn scan_library<E: MetadataExtractor>(
    pool: &SqlitePool,
    name: &str,
    reconciler: &FullReconciler<E>,
    applicator: &mut ChangeApplicator,
) -> Result<SyncReport> {
    let library = find_library(pool, name).await?;

    let mut session = CatalogSession::new(pool.clone());
    let plan = reconciler.plan(&session, &library).await?;
    let outcome = applicator.apply(&mut session, plan.decisions).await?;

    Ok(SyncReport {
        library,
        stats: plan.stats,
        outcome,
    })
}

/// Incremental scan of an existing library
pub async fn update_library<E: MetadataExtractor>(
    pool: &SqlitePool,
    name: &str,
    reconciler: &IncrementalReconciler<E>,
    applicator: &mut ChangeApplicator,
) -> Result<SyncReport> {
    let library = find_library(pool, name).await?;

    let mut session = CatalogSession::new(pool.clone());
    let plan = reconciler.plan(&session, &library).await?;
    let outcome = applicator.apply(&mut session, plan.decisions).await?;

    Ok(SyncReport {
        library,
        stats: plan.stats,
        outcome,
    })
}

/// Delete songs of a library by path prefix
pub async fn prune_library(
    pool: &SqlitePool,
    name: &str,
    prefixes: &[String],
    applicator: &mut ChangeApplicator,
) -> Result<SyncReport> {
    let library = find_library(pool, name).await?;

    let mut session = CatalogSession::new(pool.clone());
    let outcome = delete_by_prefix(&mut session, &library, prefixes, applicator).await?;

    let stats = ScanStats {
        removed_files: match outcome {
            ApplyOutcome::Committed(summary) => summary.deleted,
            ApplyOutcome::Declined { .. } => 0,
        },
        ..ScanStats::default()
    };

    Ok(SyncReport {
        library,
        stats,
        outcome,
    })
}
