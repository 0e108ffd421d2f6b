//! Full reconciliation
//!
//! Walks the whole library (or the hinted subtrees), extracts every file and
//! diffs the result against the songs tracked for the same scope.

use crate::hints::normalize_hints;
use crate::scanner::candidate_files;
use crate::types::{ReconcilePlan, ScanStats};
use crate::Result;
use kyofu_core::{CreateSong, ExtractionError, Library, Metadata, MetadataExtractor, Song};
use kyofu_storage::{songs, CatalogSession};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

/// Full reconciler for one library
pub struct FullReconciler<E> {
    extractor: E,
    overwrite: bool,
    path_hints: Vec<String>,
}

impl<E: MetadataExtractor> FullReconciler<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            overwrite: false,
            path_hints: Vec::new(),
        }
    }

    /// Re-extract and update songs that are already tracked (default: false)
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Restrict the walk to these library-relative sub-paths
    pub fn path_hints(mut self, hints: Vec<String>) -> Self {
        self.path_hints = hints;
        self
    }

    /// Compute the decision set without touching the catalog
    pub async fn plan(&self, session: &CatalogSession, library: &Library) -> Result<ReconcilePlan> {
        let hints = normalize_hints(library, &self.path_hints)?;

        let tracked = if hints.is_empty() {
            songs::list(session.pool(), library.id).await?
        } else {
            songs::list_under(session.pool(), library.id, &hints).await?
        };
        let mut tracked: BTreeMap<String, Song> = tracked
            .into_iter()
            .map(|song| (song.file_path.clone(), song))
            .collect();

        let scopes = if hints.is_empty() {
            vec![library.base_path.clone()]
        } else {
            hints.iter().map(|hint| library.resolve(hint)).collect()
        };
        let files = candidate_files(&scopes);

        tracing::info!(
            "Full scan: library={} files={} tracked={} overwrite={}",
            library.name,
            files.len(),
            tracked.len(),
            self.overwrite
        );

        let mut plan = ReconcilePlan {
            stats: ScanStats {
                total_files: files.len(),
                ..ScanStats::default()
            },
            ..ReconcilePlan::default()
        };
        // Every walked file that maps to a catalog path, whether or not its
        // tags could be read. None of these may be deleted.
        let mut observed = BTreeSet::new();

        for path in &files {
            let Some(relative) = relative_or_skip(library, path, &mut plan.stats) else {
                continue;
            };
            observed.insert(relative.clone());

            let Some(metadata) = extract_or_skip(&self.extractor, path, &mut plan.stats) else {
                continue;
            };

            if let Some(song) = tracked.get(&relative) {
                if self.overwrite {
                    tracing::info!("Force updated: path={}", path.display());
                    plan.decisions.update(song.refreshed(metadata));
                    plan.stats.updated_files += 1;
                }
            } else {
                tracing::info!("Added: path={}", path.display());
                plan.decisions
                    .insert(CreateSong::from_metadata(library, relative, metadata));
                plan.stats.new_files += 1;
            }
        }

        tracked.retain(|path, _| !observed.contains(path));
        for (relative, song) in tracked {
            let absolute = library.resolve(&relative);
            match absolute.try_exists() {
                Ok(false) => {
                    tracing::info!("Deleted: path={}", relative);
                    plan.decisions.delete(song);
                    plan.stats.removed_files += 1;
                }
                Ok(true) => {
                    tracing::debug!("Not scanned but still present: path={}", relative);
                }
                Err(e) => {
                    tracing::warn!("Cannot verify absence, keeping: path={} error={}", relative, e);
                }
            }
        }

        tracing::info!("Full scan done: library={} {}", library.name, plan.stats);
        Ok(plan)
    }
}

/// Catalog key of `path`, or `None` (logged and counted) when it has none
pub(crate) fn relative_or_skip(
    library: &Library,
    path: &Path,
    stats: &mut ScanStats,
) -> Option<String> {
    let relative = library.relative_path(path);
    if relative.is_none() {
        if path.to_str().is_none() {
            tracing::warn!("Skipping non-UTF-8 path: path={}", path.display());
        } else {
            tracing::warn!("Outside library root: path={}", path.display());
        }
        stats.errors += 1;
    }
    relative
}

/// Extract `path`, counting and logging the failure kind when it fails
pub(crate) fn extract_or_skip<E: MetadataExtractor>(
    extractor: &E,
    path: &Path,
    stats: &mut ScanStats,
) -> Option<Metadata> {
    match extractor.extract(path) {
        Ok(metadata) => {
            stats.processed += 1;
            Some(metadata)
        }
        Err(e @ ExtractionError::UnsupportedFormat { .. }) => {
            tracing::debug!("Skipping: {}", e);
            stats.unsupported += 1;
            None
        }
        Err(
            e @ (ExtractionError::Unreadable { .. }
            | ExtractionError::MissingField { .. }
            | ExtractionError::MalformedField { .. }),
        ) => {
            tracing::warn!("Skipping: {}", e);
            stats.errors += 1;
            None
        }
    }
}
