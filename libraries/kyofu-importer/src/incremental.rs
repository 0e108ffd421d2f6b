//! Incremental reconciliation
//!
//! Only files modified since the newest tracked `modified` timestamp are
//! extracted. Deletions are never detected here; run a full scan for that.

use crate::full::{extract_or_skip, relative_or_skip, FullReconciler};
use crate::scanner::recently_modified_files;
use crate::types::{ReconcilePlan, ScanStats};
use crate::Result;
use chrono::{DateTime, Duration, Utc};
use kyofu_core::{CreateSong, Library, MetadataExtractor};
use kyofu_storage::{songs, CatalogSession};

/// Incremental reconciler for one library
pub struct IncrementalReconciler<E> {
    extractor: E,
    now: Option<DateTime<Utc>>,
}

impl<E: MetadataExtractor> IncrementalReconciler<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            now: None,
        }
    }

    /// Use a fixed clock instead of the current time
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    /// Compute the decision set without touching the catalog
    ///
    /// A library without songs gets a full scan instead.
    pub async fn plan(&self, session: &CatalogSession, library: &Library) -> Result<ReconcilePlan> {
        let pool = session.pool();

        let Some(last_modified) = songs::max_modified(pool, library.id).await? else {
            tracing::info!("No song in library, trying full scan: library={}", library.name);
            return FullReconciler::new(&self.extractor)
                .plan(session, library)
                .await;
        };

        let now = self.now.unwrap_or_else(Utc::now);
        let minutes = now.signed_duration_since(last_modified).num_minutes().max(0);
        let window = Duration::minutes(minutes);

        let files = recently_modified_files(&library.base_path, now, window)?;

        tracing::info!(
            "Incremental scan: library={} since={} window_minutes={} files={}",
            library.name,
            last_modified,
            minutes,
            files.len()
        );

        let mut plan = ReconcilePlan {
            stats: ScanStats {
                total_files: files.len(),
                ..ScanStats::default()
            },
            ..ReconcilePlan::default()
        };

        for path in &files {
            let Some(relative) = relative_or_skip(library, path, &mut plan.stats) else {
                continue;
            };
            let Some(metadata) = extract_or_skip(&self.extractor, path, &mut plan.stats) else {
                continue;
            };

            match songs::find(pool, library.id, &relative).await? {
                Some(song) => {
                    tracing::info!("Updated: path={}", relative);
                    plan.decisions.update(song.refreshed(metadata));
                    plan.stats.updated_files += 1;
                }
                None => {
                    tracing::info!("Added: path={}", relative);
                    plan.decisions
                        .insert(CreateSong::from_metadata(library, relative, metadata));
                    plan.stats.new_files += 1;
                }
            }
        }

        tracing::info!("Incremental scan done: library={} {}", library.name, plan.stats);
        Ok(plan)
    }
}
