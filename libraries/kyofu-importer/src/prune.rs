//! Delete-by-prefix

use crate::apply::{ApplyOutcome, ChangeApplicator};
use crate::decision::DecisionSet;
use crate::Result;
use kyofu_core::Library;
use kyofu_storage::{songs, CatalogSession, ChangeCounts};

/// Delete every song whose path starts with one of `prefixes`.
///
/// Files on disk are not checked. An empty selection commits nothing and
/// never prompts.
pub async fn delete_by_prefix(
    session: &mut CatalogSession,
    library: &Library,
    prefixes: &[String],
    applicator: &mut ChangeApplicator,
) -> Result<ApplyOutcome> {
    let selected = songs::list_by_prefixes(session.pool(), library.id, prefixes).await?;

    if selected.is_empty() {
        tracing::info!(
            "Nothing to delete: library={} prefixes={:?}",
            library.name,
            prefixes
        );
        return Ok(ApplyOutcome::Committed(ChangeCounts::default()));
    }

    let mut decisions = DecisionSet::new();
    for song in selected {
        tracing::info!("Selected for deletion: path={}", song.file_path);
        decisions.delete(song);
    }

    applicator.apply(session, decisions).await
}
