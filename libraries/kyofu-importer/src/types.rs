//! Shared types for the importer

use crate::apply::ApplyOutcome;
use crate::decision::DecisionSet;
use kyofu_core::Library;
use std::fmt;

/// Statistics from one reconciliation pass
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Candidate files visited
    pub total_files: usize,
    /// Files whose metadata was extracted
    pub processed: usize,
    pub new_files: usize,
    pub updated_files: usize,
    pub removed_files: usize,
    /// Files skipped because their format is not cataloged
    pub unsupported: usize,
    /// Files skipped because extraction failed
    pub errors: usize,
}

impl fmt::Display for ScanStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "files={} processed={} new={} updated={} removed={} unsupported={} errors={}",
            self.total_files,
            self.processed,
            self.new_files,
            self.updated_files,
            self.removed_files,
            self.unsupported,
            self.errors
        )
    }
}

/// Output of a reconciler: what to change and how the walk went
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    pub decisions: DecisionSet,
    pub stats: ScanStats,
}

/// Result of a library-level operation
#[derive(Debug)]
pub struct SyncReport {
    pub library: Library,
    pub stats: ScanStats,
    pub outcome: ApplyOutcome,
}
