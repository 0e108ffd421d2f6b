//! Kyofu Importer
//!
//! The reconciliation engine: keeps a library's songs in the catalog in step
//! with the files under its root.
//!
//! # Architecture
//!
//! - `scanner`: filesystem enumeration (full, hinted, recently modified)
//! - `full`: full reconciliation, optionally narrowed by path hints
//! - `incremental`: mtime-window reconciliation, falling back to full
//! - `decision`: the insert/update/delete set one run produces
//! - `apply`: staging, confirmation gating and the atomic commit
//! - `prune`: delete-by-prefix
//! - `library`: init/scan/update/delete entry points by library name
//!
//! # Example
//!
//! ```rust,no_run
//! use kyofu_importer::{scan_library, ChangeApplicator, CommitPolicy, FullReconciler};
//! use kyofu_core::MetadataExtractor;
//!
//! # async fn example(
//! #     pool: &sqlx::SqlitePool,
//! #     extractor: impl MetadataExtractor,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let reconciler = FullReconciler::new(extractor)
//!     .overwrite(false)
//!     .path_hints(vec!["Aphex Twin".to_string()]);
//! let mut applicator = ChangeApplicator::new(CommitPolicy::AlwaysCommit);
//!
//! let report = scan_library(pool, "main", &reconciler, &mut applicator).await?;
//! println!("{}", report.stats);
//! # Ok(())
//! # }
//! ```

mod error;
mod hints;
mod types;

// Core modules
pub mod apply;
pub mod confirm;
pub mod decision;
pub mod full;
pub mod incremental;
pub mod library;
pub mod prune;
pub mod scanner;

pub use apply::{ApplyOutcome, ChangeApplicator, CommitPolicy, CommitSummary};
pub use confirm::{Confirm, ConfirmRequest};
pub use decision::DecisionSet;
pub use error::ImportError;
pub use full::FullReconciler;
pub use hints::normalize_hints;
pub use incremental::IncrementalReconciler;
pub use library::{find_library, init_library, prune_library, scan_library, update_library};
pub use prune::delete_by_prefix;
pub use types::*;

/// Re-export commonly used types
pub type Result<T> = std::result::Result<T, ImportError>;
