//! Applying decision sets
//!
//! Inserts and updates are never gated on their own; confirmation covers the
//! whole commit once anything is pending.

use crate::confirm::{Confirm, ConfirmRequest};
use crate::decision::DecisionSet;
use crate::Result;
use kyofu_storage::{CatalogSession, ChangeCounts};

/// Counts of what a commit wrote
pub type CommitSummary = ChangeCounts;

/// When staged changes may be committed
pub enum CommitPolicy {
    /// Commit without asking
    AlwaysCommit,
    /// Ask once before committing anything
    ConfirmThenCommit(Box<dyn Confirm>),
}

impl CommitPolicy {
    pub fn from_auto_approve(auto_approve: bool, confirm: Box<dyn Confirm>) -> Self {
        if auto_approve {
            Self::AlwaysCommit
        } else {
            Self::ConfirmThenCommit(confirm)
        }
    }
}

impl std::fmt::Debug for CommitPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AlwaysCommit => f.write_str("AlwaysCommit"),
            Self::ConfirmThenCommit(_) => f.write_str("ConfirmThenCommit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Committed(CommitSummary),
    Declined { discarded: ChangeCounts },
}

impl ApplyOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }
}

/// Stages decision sets and commits them under a [`CommitPolicy`]
#[derive(Debug)]
pub struct ChangeApplicator {
    policy: CommitPolicy,
}

impl ChangeApplicator {
    pub fn new(policy: CommitPolicy) -> Self {
        Self { policy }
    }

    /// Stage `decisions` into `session` and commit or roll back.
    ///
    /// A commit failure leaves the catalog untouched and is returned as an
    /// error.
    pub async fn apply(
        &mut self,
        session: &mut CatalogSession,
        decisions: DecisionSet,
    ) -> Result<ApplyOutcome> {
        decisions.stage_into(session);

        if let CommitPolicy::ConfirmThenCommit(confirm) = &mut self.policy {
            if session.has_pending() {
                let request =
                    ConfirmRequest::for_changes(session.pending(), &session.deleted_paths());
                if !confirm.confirm(&request) {
                    let discarded = session.rollback();
                    tracing::info!("Declined: {}", discarded);
                    return Ok(ApplyOutcome::Declined { discarded });
                }
            }
        }

        let summary = session.commit().await?;
        Ok(ApplyOutcome::Committed(summary))
    }
}
