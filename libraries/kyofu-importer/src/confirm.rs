//! User confirmation

use kyofu_storage::ChangeCounts;

/// A yes/no question put to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub prompt: String,
    /// Lines to show before the prompt
    pub details: Vec<String>,
}

impl ConfirmRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            details: Vec::new(),
        }
    }

    /// Request to commit pending changes, listing every deletion
    pub fn for_changes(counts: ChangeCounts, deleted_paths: &[&str]) -> Self {
        Self {
            prompt: format!("Commit {}?", counts),
            details: deleted_paths
                .iter()
                .map(|path| format!("delete: {}", path))
                .collect(),
        }
    }
}

/// Asks the user to approve an action
///
/// Returning `false` declines; implementations treat unreadable input as a
/// refusal.
pub trait Confirm {
    fn confirm(&mut self, request: &ConfirmRequest) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&ConfirmRequest) -> bool,
{
    fn confirm(&mut self, request: &ConfirmRequest) -> bool {
        self(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn change_request_lists_deletions() {
        let counts = ChangeCounts {
            inserted: 1,
            updated: 0,
            deleted: 2,
        };
        let request = ConfirmRequest::for_changes(counts, &["a.mp3", "b/c.mp3"]);

        assert_eq!(request.prompt, "Commit 1 inserted, 0 updated, 2 deleted?");
        assert_eq!(request.details, vec!["delete: a.mp3", "delete: b/c.mp3"]);
    }

    #[test]
    fn closures_confirm() {
        let mut asked = 0;
        let mut confirm = |_: &ConfirmRequest| {
            asked += 1;
            true
        };
        assert!(confirm.confirm(&ConfirmRequest::new("ok?")));
        assert_eq!(asked, 1);
    }
}
