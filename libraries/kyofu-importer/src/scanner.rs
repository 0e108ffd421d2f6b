//! File enumeration for reconciliation

use crate::Result;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Regular files under each of `scopes`, de-duplicated and sorted.
///
/// A scope naming a regular file yields that file. Directories and symlinks
/// are skipped, symlinks are not followed. Entries the walk cannot read are
/// logged and skipped.
pub fn candidate_files(scopes: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = BTreeSet::new();

    for scope in scopes {
        for entry in WalkDir::new(scope).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() {
                files.insert(entry.into_path());
            }
        }
    }

    files.into_iter().collect()
}

/// Regular files under `root` modified less than `window` before `now`.
///
/// Files with an mtime after `now` count as recent. Any walk or metadata
/// error aborts the enumeration.
pub fn recently_modified_files(
    root: &Path,
    now: DateTime<Utc>,
    window: Duration,
) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let modified: DateTime<Utc> = entry.metadata()?.modified()?.into();
        if now.signed_duration_since(modified) < window {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn candidates_skip_directories_and_dedupe() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("a/b/1.mp3"), "x").unwrap();
        fs::write(root.join("a/2.mp3"), "x").unwrap();
        fs::write(root.join("3.mp3"), "x").unwrap();

        let files = candidate_files(&[root.join("a"), root.join("a/b"), root.join("3.mp3")]);

        assert_eq!(
            files,
            vec![root.join("3.mp3"), root.join("a/2.mp3"), root.join("a/b/1.mp3")]
        );
    }

    #[test]
    fn zero_window_matches_nothing() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("1.mp3"), "x").unwrap();

        let files = recently_modified_files(temp.path(), Utc::now(), Duration::zero()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_root_is_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let result = recently_modified_files(
            &temp.path().join("gone"),
            Utc::now(),
            Duration::minutes(10),
        );
        assert!(result.is_err());
    }
}
