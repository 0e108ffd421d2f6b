//! Library types
//!
//! A library is a named directory tree tracked as one catalog partition.
//! Song paths are stored relative to the library root with `/` separators.

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

pub type LibraryId = i64;

/// A tracked library root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub id: LibraryId,
    pub name: String,
    /// Absolute, canonicalized root directory
    pub base_path: PathBuf,
}

impl Library {
    pub fn new(id: LibraryId, name: impl Into<String>, base_path: PathBuf) -> Self {
        Self {
            id,
            name: name.into(),
            base_path,
        }
    }

    /// Path of `path` relative to the library root, `/`-joined.
    ///
    /// Returns `None` when `path` is not strictly below the root, is not
    /// valid UTF-8, or contains anything other than plain components after
    /// the root.
    pub fn relative_path(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.base_path).ok()?;
        normalize_relative_path(relative)
    }

    /// Absolute path of a catalog-relative `file_path`
    pub fn resolve(&self, file_path: &str) -> PathBuf {
        file_path
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.base_path.clone(), |acc, part| acc.join(part))
    }
}

/// Join the components of a relative path with `/`.
///
/// `.` components are dropped; `..`, roots, prefixes and non-UTF-8
/// components make the path unrepresentable and yield `None`, as does an
/// empty path.
pub fn normalize_relative_path(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library() -> Library {
        Library::new(1, "main", PathBuf::from("/srv/music"))
    }

    #[test]
    fn relative_path_strips_root() {
        let lib = library();
        assert_eq!(
            lib.relative_path(Path::new("/srv/music/Band/Album/01.flac"))
                .as_deref(),
            Some("Band/Album/01.flac")
        );
    }

    #[test]
    fn relative_path_rejects_outside_and_root() {
        let lib = library();
        assert_eq!(lib.relative_path(Path::new("/srv/other/01.flac")), None);
        assert_eq!(lib.relative_path(Path::new("/srv/music")), None);
        assert_eq!(lib.relative_path(Path::new("/srv/musicx/01.flac")), None);
    }

    #[test]
    fn resolve_round_trips_relative_path() {
        let lib = library();
        let abs = lib.resolve("Band/Album/01.flac");
        assert_eq!(abs, PathBuf::from("/srv/music/Band/Album/01.flac"));
        assert_eq!(lib.relative_path(&abs).as_deref(), Some("Band/Album/01.flac"));
    }

    #[test]
    fn normalize_relative_path_handles_dots() {
        assert_eq!(
            normalize_relative_path(Path::new("./a/./b")).as_deref(),
            Some("a/b")
        );
        assert_eq!(normalize_relative_path(Path::new("a/../b")), None);
        assert_eq!(normalize_relative_path(Path::new(".")), None);
    }

    #[cfg(unix)]
    #[test]
    fn relative_path_rejects_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let lib = library();
        let path = lib.base_path.join(OsStr::from_bytes(b"caf\xe9.flac"));
        assert_eq!(lib.relative_path(&path), None);
        assert_eq!(
            normalize_relative_path(Path::new(OsStr::from_bytes(b"a/caf\xe9/01.flac"))),
            None
        );
    }
}
