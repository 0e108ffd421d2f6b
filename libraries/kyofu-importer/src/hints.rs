//! Path hint validation

use crate::{ImportError, Result};
use kyofu_core::{normalize_relative_path, Library};
use std::path::{Component, Path};

/// Normalize hints to library-relative `/`-joined paths.
///
/// Leading `./` and trailing `/` are dropped and duplicates removed. A hint
/// naming the root itself (`.`) widens the scope to the whole library, which
/// is returned as no hints at all. Absolute hints, hints escaping the root and
/// hints that do not exist under the root are rejected before anything is
/// read.
pub fn normalize_hints(library: &Library, hints: &[String]) -> Result<Vec<String>> {
    let mut normalized: Vec<String> = Vec::with_capacity(hints.len());
    let mut whole_library = false;

    for hint in hints {
        let path = Path::new(hint);
        if path.is_absolute() {
            return Err(ImportError::InvalidHint(hint.clone()));
        }
        if !hint.is_empty() && path.components().all(|c| c == Component::CurDir) {
            whole_library = true;
            continue;
        }

        let relative =
            normalize_relative_path(path).ok_or_else(|| ImportError::InvalidHint(hint.clone()))?;

        let target = library.resolve(&relative);
        if !target.try_exists()? {
            return Err(ImportError::HintNotFound(target.display().to_string()));
        }

        if !normalized.contains(&relative) {
            normalized.push(relative);
        }
    }

    if whole_library {
        tracing::debug!("Root hint given, scanning whole library: library={}", library.name);
        normalized.clear();
    }
    Ok(normalized)
}
