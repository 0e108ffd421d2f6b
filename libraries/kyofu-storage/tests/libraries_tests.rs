//! Integration tests for the libraries slice

mod test_helpers;

use kyofu_storage::libraries;
use std::path::{Path, PathBuf};
use test_helpers::*;

#[tokio::test]
async fn test_create_and_find_library() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let created = libraries::create(pool, "main", Path::new("/srv/music"))
        .await
        .unwrap();

    let found = libraries::find_by_name(pool, "main").await.unwrap().unwrap();
    assert_eq!(found, created);
    assert_eq!(found.base_path, PathBuf::from("/srv/music"));
    assert_eq!(found.name, "main");
}

#[tokio::test]
async fn test_unknown_library_is_none() {
    let test_db = TestDb::new().await;

    let found = libraries::find_by_name(test_db.pool(), "missing")
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_duplicate_name_is_unique_violation() {
    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    create_test_library(pool, "main").await;
    let err = libraries::create(pool, "main", Path::new("/elsewhere"))
        .await
        .unwrap_err();

    assert!(err.is_unique_violation());
}

#[cfg(unix)]
#[tokio::test]
async fn test_non_utf8_base_path_is_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let test_db = TestDb::new().await;
    let pool = test_db.pool();

    let base = Path::new(OsStr::from_bytes(b"/srv/caf\xe9"));
    let err = libraries::create(pool, "main", base).await.unwrap_err();
    assert!(matches!(err, kyofu_storage::StorageError::InvalidData(_)));

    let found = libraries::find_by_name(pool, "main").await.unwrap();
    assert!(found.is_none());
}
