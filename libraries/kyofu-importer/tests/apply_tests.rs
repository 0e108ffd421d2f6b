//! Integration tests for confirmation gating and commit atomicity


use kyofu_core::CreateSong;
use kyofu_importer::{
    ApplyOutcome, ChangeApplicator, CommitPolicy, ConfirmRequest, DecisionSet, FullReconciler,
};
use kyofu_storage::ChangeCounts;
use test_helpers::*;

/// Track three files, then remove two of them from disk
async fn library_with_two_missing() -> TestLibrary {
    let lib = TestLibrary::new().await;
    lib.write("a.flac", "A");
    lib.write("b.flac", "B");
    lib.write("c.flac", "C");

    let mut session = lib.session();
    let plan = FullReconciler::new(StubExtractor)
        .plan(&session, &lib.library)
        .await
        .unwrap();
    auto_applicator()
        .apply(&mut session, plan.decisions)
        .await
        .unwrap();

    lib.remove("a.flac");
    lib.remove("c.flac");
    lib
}

#[tokio::test]
async fn test_declined_deletions_leave_catalog_unchanged() {
    let lib = library_with_two_missing().await;
    let (mut applicator, asked) = scripted_applicator(false);

    let mut session = lib.session();
    let plan = FullReconciler::new(StubExtractor)
        .plan(&session, &lib.library)
        .await
        .unwrap();
    let outcome = applicator.apply(&mut session, plan.decisions).await.unwrap();

    assert_eq!(
        outcome,
        ApplyOutcome::Declined {
            discarded: ChangeCounts {
                inserted: 0,
                updated: 0,
                deleted: 2
            }
        }
    );
    assert!(!session.has_pending());
    assert_eq!(lib.catalog().await.len(), 3);

    let asked = asked.borrow();
    assert_eq!(asked.len(), 1);
    assert_eq!(asked[0].details, vec!["delete: a.flac", "delete: c.flac"]);
}

#[tokio::test]
async fn test_accepted_deletions_are_applied() {
    let lib = library_with_two_missing().await;
    let (mut applicator, asked) = scripted_applicator(true);

    let mut session = lib.session();
    let plan = FullReconciler::new(StubExtractor)
        .plan(&session, &lib.library)
        .await
        .unwrap();
    let outcome = applicator.apply(&mut session, plan.decisions).await.unwrap();

    assert!(outcome.is_committed());
    assert_eq!(asked.borrow().len(), 1);
    assert_eq!(lib.catalog().await, pairs(&[("b.flac", "B")]));
}

#[tokio::test]
async fn test_auto_approve_never_prompts() {
    let lib = library_with_two_missing().await;
    let never = |_: &ConfirmRequest| -> bool { panic!("should not prompt") };
    let mut applicator = ChangeApplicator::new(CommitPolicy::from_auto_approve(true, Box::new(never)));

    let mut session = lib.session();
    let plan = FullReconciler::new(StubExtractor)
        .plan(&session, &lib.library)
        .await
        .unwrap();
    let outcome = applicator.apply(&mut session, plan.decisions).await.unwrap();

    assert_eq!(
        outcome,
        ApplyOutcome::Committed(ChangeCounts {
            inserted: 0,
            updated: 0,
            deleted: 2
        })
    );
}

#[tokio::test]
async fn test_nothing_pending_skips_prompt() {
    let lib = TestLibrary::new().await;
    let (mut applicator, asked) = scripted_applicator(false);

    let mut session = lib.session();
    let outcome = applicator
        .apply(&mut session, DecisionSet::new())
        .await
        .unwrap();

    assert_eq!(outcome, ApplyOutcome::Committed(ChangeCounts::default()));
    assert!(asked.borrow().is_empty());
}

#[tokio::test]
async fn test_failed_commit_is_all_or_nothing() {
    let lib = library_with_two_missing().await;
    let tracked = kyofu_storage::songs::find(&lib.pool, lib.library.id, "a.flac")
        .await
        .unwrap()
        .unwrap();

    let mut decisions = DecisionSet::new();
    decisions.delete(tracked.clone());
    // Duplicates the existing b.flac row
    decisions.insert(CreateSong {
        library_id: lib.library.id,
        file_path: "b.flac".to_string(),
        fields: tracked.fields.clone(),
        modified: None,
    });

    let mut session = lib.session();
    let result = auto_applicator().apply(&mut session, decisions).await;

    assert!(result.is_err());
    assert_eq!(lib.catalog().await.len(), 3);
}
