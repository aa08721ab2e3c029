mod common;

use std::time::Duration;

use common::{FakeFeed, RecordingInvalidator, candidate};
use playdeck_db::{SqliteCatalog, catalog_stats};
use playdeck_feed::SortKey;
use playdeck_import::*;

fn feed() -> FakeFeed {
    let mut broken = candidate("3", "Broken Game", "Arcade");
    broken.banner_image_url = String::new();
    FakeFeed::new(vec![
        vec![
            candidate("1", "Pixel Runner", "Arcade"),
            candidate("2", "Sky Fighter", "Shooting"),
            broken,
            candidate("4", "Pixel Puzzle", "Puzzle"),
        ],
        vec![candidate("5", "Late Arrival", "Arcade")],
    ])
}

#[tokio::test]
async fn auto_import_removes_imported_candidates_from_working_set() {
    let store = SqliteCatalog::open_memory().unwrap();
    let feed = feed();
    let mut session = ReconciliationSession::new("fake", SortKey::Quality, 4);

    let outcome = session
        .sweep(&feed, &store, Duration::from_secs(5), None)
        .await
        .unwrap();
    assert!(matches!(outcome, SweepOutcome::Found { page: 1, .. }));
    assert_eq!(session.candidates().len(), 4);
    assert_eq!(session.total_pages(), 2);

    let invalidator = RecordingInvalidator::default();
    let outcome = session.import_all(&store, &invalidator, &SilentProgress);

    assert_eq!(outcome.attempted, 4);
    assert_eq!(outcome.succeeded, 3);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.summary(), "Imported 3, 1 failed");

    // Only the failed candidate stays for a manual retry.
    let remaining: Vec<_> = session.candidates().iter().map(|c| c.external_id.as_str()).collect();
    assert_eq!(remaining, vec!["3"]);
    assert!(session.is_imported("1"));
    assert!(!session.is_imported("3"));
    assert_eq!(invalidator.paths.lock().unwrap().len(), 9);
}

#[tokio::test]
async fn auto_import_only_takes_filtered_candidates() {
    let store = SqliteCatalog::open_memory().unwrap();
    let feed = feed();
    let mut session = ReconciliationSession::new("fake", SortKey::Quality, 4);
    session
        .sweep(&feed, &store, Duration::from_secs(5), None)
        .await
        .unwrap();

    session.set_filter(Some("pixel"));
    let outcome = session.import_all(&store, &SilentInvalidator, &SilentProgress);
    assert_eq!(outcome.succeeded, 2);
    assert_eq!(session.candidates().len(), 2);
    assert_eq!(catalog_stats(store.conn()).unwrap().games, 2);
}

#[tokio::test]
async fn single_import_by_id() {
    let store = SqliteCatalog::open_memory().unwrap();
    let feed = feed();
    let mut session = ReconciliationSession::new("fake", SortKey::Quality, 4);
    session
        .sweep(&feed, &store, Duration::from_secs(5), None)
        .await
        .unwrap();

    let result = session.import_one(&store, "2", &SilentInvalidator).unwrap();
    assert_eq!(result.slug, "sky-fighter");
    assert_eq!(session.candidates().len(), 3);

    assert!(matches!(
        session.import_one(&store, "2", &SilentInvalidator),
        Err(ImportError::UnknownCandidate(_))
    ));
    assert!(matches!(
        session.import_one(&store, "3", &SilentInvalidator),
        Err(ImportError::InvalidCandidate(_))
    ));
    assert_eq!(session.candidates().len(), 3);
}

#[tokio::test]
async fn next_sweep_skips_fully_imported_page() {
    let store = SqliteCatalog::open_memory().unwrap();
    let mut feed = feed();
    feed.pages[0].remove(2);
    let mut session = ReconciliationSession::new("fake", SortKey::Quality, 4);
    session
        .sweep(&feed, &store, Duration::from_secs(5), None)
        .await
        .unwrap();
    session.import_all(&store, &SilentInvalidator, &SilentProgress);

    session.go_to_page(1);
    let outcome = session
        .sweep(&feed, &store, Duration::from_secs(5), None)
        .await
        .unwrap();
    match outcome {
        SweepOutcome::Found {
            page,
            candidates,
            already_imported,
            ..
        } => {
            assert_eq!(page, 2);
            assert_eq!(already_imported, 0);
            assert_eq!(candidates[0].title, "Late Arrival");
        }
        other => panic!("expected Found, got {other:?}"),
    }
    assert_eq!(session.page(), 2);
}

#[tokio::test]
async fn cancel_before_auto_import_is_honoured_once() {
    let store = SqliteCatalog::open_memory().unwrap();
    let feed = feed();
    let mut session = ReconciliationSession::new("fake", SortKey::Quality, 4);
    session
        .sweep(&feed, &store, Duration::from_secs(5), None)
        .await
        .unwrap();

    session.cancel();
    let outcome = session.import_all(&store, &SilentInvalidator, &SilentProgress);
    assert_eq!(outcome.attempted, 0);
    assert_eq!(session.candidates().len(), 4);

    let outcome = session.import_all(&store, &SilentInvalidator, &SilentProgress);
    assert_eq!(outcome.attempted, 4);
    assert_eq!(outcome.succeeded, 3);
    assert_eq!(session.candidates().len(), 1);
}
