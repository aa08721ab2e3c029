use playdeck_catalog::{ImportOutcome, ImportStatus};

#[test]
fn outcome_counts_successes_and_failures() {
    let mut outcome = ImportOutcome::default();
    outcome.record_success(ImportStatus::Created);
    outcome.record_success(ImportStatus::Updated);
    outcome.record_failure("gp-3", "Broken Game", "invalid thumbnail URL");

    assert_eq!(outcome.attempted, 3);
    assert_eq!(outcome.succeeded, 2);
    assert_eq!(outcome.failed, 1);
    assert_eq!(outcome.created, 1);
    assert_eq!(outcome.updated, 1);
    assert_eq!(outcome.item_errors[0].external_id, "gp-3");
    assert_eq!(outcome.summary(), "Imported 2, 1 failed");
}

#[test]
fn summary_omits_zero_failures() {
    let mut outcome = ImportOutcome::default();
    outcome.record_success(ImportStatus::Created);
    assert_eq!(outcome.summary(), "Imported 1");
}
