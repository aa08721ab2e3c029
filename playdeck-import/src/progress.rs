//! Import progress reporting.

use playdeck_catalog::{ImportOutcome, ImportResult};

/// Trait for receiving batch import progress updates.
pub trait ImportProgress {
    /// Called before each candidate is attempted. `current` is 1-based.
    fn on_item_start(&self, current: usize, total: usize, title: &str);

    /// Called after a candidate was imported.
    fn on_item_success(&self, title: &str, result: &ImportResult);

    /// Called after a candidate failed.
    fn on_item_failure(&self, title: &str, reason: &str);

    /// Called once the batch has finished or was cancelled.
    fn on_complete(&self, outcome: &ImportOutcome);
}

/// A no-op progress reporter that discards all updates.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_item_start(&self, _current: usize, _total: usize, _title: &str) {}
    fn on_item_success(&self, _title: &str, _result: &ImportResult) {}
    fn on_item_failure(&self, _title: &str, _reason: &str) {}
    fn on_complete(&self, _outcome: &ImportOutcome) {}
}

/// A progress reporter that logs to the `log` crate.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_item_start(&self, current: usize, total: usize, title: &str) {
        log::debug!("  [{}/{}] {}", current, total, title);
    }

    fn on_item_success(&self, title: &str, result: &ImportResult) {
        log::info!("  {} {} ({})", result.status, title, result.slug);
    }

    fn on_item_failure(&self, title: &str, reason: &str) {
        log::warn!("  failed {}: {}", title, reason);
    }

    fn on_complete(&self, outcome: &ImportOutcome) {
        log::info!("{}", outcome.summary());
    }
}
