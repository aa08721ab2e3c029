//! Operator-owned state for one crawl of a feed.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use playdeck_catalog::{ExternalGameCandidate, ImportOutcome, ImportResult};
use playdeck_db::CatalogStore;
use playdeck_feed::{FeedClient, SortKey};

use crate::error::ImportError;
use crate::invalidate::PageInvalidator;
use crate::progress::ImportProgress;
use crate::reconcile::{import_batch, import_candidate};
use crate::sweep::{SweepOutcome, SweepRequest, sweep};

/// The page currently being reconciled and the candidates on it that have
/// not been imported yet.
///
/// The session owns its working set outright. Imports through the session
/// remove candidates from it; navigation and sort changes discard it.
pub struct ReconciliationSession {
    source: String,
    sort: SortKey,
    page_size: u32,
    page: u32,
    total_pages: u32,
    working_set: Vec<ExternalGameCandidate>,
    filter: Option<String>,
    imported: HashSet<String>,
    cancel: Arc<AtomicBool>,
}

impl ReconciliationSession {
    pub fn new(source: impl Into<String>, sort: SortKey, page_size: u32) -> Self {
        Self {
            source: source.into(),
            sort,
            page_size,
            page: 1,
            total_pages: 1,
            working_set: Vec::new(),
            filter: None,
            imported: HashSet::new(),
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Jump to `page` (clamped to at least 1) and discard the working set.
    pub fn go_to_page(&mut self, page: u32) {
        self.page = page.max(1);
        self.working_set.clear();
    }

    /// Advance one page. Returns false if already on the last known page.
    pub fn next_page(&mut self) -> bool {
        if self.page >= self.total_pages {
            return false;
        }
        self.go_to_page(self.page + 1);
        true
    }

    /// Go back one page. Returns false if already on the first page.
    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 {
            return false;
        }
        self.go_to_page(self.page - 1);
        true
    }

    /// Change the sort order. Starts over from page 1.
    pub fn set_sort(&mut self, sort: SortKey) {
        if self.sort != sort {
            self.sort = sort;
            self.total_pages = 1;
            self.go_to_page(1);
        }
    }

    /// Set the free-text filter. Empty or whitespace clears it.
    pub fn set_filter(&mut self, filter: Option<&str>) {
        self.filter = filter
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_lowercase);
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    /// Every not-yet-imported candidate on the current page.
    pub fn candidates(&self) -> &[ExternalGameCandidate] {
        &self.working_set
    }

    /// Candidates matching the filter, case-insensitively, in title or description.
    pub fn filtered(&self) -> Vec<&ExternalGameCandidate> {
        match &self.filter {
            None => self.working_set.iter().collect(),
            Some(needle) => self
                .working_set
                .iter()
                .filter(|c| {
                    c.title.to_lowercase().contains(needle)
                        || c.description.to_lowercase().contains(needle)
                })
                .collect(),
        }
    }

    /// Whether a candidate was imported during this session.
    pub fn is_imported(&self, external_id: &str) -> bool {
        self.imported.contains(external_id)
    }

    /// Shared flag checked between batch items. Set it to stop after the
    /// current item.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// Sweep forward from the current page and load the result.
    pub async fn sweep(
        &mut self,
        client: &dyn FeedClient,
        store: &dyn CatalogStore,
        timeout: Duration,
        max_pages: Option<u32>,
    ) -> Result<SweepOutcome, ImportError> {
        let request = SweepRequest {
            start_page: self.page,
            page_size: self.page_size,
            sort: self.sort,
            timeout,
            max_pages,
        };
        let outcome = sweep(client, store, &request).await?;
        self.load(&outcome);
        Ok(outcome)
    }

    /// Replace the session's page state with a sweep result.
    pub fn load(&mut self, outcome: &SweepOutcome) {
        match outcome {
            SweepOutcome::Found {
                page,
                total_pages,
                candidates,
                ..
            } => {
                self.page = *page;
                self.total_pages = (*total_pages).max(*page);
                self.working_set = candidates.clone();
            }
            SweepOutcome::NoNewGames {
                pages_scanned,
                total_pages,
            } => {
                self.page = (self.page + pages_scanned.saturating_sub(1)).max(1);
                self.total_pages = (*total_pages).max(self.page);
                self.working_set.clear();
            }
        }
    }

    /// Import a single candidate from the working set by external id.
    pub fn import_one(
        &mut self,
        store: &dyn CatalogStore,
        external_id: &str,
        invalidator: &dyn PageInvalidator,
    ) -> Result<ImportResult, ImportError> {
        let index = self
            .working_set
            .iter()
            .position(|c| c.external_id == external_id)
            .ok_or_else(|| ImportError::UnknownCandidate(external_id.to_string()))?;

        let result = import_candidate(store, &self.working_set[index], invalidator)?;
        let candidate = self.working_set.remove(index);
        self.imported.insert(candidate.external_id);
        Ok(result)
    }

    /// Import every filtered candidate in order. Imported candidates leave the
    /// working set; failed ones stay for a manual retry.
    ///
    /// A cancel requested before the call stops the batch before its first
    /// item. The flag is cleared once the batch returns.
    pub fn import_all(
        &mut self,
        store: &dyn CatalogStore,
        invalidator: &dyn PageInvalidator,
        progress: &dyn ImportProgress,
    ) -> ImportOutcome {
        let batch: Vec<ExternalGameCandidate> = self.filtered().into_iter().cloned().collect();
        let result = import_batch(store, &batch, invalidator, progress, &self.cancel);
        self.cancel.store(false, Ordering::Relaxed);

        let done: HashSet<&str> = result.imported_ids.iter().map(String::as_str).collect();
        self.working_set
            .retain(|c| !done.contains(c.external_id.as_str()));
        self.imported.extend(result.imported_ids.iter().cloned());
        result.outcome
    }
}
