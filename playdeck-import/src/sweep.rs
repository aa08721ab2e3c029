//! Page sweep: advance through a feed until a page has something new.

use std::time::Duration;

use playdeck_catalog::ExternalGameCandidate;
use playdeck_db::CatalogStore;
use playdeck_feed::{FeedClient, FeedError, FeedPage, SortKey};

use crate::error::ImportError;
use crate::exists::exists_batch;

/// Where and how to start a sweep.
#[derive(Debug, Clone)]
pub struct SweepRequest {
    pub start_page: u32,
    pub page_size: u32,
    pub sort: SortKey,
    /// Applied to each page fetch.
    pub timeout: Duration,
    /// Stop after this many pages even if more remain.
    pub max_pages: Option<u32>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SweepOutcome {
    /// `page` holds at least one candidate not yet in the catalog.
    Found {
        page: u32,
        total_pages: u32,
        candidates: Vec<ExternalGameCandidate>,
        already_imported: usize,
    },
    /// Every scanned page was fully imported already.
    NoNewGames { pages_scanned: u32, total_pages: u32 },
}

/// Fetch one page, failing with `FeedError::Timeout` if it takes too long.
pub async fn fetch_with_timeout(
    client: &dyn FeedClient,
    page: u32,
    page_size: u32,
    sort: SortKey,
    timeout: Duration,
) -> Result<FeedPage, ImportError> {
    match tokio::time::timeout(timeout, client.fetch_page(page, page_size, sort)).await {
        Ok(result) => Ok(result?),
        Err(_) => Err(FeedError::Timeout(timeout.as_secs()).into()),
    }
}

/// Fetch pages starting at `request.start_page`, skipping pages whose every
/// candidate already exists, until a page with new candidates is found or
/// the last page is reached. An empty page always ends the sweep.
pub async fn sweep(
    client: &dyn FeedClient,
    store: &dyn CatalogStore,
    request: &SweepRequest,
) -> Result<SweepOutcome, ImportError> {
    if request.page_size == 0 {
        return Err(FeedError::InvalidPageSize(0).into());
    }

    let mut page = request.start_page;
    let mut pages_scanned = 0;

    loop {
        let fetched = fetch_with_timeout(
            client,
            page,
            request.page_size,
            request.sort,
            request.timeout,
        )
        .await?;
        pages_scanned += 1;

        let empty_page = fetched.items.is_empty();
        let titles: Vec<&str> = fetched.items.iter().map(|c| c.title.as_str()).collect();
        let flags = exists_batch(store, &titles)?;
        let already_imported = flags.iter().filter(|&&f| f).count();
        let candidates: Vec<ExternalGameCandidate> = fetched
            .items
            .into_iter()
            .zip(flags)
            .filter_map(|(candidate, exists)| (!exists).then_some(candidate))
            .collect();

        log::debug!(
            "{} page {}/{}: {} new, {} already imported",
            client.name(),
            page,
            fetched.total_pages,
            candidates.len(),
            already_imported
        );

        if !candidates.is_empty() {
            return Ok(SweepOutcome::Found {
                page,
                total_pages: fetched.total_pages,
                candidates,
                already_imported,
            });
        }

        let at_end = empty_page || fetched.is_last_page || page >= fetched.total_pages;
        let at_cap = request.max_pages.is_some_and(|max| pages_scanned >= max);
        if at_end || at_cap {
            log::info!(
                "No new games on {} after scanning {} page(s)",
                client.name(),
                pages_scanned
            );
            return Ok(SweepOutcome::NoNewGames {
                pages_scanned,
                total_pages: fetched.total_pages,
            });
        }

        page += 1;
    }
}
