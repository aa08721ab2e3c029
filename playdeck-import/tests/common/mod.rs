#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use playdeck_catalog::ExternalGameCandidate;
use playdeck_feed::{FeedClient, FeedError, FeedPage, SortKey};
use playdeck_import::PageInvalidator;

pub fn candidate(id: &str, title: &str, category: &str) -> ExternalGameCandidate {
    let slug = playdeck_catalog::normalize_slug(title);
    ExternalGameCandidate {
        external_id: id.to_string(),
        source: "gamepix".to_string(),
        title: title.to_string(),
        description: format!("{title} description"),
        banner_image_url: format!("https://img.example.com/{slug}.png"),
        play_url: format!("https://play.example.com/{slug}"),
        category_label: category.to_string(),
        quality_score: Some(0.5),
        published_at: None,
    }
}

/// Records every invalidated path.
#[derive(Default)]
pub struct RecordingInvalidator {
    pub paths: Mutex<Vec<String>>,
}

impl PageInvalidator for RecordingInvalidator {
    fn invalidate(&self, path: &str) {
        self.paths.lock().unwrap().push(path.to_string());
    }
}

/// Serves fixed pages from memory.
pub struct FakeFeed {
    pub pages: Vec<Vec<ExternalGameCandidate>>,
    pub fetches: AtomicU32,
}

impl FakeFeed {
    pub fn new(pages: Vec<Vec<ExternalGameCandidate>>) -> Self {
        Self {
            pages,
            fetches: AtomicU32::new(0),
        }
    }

    pub fn fetch_count(&self) -> u32 {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedClient for FakeFeed {
    fn name(&self) -> &str {
        "fake"
    }

    async fn fetch_page(
        &self,
        page: u32,
        _page_size: u32,
        _sort: SortKey,
    ) -> Result<FeedPage, FeedError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if page == 0 {
            return Err(FeedError::InvalidPage(page));
        }
        let total_pages = self.pages.len() as u32;
        let items = self
            .pages
            .get(page as usize - 1)
            .cloned()
            .ok_or_else(|| FeedError::Malformed(format!("no page {page}")))?;
        Ok(FeedPage {
            items,
            page,
            total_pages,
            is_last_page: page >= total_pages,
        })
    }
}

/// Claims another page always follows but never returns any items.
pub struct BottomlessFeed {
    pub fetches: AtomicU32,
}

impl BottomlessFeed {
    pub fn new() -> Self {
        Self {
            fetches: AtomicU32::new(0),
        }
    }
}

#[async_trait]
impl FeedClient for BottomlessFeed {
    fn name(&self) -> &str {
        "bottomless"
    }

    async fn fetch_page(
        &self,
        page: u32,
        _page_size: u32,
        _sort: SortKey,
    ) -> Result<FeedPage, FeedError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(FeedPage {
            items: Vec::new(),
            page,
            total_pages: page + 1,
            is_last_page: false,
        })
    }
}

/// Never answers within any reasonable timeout.
pub struct StalledFeed;

#[async_trait]
impl FeedClient for StalledFeed {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn fetch_page(
        &self,
        _page: u32,
        _page_size: u32,
        _sort: SortKey,
    ) -> Result<FeedPage, FeedError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Err(FeedError::Malformed("unreachable".to_string()))
    }
}

/// Always fails with a server error.
pub struct DownFeed;

#[async_trait]
impl FeedClient for DownFeed {
    fn name(&self) -> &str {
        "down"
    }

    async fn fetch_page(
        &self,
        _page: u32,
        _page_size: u32,
        _sort: SortKey,
    ) -> Result<FeedPage, FeedError> {
        Err(FeedError::ServerError {
            status: 503,
            message: "maintenance".to_string(),
        })
    }
}
