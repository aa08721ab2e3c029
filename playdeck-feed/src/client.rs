use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

use crate::error::FeedError;
use crate::settings::FeedSettings;
use crate::types::{FeedPage, SortKey, parse_gamemonetize_page, parse_gamepix_page};

const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(500);

/// A paginated source of external game candidates.
#[async_trait]
pub trait FeedClient: Send + Sync {
    /// Short feed name, recorded on candidates and import logs.
    fn name(&self) -> &str;

    /// Fetch one page. `page` is 1-based.
    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
        sort: SortKey,
    ) -> Result<FeedPage, FeedError>;
}

/// The feeds this crate knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedKind {
    GamePix,
    GameMonetize,
}

impl FeedKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::GamePix => "gamepix",
            Self::GameMonetize => "gamemonetize",
        }
    }

    /// Build an HTTP client for this feed from resolved settings.
    pub fn client(self, settings: &FeedSettings) -> Result<Box<dyn FeedClient>, FeedError> {
        Ok(match self {
            Self::GamePix => Box::new(GamePixClient::new(&settings.gamepix_url, settings.timeout())?),
            Self::GameMonetize => Box::new(GameMonetizeClient::new(
                &settings.gamemonetize_url,
                settings.timeout(),
            )?),
        })
    }
}

impl std::fmt::Display for FeedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for FeedKind {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "gamepix" => Ok(Self::GamePix),
            "gamemonetize" => Ok(Self::GameMonetize),
            other => Err(FeedError::UnknownFeed(other.to_string())),
        }
    }
}

/// Rate-limited GET returning the response body as text.
struct FeedHttp {
    http: reqwest::Client,
    base_url: url::Url,
    timeout: Duration,
    last_request: Arc<Mutex<Instant>>,
}

impl FeedHttp {
    fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        let base_url = url::Url::parse(base_url).map_err(|source| FeedError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            timeout,
            last_request: Arc::new(Mutex::new(Instant::now() - MIN_REQUEST_INTERVAL)),
        })
    }

    /// Wait until at least `MIN_REQUEST_INTERVAL` has passed since the last request.
    async fn rate_limit(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();
        if elapsed < MIN_REQUEST_INTERVAL {
            tokio::time::sleep(MIN_REQUEST_INTERVAL - elapsed).await;
        }
        *last = Instant::now();
    }

    async fn get_text(&self, query: &[(&str, String)]) -> Result<String, FeedError> {
        self.rate_limit().await;
        log::debug!("GET {} {:?}", self.base_url, query);

        let resp = self
            .http
            .get(self.base_url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| self.map_reqwest(e))?;

        let status = resp.status();
        let text = resp.text().await.map_err(|e| self.map_reqwest(e))?;

        if !status.is_success() {
            let mut message: String = text.chars().take(200).collect();
            if message.is_empty() {
                message = status.canonical_reason().unwrap_or("no body").to_string();
            }
            return Err(FeedError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(text)
    }

    fn map_reqwest(&self, e: reqwest::Error) -> FeedError {
        if e.is_timeout() {
            FeedError::Timeout(self.timeout.as_secs())
        } else {
            FeedError::Http(e)
        }
    }
}

// ── GamePix ─────────────────────────────────────────────────────────────────

/// Client for the GamePix v2 JSON feed.
pub struct GamePixClient {
    http: FeedHttp,
}

impl GamePixClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        Ok(Self {
            http: FeedHttp::new(base_url, timeout)?,
        })
    }
}

fn gamepix_order(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Quality => "quality",
        SortKey::Recency => "pubdate",
    }
}

#[async_trait]
impl FeedClient for GamePixClient {
    fn name(&self) -> &str {
        FeedKind::GamePix.name()
    }

    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
        sort: SortKey,
    ) -> Result<FeedPage, FeedError> {
        if page == 0 {
            return Err(FeedError::InvalidPage(page));
        }
        if page_size == 0 {
            return Err(FeedError::InvalidPageSize(page_size));
        }
        let query = [
            ("page", page.to_string()),
            ("pagination", page_size.to_string()),
            ("order", gamepix_order(sort).to_string()),
        ];
        let body = self.http.get_text(&query).await?;
        parse_gamepix_page(&body, page, self.name())
    }
}

// ── GameMonetize ────────────────────────────────────────────────────────────

/// Client for the GameMonetize JSON feed.
pub struct GameMonetizeClient {
    http: FeedHttp,
}

impl GameMonetizeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedError> {
        Ok(Self {
            http: FeedHttp::new(base_url, timeout)?,
        })
    }
}

fn gamemonetize_popularity(sort: SortKey) -> &'static str {
    match sort {
        SortKey::Quality => "bestgames",
        SortKey::Recency => "newest",
    }
}

#[async_trait]
impl FeedClient for GameMonetizeClient {
    fn name(&self) -> &str {
        FeedKind::GameMonetize.name()
    }

    async fn fetch_page(
        &self,
        page: u32,
        page_size: u32,
        sort: SortKey,
    ) -> Result<FeedPage, FeedError> {
        if page == 0 {
            return Err(FeedError::InvalidPage(page));
        }
        if page_size == 0 {
            return Err(FeedError::InvalidPageSize(page_size));
        }
        let query = [
            ("format", "0".to_string()),
            ("num", page_size.to_string()),
            ("page", page.to_string()),
            ("popularity", gamemonetize_popularity(sort).to_string()),
        ];
        let body = self.http.get_text(&query).await?;
        parse_gamemonetize_page(&body, page, page_size, self.name())
    }
}
