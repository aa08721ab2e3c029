/// Errors that can occur while fetching a feed page.
#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed request timed out after {0}s")]
    Timeout(u64),

    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed feed response: {0}")]
    Malformed(String),

    #[error("Invalid page number {0}: pages start at 1")]
    InvalidPage(u32),

    #[error("Invalid page size {0}: at least one item per page is required")]
    InvalidPageSize(u32),

    #[error("Invalid feed URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Unknown feed '{0}' (expected gamepix or gamemonetize)")]
    UnknownFeed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}
