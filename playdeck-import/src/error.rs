use playdeck_db::OperationError;
use playdeck_feed::FeedError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Feed unavailable: {0}")]
    FeedUnavailable(#[from] FeedError),
    #[error("Category '{slug}' already exists but could not be re-fetched")]
    CategoryCreateConflict { slug: String },
    #[error("Failed to write game '{title}': {source}")]
    GameWriteFailed {
        title: String,
        source: OperationError,
    },
    #[error("Invalid candidate: {0}")]
    InvalidCandidate(String),
    #[error("No candidate with id '{0}' in the current page")]
    UnknownCandidate(String),
    #[error("Database error: {0}")]
    Store(#[from] OperationError),
}
