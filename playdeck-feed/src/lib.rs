//! Clients for third-party game feeds.
//!
//! Each feed is exposed through the [`FeedClient`] trait, which fetches one
//! page of [`ExternalGameCandidate`](playdeck_catalog::ExternalGameCandidate)s
//! at a time.

pub mod client;
pub mod error;
pub mod settings;
pub mod types;

pub use client::{FeedClient, FeedKind, GameMonetizeClient, GamePixClient};
pub use error::FeedError;
pub use settings::{
    FeedSettings, SettingSource, SettingSources, default_database_path, settings_path,
};
pub use types::{FeedPage, SortKey};
