//! Game catalog data model types, slug normalization, and YAML seed loading.
//!
//! This crate defines the persistent data model for the catalog without
//! any database or network dependencies. Consumers can use these types
//! directly for serialization, display, or passing to `playdeck-db` for
//! persistence.

pub mod slug;
pub mod types;
pub mod yaml;

pub use slug::normalize_slug;
pub use types::*;
pub use yaml::{SeedData, load_categories, load_games, load_seed};
