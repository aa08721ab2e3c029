//! SQLite persistence layer for the game catalog.
//!
//! Provides schema creation, CRUD operations, read queries, and the
//! `CatalogStore` trait consumed by the import pipeline, all backed by
//! SQLite (via rusqlite with the bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;
pub mod store;

pub use operations::{
    OperationError, SeedStats, delete_category, delete_game, find_category_by_id,
    find_category_by_slug, find_game_by_id, find_game_by_slug, find_game_by_title_or_slug,
    insert_category, insert_game, insert_import_log, seed_from_dir, set_game_featured,
    update_category, update_game, update_game_details,
};
pub use queries::{
    CatalogStats, GameFilter, GamePage, GameStatus, catalog_stats, game_with_category,
    games_matching, list_categories, list_games, list_import_logs, related_games,
};
pub use rusqlite::Connection;
pub use schema::{SchemaError, open_database, open_memory};
pub use store::{CatalogStore, SqliteCatalog};
