//! The persistence seam used by the import pipeline.

use std::path::Path;

use playdeck_catalog::types::{Category, Game, GameUpdate, NewCategory, NewGame};
use rusqlite::Connection;

use crate::operations::{self, OperationError};
use crate::queries;
use crate::schema::{self, SchemaError};

/// The store operations the import pipeline needs.
///
/// Implementations must report a slug collision on create as
/// `OperationError::AlreadyExists` so callers can recover from races.
pub trait CatalogStore {
    fn find_game_by_title_or_slug(
        &self,
        title: &str,
        slug: &str,
    ) -> Result<Option<Game>, OperationError>;

    /// `(title, slug)` of every game matching any of the given titles or slugs.
    fn games_matching(
        &self,
        titles: &[String],
        slugs: &[String],
    ) -> Result<Vec<(String, String)>, OperationError>;

    fn create_game(&self, game: &NewGame) -> Result<Game, OperationError>;

    fn update_game(&self, id: i64, update: &GameUpdate) -> Result<Game, OperationError>;

    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, OperationError>;

    fn create_category(&self, category: &NewCategory) -> Result<Category, OperationError>;
}

/// `CatalogStore` backed by a SQLite connection.
pub struct SqliteCatalog {
    conn: Connection,
}

impl SqliteCatalog {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Open or create the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, SchemaError> {
        Ok(Self::new(schema::open_database(path)?))
    }

    pub fn open_memory() -> Result<Self, SchemaError> {
        Ok(Self::new(schema::open_memory()?))
    }

    /// The underlying connection, for queries outside the trait.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

impl CatalogStore for SqliteCatalog {
    fn find_game_by_title_or_slug(
        &self,
        title: &str,
        slug: &str,
    ) -> Result<Option<Game>, OperationError> {
        operations::find_game_by_title_or_slug(&self.conn, title, slug)
    }

    fn games_matching(
        &self,
        titles: &[String],
        slugs: &[String],
    ) -> Result<Vec<(String, String)>, OperationError> {
        queries::games_matching(&self.conn, titles, slugs)
    }

    fn create_game(&self, game: &NewGame) -> Result<Game, OperationError> {
        operations::insert_game(&self.conn, game)
    }

    fn update_game(&self, id: i64, update: &GameUpdate) -> Result<Game, OperationError> {
        operations::update_game(&self.conn, id, update)
    }

    fn find_category_by_slug(&self, slug: &str) -> Result<Option<Category>, OperationError> {
        operations::find_category_by_slug(&self.conn, slug)
    }

    fn create_category(&self, category: &NewCategory) -> Result<Category, OperationError> {
        operations::insert_category(&self.conn, category)
    }
}
