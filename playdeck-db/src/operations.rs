//! CRUD operations for categories, games, and import logs.

use std::path::Path;

use playdeck_catalog::types::*;
use playdeck_catalog::yaml::{YamlError, load_seed};
use playdeck_catalog::normalize_slug;
use rusqlite::{Connection, Row, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
    #[error("{entity_type} with slug '{key}' already exists")]
    AlreadyExists { entity_type: String, key: String },
    #[error("Seed data error: {0}")]
    Seed(#[from] YamlError),
    #[error("'{0}' has an empty slug")]
    EmptySlug(String),
}

impl OperationError {
    fn not_found(entity_type: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

/// Turn a UNIQUE constraint violation into `AlreadyExists`, pass everything
/// else through.
fn map_unique(err: rusqlite::Error, entity_type: &str, key: &str) -> OperationError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            OperationError::AlreadyExists {
                entity_type: entity_type.to_string(),
                key: key.to_string(),
            }
        }
        _ => OperationError::Sqlite(err),
    }
}

// ── Row Mapping ─────────────────────────────────────────────────────────────

pub(crate) const CATEGORY_COLUMNS: &str =
    "c.id, c.name, c.slug, c.description, c.image, c.created_at, c.updated_at";

pub(crate) const CATEGORY_COLUMN_COUNT: usize = 7;

pub(crate) const GAME_COLUMNS: &str = "g.id, g.title, g.slug, g.description, g.instructions,
        g.thumbnail, g.embed_url, g.category_id, g.published, g.featured,
        g.meta_title, g.meta_description, g.keywords, g.created_at, g.updated_at";

/// Read a category starting at column `base`.
pub(crate) fn category_from_row(row: &Row, base: usize) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(base)?,
        name: row.get(base + 1)?,
        slug: row.get(base + 2)?,
        description: row.get(base + 3)?,
        image: row.get(base + 4)?,
        created_at: row.get(base + 5)?,
        updated_at: row.get(base + 6)?,
    })
}

/// Read a game starting at column `base`.
pub(crate) fn game_from_row(row: &Row, base: usize) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(base)?,
        title: row.get(base + 1)?,
        slug: row.get(base + 2)?,
        description: row.get(base + 3)?,
        instructions: row.get(base + 4)?,
        thumbnail: row.get(base + 5)?,
        embed_url: row.get(base + 6)?,
        category_id: row.get(base + 7)?,
        published: row.get(base + 8)?,
        featured: row.get(base + 9)?,
        seo: SeoFields {
            meta_title: row.get(base + 10)?,
            meta_description: row.get(base + 11)?,
            keywords: row.get(base + 12)?,
        },
        created_at: row.get(base + 13)?,
        updated_at: row.get(base + 14)?,
    })
}

pub(crate) fn row_to_game(row: &Row) -> rusqlite::Result<Game> {
    game_from_row(row, 0)
}

fn row_to_category(row: &Row) -> rusqlite::Result<Category> {
    category_from_row(row, 0)
}

fn optional<T>(result: rusqlite::Result<T>) -> Result<Option<T>, OperationError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

// ── Category Operations ─────────────────────────────────────────────────────

/// Insert a new category. Fails with `AlreadyExists` if the slug is taken.
pub fn insert_category(
    conn: &Connection,
    category: &NewCategory,
) -> Result<Category, OperationError> {
    conn.execute(
        "INSERT INTO categories (name, slug, description, image) VALUES (?1, ?2, ?3, ?4)",
        params![
            category.name,
            category.slug,
            category.description,
            category.image,
        ],
    )
    .map_err(|e| map_unique(e, "category", &category.slug))?;

    let id = conn.last_insert_rowid();
    find_category_by_id(conn, id)?.ok_or_else(|| OperationError::not_found("category", id))
}

/// Find a category by its unique slug.
pub fn find_category_by_slug(
    conn: &Connection,
    slug: &str,
) -> Result<Option<Category>, OperationError> {
    optional(conn.query_row(
        &format!("SELECT {CATEGORY_COLUMNS} FROM categories c WHERE c.slug = ?1"),
        params![slug],
        row_to_category,
    ))
}

/// Find a category by id.
pub fn find_category_by_id(conn: &Connection, id: i64) -> Result<Option<Category>, OperationError> {
    optional(conn.query_row(
        &format!("SELECT {CATEGORY_COLUMNS} FROM categories c WHERE c.id = ?1"),
        params![id],
        row_to_category,
    ))
}

/// Replace a category's editable fields.
pub fn update_category(
    conn: &Connection,
    id: i64,
    category: &NewCategory,
) -> Result<Category, OperationError> {
    let updated = conn
        .execute(
            "UPDATE categories SET name = ?1, slug = ?2, description = ?3, image = ?4,
                    updated_at = datetime('now')
             WHERE id = ?5",
            params![
                category.name,
                category.slug,
                category.description,
                category.image,
                id,
            ],
        )
        .map_err(|e| map_unique(e, "category", &category.slug))?;

    if updated == 0 {
        return Err(OperationError::not_found("category", id));
    }
    find_category_by_id(conn, id)?.ok_or_else(|| OperationError::not_found("category", id))
}

/// Delete a category. Fails with a foreign key error while games still
/// reference it.
pub fn delete_category(conn: &Connection, id: i64) -> Result<(), OperationError> {
    let deleted = conn.execute("DELETE FROM categories WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(OperationError::not_found("category", id));
    }
    Ok(())
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a new game. Fails with `AlreadyExists` if the slug is taken.
pub fn insert_game(conn: &Connection, game: &NewGame) -> Result<Game, OperationError> {
    if game.slug.trim().is_empty() {
        return Err(OperationError::EmptySlug(game.title.clone()));
    }
    conn.execute(
        "INSERT INTO games (title, slug, description, instructions, thumbnail, embed_url,
                            category_id, published, featured,
                            meta_title, meta_description, keywords)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            game.title,
            game.slug,
            game.description,
            game.instructions,
            game.thumbnail,
            game.embed_url,
            game.category_id,
            game.published,
            game.featured,
            game.seo.meta_title,
            game.seo.meta_description,
            game.seo.keywords,
        ],
    )
    .map_err(|e| map_unique(e, "game", &game.slug))?;

    let id = conn.last_insert_rowid();
    find_game_by_id(conn, id)?.ok_or_else(|| OperationError::not_found("game", id))
}

/// Overwrite the fields a re-import refreshes. The slug is left as-is.
pub fn update_game(conn: &Connection, id: i64, update: &GameUpdate) -> Result<Game, OperationError> {
    let updated = conn.execute(
        "UPDATE games SET title = ?1, description = ?2, thumbnail = ?3, embed_url = ?4,
                category_id = ?5, published = ?6, updated_at = datetime('now')
         WHERE id = ?7",
        params![
            update.title,
            update.description,
            update.thumbnail,
            update.embed_url,
            update.category_id,
            update.published,
            id,
        ],
    )?;

    if updated == 0 {
        return Err(OperationError::not_found("game", id));
    }
    find_game_by_id(conn, id)?.ok_or_else(|| OperationError::not_found("game", id))
}

/// Replace every editable field of a game, slug included.
pub fn update_game_details(
    conn: &Connection,
    id: i64,
    game: &NewGame,
) -> Result<Game, OperationError> {
    if game.slug.trim().is_empty() {
        return Err(OperationError::EmptySlug(game.title.clone()));
    }
    let updated = conn
        .execute(
            "UPDATE games SET title = ?1, slug = ?2, description = ?3, instructions = ?4,
                    thumbnail = ?5, embed_url = ?6, category_id = ?7, published = ?8,
                    featured = ?9, meta_title = ?10, meta_description = ?11, keywords = ?12,
                    updated_at = datetime('now')
             WHERE id = ?13",
            params![
                game.title,
                game.slug,
                game.description,
                game.instructions,
                game.thumbnail,
                game.embed_url,
                game.category_id,
                game.published,
                game.featured,
                game.seo.meta_title,
                game.seo.meta_description,
                game.seo.keywords,
                id,
            ],
        )
        .map_err(|e| map_unique(e, "game", &game.slug))?;

    if updated == 0 {
        return Err(OperationError::not_found("game", id));
    }
    find_game_by_id(conn, id)?.ok_or_else(|| OperationError::not_found("game", id))
}

/// Set or clear the featured flag on a game.
pub fn set_game_featured(conn: &Connection, id: i64, featured: bool) -> Result<(), OperationError> {
    let updated = conn.execute(
        "UPDATE games SET featured = ?1, updated_at = datetime('now') WHERE id = ?2",
        params![featured, id],
    )?;
    if updated == 0 {
        return Err(OperationError::not_found("game", id));
    }
    Ok(())
}

/// Delete a game.
pub fn delete_game(conn: &Connection, id: i64) -> Result<(), OperationError> {
    let deleted = conn.execute("DELETE FROM games WHERE id = ?1", params![id])?;
    if deleted == 0 {
        return Err(OperationError::not_found("game", id));
    }
    Ok(())
}

/// Find a game by id.
pub fn find_game_by_id(conn: &Connection, id: i64) -> Result<Option<Game>, OperationError> {
    optional(conn.query_row(
        &format!("SELECT {GAME_COLUMNS} FROM games g WHERE g.id = ?1"),
        params![id],
        row_to_game,
    ))
}

/// Find a game by its unique slug.
pub fn find_game_by_slug(conn: &Connection, slug: &str) -> Result<Option<Game>, OperationError> {
    optional(conn.query_row(
        &format!("SELECT {GAME_COLUMNS} FROM games g WHERE g.slug = ?1"),
        params![slug],
        row_to_game,
    ))
}

/// Find the first game whose title equals `title` or whose slug equals `slug`.
///
/// Titles are not unique, so when several games match the oldest one wins.
pub fn find_game_by_title_or_slug(
    conn: &Connection,
    title: &str,
    slug: &str,
) -> Result<Option<Game>, OperationError> {
    optional(conn.query_row(
        &format!(
            "SELECT {GAME_COLUMNS} FROM games g
             WHERE g.title = ?1 OR g.slug = ?2
             ORDER BY g.id LIMIT 1"
        ),
        params![title, slug],
        row_to_game,
    ))
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Insert an import log entry. Returns the generated id.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source, page, attempted, succeeded, failed, imported_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            log.source,
            log.page,
            log.attempted,
            log.succeeded,
            log.failed,
            log.imported_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

// ── Seeding ─────────────────────────────────────────────────────────────────

/// Counts of rows written by `seed_from_dir`.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub categories: usize,
    pub games: usize,
}

/// Seed the database from a YAML seed directory.
///
/// Categories and games are upserted by slug, so seeding twice leaves the
/// catalog unchanged. Everything runs in one transaction.
pub fn seed_from_dir(conn: &Connection, seed_dir: &Path) -> Result<SeedStats, OperationError> {
    let seed = load_seed(seed_dir)?;
    let mut stats = SeedStats::default();

    let tx = conn.unchecked_transaction()?;

    for category in &seed.categories {
        tx.execute(
            "INSERT INTO categories (name, slug, description, image)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(slug) DO UPDATE SET
                 name = excluded.name,
                 description = excluded.description,
                 image = excluded.image,
                 updated_at = datetime('now')",
            params![
                category.name,
                category.slug,
                category.description,
                category.image,
            ],
        )?;
        stats.categories += 1;
    }

    for game in &seed.games {
        let slug = match &game.slug {
            Some(slug) => slug.clone(),
            None => normalize_slug(&game.title),
        };
        if slug.is_empty() {
            return Err(OperationError::EmptySlug(game.title.clone()));
        }
        let category = find_category_by_slug(&tx, &game.category)?
            .ok_or_else(|| OperationError::not_found("category", &game.category))?;

        tx.execute(
            "INSERT INTO games (title, slug, description, instructions, thumbnail, embed_url,
                                category_id, published, featured,
                                meta_title, meta_description, keywords)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
             ON CONFLICT(slug) DO UPDATE SET
                 title = excluded.title,
                 description = excluded.description,
                 instructions = excluded.instructions,
                 thumbnail = excluded.thumbnail,
                 embed_url = excluded.embed_url,
                 category_id = excluded.category_id,
                 published = excluded.published,
                 featured = excluded.featured,
                 meta_title = excluded.meta_title,
                 meta_description = excluded.meta_description,
                 keywords = excluded.keywords,
                 updated_at = datetime('now')",
            params![
                game.title,
                slug,
                game.description,
                game.instructions,
                game.thumbnail,
                game.embed_url,
                category.id,
                game.published,
                game.featured,
                game.seo.meta_title,
                game.seo.meta_description,
                game.seo.keywords,
            ],
        )?;
        stats.games += 1;
    }

    tx.commit()?;
    log::info!(
        "Seeded {} categories and {} games from {}",
        stats.categories,
        stats.games,
        seed_dir.display()
    );
    Ok(stats)
}
