//! Read queries for the catalog database.
//!
//! Provides batch existence matching, filtered game listing, category
//! listing with counts, and summary statistics.

use playdeck_catalog::types::*;
use rusqlite::{Connection, params, params_from_iter};

use crate::operations::{
    CATEGORY_COLUMN_COUNT, CATEGORY_COLUMNS, GAME_COLUMNS, OperationError, category_from_row,
    game_from_row, row_to_game,
};

// ── Existence Matching ──────────────────────────────────────────────────────

/// Return `(title, slug)` of every game whose title is in `titles` or whose
/// slug is in `slugs`. One round trip regardless of list length.
pub fn games_matching(
    conn: &Connection,
    titles: &[String],
    slugs: &[String],
) -> Result<Vec<(String, String)>, OperationError> {
    if titles.is_empty() && slugs.is_empty() {
        return Ok(Vec::new());
    }

    let mut clauses = Vec::new();
    if !titles.is_empty() {
        clauses.push(format!("title IN ({})", placeholders(titles.len())));
    }
    if !slugs.is_empty() {
        clauses.push(format!("slug IN ({})", placeholders(slugs.len())));
    }

    let sql = format!("SELECT title, slug FROM games WHERE {}", clauses.join(" OR "));
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(titles.iter().chain(slugs.iter())), |row| {
        Ok((row.get(0)?, row.get(1)?))
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

// ── Game Listing ────────────────────────────────────────────────────────────

/// Publication state filter for game listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Published,
    Draft,
}

/// Filters and pagination for `list_games`.
#[derive(Debug, Clone)]
pub struct GameFilter {
    pub category_id: Option<i64>,
    /// Substring match against title or description.
    pub search: Option<String>,
    pub status: Option<GameStatus>,
    pub featured: Option<bool>,
    /// 1-based page number.
    pub page: u32,
    pub limit: u32,
}

impl Default for GameFilter {
    fn default() -> Self {
        Self {
            category_id: None,
            search: None,
            status: None,
            featured: None,
            page: 1,
            limit: 10,
        }
    }
}

/// One page of games, newest first.
#[derive(Debug)]
pub struct GamePage {
    pub games: Vec<GameWithCategory>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

/// List games matching `filter`, newest first, joined with their category.
pub fn list_games(conn: &Connection, filter: &GameFilter) -> Result<GamePage, OperationError> {
    let mut conditions = Vec::new();
    let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(category_id) = filter.category_id {
        conditions.push("g.category_id = ?".to_string());
        param_values.push(Box::new(category_id));
    }
    if let Some(ref search) = filter.search {
        let pattern = format!("%{search}%");
        conditions.push("(g.title LIKE ? OR g.description LIKE ?)".to_string());
        param_values.push(Box::new(pattern.clone()));
        param_values.push(Box::new(pattern));
    }
    match filter.status {
        Some(GameStatus::Published) => conditions.push("g.published = 1".to_string()),
        Some(GameStatus::Draft) => conditions.push("g.published = 0".to_string()),
        None => {}
    }
    if let Some(featured) = filter.featured {
        conditions.push("g.featured = ?".to_string());
        param_values.push(Box::new(featured));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    let total: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM games g {where_clause}"),
        params_from_iter(param_values.iter().map(|p| p.as_ref())),
        |row| row.get(0),
    )?;

    let limit = filter.limit.max(1);
    let page = filter.page.max(1);
    let offset = i64::from(page - 1) * i64::from(limit);

    let sql = format!(
        "SELECT {GAME_COLUMNS}, {CATEGORY_COLUMNS}
         FROM games g
         JOIN categories c ON c.id = g.category_id
         {where_clause}
         ORDER BY g.created_at DESC, g.id DESC
         LIMIT {limit} OFFSET {offset}"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params_from_iter(param_values.iter().map(|p| p.as_ref())),
        game_with_category_from_row,
    )?;
    let games = rows.collect::<Result<Vec<_>, _>>()?;

    let limit_i64 = i64::from(limit);
    let total_pages = ((total + limit_i64 - 1) / limit_i64) as u32;
    Ok(GamePage {
        games,
        total,
        page,
        limit,
        total_pages,
    })
}

fn game_with_category_from_row(row: &rusqlite::Row) -> rusqlite::Result<GameWithCategory> {
    Ok(GameWithCategory {
        game: game_from_row(row, 0)?,
        category: category_from_row(row, GAME_COLUMN_COUNT)?,
    })
}

const GAME_COLUMN_COUNT: usize = 15;

/// Fetch a single game by slug together with its category.
pub fn game_with_category(
    conn: &Connection,
    slug: &str,
) -> Result<Option<GameWithCategory>, OperationError> {
    let result = conn.query_row(
        &format!(
            "SELECT {GAME_COLUMNS}, {CATEGORY_COLUMNS}
             FROM games g
             JOIN categories c ON c.id = g.category_id
             WHERE g.slug = ?1"
        ),
        params![slug],
        game_with_category_from_row,
    );
    match result {
        Ok(game) => Ok(Some(game)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Published games in the same category as `game`, excluding `game` itself.
pub fn related_games(
    conn: &Connection,
    game: &Game,
    limit: u32,
) -> Result<Vec<Game>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {GAME_COLUMNS} FROM games g
         WHERE g.category_id = ?1 AND g.id != ?2 AND g.published = 1
         ORDER BY g.created_at DESC, g.id DESC
         LIMIT ?3"
    ))?;
    let rows = stmt.query_map(params![game.category_id, game.id, limit], row_to_game)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Categories ──────────────────────────────────────────────────────────────

/// All categories ordered by name, each with its game count.
pub fn list_categories(conn: &Connection) -> Result<Vec<CategoryWithCount>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {CATEGORY_COLUMNS}, COUNT(g.id)
         FROM categories c
         LEFT JOIN games g ON g.category_id = c.id
         GROUP BY c.id
         ORDER BY c.name"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(CategoryWithCount {
            category: category_from_row(row, 0)?,
            game_count: row.get(CATEGORY_COLUMN_COUNT)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Summary statistics for the catalog.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub games: i64,
    pub published: i64,
    pub featured: i64,
    pub categories: i64,
    pub import_runs: i64,
}

/// Get summary statistics for the catalog.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |sql: &str| -> Result<i64, rusqlite::Error> {
        conn.query_row(sql, [], |row| row.get(0))
    };

    Ok(CatalogStats {
        games: count("SELECT COUNT(*) FROM games")?,
        published: count("SELECT COUNT(*) FROM games WHERE published = 1")?,
        featured: count("SELECT COUNT(*) FROM games WHERE featured = 1")?,
        categories: count("SELECT COUNT(*) FROM categories")?,
        import_runs: count("SELECT COUNT(*) FROM import_log")?,
    })
}

// ── Import History ──────────────────────────────────────────────────────────

/// Most recent import runs first.
pub fn list_import_logs(conn: &Connection, limit: u32) -> Result<Vec<ImportLog>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT id, source, page, attempted, succeeded, failed, imported_at
         FROM import_log
         ORDER BY id DESC
         LIMIT ?1",
    )?;
    let rows = stmt.query_map(params![limit], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            source: row.get(1)?,
            page: row.get(2)?,
            attempted: row.get(3)?,
            succeeded: row.get(4)?,
            failed: row.get(5)?,
            imported_at: row.get(6)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
