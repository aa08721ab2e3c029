pub(crate) mod categories;
pub(crate) mod config;
pub(crate) mod crawl;
pub(crate) mod exists;
pub(crate) mod games;
pub(crate) mod history;
pub(crate) mod import;
pub(crate) mod seed;
pub(crate) mod stats;

use std::path::PathBuf;

use playdeck_db::SqliteCatalog;

use crate::CliError;

/// Resolve the catalog database path from `--db` or the default location.
pub(crate) fn resolve_db_path(db: Option<PathBuf>) -> Result<PathBuf, CliError> {
    match db {
        Some(path) => Ok(path),
        None => playdeck_feed::default_database_path()
            .ok_or_else(|| CliError::config("Could not determine data directory; pass --db")),
    }
}

/// Open (or create) the catalog database.
pub(crate) fn open_store(db: Option<PathBuf>) -> Result<SqliteCatalog, CliError> {
    let path = resolve_db_path(db)?;
    log::debug!("Using catalog database {}", path.display());
    SqliteCatalog::open(&path)
        .map_err(|e| CliError::database(format!("Failed to open catalog database: {}", e)))
}

/// Single-threaded runtime for the feed calls.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::runtime(format!("Failed to create tokio runtime: {}", e)))
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate_str("Pixel Runner", 20), "Pixel Runner");
        assert_eq!(truncate_str("Pokémon Adventures", 8), "Pokém...");
        assert_eq!(truncate_str("abcdef", 2), "ab");
    }
}
