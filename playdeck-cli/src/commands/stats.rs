use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{open_store, resolve_db_path};

pub(crate) fn run_stats(db: Option<PathBuf>) -> Result<(), CliError> {
    let db_path = resolve_db_path(db)?;

    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'playdeck seed <dir>' or 'playdeck import' to create one.");
        return Ok(());
    }

    let store = open_store(Some(db_path.clone()))?;
    let stats = playdeck_db::catalog_stats(store.conn())
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Games:        {:>8}", stats.games);
    log::info!("  Published:    {:>8}", stats.published);
    log::info!("  Featured:     {:>8}", stats.featured);
    log::info!("  Categories:   {:>8}", stats.categories);
    log::info!("  Import runs:  {:>8}", stats.import_runs);

    Ok(())
}
