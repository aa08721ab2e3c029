use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_store;

pub(crate) fn run_categories(db: Option<PathBuf>) -> Result<(), CliError> {
    let store = open_store(db)?;
    let categories = playdeck_db::list_categories(store.conn())
        .map_err(|e| CliError::database(format!("Failed to list categories: {}", e)))?;

    if categories.is_empty() {
        log::info!("No categories yet.");
        return Ok(());
    }

    for entry in &categories {
        log::info!(
            "  {:<24} {:<24} {:>6}",
            entry.category.name,
            entry.category.slug.if_supports_color(Stdout, |t| t.dimmed()),
            entry.game_count,
        );
    }
    Ok(())
}
