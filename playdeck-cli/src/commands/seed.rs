use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_store;

pub(crate) fn run_seed(db: Option<PathBuf>, dir: PathBuf) -> Result<(), CliError> {
    let store = open_store(db)?;
    let stats = playdeck_db::seed_from_dir(store.conn(), &dir)
        .map_err(|e| CliError::database(format!("Failed to seed catalog: {}", e)))?;

    log::info!(
        "{} {} categories and {} games from {}",
        "Seeded".if_supports_color(Stdout, |t| t.green()),
        stats.categories,
        stats.games,
        dir.display(),
    );
    Ok(())
}
