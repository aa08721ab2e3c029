use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use playdeck_catalog::normalize_slug;
use playdeck_import::exists_batch;

use crate::CliError;

use super::open_store;

pub(crate) fn run_exists(db: Option<PathBuf>, titles: Vec<String>) -> Result<(), CliError> {
    let store = open_store(db)?;
    let flags = exists_batch(&store, &titles)?;

    for (title, exists) in titles.iter().zip(flags) {
        if exists {
            log::info!(
                "  {} {} ({})",
                "✓".if_supports_color(Stdout, |t| t.green()),
                title,
                "in catalog".if_supports_color(Stdout, |t| t.dimmed()),
            );
        } else {
            log::info!(
                "  {} {} ({} as '{}')",
                "✗".if_supports_color(Stdout, |t| t.yellow()),
                title,
                "new".if_supports_color(Stdout, |t| t.dimmed()),
                normalize_slug(title),
            );
        }
    }

    Ok(())
}
