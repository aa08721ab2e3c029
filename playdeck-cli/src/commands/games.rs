use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use playdeck_db::{GameFilter, GameStatus, find_category_by_slug, list_games};

use crate::{CliError, StatusArg};

use super::{open_store, truncate_str};

#[allow(clippy::too_many_arguments)]
pub(crate) fn run_games(
    db: Option<PathBuf>,
    category: Option<String>,
    search: Option<String>,
    status: Option<StatusArg>,
    featured: bool,
    page: u32,
    limit: u32,
) -> Result<(), CliError> {
    let store = open_store(db)?;
    let conn = store.conn();

    let category_id = match category {
        Some(slug) => {
            let category = find_category_by_slug(conn, &slug)
                .map_err(|e| CliError::database(format!("Failed to look up category: {}", e)))?
                .ok_or_else(|| CliError::usage(format!("Unknown category '{}'", slug)))?;
            Some(category.id)
        }
        None => None,
    };

    let filter = GameFilter {
        category_id,
        search,
        status: status.map(|s| match s {
            StatusArg::Published => GameStatus::Published,
            StatusArg::Draft => GameStatus::Draft,
        }),
        featured: featured.then_some(true),
        page,
        limit,
    };
    let result = list_games(conn, &filter)
        .map_err(|e| CliError::database(format!("Failed to list games: {}", e)))?;

    if result.games.is_empty() {
        log::info!("No games found.");
        return Ok(());
    }

    for entry in &result.games {
        let game = &entry.game;
        let mut flags = String::new();
        if !game.published {
            flags.push_str(" [draft]");
        }
        if game.featured {
            flags.push_str(" [featured]");
        }
        log::info!(
            "  {:>5}  {:<40} {:<16}{}",
            game.id,
            truncate_str(&game.title, 40),
            truncate_str(&entry.category.name, 16).if_supports_color(Stdout, |t| t.cyan()),
            flags.if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();
    log::info!(
        "Page {} of {} ({} games)",
        result.page,
        result.total_pages.max(1),
        result.total
    );

    Ok(())
}
