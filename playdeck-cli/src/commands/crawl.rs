use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use playdeck_db::SqliteCatalog;
use playdeck_feed::FeedSettings;
use playdeck_import::{ReconciliationSession, SweepOutcome};

use crate::{CliError, FeedArgs};

use super::{open_store, runtime, truncate_str};

/// Open the catalog, sweep the feed from the requested page, and return the
/// loaded session with the sweep result.
pub(crate) fn start_session(
    db: Option<PathBuf>,
    args: &FeedArgs,
) -> Result<(SqliteCatalog, ReconciliationSession, SweepOutcome), CliError> {
    let store = open_store(db)?;
    let (settings, _) = FeedSettings::load()?;
    let page_size = args.page_size.unwrap_or(settings.page_size);
    if page_size == 0 {
        return Err(CliError::usage("--page-size must be at least 1"));
    }
    if args.page == 0 {
        return Err(CliError::usage("--page starts at 1"));
    }

    let client = args.feed.client(&settings)?;
    let mut session = ReconciliationSession::new(client.name(), args.sort, page_size);
    session.go_to_page(args.page);
    session.set_filter(args.filter.as_deref());

    log::info!(
        "Crawling {} from page {} (sort: {}, {} per page)",
        client.name().if_supports_color(Stdout, |t| t.bold()),
        args.page,
        args.sort,
        page_size,
    );

    let rt = runtime()?;
    let outcome = rt.block_on(session.sweep(
        client.as_ref(),
        &store,
        settings.timeout(),
        args.max_pages,
    ))?;

    Ok((store, session, outcome))
}

pub(crate) fn run_crawl(db: Option<PathBuf>, args: FeedArgs) -> Result<(), CliError> {
    let (_store, session, outcome) = start_session(db, &args)?;

    match &outcome {
        SweepOutcome::NoNewGames {
            pages_scanned,
            total_pages,
        } => {
            log::info!(
                "{} ({} of {} pages scanned)",
                "No new games found".if_supports_color(Stdout, |t| t.yellow()),
                pages_scanned,
                total_pages,
            );
        }
        SweepOutcome::Found {
            page,
            total_pages,
            candidates,
            already_imported,
        } => {
            log::info!(
                "Page {} of {}: {} new, {} already imported",
                page,
                total_pages,
                candidates.len().if_supports_color(Stdout, |t| t.green()),
                already_imported,
            );
            crate::log_blank();
            print_candidates(&session);
        }
    }

    Ok(())
}

/// List the session's filtered candidates.
pub(crate) fn print_candidates(session: &ReconciliationSession) {
    let shown = session.filtered();
    if let Some(filter) = session.filter() {
        log::info!(
            "Filter '{}' matches {} of {}",
            filter,
            shown.len(),
            session.candidates().len()
        );
    }

    for candidate in shown {
        let score = candidate
            .quality_score
            .map(|s| format!("{s:.2}"))
            .unwrap_or_else(|| "-".to_string());
        let date = candidate
            .published_at
            .as_deref()
            .map(|d| d.chars().take(10).collect::<String>())
            .unwrap_or_default();
        log::info!(
            "  {:>10}  {:<40} {:<16} {:>5}  {}",
            truncate_str(&candidate.external_id, 10).if_supports_color(Stdout, |t| t.dimmed()),
            truncate_str(&candidate.title, 40),
            truncate_str(&candidate.category_label, 16).if_supports_color(Stdout, |t| t.cyan()),
            score,
            date,
        );
    }
}
