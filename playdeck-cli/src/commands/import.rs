use std::path::PathBuf;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use playdeck_catalog::{ImportOutcome, ImportResult};
use playdeck_import::{ImportProgress, LogInvalidator, SweepOutcome, log_import};

use crate::{CliError, FeedArgs};

use super::crawl::{print_candidates, start_session};

/// Spinner-driven progress for a batch import.
struct SpinnerProgress {
    pb: ProgressBar,
}

impl SpinnerProgress {
    fn new(total: usize, quiet: bool) -> Self {
        let pb = if quiet {
            ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::hidden())
        } else {
            ProgressBar::new(total as u64)
        };
        let style = ProgressStyle::with_template("  {spinner:.cyan} [{pos}/{len}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("/-\\|");
        pb.set_style(style);
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }
}

impl ImportProgress for SpinnerProgress {
    fn on_item_start(&self, current: usize, _total: usize, title: &str) {
        self.pb.set_position(current.saturating_sub(1) as u64);
        self.pb.set_message(title.to_string());
    }

    fn on_item_success(&self, title: &str, result: &ImportResult) {
        self.pb.inc(1);
        log::debug!("{} {} ({})", result.status, title, result.slug);
    }

    fn on_item_failure(&self, title: &str, reason: &str) {
        self.pb.inc(1);
        self.pb.suspend(|| log::debug!("failed {}: {}", title, reason));
    }

    fn on_complete(&self, _outcome: &ImportOutcome) {
        self.pb.finish_and_clear();
    }
}

pub(crate) fn run_import(
    db: Option<PathBuf>,
    args: FeedArgs,
    ids: Vec<String>,
    quiet: bool,
) -> Result<(), CliError> {
    let (store, mut session, outcome) = start_session(db, &args)?;

    if let SweepOutcome::NoNewGames { pages_scanned, .. } = outcome {
        log::info!(
            "{} ({} page(s) scanned), nothing to import",
            "No new games found".if_supports_color(Stdout, |t| t.yellow()),
            pages_scanned,
        );
        return Ok(());
    }

    let outcome = if ids.is_empty() {
        let total = session.filtered().len();
        if total == 0 {
            log::info!("No candidates match the filter on page {}", session.page());
            return Ok(());
        }
        log::info!("Importing {} candidate(s) from page {}", total, session.page());
        let progress = SpinnerProgress::new(total, quiet);
        session.import_all(&store, &LogInvalidator, &progress)
    } else {
        let mut outcome = ImportOutcome::default();
        for id in &ids {
            let title = session
                .candidates()
                .iter()
                .find(|c| &c.external_id == id)
                .map(|c| c.title.clone())
                .unwrap_or_else(|| id.clone());
            match session.import_one(&store, id, &LogInvalidator) {
                Ok(result) => {
                    log::info!(
                        "  {} {} ({})",
                        "✓".if_supports_color(Stdout, |t| t.green()),
                        title,
                        result.status,
                    );
                    outcome.record_success(result.status);
                }
                Err(e) => {
                    outcome.record_failure(id, &title, e.to_string());
                }
            }
        }
        outcome
    };

    report(&outcome);

    if outcome.attempted > 0 {
        log_import(store.conn(), session.source(), Some(session.page()), &outcome)?;
    }

    if !session.candidates().is_empty() {
        crate::log_blank();
        log::info!("Still pending on page {}:", session.page());
        print_candidates(&session);
    }

    Ok(())
}

fn report(outcome: &ImportOutcome) {
    crate::log_blank();
    if outcome.failed == 0 {
        log::info!(
            "{} ({} created, {} updated)",
            outcome.summary().if_supports_color(Stdout, |t| t.green()),
            outcome.created,
            outcome.updated,
        );
        return;
    }

    log::warn!(
        "{} ({} created, {} updated)",
        outcome.summary(),
        outcome.created,
        outcome.updated,
    );
    for item in &outcome.item_errors {
        log::warn!(
            "  {} {} [{}]: {}",
            "✗".if_supports_color(Stdout, |t| t.red()),
            item.title,
            item.external_id,
            item.reason,
        );
    }
}
