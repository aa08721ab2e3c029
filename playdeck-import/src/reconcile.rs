//! Reconcile external candidates into the catalog.
//!
//! A candidate is matched against existing games by title or derived slug.
//! A match is refreshed in place (its slug never changes, so published URLs
//! stay valid); otherwise a new game is created.

use std::sync::atomic::{AtomicBool, Ordering};

use playdeck_catalog::types::*;
use playdeck_catalog::normalize_slug;
use playdeck_db::{CatalogStore, Connection, operations};

use crate::error::ImportError;
use crate::invalidate::{PageInvalidator, game_paths};
use crate::progress::ImportProgress;
use crate::resolver::resolve_category;
use crate::validate::validate_candidate;

/// Import one candidate, creating or updating the matching game.
pub fn import_candidate(
    store: &dyn CatalogStore,
    candidate: &ExternalGameCandidate,
    invalidator: &dyn PageInvalidator,
) -> Result<ImportResult, ImportError> {
    validate_candidate(candidate)?;

    let category = resolve_category(store, &candidate.category_label)?.category;
    let slug = normalize_slug(&candidate.title);

    let result = match store.find_game_by_title_or_slug(&candidate.title, &slug)? {
        Some(existing) => {
            let update = GameUpdate {
                title: candidate.title.clone(),
                description: candidate.description.clone(),
                thumbnail: candidate.banner_image_url.clone(),
                embed_url: candidate.play_url.clone(),
                category_id: category.id,
                published: true,
            };
            let game = store.update_game(existing.id, &update).map_err(|source| {
                ImportError::GameWriteFailed {
                    title: candidate.title.clone(),
                    source,
                }
            })?;
            log::debug!("Updated game {} ({})", game.id, game.slug);
            ImportResult {
                status: ImportStatus::Updated,
                game_id: game.id,
                slug: game.slug,
            }
        }
        None => {
            let new_game = NewGame {
                title: candidate.title.clone(),
                slug,
                description: candidate.description.clone(),
                instructions: None,
                thumbnail: candidate.banner_image_url.clone(),
                embed_url: candidate.play_url.clone(),
                category_id: category.id,
                published: true,
                featured: false,
                seo: SeoFields::default(),
            };
            let game = store.create_game(&new_game).map_err(|source| {
                ImportError::GameWriteFailed {
                    title: candidate.title.clone(),
                    source,
                }
            })?;
            log::debug!("Created game {} ({})", game.id, game.slug);
            ImportResult {
                status: ImportStatus::Created,
                game_id: game.id,
                slug: game.slug,
            }
        }
    };

    for path in game_paths(&result.slug) {
        invalidator.invalidate(&path);
    }

    Ok(result)
}

/// What a batch run did.
#[derive(Debug, Default)]
pub struct BatchResult {
    pub outcome: ImportOutcome,
    /// External ids of the candidates that were imported, in input order.
    pub imported_ids: Vec<String>,
    /// True if the cancel flag stopped the batch before the last candidate.
    pub cancelled: bool,
}

/// Import candidates one at a time in input order.
///
/// A failing candidate is recorded and the batch moves on. `cancel` is
/// checked before each candidate; once set, the remaining candidates are
/// left unattempted and uncounted.
pub fn import_batch(
    store: &dyn CatalogStore,
    candidates: &[ExternalGameCandidate],
    invalidator: &dyn PageInvalidator,
    progress: &dyn ImportProgress,
    cancel: &AtomicBool,
) -> BatchResult {
    let mut result = BatchResult::default();
    let total = candidates.len();

    for (i, candidate) in candidates.iter().enumerate() {
        if cancel.load(Ordering::Relaxed) {
            log::info!("Import cancelled after {} of {} candidates", i, total);
            result.cancelled = true;
            break;
        }

        progress.on_item_start(i + 1, total, &candidate.title);
        match import_candidate(store, candidate, invalidator) {
            Ok(imported) => {
                progress.on_item_success(&candidate.title, &imported);
                result.outcome.record_success(imported.status);
                result.imported_ids.push(candidate.external_id.clone());
            }
            Err(e) => {
                let reason = e.to_string();
                progress.on_item_failure(&candidate.title, &reason);
                result
                    .outcome
                    .record_failure(&candidate.external_id, &candidate.title, reason);
            }
        }
    }

    progress.on_complete(&result.outcome);
    result
}

/// Record a finished batch in the import log.
pub fn log_import(
    conn: &Connection,
    source: &str,
    page: Option<u32>,
    outcome: &ImportOutcome,
) -> Result<i64, ImportError> {
    let now = chrono::Utc::now().to_rfc3339();
    let log_entry = ImportLog {
        id: 0,
        source: source.to_string(),
        page: page.map(i64::from),
        attempted: outcome.attempted as i64,
        succeeded: outcome.succeeded as i64,
        failed: outcome.failed as i64,
        imported_at: now,
    };
    let id = operations::insert_import_log(conn, &log_entry)?;
    Ok(id)
}
