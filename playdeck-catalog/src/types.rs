//! Data model types for the game catalog.
//!
//! These types represent the persistent catalog schema (categories, games,
//! import tracking) and the ephemeral records that flow through an import
//! run (external candidates, per-run outcomes).

use serde::{Deserialize, Serialize};

// ── Category ────────────────────────────────────────────────────────────────

/// A persisted game category.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Unique across all categories.
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields for creating or editing a category, also the YAML seed format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A category together with the number of games filed under it.
#[derive(Debug, Clone)]
pub struct CategoryWithCount {
    pub category: Category,
    pub game_count: i64,
}

// ── Game ────────────────────────────────────────────────────────────────────

/// Optional search-engine metadata attached to a game.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeoFields {
    #[serde(default)]
    pub meta_title: Option<String>,
    #[serde(default)]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub keywords: Option<String>,
}

/// A persisted game.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub title: String,
    /// Unique across all games. Derived from the title at creation time and
    /// left untouched by re-imports so published URLs stay stable.
    pub slug: String,
    pub description: String,
    pub instructions: Option<String>,
    pub thumbnail: String,
    pub embed_url: String,
    pub category_id: i64,
    pub published: bool,
    pub featured: bool,
    pub seo: SeoFields,
    pub created_at: String,
    pub updated_at: String,
}

/// Every editable field of a game. Used for creation and for full admin edits.
#[derive(Debug, Clone, PartialEq)]
pub struct NewGame {
    pub title: String,
    pub slug: String,
    pub description: String,
    pub instructions: Option<String>,
    pub thumbnail: String,
    pub embed_url: String,
    pub category_id: i64,
    pub published: bool,
    pub featured: bool,
    pub seo: SeoFields,
}

/// The subset of game fields a re-import overwrites. The slug is deliberately
/// absent.
#[derive(Debug, Clone, PartialEq)]
pub struct GameUpdate {
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub embed_url: String,
    pub category_id: i64,
    pub published: bool,
}

/// A game joined with its category.
#[derive(Debug, Clone)]
pub struct GameWithCategory {
    pub game: Game,
    pub category: Category,
}

/// A game definition in the YAML seed format. The category is referenced by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSeed {
    pub title: String,
    /// Derived from the title when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    pub description: String,
    #[serde(default)]
    pub instructions: Option<String>,
    pub thumbnail: String,
    pub embed_url: String,
    pub category: String,
    #[serde(default = "default_true")]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(flatten)]
    pub seo: SeoFields,
}

fn default_true() -> bool {
    true
}

// ── External Candidates ─────────────────────────────────────────────────────

/// A game listed by a third-party feed that has not been persisted locally.
///
/// Lives only for the duration of a crawl session.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalGameCandidate {
    /// Identifier assigned by the feed.
    pub external_id: String,
    /// Name of the feed the candidate came from (e.g. "gamepix").
    pub source: String,
    pub title: String,
    pub description: String,
    pub banner_image_url: String,
    pub play_url: String,
    pub category_label: String,
    pub quality_score: Option<f64>,
    pub published_at: Option<String>,
}

// ── Import Results ──────────────────────────────────────────────────────────

/// Whether an import created a new game or refreshed an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStatus {
    Created,
    Updated,
}

impl std::fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Updated => write!(f, "updated"),
        }
    }
}

/// Result of importing a single candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportResult {
    pub status: ImportStatus,
    pub game_id: i64,
    pub slug: String,
}

/// A candidate that failed during a batch import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemError {
    pub external_id: String,
    pub title: String,
    pub reason: String,
}

/// Summary of one batch import run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub created: usize,
    pub updated: usize,
    pub item_errors: Vec<ItemError>,
}

impl ImportOutcome {
    pub fn record_success(&mut self, status: ImportStatus) {
        self.attempted += 1;
        self.succeeded += 1;
        match status {
            ImportStatus::Created => self.created += 1,
            ImportStatus::Updated => self.updated += 1,
        }
    }

    pub fn record_failure(&mut self, external_id: &str, title: &str, reason: impl Into<String>) {
        self.attempted += 1;
        self.failed += 1;
        self.item_errors.push(ItemError {
            external_id: external_id.to_string(),
            title: title.to_string(),
            reason: reason.into(),
        });
    }

    /// One-line operator summary, e.g. "Imported 4, 1 failed".
    pub fn summary(&self) -> String {
        if self.failed > 0 {
            format!("Imported {}, {} failed", self.succeeded, self.failed)
        } else {
            format!("Imported {}", self.succeeded)
        }
    }
}

// ── Import Tracking ─────────────────────────────────────────────────────────

/// Log entry for one batch import run.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    pub source: String,
    pub page: Option<i64>,
    pub attempted: i64,
    pub succeeded: i64,
    pub failed: i64,
    pub imported_at: String,
}
