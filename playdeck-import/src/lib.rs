//! Reconcile third-party feed listings into the game catalog.
//!
//! This crate owns the import pipeline: checking which candidates already
//! exist, resolving categories, creating or refreshing games, sweeping feed
//! pages for new candidates, and the per-crawl reconciliation session.

pub mod error;
pub mod exists;
pub mod invalidate;
pub mod progress;
pub mod reconcile;
pub mod resolver;
pub mod session;
pub mod sweep;
pub mod validate;

pub use error::ImportError;
pub use exists::{exists, exists_batch};
pub use invalidate::{LogInvalidator, PageInvalidator, SilentInvalidator, game_paths};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use reconcile::{BatchResult, import_batch, import_candidate, log_import};
pub use resolver::{ResolvedCategory, resolve_category};
pub use session::ReconciliationSession;
pub use sweep::{SweepOutcome, SweepRequest, fetch_with_timeout, sweep};
pub use validate::validate_candidate;
