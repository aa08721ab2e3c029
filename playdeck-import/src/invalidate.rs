//! Hook for dropping cached copies of public pages after a catalog write.

/// Receives the paths whose cached rendering is stale.
pub trait PageInvalidator {
    fn invalidate(&self, path: &str);
}

/// Discards invalidations.
pub struct SilentInvalidator;

impl PageInvalidator for SilentInvalidator {
    fn invalidate(&self, _path: &str) {}
}

/// Logs each invalidated path at debug level.
pub struct LogInvalidator;

impl PageInvalidator for LogInvalidator {
    fn invalidate(&self, path: &str) {
        log::debug!("Invalidated cached page {}", path);
    }
}

/// Paths affected by a write to the game with `slug`.
pub fn game_paths(slug: &str) -> [String; 3] {
    [
        "/admin/games".to_string(),
        "/games".to_string(),
        format!("/games/{slug}"),
    ]
}
