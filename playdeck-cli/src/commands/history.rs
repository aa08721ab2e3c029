use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_store;

pub(crate) fn run_history(db: Option<PathBuf>, limit: u32) -> Result<(), CliError> {
    let store = open_store(db)?;
    let logs = playdeck_db::list_import_logs(store.conn(), limit)
        .map_err(|e| CliError::database(format!("Failed to read import history: {}", e)))?;

    if logs.is_empty() {
        log::info!("No imports recorded yet.");
        return Ok(());
    }

    for entry in &logs {
        let when = chrono::DateTime::parse_from_rfc3339(&entry.imported_at)
            .map(|t| {
                t.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
            .unwrap_or_else(|_| entry.imported_at.clone());
        let page = entry
            .page
            .map(|p| format!("page {p}"))
            .unwrap_or_default();
        let failed = if entry.failed > 0 {
            format!("{} failed", entry.failed)
                .if_supports_color(Stdout, |t| t.red())
                .to_string()
        } else {
            String::new()
        };
        log::info!(
            "  {}  {:<14} {:<9} {:>3}/{:<3} imported  {}",
            when.if_supports_color(Stdout, |t| t.dimmed()),
            entry.source,
            page,
            entry.succeeded,
            entry.attempted,
            failed,
        );
    }
    Ok(())
}
