use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use playdeck_feed::{FeedSettings, settings_path};

use crate::CliError;

pub(crate) fn run_config_show() -> Result<(), CliError> {
    let path = settings_path();

    log::info!(
        "{}",
        "Feed Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    match &path {
        Some(p) if p.exists() => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(exists)".if_supports_color(Stdout, |t| t.green()),
            );
        }
        Some(p) => {
            log::info!(
                "  Settings file: {} {}",
                p.display().if_supports_color(Stdout, |t| t.cyan()),
                "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        None => {
            log::info!(
                "  Settings file: {}",
                "could not determine path".if_supports_color(Stdout, |t| t.red()),
            );
        }
    }
    crate::log_blank();

    let (settings, sources) = FeedSettings::load()?;
    let row = |name: &str, value: String, source: &playdeck_feed::SettingSource| {
        log::info!(
            "  {:<18} {} {}",
            name,
            value,
            format!("({})", source).if_supports_color(Stdout, |t| t.dimmed()),
        );
    };
    row("gamepix_url", settings.gamepix_url.clone(), &sources.gamepix_url);
    row(
        "gamemonetize_url",
        settings.gamemonetize_url.clone(),
        &sources.gamemonetize_url,
    );
    row("page_size", settings.page_size.to_string(), &sources.page_size);
    row(
        "timeout_secs",
        settings.timeout_secs.to_string(),
        &sources.timeout_secs,
    );

    Ok(())
}

pub(crate) fn run_config_path() -> Result<(), CliError> {
    match settings_path() {
        Some(path) => {
            log::info!("{}", path.display());
            Ok(())
        }
        None => Err(CliError::config("Could not determine config directory")),
    }
}
