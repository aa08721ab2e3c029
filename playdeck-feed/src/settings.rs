//! Feed settings: endpoint URLs, page size and request timeout.
//!
//! Resolved from environment variables, then `<config_dir>/playdeck/settings.toml`,
//! then built-in defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::FeedError;

pub const DEFAULT_GAMEPIX_URL: &str = "https://feeds.gamepix.com/v2/json";
pub const DEFAULT_GAMEMONETIZE_URL: &str = "https://gamemonetize.com/feed.php";
pub const DEFAULT_PAGE_SIZE: u32 = 24;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_GAMEPIX_URL: &str = "PLAYDECK_GAMEPIX_URL";
const ENV_GAMEMONETIZE_URL: &str = "PLAYDECK_GAMEMONETIZE_URL";
const ENV_PAGE_SIZE: &str = "PLAYDECK_PAGE_SIZE";
const ENV_TIMEOUT_SECS: &str = "PLAYDECK_TIMEOUT_SECS";

/// Resolved feed settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSettings {
    pub gamepix_url: String,
    pub gamemonetize_url: String,
    pub page_size: u32,
    pub timeout_secs: u64,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            gamepix_url: DEFAULT_GAMEPIX_URL.to_string(),
            gamemonetize_url: DEFAULT_GAMEMONETIZE_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Where a setting's value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingSource {
    /// Loaded from an environment variable.
    EnvVar(&'static str),
    /// Loaded from the settings file.
    ConfigFile,
    /// Built-in default.
    Default,
}

impl std::fmt::Display for SettingSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EnvVar(var) => write!(f, "env ${}", var),
            Self::ConfigFile => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// Provenance of each setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingSources {
    pub gamepix_url: SettingSource,
    pub gamemonetize_url: SettingSource,
    pub page_size: SettingSource,
    pub timeout_secs: SettingSource,
}

/// TOML settings file format.
#[derive(Debug, Default, serde::Deserialize, serde::Serialize)]
struct SettingsFile {
    feeds: Option<FeedsSection>,
}

#[derive(Debug, Default, Clone, serde::Deserialize, serde::Serialize)]
struct FeedsSection {
    gamepix_url: Option<String>,
    gamemonetize_url: Option<String>,
    page_size: Option<u32>,
    timeout_secs: Option<u64>,
}

impl FeedSettings {
    /// Load settings from the environment and the settings file.
    ///
    /// A missing settings file is not an error; an unreadable or invalid one is.
    pub fn load() -> Result<(Self, SettingSources), FeedError> {
        let file = match settings_path() {
            Some(path) if path.exists() => Some(std::fs::read_to_string(&path)?),
            _ => None,
        };
        Self::resolve(file.as_deref(), |var| std::env::var(var).ok())
    }

    /// Resolve settings from settings-file contents and an environment lookup.
    pub fn resolve(
        file_contents: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(Self, SettingSources), FeedError> {
        let file = match file_contents {
            Some(contents) => toml::from_str::<SettingsFile>(contents)
                .map_err(|e| FeedError::Config(format!("Invalid settings file: {e}")))?
                .feeds
                .unwrap_or_default(),
            None => FeedsSection::default(),
        };
        let defaults = Self::default();

        let (gamepix_url, gamepix_src) = pick(
            env(ENV_GAMEPIX_URL),
            ENV_GAMEPIX_URL,
            file.gamepix_url,
            defaults.gamepix_url,
        );
        let (gamemonetize_url, gamemonetize_src) = pick(
            env(ENV_GAMEMONETIZE_URL),
            ENV_GAMEMONETIZE_URL,
            file.gamemonetize_url,
            defaults.gamemonetize_url,
        );

        let page_size_env = env(ENV_PAGE_SIZE)
            .map(|v| parse_number::<u32>(ENV_PAGE_SIZE, &v))
            .transpose()?;
        let (page_size, page_size_src) =
            pick(page_size_env, ENV_PAGE_SIZE, file.page_size, defaults.page_size);
        if page_size == 0 {
            return Err(FeedError::Config("page_size must be at least 1".to_string()));
        }

        let timeout_env = env(ENV_TIMEOUT_SECS)
            .map(|v| parse_number::<u64>(ENV_TIMEOUT_SECS, &v))
            .transpose()?;
        let (timeout_secs, timeout_src) = pick(
            timeout_env,
            ENV_TIMEOUT_SECS,
            file.timeout_secs,
            defaults.timeout_secs,
        );

        Ok((
            Self {
                gamepix_url,
                gamemonetize_url,
                page_size,
                timeout_secs,
            },
            SettingSources {
                gamepix_url: gamepix_src,
                gamemonetize_url: gamemonetize_src,
                page_size: page_size_src,
                timeout_secs: timeout_src,
            },
        ))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn pick<T>(
    env_value: Option<T>,
    env_var: &'static str,
    file_value: Option<T>,
    default: T,
) -> (T, SettingSource) {
    if let Some(v) = env_value {
        (v, SettingSource::EnvVar(env_var))
    } else if let Some(v) = file_value {
        (v, SettingSource::ConfigFile)
    } else {
        (default, SettingSource::Default)
    }
}

fn parse_number<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, FeedError> {
    value
        .trim()
        .parse()
        .map_err(|_| FeedError::Config(format!("${var} must be a positive number, got '{value}'")))
}

/// Return the path to the settings file.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("playdeck").join("settings.toml"))
}

/// Default location of the catalog database.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("playdeck").join("catalog.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let (settings, sources) = FeedSettings::resolve(None, no_env).unwrap();
        assert_eq!(settings, FeedSettings::default());
        assert_eq!(sources.page_size, SettingSource::Default);
        assert_eq!(settings.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn file_values_apply() {
        let toml = "[feeds]\npage_size = 48\ngamepix_url = \"http://localhost:9000/feed\"\n";
        let (settings, sources) = FeedSettings::resolve(Some(toml), no_env).unwrap();
        assert_eq!(settings.page_size, 48);
        assert_eq!(settings.gamepix_url, "http://localhost:9000/feed");
        assert_eq!(sources.gamepix_url, SettingSource::ConfigFile);
        assert_eq!(sources.gamemonetize_url, SettingSource::Default);
    }

    #[test]
    fn env_overrides_file() {
        let toml = "[feeds]\npage_size = 48\n";
        let env = |var: &str| (var == "PLAYDECK_PAGE_SIZE").then(|| "12".to_string());
        let (settings, sources) = FeedSettings::resolve(Some(toml), env).unwrap();
        assert_eq!(settings.page_size, 12);
        assert_eq!(sources.page_size, SettingSource::EnvVar("PLAYDECK_PAGE_SIZE"));
    }

    #[test]
    fn invalid_values_are_config_errors() {
        let env = |var: &str| (var == "PLAYDECK_TIMEOUT_SECS").then(|| "soon".to_string());
        assert!(matches!(
            FeedSettings::resolve(None, env),
            Err(FeedError::Config(_))
        ));
        assert!(matches!(
            FeedSettings::resolve(Some("[feeds]\npage_size = 0\n"), no_env),
            Err(FeedError::Config(_))
        ));
        assert!(matches!(
            FeedSettings::resolve(Some("feeds = ["), no_env),
            Err(FeedError::Config(_))
        ));
    }
}
