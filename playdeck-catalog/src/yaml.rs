//! YAML loading for human-curated seed data.
//!
//! Loads category and game definitions from a seed directory so a fresh
//! catalog can be populated without going through a feed.

use crate::types::{GameSeed, NewCategory};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
}

/// All seed data found in a seed directory.
#[derive(Debug, Default)]
pub struct SeedData {
    pub categories: Vec<NewCategory>,
    pub games: Vec<GameSeed>,
}

/// Load all category definitions from YAML files in a directory.
///
/// Each `.yaml` file in the directory should contain a single `NewCategory`.
pub fn load_categories(dir: &Path) -> Result<Vec<NewCategory>, YamlError> {
    load_yaml_dir(dir)
}

/// Load all game definitions from YAML files in a directory.
///
/// Each `.yaml` file should contain a single `GameSeed`.
pub fn load_games(dir: &Path) -> Result<Vec<GameSeed>, YamlError> {
    load_yaml_dir(dir)
}

/// Load all seed data from the standard directory layout.
///
/// Expected structure:
/// ```text
/// seed_dir/
///   categories/
///     action.yaml
///     puzzle.yaml
///   games/
///     space-adventure.yaml
///     brain-puzzle.yaml
/// ```
pub fn load_seed(seed_dir: &Path) -> Result<SeedData, YamlError> {
    if !seed_dir.is_dir() {
        return Err(YamlError::DirNotFound(seed_dir.display().to_string()));
    }
    let categories = load_categories(&seed_dir.join("categories"))?;
    let games = load_games(&seed_dir.join("games"))?;
    Ok(SeedData { categories, games })
}

/// Load every YAML file in a directory, each containing a single `T`.
///
/// A missing directory yields an empty list. Files are read in name order.
fn load_yaml_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>, YamlError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(YamlError::DirNotFound(dir.display().to_string()));
    }

    let mut entries: Vec<_> = std::fs::read_dir(dir)
        .map_err(|e| YamlError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path()
                .extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let path = entry.path();
        let contents = std::fs::read_to_string(&path).map_err(|e| YamlError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        let item: T = serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
            path: path.display().to_string(),
            source: e,
        })?;
        items.push(item);
    }

    Ok(items)
}
