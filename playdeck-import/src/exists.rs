//! Existence checks against the catalog, by title or derived slug.

use std::collections::{BTreeSet, HashSet};

use playdeck_catalog::normalize_slug;
use playdeck_db::CatalogStore;

use crate::error::ImportError;

/// True if a game exists whose title equals `title` or whose slug equals
/// the slug derived from `title`. A title with no usable slug is matched by
/// title alone.
pub fn exists(store: &dyn CatalogStore, title: &str) -> Result<bool, ImportError> {
    let slug = normalize_slug(title);
    if slug.is_empty() {
        let titles = [title.to_string()];
        return Ok(!store.games_matching(&titles, &[])?.is_empty());
    }
    Ok(store.find_game_by_title_or_slug(title, &slug)?.is_some())
}

/// Batched [`exists`]: one answer per input position, in input order.
///
/// Issues a single store query no matter how many titles are given.
pub fn exists_batch<S: AsRef<str>>(
    store: &dyn CatalogStore,
    titles: &[S],
) -> Result<Vec<bool>, ImportError> {
    if titles.is_empty() {
        return Ok(Vec::new());
    }

    let slugs: Vec<String> = titles.iter().map(|t| normalize_slug(t.as_ref())).collect();
    let unique_titles: Vec<String> = titles
        .iter()
        .map(|t| t.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let unique_slugs: Vec<String> = slugs
        .iter()
        .filter(|s| !s.is_empty())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let matches = store.games_matching(&unique_titles, &unique_slugs)?;
    let known_titles: HashSet<&str> = matches.iter().map(|(t, _)| t.as_str()).collect();
    let known_slugs: HashSet<&str> = matches.iter().map(|(_, s)| s.as_str()).collect();

    Ok(titles
        .iter()
        .zip(&slugs)
        .map(|(title, slug)| {
            known_titles.contains(title.as_ref())
                || (!slug.is_empty() && known_slugs.contains(slug.as_str()))
        })
        .collect())
}
