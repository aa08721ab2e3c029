//! Wire types for the supported feeds and their conversion into candidates.

use playdeck_catalog::ExternalGameCandidate;
use serde::{Deserialize, Deserializer};

use crate::error::FeedError;

/// Ordering requested from a feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Quality,
    Recency,
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Quality => write!(f, "quality"),
            Self::Recency => write!(f, "recency"),
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "recency" | "newest" | "pubdate" => Ok(Self::Recency),
            other => Err(format!("unknown sort key '{other}' (expected quality or recency)")),
        }
    }
}

/// One page of candidates as returned by a feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    pub items: Vec<ExternalGameCandidate>,
    /// The 1-based page these items came from.
    pub page: u32,
    pub total_pages: u32,
    pub is_last_page: bool,
}

/// Accept either a JSON string or number and keep it as a string.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

/// Treat an explicit JSON `null` like a missing string.
fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn excerpt(body: &str) -> &str {
    let mut end = body.len().min(200);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

// ── GamePix ─────────────────────────────────────────────────────────────────

/// Top-level GamePix v2 JSON feed document.
#[derive(Debug, Deserialize)]
pub struct GamePixResponse {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub next_url: Option<String>,
    #[serde(default)]
    pub first_page_url: Option<String>,
    #[serde(default)]
    pub last_page_url: Option<String>,
    #[serde(default)]
    pub modified: Option<String>,
    pub items: Vec<GamePixItem>,
}

/// A single game in a GamePix feed page.
///
/// Every field is optional on the wire; gaps surface later as invalid
/// candidates instead of failing the whole page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GamePixItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_null")]
    pub title: String,
    #[serde(deserialize_with = "string_or_null")]
    pub namespace: String,
    #[serde(deserialize_with = "string_or_null")]
    pub description: String,
    #[serde(deserialize_with = "string_or_null")]
    pub category: String,
    pub orientation: Option<String>,
    pub quality_score: Option<f64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub date_modified: Option<String>,
    pub date_published: Option<String>,
    #[serde(deserialize_with = "string_or_null")]
    pub banner_image: String,
    #[serde(deserialize_with = "string_or_null")]
    pub image: String,
    #[serde(deserialize_with = "string_or_null")]
    pub url: String,
}

impl GamePixItem {
    pub fn into_candidate(self, source: &str) -> ExternalGameCandidate {
        let banner_image_url = if self.banner_image.is_empty() {
            self.image
        } else {
            self.banner_image
        };
        ExternalGameCandidate {
            external_id: self.id,
            source: source.to_string(),
            title: self.title,
            description: self.description,
            banner_image_url,
            play_url: self.url,
            category_label: self.category,
            quality_score: self.quality_score,
            published_at: self.date_published,
        }
    }
}

/// Total page count from GamePix's `last_page_url`, read from its `page`
/// query parameter. Defaults to 1 when absent or unparsable.
pub fn gamepix_total_pages(last_page_url: Option<&str>) -> u32 {
    last_page_url
        .and_then(|raw| url::Url::parse(raw).ok())
        .and_then(|u| {
            u.query_pairs()
                .find(|(key, _)| key == "page")
                .and_then(|(_, value)| value.parse::<u32>().ok())
        })
        .map(|pages| pages.max(1))
        .unwrap_or(1)
}

/// Parse a GamePix response body into a `FeedPage`.
pub fn parse_gamepix_page(body: &str, page: u32, source: &str) -> Result<FeedPage, FeedError> {
    let response: GamePixResponse = serde_json::from_str(body).map_err(|e| {
        FeedError::Malformed(format!(
            "failed to parse GamePix page {page}: {e}. Response: {}",
            excerpt(body)
        ))
    })?;

    let total_pages = gamepix_total_pages(response.last_page_url.as_deref()).max(page);
    let items = response
        .items
        .into_iter()
        .map(|item| item.into_candidate(source))
        .collect();

    Ok(FeedPage {
        items,
        page,
        total_pages,
        is_last_page: page >= total_pages,
    })
}

// ── GameMonetize ────────────────────────────────────────────────────────────

/// A single game in a GameMonetize feed. The feed body is a bare array of these.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GameMonetizeItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(deserialize_with = "string_or_null")]
    pub title: String,
    #[serde(deserialize_with = "string_or_null")]
    pub description: String,
    #[serde(deserialize_with = "string_or_null")]
    pub instructions: String,
    #[serde(deserialize_with = "string_or_null")]
    pub url: String,
    #[serde(deserialize_with = "string_or_null")]
    pub category: String,
    #[serde(deserialize_with = "string_or_null")]
    pub tags: String,
    #[serde(deserialize_with = "string_or_null")]
    pub thumb: String,
    #[serde(deserialize_with = "string_or_number")]
    pub width: String,
    #[serde(deserialize_with = "string_or_number")]
    pub height: String,
}

impl GameMonetizeItem {
    pub fn into_candidate(self, source: &str) -> ExternalGameCandidate {
        ExternalGameCandidate {
            external_id: self.id,
            source: source.to_string(),
            title: self.title,
            description: self.description,
            banner_image_url: self.thumb,
            play_url: self.url,
            category_label: self.category,
            quality_score: None,
            published_at: None,
        }
    }
}

/// GameMonetize reports no page count. A short or empty page is the last
/// one; otherwise at least one more page exists.
///
/// Returns `(total_pages, is_last_page)`.
pub fn gamemonetize_pagination(page: u32, page_size: u32, item_count: usize) -> (u32, bool) {
    let is_last = item_count == 0 || item_count < page_size as usize;
    let total = if is_last { page } else { page + 1 };
    (total, is_last)
}

/// Parse a GameMonetize response body into a `FeedPage`.
pub fn parse_gamemonetize_page(
    body: &str,
    page: u32,
    page_size: u32,
    source: &str,
) -> Result<FeedPage, FeedError> {
    let items: Vec<GameMonetizeItem> = serde_json::from_str(body).map_err(|e| {
        FeedError::Malformed(format!(
            "failed to parse GameMonetize page {page}: {e}. Response: {}",
            excerpt(body)
        ))
    })?;

    let (total_pages, is_last_page) = gamemonetize_pagination(page, page_size, items.len());
    Ok(FeedPage {
        items: items
            .into_iter()
            .map(|item| item.into_candidate(source))
            .collect(),
        page,
        total_pages,
        is_last_page,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_from_last_page_url() {
        assert_eq!(
            gamepix_total_pages(Some(
                "https://feeds.gamepix.com/v2/json?order=quality&page=42&pagination=24"
            )),
            42
        );
        assert_eq!(gamepix_total_pages(Some("https://feeds.gamepix.com/v2/json")), 1);
        assert_eq!(gamepix_total_pages(Some("not a url")), 1);
        assert_eq!(gamepix_total_pages(None), 1);
    }

    #[test]
    fn parse_gamepix_items_and_pagination() {
        let body = r#"{
            "version": "https://jsonfeed.org/version/1",
            "title": "GamePix",
            "last_page_url": "https://feeds.gamepix.com/v2/json?page=3&pagination=24",
            "items": [{
                "id": "40071",
                "title": "Pixel Runner",
                "namespace": "pixel-runner",
                "description": "Run!",
                "category": "Arcade",
                "orientation": "landscape",
                "quality_score": 0.87,
                "width": 800,
                "height": 600,
                "date_modified": "2024-05-01T10:00:00Z",
                "date_published": "2024-04-01T10:00:00Z",
                "banner_image": "https://img.gamepix.com/games/pixel-runner/banner.png",
                "image": "https://img.gamepix.com/games/pixel-runner/icon.png",
                "url": "https://play.gamepix.com/pixel-runner/embed"
            }]
        }"#;

        let page = parse_gamepix_page(body, 1, "gamepix").unwrap();
        assert_eq!(page.total_pages, 3);
        assert!(!page.is_last_page);
        let item = &page.items[0];
        assert_eq!(item.external_id, "40071");
        assert_eq!(item.source, "gamepix");
        assert_eq!(item.category_label, "Arcade");
        assert_eq!(item.quality_score, Some(0.87));
        assert_eq!(item.published_at.as_deref(), Some("2024-04-01T10:00:00Z"));
        assert!(item.banner_image_url.ends_with("banner.png"));

        let last = parse_gamepix_page(body, 3, "gamepix").unwrap();
        assert!(last.is_last_page);
    }

    #[test]
    fn gamepix_banner_falls_back_to_image() {
        let body = r#"{"items": [{"id": 7, "title": "T", "image": "https://img/x.png"}]}"#;
        let page = parse_gamepix_page(body, 1, "gamepix").unwrap();
        assert_eq!(page.items[0].external_id, "7");
        assert_eq!(page.items[0].banner_image_url, "https://img/x.png");
        assert_eq!(page.total_pages, 1);
        assert!(page.is_last_page);
    }

    #[test]
    fn null_fields_do_not_sink_the_page() {
        let body = r#"{"items": [
            {"id": 1, "title": "Pixel Runner", "description": "Run!", "category": "Arcade",
             "banner_image": "https://img/a.png", "url": "https://play/a"},
            {"id": 2, "title": null, "description": null, "category": null,
             "banner_image": null, "image": "https://img/b.png", "url": null,
             "quality_score": null}
        ]}"#;
        let page = parse_gamepix_page(body, 1, "gamepix").unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "Pixel Runner");
        let gap = &page.items[1];
        assert_eq!(gap.external_id, "2");
        assert!(gap.title.is_empty());
        assert!(gap.description.is_empty());
        assert!(gap.play_url.is_empty());
        assert_eq!(gap.banner_image_url, "https://img/b.png");

        let body = r#"[
            {"id": "9", "title": "Sky Fighter", "description": null, "url": "https://g/9",
             "category": "Shooting", "tags": null, "thumb": "https://img/9.jpg",
             "width": null, "height": 600}
        ]"#;
        let page = parse_gamemonetize_page(body, 1, 24, "gamemonetize").unwrap();
        assert_eq!(page.items[0].title, "Sky Fighter");
        assert!(page.items[0].description.is_empty());
    }

    #[test]
    fn malformed_gamepix_body() {
        let err = parse_gamepix_page("<html>oops</html>", 1, "gamepix").unwrap_err();
        match err {
            FeedError::Malformed(msg) => assert!(msg.contains("<html>oops</html>")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }

    #[test]
    fn gamemonetize_pagination_from_page_fill() {
        assert_eq!(gamemonetize_pagination(1, 24, 24), (2, false));
        assert_eq!(gamemonetize_pagination(4, 24, 10), (4, true));
        assert_eq!(gamemonetize_pagination(2, 24, 0), (2, true));
        assert_eq!(gamemonetize_pagination(7, 0, 0), (7, true));
    }

    #[test]
    fn parse_gamemonetize_array() {
        let body = r#"[{
            "id": "12345",
            "title": "Sky Fighter",
            "description": "Shoot planes",
            "instructions": "Arrow keys",
            "url": "https://html5.gamemonetize.com/abc/",
            "category": "Shooting",
            "tags": "plane, shooting",
            "thumb": "https://img.gamemonetize.com/abc/512x384.jpg",
            "width": "800",
            "height": 600
        }]"#;

        let page = parse_gamemonetize_page(body, 1, 24, "gamemonetize").unwrap();
        assert!(page.is_last_page);
        assert_eq!(page.total_pages, 1);
        let item = &page.items[0];
        assert_eq!(item.title, "Sky Fighter");
        assert_eq!(item.play_url, "https://html5.gamemonetize.com/abc/");
        assert_eq!(item.banner_image_url, "https://img.gamemonetize.com/abc/512x384.jpg");
        assert!(item.quality_score.is_none());
    }

    #[test]
    fn sort_key_parsing() {
        assert_eq!("quality".parse::<SortKey>(), Ok(SortKey::Quality));
        assert_eq!("Recency".parse::<SortKey>(), Ok(SortKey::Recency));
        assert!("random".parse::<SortKey>().is_err());
    }
}
