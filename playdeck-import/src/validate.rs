//! Structural checks on external candidates before anything is written.

use playdeck_catalog::{ExternalGameCandidate, normalize_slug};
use url::Url;

use crate::error::ImportError;

/// Reject candidates whose title or category would produce an empty slug,
/// or whose play/banner URLs are not absolute http(s) URLs.
pub fn validate_candidate(candidate: &ExternalGameCandidate) -> Result<(), ImportError> {
    if normalize_slug(&candidate.title).is_empty() {
        return Err(ImportError::InvalidCandidate(format!(
            "title '{}' has no usable characters",
            candidate.title
        )));
    }
    if normalize_slug(&candidate.category_label).is_empty() {
        return Err(ImportError::InvalidCandidate(format!(
            "category '{}' has no usable characters",
            candidate.category_label
        )));
    }
    check_url("play URL", &candidate.play_url)?;
    check_url("thumbnail URL", &candidate.banner_image_url)?;
    Ok(())
}

fn check_url(field: &str, value: &str) -> Result<(), ImportError> {
    let parsed = Url::parse(value)
        .map_err(|e| ImportError::InvalidCandidate(format!("invalid {field} '{value}': {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(ImportError::InvalidCandidate(format!(
            "invalid {field} '{value}': unsupported scheme '{scheme}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> ExternalGameCandidate {
        ExternalGameCandidate {
            external_id: "1".to_string(),
            source: "gamepix".to_string(),
            title: "Pixel Runner".to_string(),
            description: String::new(),
            banner_image_url: "https://img.example.com/p.png".to_string(),
            play_url: "https://play.example.com/p".to_string(),
            category_label: "Arcade".to_string(),
            quality_score: None,
            published_at: None,
        }
    }

    #[test]
    fn valid_candidate_passes() {
        assert!(validate_candidate(&candidate()).is_ok());
    }

    #[test]
    fn rejects_unusable_title_and_category() {
        let mut c = candidate();
        c.title = "???".to_string();
        assert!(matches!(validate_candidate(&c), Err(ImportError::InvalidCandidate(_))));

        let mut c = candidate();
        c.category_label = String::new();
        assert!(matches!(validate_candidate(&c), Err(ImportError::InvalidCandidate(_))));
    }

    #[test]
    fn rejects_relative_and_non_http_urls() {
        let mut c = candidate();
        c.banner_image_url = "/images/p.png".to_string();
        let err = validate_candidate(&c).unwrap_err().to_string();
        assert!(err.contains("thumbnail URL"), "{err}");

        let mut c = candidate();
        c.play_url = "javascript:alert(1)".to_string();
        assert!(matches!(validate_candidate(&c), Err(ImportError::InvalidCandidate(_))));
    }
}
