//! Title to URL slug normalization.

/// Convert a title to a URL-safe slug.
///
/// The input is lowercased, every maximal run of characters outside
/// `[a-z0-9]` collapses to a single `-`, and leading/trailing `-` are
/// dropped. The function is total and idempotent. It makes no uniqueness
/// promise; collisions surface as unique-constraint failures in the store.
pub fn normalize_slug(title: &str) -> String {
    let mut result = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !result.is_empty() {
                result.push('-');
            }
            pending_separator = false;
            result.push(c);
        } else {
            pending_separator = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_punctuation() {
        assert_eq!(normalize_slug("Subway Surfers!!"), "subway-surfers");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(normalize_slug("  Multi   Space  "), "multi-space");
    }

    #[test]
    fn mixed_separators_collapse_to_one() {
        assert_eq!(normalize_slug("Tom & Jerry: Run!"), "tom-jerry-run");
        assert_eq!(normalize_slug("a_-_b"), "a-b");
    }

    #[test]
    fn keeps_digits() {
        assert_eq!(normalize_slug("2048 Deluxe"), "2048-deluxe");
    }

    #[test]
    fn non_ascii_letters_are_separators() {
        assert_eq!(normalize_slug("Pokémon Café"), "pok-mon-caf");
    }

    #[test]
    fn unicode_lowercasing_into_ascii() {
        // KELVIN SIGN lowercases to an ASCII 'k'
        assert_eq!(normalize_slug("\u{212A}art"), "kart");
    }

    #[test]
    fn empty_and_symbol_only_inputs() {
        assert_eq!(normalize_slug(""), "");
        assert_eq!(normalize_slug("!!!"), "");
        assert_eq!(normalize_slug("---"), "");
    }

    #[test]
    fn idempotent() {
        for title in [
            "Subway Surfers!!",
            "  Multi   Space  ",
            "already-a-slug",
            "--Edge--Case--",
            "Ünïcödé Ω Test 42",
        ] {
            let once = normalize_slug(title);
            assert_eq!(normalize_slug(&once), once, "not idempotent for {title:?}");
        }
    }
}
