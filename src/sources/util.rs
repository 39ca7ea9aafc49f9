//! Extraction helpers shared by the bundled adapters.

use std::sync::LazyLock;

use regex::Regex;

static FIRST_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Ordering key for a chapter: the first number in its title, or 0.
///
/// Lossy: "Vol. 2 Chapter 10" yields 2, and nothing guarantees uniqueness.
pub fn chapter_number(title: &str) -> f64 {
    FIRST_NUMBER
        .find(title)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0.0)
}

/// First capture group of `pattern` in `url`, or an empty string.
pub fn capture_id(pattern: &Regex, url: &str) -> String {
    pattern
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// Collapses whitespace runs to single spaces.
pub fn squash_whitespace(text: &str) -> String {
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Lowercase, dash-separated form of a label.
pub fn slugify(label: &str) -> String {
    WHITESPACE
        .replace_all(label.trim(), "-")
        .to_lowercase()
}

/// Comma separated list with blanks removed.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chapter_number() {
        assert_eq!(chapter_number("Chapter 10.5 - Finale"), 10.5);
        assert_eq!(chapter_number("Special"), 0.0);
        assert_eq!(chapter_number("Capítulo 112"), 112.0);
        assert_eq!(chapter_number(""), 0.0);
    }

    #[test]
    fn test_capture_id_never_fails() {
        let pattern = Regex::new(r"/series/([^/]+)").unwrap();
        assert_eq!(
            capture_id(&pattern, "https://weebcentral.com/series/01J76XY/solo-leveling"),
            "01J76XY"
        );
        assert_eq!(capture_id(&pattern, "https://weebcentral.com/chapters/abc"), "");
        assert_eq!(capture_id(&pattern, ""), "");
        assert_eq!(capture_id(&pattern, "not a url at all"), "");
    }

    #[test]
    fn test_squash_whitespace() {
        assert_eq!(squash_whitespace("  Capítulo   3 \n - Fim "), "Capítulo 3 - Fim");
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Slice of Life"), "slice-of-life");
        assert_eq!(slugify(" Ação "), "ação");
    }

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("Oda, , Ito "), vec!["Oda", "Ito"]);
        assert!(split_list("").is_empty());
    }
}
