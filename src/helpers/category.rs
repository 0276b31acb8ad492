//! Category name normalisation

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref NON_SLUG_RE: Regex = Regex::new(r"[^a-z0-9-]").unwrap();
}

/// Normalize a category name for use in URLs.
///
/// Lowercases, trims, turns whitespace runs into single hyphens and drops
/// everything outside `[a-z0-9-]`. Applying it twice changes nothing.
pub fn normalize_category(category: &str) -> String {
    let lower = category.to_lowercase();
    let hyphenated = WHITESPACE_RE.replace_all(lower.trim(), "-");
    NON_SLUG_RE.replace_all(&hyphenated, "").into_owned()
}

/// Display name for a category slug: hyphens become spaces and each word
/// is capitalised. Lossy for names that contained punctuation.
pub fn category_display_name(category_slug: &str) -> String {
    category_slug
        .replace('-', " ")
        .split(' ')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_category() {
        assert_eq!(normalize_category("  Web Development "), "web-development");
        assert_eq!(normalize_category("C++ & Rust"), "c--rust");
        assert_eq!(normalize_category("Tips\t\tTricks"), "tips-tricks");
        assert_eq!(normalize_category("Café"), "caf");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["Web Development", "C++ & Rust", "  a  b  ", "Ünïcode Stuff", ""] {
            let once = normalize_category(raw);
            assert_eq!(normalize_category(&once), once, "input {:?}", raw);
        }
    }

    #[test]
    fn test_category_display_name() {
        assert_eq!(category_display_name("web-development"), "Web Development");
        assert_eq!(category_display_name("rust"), "Rust");
    }
}
