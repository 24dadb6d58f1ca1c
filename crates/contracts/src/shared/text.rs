//! Text normalization shared by category filtering and free-text search.
//!
//! Both paths must agree on what "the same word" means, so the rule lives
//! here once: trim, collapse internal whitespace, strip diacritics, lowercase.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Trim and collapse runs of whitespace into a single space.
///
/// `"  Sacs   à main "` -> `"Sacs à main"`
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Canonical comparison key: whitespace collapsed, diacritics stripped,
/// lowercased.
///
/// `"Électronique "` and `"electronique"` fold to the same key.
pub fn fold_text(input: &str) -> String {
    let collapsed = collapse_whitespace(input);
    collapsed
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Substring test on folded text. An empty needle matches nothing.
pub fn folded_contains(haystack: &str, folded_needle: &str) -> bool {
    !folded_needle.is_empty() && fold_text(haystack).contains(folded_needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  Sacs   à\tmain "), "Sacs à main");
        assert_eq!(collapse_whitespace("   "), "");
    }

    #[test]
    fn test_fold_strips_accents_and_case() {
        assert_eq!(fold_text("Électronique"), "electronique");
        assert_eq!(fold_text("  CHAUSSURES   Homme "), "chaussures homme");
        assert_eq!(fold_text("Crème brûlée"), "creme brulee");
    }

    #[test]
    fn test_folded_contains() {
        assert!(folded_contains("Robe d'été en coton", "ete"));
        assert!(!folded_contains("Robe d'été", "hiver"));
        assert!(!folded_contains("Robe", ""));
    }
}
