//! Substring match support for search queries.
//!
//! Search endpoints are contains-style and case-sensitive, which maps to
//! SQL `LIKE` with a `%...%` pattern. User input must not be interpreted as
//! pattern syntax, so metacharacters are escaped first.

/// ## Summary
/// Builds a `LIKE` pattern that matches rows containing `needle` literally.
#[must_use]
pub fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::contains_pattern;

    #[test]
    fn wraps_plain_text_in_wildcards() {
        assert_eq!(contains_pattern("smith"), "%smith%");
    }

    #[test]
    fn escapes_like_metacharacters() {
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c\\d"), "%c\\\\d%");
    }

    #[test]
    fn empty_needle_matches_everything() {
        assert_eq!(contains_pattern(""), "%%");
    }
}
