//! Keyword rule matching.

/// Returns true when `keyword` occurs inside `text`, ignoring case.
///
/// This is the single matching policy for terrain and character rules:
/// plain substring containment, no stemming, no fuzzy scoring. An empty
/// keyword never matches; catalogs reject them on load anyway.
pub fn keyword_matches(text: &str, keyword: &str) -> bool {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return false;
    }
    text.to_lowercase().contains(&keyword.to_lowercase())
}
