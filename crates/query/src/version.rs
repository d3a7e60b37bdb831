//! Version extraction from free text

use regex::Regex;
use std::sync::LazyLock;

// Tried in order against the original (case-preserving) query. None of them
// accepts a bare integer, so "port 3000" or "issue 19" never yield a version.
static V_PREFIXED: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"\b[vV](\d+(?:\.\d+)?(?:\.\d+)?(?:-[0-9A-Za-z][0-9A-Za-z.]*)?)\b").ok()
});
static VERSION_WORD: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)\bversion\s+(\d+(?:\.\d+)?(?:\.\d+)?)\b").ok());
static AT_PREFIXED: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"@(\d+\.\d+(?:\.\d+)?(?:-[0-9A-Za-z][0-9A-Za-z.]*)?)\b").ok()
});

/// Extract an explicitly marked version (`v19`, `version 18.2`, `react@18.2.0`)
pub fn extract_version(query: &str) -> Option<String> {
    [&V_PREFIXED, &VERSION_WORD, &AT_PREFIXED]
        .into_iter()
        .filter_map(|pattern| pattern.as_ref())
        .find_map(|pattern| {
            pattern
                .captures(query)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().trim_end_matches('.').to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_versions_are_captured() {
        assert_eq!(extract_version("react v19").as_deref(), Some("19"));
        assert_eq!(
            extract_version("next V15.0.0-RC.1 middleware").as_deref(),
            Some("15.0.0-RC.1")
        );
        assert_eq!(
            extract_version("vue version 3.4 computed").as_deref(),
            Some("3.4")
        );
        assert_eq!(
            extract_version("react@18.2.0 useState").as_deref(),
            Some("18.2.0")
        );
    }

    #[test]
    fn test_bare_numbers_are_ignored() {
        assert_eq!(extract_version("express port 3000"), None);
        assert_eq!(extract_version("react issue 19"), None);
        assert_eq!(extract_version("react@18 hooks"), None);
        assert_eq!(extract_version("@types/react props"), None);
        assert_eq!(extract_version("vue dev server"), None);
    }
}
