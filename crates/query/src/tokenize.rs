//! Query tokenization and the fixed word lists

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Words that never name a framework or a concept
pub(crate) const STOP_WORDS: &[&str] = &[
    "in", "for", "with", "the", "a", "an", "to", "how", "what", "why", "when", "using", "use",
];

/// Words that describe what the developer wants to do with an API
pub(crate) const CONTEXT_KEYWORDS: &[&str] = &[
    "hook",
    "hooks",
    "component",
    "components",
    "server",
    "client",
    "async",
    "await",
    "cleanup",
    "effect",
    "effects",
    "state",
    "props",
    "types",
    "typescript",
    "error",
    "errors",
    "middleware",
    "routing",
    "router",
    "route",
    "form",
    "forms",
    "validation",
    "schema",
    "query",
    "mutation",
    "cache",
    "caching",
    "ssr",
    "streaming",
    "auth",
    "authentication",
    "testing",
    "test",
    "config",
    "configuration",
    "lifecycle",
    "context",
    "ref",
    "refs",
    "event",
    "events",
    "subscription",
    "performance",
    "memo",
    "suspense",
    "transition",
    "api",
    "handler",
    "request",
    "response",
];

static VERSION_TOKEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^v?\d+(?:\.\d+)*(?:-[0-9a-z][0-9a-z.]*)?$").ok());

/// One query token in both original and lowercase form
#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub original: String,
    pub lower: String,
}

impl Token {
    fn new(original: &str) -> Self {
        Self {
            original: original.to_string(),
            lower: original.to_lowercase(),
        }
    }

    pub fn is_stop_word(&self) -> bool {
        STOP_WORDS.contains(&self.lower.as_str())
    }

    /// `18`, `v19.0.0`, `3.0.0-beta.1`
    pub fn is_version(&self) -> bool {
        VERSION_TOKEN
            .as_ref()
            .is_some_and(|re| re.is_match(&self.lower))
    }

    pub fn is_context_keyword(&self) -> bool {
        CONTEXT_KEYWORDS.contains(&self.lower.as_str())
    }
}

fn is_token_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '/' | '-' | '_' | '$' | '.')
}

/// Split a query into tokens
///
/// Surrounding punctuation is trimmed and `name@1.2.3` is split into the
/// package name and the version.
pub(crate) fn tokenize(query: &str) -> Vec<Token> {
    let mut tokens = Vec::new();

    for raw in query.split_whitespace() {
        let word = raw
            .trim_matches(|c: char| !is_token_char(c))
            .trim_end_matches(['.', '-']);
        if word.is_empty() {
            continue;
        }

        match split_package_version(word) {
            Some((name, version)) => {
                tokens.push(Token::new(name));
                tokens.push(Token::new(version));
            }
            None => tokens.push(Token::new(word)),
        }
    }

    tokens
}

/// Positions of `version` words directly followed by a number (`version 18.2`)
pub(crate) fn version_word_positions(tokens: &[Token]) -> HashSet<usize> {
    tokens
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| {
            pair[0].lower == "version"
                && pair[1].lower.starts_with(|c: char| c.is_ascii_digit())
                && pair[1].is_version()
        })
        .map(|(i, _)| i)
        .collect()
}

fn split_package_version(word: &str) -> Option<(&str, &str)> {
    let at = word.rfind('@')?;
    if at == 0 {
        return None;
    }
    let (name, version) = (&word[..at], &word[at + 1..]);
    version
        .starts_with(|c: char| c.is_ascii_digit())
        .then_some((name, version))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lowers(query: &str) -> Vec<String> {
        tokenize(query).into_iter().map(|t| t.lower).collect()
    }

    #[test]
    fn test_tokenize_trims_punctuation() {
        assert_eq!(
            lowers("How do I use useEffect() in React?"),
            vec!["how", "do", "i", "use", "useeffect", "in", "react"]
        );
        assert_eq!(lowers("next.js, routing."), vec!["next.js", "routing"]);
    }

    #[test]
    fn test_tokenize_splits_pinned_packages() {
        assert_eq!(
            lowers("@tanstack/react-query@5.0.0 useQuery"),
            vec!["@tanstack/react-query", "5.0.0", "usequery"]
        );
        assert_eq!(lowers("@types/node"), vec!["@types/node"]);
    }

    #[test]
    fn test_version_tokens() {
        assert!(Token::new("3000").is_version());
        assert!(Token::new("v19.0.0").is_version());
        assert!(Token::new("3.0.0-beta.1").is_version());
        assert!(!Token::new("vue").is_version());
        assert!(!Token::new("h1").is_version());
    }

    #[test]
    fn test_version_word_positions() {
        let tokens = tokenize("react version 18 useEffect version");
        assert_eq!(version_word_positions(&tokens), HashSet::from([1]));

        let tokens = tokenize("which version supports suspense");
        assert!(version_word_positions(&tokens).is_empty());
    }
}
