//! Query parser
//!
//! Framework detection runs in strict precedence order and the first step that
//! matches wins:
//!
//! 1. a token equal to a known npm package name
//! 2. a token equal to a framework key, or a framework alias
//! 3. a token equal to an API pattern owned by exactly one framework
//! 4. a token within a small edit distance of a framework key
//! 5. the first npm-package-like token, taken as an unverified package
//!
//! Concept, version and context keywords are extracted independently.

use crate::tokenize::{tokenize, version_word_positions, Token};
use crate::version::extract_version;
use augments_core::{FrameworkCatalog, FrameworkInfo};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};
use strsim::levenshtein;
use tracing::debug;

static PACKAGE_LIKE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"^(?:@[a-z0-9][a-z0-9._~-]*/)?[a-z0-9][a-z0-9._~-]*$").ok()
});
static USE_HOOK: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^use[a-z]+$").ok());
static CAMEL_START: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[a-z]+[A-Z]").ok());
static CAMEL_ANYWHERE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b[a-z]+[A-Z][A-Za-z0-9]*\b").ok());

fn is_match(pattern: &LazyLock<Option<Regex>>, text: &str) -> bool {
    pattern.as_ref().is_some_and(|re| re.is_match(text))
}

/// Which detection step identified the framework
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    PackageName,
    FrameworkKey,
    Alias,
    ApiPattern,
    Fuzzy,
    Dynamic,
    None,
}

impl MatchKind {
    /// Confidence attached to a framework found by this step
    pub fn confidence(self) -> f64 {
        match self {
            Self::PackageName | Self::FrameworkKey => 1.0,
            Self::Alias => 0.9,
            Self::ApiPattern => 0.8,
            Self::Fuzzy => 0.6,
            Self::Dynamic => 0.4,
            Self::None => 0.0,
        }
    }
}

/// Structured form of a natural-language query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedQuery {
    /// Framework key, or the raw package name for dynamic matches
    pub framework: Option<String>,
    pub package_name: Option<String>,
    /// Lowercase API concept (e.g. `useeffect`)
    pub concept: String,
    pub version: Option<String>,
    pub original_query: String,
    /// Blended score in `[0, 1]`, rounded to two decimals
    pub confidence: f64,
    /// Confidence of the framework detection step alone
    pub framework_confidence: f64,
    pub context_keywords: Vec<String>,
    pub match_kind: MatchKind,
}

#[derive(Debug)]
struct FrameworkMatch {
    framework: String,
    package: String,
    kind: MatchKind,
    /// Token indices that named the framework
    consumed: Vec<usize>,
}

/// Parses developer queries against a framework catalog
#[derive(Debug, Clone)]
pub struct QueryParser {
    catalog: Arc<FrameworkCatalog>,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new(FrameworkCatalog::builtin())
    }
}

impl QueryParser {
    pub fn new(catalog: impl Into<Arc<FrameworkCatalog>>) -> Self {
        Self {
            catalog: catalog.into(),
        }
    }

    pub fn catalog(&self) -> &FrameworkCatalog {
        &self.catalog
    }

    /// Parse a query; never fails
    pub fn parse(&self, query: &str) -> ParsedQuery {
        let tokens = tokenize(query);
        let normalized = tokens
            .iter()
            .map(|t| t.lower.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        let detected = self.detect_framework(&tokens, &normalized);
        let concept = self.extract_concept(&tokens, detected.as_ref(), query, &normalized);
        let version = extract_version(query);
        let context_keywords = context_keywords(&tokens);

        let (framework, package_name, kind) = match detected {
            Some(m) => (Some(m.framework), Some(m.package), m.kind),
            None => (None, None, MatchKind::None),
        };
        let framework_confidence = kind.confidence();
        let confidence = blend_confidence(framework_confidence, &concept, context_keywords.len());

        debug!(
            query = %query,
            framework = ?framework,
            concept = %concept,
            version = ?version,
            match_kind = ?kind,
            confidence,
            "Parsed query"
        );

        ParsedQuery {
            framework,
            package_name,
            concept,
            version,
            original_query: query.to_string(),
            confidence,
            framework_confidence,
            context_keywords,
            match_kind: kind,
        }
    }

    fn detect_framework(&self, tokens: &[Token], normalized: &str) -> Option<FrameworkMatch> {
        self.match_package_name(tokens)
            .or_else(|| self.match_framework_name(tokens, normalized))
            .or_else(|| self.match_api_pattern(tokens))
            .or_else(|| self.match_fuzzy(tokens))
            .or_else(|| match_dynamic(tokens))
    }

    fn match_package_name(&self, tokens: &[Token]) -> Option<FrameworkMatch> {
        tokens.iter().enumerate().find_map(|(i, token)| {
            self.catalog
                .framework_for_package(&token.lower)
                .map(|f| FrameworkMatch {
                    framework: f.key.clone(),
                    package: token.lower.clone(),
                    kind: MatchKind::PackageName,
                    consumed: vec![i],
                })
        })
    }

    fn match_framework_name(&self, tokens: &[Token], normalized: &str) -> Option<FrameworkMatch> {
        let found = |f: &FrameworkInfo, kind: MatchKind, consumed: Vec<usize>| FrameworkMatch {
            framework: f.key.clone(),
            package: f.primary_package().to_string(),
            kind,
            consumed,
        };

        for (i, token) in tokens.iter().enumerate() {
            if let Some(f) = self
                .catalog
                .iter()
                .find(|f| token.lower == f.key || token.lower == f.key.replace('-', ""))
            {
                return Some(found(f, MatchKind::FrameworkKey, vec![i]));
            }
        }

        for f in self.catalog.iter() {
            for alias in f.aliases.iter().filter(|a| a.contains(' ')) {
                if normalized.contains(alias.as_str()) {
                    let words: HashSet<&str> = alias.split(' ').collect();
                    let consumed = tokens
                        .iter()
                        .enumerate()
                        .filter(|(_, t)| words.contains(t.lower.as_str()))
                        .map(|(i, _)| i)
                        .collect();
                    return Some(found(f, MatchKind::Alias, consumed));
                }
            }
        }

        for (i, token) in tokens.iter().enumerate() {
            if let Some(f) = self
                .catalog
                .iter()
                .find(|f| f.aliases.iter().any(|a| !a.contains(' ') && *a == token.lower))
            {
                return Some(found(f, MatchKind::Alias, vec![i]));
            }
        }

        None
    }

    fn match_api_pattern(&self, tokens: &[Token]) -> Option<FrameworkMatch> {
        tokens
            .iter()
            .filter(|t| t.lower.chars().count() >= 6 || t.lower.starts_with("use"))
            .find_map(|token| {
                let owners = self.catalog.frameworks_for_api(&token.lower);
                let key = match owners.as_slice() {
                    [] => return None,
                    [key] => *key,
                    // A pattern shared by several frameworks says nothing
                    _ => {
                        debug!(api = %token.lower, owners = ?owners, "Skipping ambiguous API pattern");
                        return None;
                    }
                };
                let f = self.catalog.get(key)?;
                Some(FrameworkMatch {
                    framework: f.key.clone(),
                    package: f.primary_package().to_string(),
                    kind: MatchKind::ApiPattern,
                    consumed: Vec::new(),
                })
            })
    }

    fn match_fuzzy(&self, tokens: &[Token]) -> Option<FrameworkMatch> {
        tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| t.lower.chars().count() >= 3 && !t.is_stop_word() && !t.is_version())
            .find_map(|(i, token)| {
                self.catalog
                    .iter()
                    .find(|f| {
                        let max_distance = (0.3 * f.key.chars().count() as f64).ceil() as usize;
                        let distance = levenshtein(&token.lower, &f.key);
                        distance > 0 && distance <= max_distance
                    })
                    .map(|f| FrameworkMatch {
                        framework: f.key.clone(),
                        package: f.primary_package().to_string(),
                        kind: MatchKind::Fuzzy,
                        consumed: vec![i],
                    })
            })
    }

    fn extract_concept(
        &self,
        tokens: &[Token],
        detected: Option<&FrameworkMatch>,
        query: &str,
        normalized: &str,
    ) -> String {
        let framework_words = detected
            .map(|m| self.framework_words(m, normalized))
            .unwrap_or_default();

        let version_words = version_word_positions(tokens);

        let remaining: Vec<&Token> = tokens
            .iter()
            .enumerate()
            .filter(|(i, t)| {
                !detected.is_some_and(|m| m.consumed.contains(i))
                    && !version_words.contains(i)
                    && !framework_words.contains(&t.lower)
                    && !t.is_stop_word()
                    && !t.is_version()
            })
            .map(|(_, t)| t)
            .collect();

        if let Some(first) = remaining.first() {
            // APIs are usually a single identifier
            if is_match(&USE_HOOK, &first.lower) || is_match(&CAMEL_START, &first.original) {
                return first.lower.clone();
            }
            return remaining
                .iter()
                .map(|t| t.lower.as_str())
                .collect::<Vec<_>>()
                .join(" ");
        }

        CAMEL_ANYWHERE
            .as_ref()
            .and_then(|re| re.find(query))
            .map(|m| m.as_str().to_lowercase())
            .unwrap_or_else(|| normalized.to_string())
    }

    /// Names that refer to the detected framework and so are not concepts
    fn framework_words(&self, detected: &FrameworkMatch, normalized: &str) -> HashSet<String> {
        let mut words = HashSet::new();
        words.insert(detected.package.clone());
        if let Some(f) = self.catalog.get(&detected.framework) {
            words.insert(f.key.clone());
            words.insert(f.key.replace('-', ""));
            words.extend(f.packages.iter().map(|p| p.to_lowercase()));
            for alias in &f.aliases {
                if !alias.contains(' ') {
                    words.insert(alias.clone());
                } else if normalized.contains(alias.as_str()) {
                    words.extend(alias.split(' ').map(str::to_string));
                }
            }
        }
        words
    }
}

fn match_dynamic(tokens: &[Token]) -> Option<FrameworkMatch> {
    tokens.iter().enumerate().find_map(|(i, token)| {
        let candidate = token.lower.chars().count() >= 2
            && !token.is_stop_word()
            && !token.is_version()
            && is_match(&PACKAGE_LIKE, &token.lower);
        candidate.then(|| FrameworkMatch {
            framework: token.lower.clone(),
            package: token.lower.clone(),
            kind: MatchKind::Dynamic,
            consumed: vec![i],
        })
    })
}

fn context_keywords(tokens: &[Token]) -> Vec<String> {
    let mut keywords: Vec<String> = Vec::new();
    for token in tokens.iter().filter(|t| t.is_context_keyword()) {
        if !keywords.contains(&token.lower) {
            keywords.push(token.lower.clone());
        }
    }
    keywords
}

fn blend_confidence(framework_confidence: f64, concept: &str, keyword_count: usize) -> f64 {
    let specificity = (concept.chars().count() as f64 / 20.0).min(1.0);
    let keywords = (keyword_count as f64 / 3.0).min(1.0);
    let raw = 0.4 * framework_confidence + 0.4 * specificity + 0.2 * keywords;
    (raw * 100.0).round() / 100.0
}
