//! Declaration parser entry point

use crate::cache::{CacheKey, ParseCache};
use crate::classify::collect;
use crate::syntax::Dialect;
use crate::types::{ApiSignature, CacheStats, ParseResult, SearchHit};
use crate::{search, signature};
use augments_core::ParserConfig;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use tree_sitter::Parser;

/// Default number of cached parse results
pub const DEFAULT_CACHE_CAPACITY: usize = 50;

/// Default result limit for [`DeclarationParser::search_apis`]
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Parses TypeScript declaration text into [`ParseResult`]s
///
/// Results are cached by content hash; a cache hit returns the same `Arc`.
#[derive(Debug)]
pub struct DeclarationParser {
    cache: ParseCache,
}

impl Default for DeclarationParser {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl DeclarationParser {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: ParseCache::new(cache_capacity),
        }
    }

    pub fn from_config(config: &ParserConfig) -> Self {
        Self::new(config.cache_capacity)
    }

    /// Parse declaration text; `file_name` picks the grammar (`.tsx` or TypeScript)
    ///
    /// Never fails: syntax errors and unusable declarations are reported in
    /// [`ParseResult::errors`] and the rest of the text is still parsed.
    pub fn parse(&self, content: &str, file_name: &str) -> Arc<ParseResult> {
        let dialect = Dialect::for_file(file_name);
        let key = CacheKey::new(content, dialect);

        if let Some(hit) = self.cache.get(&key) {
            debug!(file = %file_name, "Parse cache hit");
            return hit;
        }

        let result = Arc::new(parse_uncached(content, file_name, dialect));
        self.cache.insert(key, Arc::clone(&result));
        result
    }

    /// Resolve a concept to its signature, overloads and related types
    pub fn extract_api_signature(
        &self,
        content: &str,
        concept: &str,
        file_name: &str,
    ) -> Option<ApiSignature> {
        let result = self.parse(content, file_name);
        signature::extract(&result, concept)
    }

    /// Definitions matching every term of `query`, best first
    pub fn search_apis(
        &self,
        content: &str,
        query: &str,
        file_name: &str,
        max_results: usize,
    ) -> Vec<SearchHit> {
        let result = self.parse(content, file_name);
        search::search(&result.definitions, query, max_results)
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

fn parse_uncached(content: &str, file_name: &str, dialect: Dialect) -> ParseResult {
    let mut parser = Parser::new();
    if let Err(e) = parser.set_language(&dialect.language()) {
        warn!(file = %file_name, error = %e, "Failed to load TypeScript grammar");
        return ParseResult {
            errors: vec![format!("failed to load grammar: {e}")],
            ..ParseResult::default()
        };
    }

    let Some(tree) = parser.parse(content, None) else {
        return ParseResult {
            errors: vec![format!("failed to parse {file_name}")],
            ..ParseResult::default()
        };
    };

    let (definitions, errors) = collect(tree.root_node(), content);

    let mut related_types = HashMap::new();
    for definition in definitions.iter().filter(|d| d.kind.is_type_like()) {
        related_types
            .entry(definition.name.clone())
            .or_insert_with(|| definition.clone());
    }

    debug!(
        file = %file_name,
        definitions = definitions.len(),
        errors = errors.len(),
        "Parsed declarations"
    );

    ParseResult {
        definitions,
        related_types,
        errors,
    }
}
