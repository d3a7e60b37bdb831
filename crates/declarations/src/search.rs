//! Declaration search and relevance scoring

use crate::types::{DefinitionKind, SearchHit, TypeDefinition};

/// Score a definition against a lowercase query
pub fn score(definition: &TypeDefinition, query: &str) -> i32 {
    let name = definition.name.to_lowercase();

    let mut score = if name == query {
        100
    } else if name.starts_with(query) {
        80
    } else if name.contains(query) {
        60
    } else {
        0
    };

    score += match definition.kind {
        DefinitionKind::Function => 15,
        DefinitionKind::Interface => 10,
        _ => 0,
    };
    if definition.description.is_some() {
        score += 10;
    }
    if !definition.examples.is_empty() {
        score += 5;
    }
    if definition.deprecated {
        score -= 20;
    }
    score
}

/// Definitions containing every query term in their name or signature, best first
///
/// Equal scores keep declaration order.
pub(crate) fn search(
    definitions: &[TypeDefinition],
    query: &str,
    max_results: usize,
) -> Vec<SearchHit> {
    let query = query.trim().to_lowercase();
    let terms: Vec<&str> = query.split_whitespace().collect();
    if terms.is_empty() {
        return Vec::new();
    }

    let mut hits: Vec<SearchHit> = definitions
        .iter()
        .filter(|d| {
            let name = d.name.to_lowercase();
            let signature = d.signature.to_lowercase();
            terms
                .iter()
                .all(|term| name.contains(term) || signature.contains(term))
        })
        .map(|d| SearchHit {
            definition: d.clone(),
            score: score(d, &query),
        })
        .collect();

    hits.sort_by(|a, b| b.score.cmp(&a.score));
    hits.truncate(max_results);
    hits
}
