//! API signature extraction

use crate::types::{ApiSignature, DefinitionKind, ParseResult, RelatedType, TypeDefinition};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Capitalized names that are language or standard-library types
const BUILTIN_TYPES: &[&str] = &[
    "Array",
    "ReadonlyArray",
    "Promise",
    "PromiseLike",
    "Record",
    "Partial",
    "Required",
    "Readonly",
    "Pick",
    "Omit",
    "Exclude",
    "Extract",
    "NonNullable",
    "Parameters",
    "ReturnType",
    "InstanceType",
    "ConstructorParameters",
    "Awaited",
    "Uppercase",
    "Lowercase",
    "Capitalize",
    "Uncapitalize",
    "ThisType",
    "Map",
    "Set",
    "WeakMap",
    "WeakSet",
    "ReadonlyMap",
    "ReadonlySet",
    "Date",
    "RegExp",
    "Error",
    "Function",
    "Object",
    "String",
    "Number",
    "Boolean",
    "Symbol",
    "BigInt",
    "Iterable",
    "Iterator",
    "IterableIterator",
    "AsyncIterable",
    "AsyncIterator",
    "Generator",
    "AsyncGenerator",
    "ArrayLike",
    "JSON",
    "Math",
];

static TYPE_REFERENCE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Za-z0-9_]*\b").ok());

/// Resolve `concept` against parsed definitions
///
/// An exact case-insensitive name match beats a substring match; among
/// substring matches the shortest name wins, then declaration order.
pub(crate) fn extract(result: &ParseResult, concept: &str) -> Option<ApiSignature> {
    let concept = concept.trim().to_lowercase();
    if concept.is_empty() {
        return None;
    }

    let primary = result
        .definitions
        .iter()
        .find(|d| d.name.to_lowercase() == concept)
        .or_else(|| {
            result
                .definitions
                .iter()
                .filter(|d| d.name.to_lowercase().contains(&concept))
                .min_by_key(|d| d.name.len())
        })?;

    let overloads: Vec<String> = result
        .definitions
        .iter()
        .filter(|d| d.kind == DefinitionKind::Function && d.name == primary.name)
        .map(|d| d.signature.clone())
        .collect();

    Some(ApiSignature {
        name: primary.name.clone(),
        kind: primary.kind,
        signature: primary.signature.clone(),
        description: primary.description.clone(),
        parameters: primary.parameters.clone(),
        return_type: primary.return_type_display(),
        generics: primary.generics.clone(),
        overloads: (overloads.len() > 1).then_some(overloads),
        related_types: related_types(result, primary),
        examples: primary.examples.clone(),
        see_also: primary.see_also.clone(),
        deprecated: primary.deprecated,
        deprecation_message: primary.deprecation_message.clone(),
    })
}

/// Types referenced directly by `definition` and declared in the same text
pub(crate) fn related_types(result: &ParseResult, definition: &TypeDefinition) -> Vec<RelatedType> {
    let Some(pattern) = TYPE_REFERENCE.as_ref() else {
        return Vec::new();
    };

    let references = definition
        .parameters
        .iter()
        .map(|p| p.type_annotation.as_str())
        .chain(definition.return_type.as_deref())
        .chain(definition.extends.iter().map(String::as_str))
        .chain(definition.implements.iter().map(String::as_str))
        .chain(definition.members.iter().map(|m| m.type_annotation.as_str()));

    let mut seen = HashSet::new();
    let mut related = Vec::new();
    for text in references {
        for name in pattern.find_iter(text).map(|m| m.as_str()) {
            if name == definition.name
                || BUILTIN_TYPES.contains(&name)
                || definition.generics.iter().any(|g| generic_name(g) == name)
                || !seen.insert(name.to_string())
            {
                continue;
            }
            if let Some(found) = result.lookup(name) {
                related.push(RelatedType {
                    name: found.name.clone(),
                    signature: found.signature.clone(),
                });
            }
        }
    }
    related
}

/// `T extends object = {}` -> `T`
fn generic_name(generic: &str) -> &str {
    generic
        .split(|c: char| c.is_whitespace() || c == '=')
        .next()
        .unwrap_or(generic)
}
