//! Declaration model produced by the parser

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum_macros::{AsRefStr, Display, EnumString};

/// Kind of a parsed declaration
///
/// Assigned once from the syntax node that produced the definition.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DefinitionKind {
    Function,
    Interface,
    Type,
    Class,
    Constant,
    Enum,
}

impl DefinitionKind {
    /// Kinds that describe a shape rather than a value
    pub fn is_type_like(self) -> bool {
        matches!(self, Self::Interface | Self::Type | Self::Class | Self::Enum)
    }
}

/// Kind of an interface, class or enum member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MemberKind {
    Property,
    Method,
    Accessor,
    Call,
    Construct,
    Index,
    EnumValue,
}

/// Position of a declaration in the source text (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub(crate) fn from_point(point: tree_sitter::Point) -> Self {
        Self {
            line: point.row + 1,
            column: point.column + 1,
        }
    }
}

/// A function or method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    /// Declared type as source text, `any` when absent
    pub type_annotation: String,
    pub optional: bool,
    pub rest: bool,
    pub default_value: Option<String>,
    /// Text of the matching `@param` tag
    pub description: Option<String>,
}

/// A member of an interface, class or enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub kind: MemberKind,
    /// Property type, method call signature or enum initializer (`auto` if none)
    pub type_annotation: String,
    pub optional: bool,
    pub readonly: bool,
}

/// One parsed declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDefinition {
    pub name: String,
    pub kind: DefinitionKind,
    /// Declaration source text with whitespace collapsed
    pub signature: String,
    pub description: Option<String>,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<String>,
    /// Text of the `@returns` tag
    pub returns_doc: Option<String>,
    pub generics: Vec<String>,
    pub members: Vec<Member>,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub deprecated: bool,
    pub deprecation_message: Option<String>,
    pub see_also: Vec<String>,
    pub examples: Vec<String>,
    pub location: SourceLocation,
}

impl TypeDefinition {
    pub(crate) fn new(
        name: String,
        kind: DefinitionKind,
        signature: String,
        location: SourceLocation,
    ) -> Self {
        Self {
            name,
            kind,
            signature,
            description: None,
            parameters: Vec::new(),
            return_type: None,
            returns_doc: None,
            generics: Vec::new(),
            members: Vec::new(),
            extends: Vec::new(),
            implements: Vec::new(),
            deprecated: false,
            deprecation_message: None,
            see_also: Vec::new(),
            examples: Vec::new(),
            location,
        }
    }

    /// Return type with the `@returns` text appended
    pub fn return_type_display(&self) -> Option<String> {
        match (&self.return_type, &self.returns_doc) {
            (Some(ty), Some(doc)) => Some(format!("{ty} - {doc}")),
            (Some(ty), None) => Some(ty.clone()),
            (None, Some(doc)) => Some(doc.clone()),
            (None, None) => None,
        }
    }
}

/// Everything parsed from one declaration text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParseResult {
    /// Definitions in declaration order
    pub definitions: Vec<TypeDefinition>,
    /// Interfaces, type aliases, classes and enums by name (first declaration wins)
    pub related_types: HashMap<String, TypeDefinition>,
    /// Recoverable problems met while parsing
    pub errors: Vec<String>,
}

impl ParseResult {
    /// First definition with this exact name, preferring type-like ones
    pub fn lookup(&self, name: &str) -> Option<&TypeDefinition> {
        self.related_types
            .get(name)
            .or_else(|| self.definitions.iter().find(|d| d.name == name))
    }
}

/// A type referenced by a resolved API, with its own signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedType {
    pub name: String,
    pub signature: String,
}

/// The resolved answer for one API concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSignature {
    pub name: String,
    pub kind: DefinitionKind,
    pub signature: String,
    pub description: Option<String>,
    pub parameters: Vec<Parameter>,
    /// Return type including any `@returns` text
    pub return_type: Option<String>,
    pub generics: Vec<String>,
    /// Every signature sharing the resolved name; only set for two or more
    pub overloads: Option<Vec<String>>,
    /// Types referenced directly by the declaration, in first-reference order
    pub related_types: Vec<RelatedType>,
    pub examples: Vec<String>,
    pub see_also: Vec<String>,
    pub deprecated: bool,
    pub deprecation_message: Option<String>,
}

/// A search result with its relevance score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub definition: TypeDefinition,
    pub score: i32,
}

/// Parse cache occupancy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub entries: usize,
    pub capacity: usize,
}
