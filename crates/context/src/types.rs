//! Request and response types for the two operations

use augments_core::CodeExample;
use augments_declarations::{ApiSignature, DefinitionKind, SearchHit};
use serde::{Deserialize, Serialize};

/// Request for [`crate::ApiContextService::get_api_context`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContextRequest {
    pub query: String,
    /// Replaces the framework detected in the query
    #[serde(default)]
    pub framework: Option<String>,
    /// Replaces the version detected in the query
    #[serde(default)]
    pub version: Option<String>,
    /// Defaults to `true`
    #[serde(default)]
    pub include_examples: Option<bool>,
    #[serde(default)]
    pub max_examples: Option<usize>,
}

impl ApiContextRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_framework(mut self, framework: impl Into<String>) -> Self {
        self.framework = Some(framework.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_examples(mut self, include: bool, max: Option<usize>) -> Self {
        self.include_examples = Some(include);
        self.max_examples = max;
        self
    }
}

/// Everything known about one API after a `get_api_context` call
///
/// `api` is `None` whenever the signature could not be found; `notes` then says why.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiContextResponse {
    pub query: String,
    pub framework: Option<String>,
    pub package_name: Option<String>,
    pub version: Option<String>,
    pub concept: String,
    pub api: Option<ApiSignature>,
    pub examples: Vec<CodeExample>,
    /// Names of similar APIs when the concept had no direct match
    pub related_apis: Vec<String>,
    pub notes: Vec<String>,
    /// URL of the declaration file the signature came from
    pub types_source: Option<String>,
    pub confidence: f64,
}

impl ApiContextResponse {
    pub(crate) fn new(query: &str, concept: &str, confidence: f64) -> Self {
        Self {
            query: query.to_string(),
            concept: concept.to_string(),
            confidence,
            ..Self::default()
        }
    }

    pub(crate) fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }
}

/// Request for [`crate::ApiContextService::search_apis`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchApisRequest {
    pub query: String,
    /// Framework keys or package names; the configured defaults when absent
    #[serde(default)]
    pub frameworks: Option<Vec<String>>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl SearchApisRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn with_frameworks<I, S>(mut self, frameworks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frameworks = Some(frameworks.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One declaration found by `search_apis`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSearchResult {
    pub framework: String,
    pub package_name: String,
    pub version: String,
    pub name: String,
    pub kind: DefinitionKind,
    pub signature: String,
    pub description: Option<String>,
    pub deprecated: bool,
    pub score: i32,
}

impl ApiSearchResult {
    pub(crate) fn from_hit(framework: &str, package: &str, version: &str, hit: SearchHit) -> Self {
        let SearchHit { definition, score } = hit;
        Self {
            framework: framework.to_string(),
            package_name: package.to_string(),
            version: version.to_string(),
            name: definition.name,
            kind: definition.kind,
            signature: definition.signature,
            description: definition.description,
            deprecated: definition.deprecated,
            score,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchApisResponse {
    pub query: String,
    /// Sorted by score, highest first
    pub results: Vec<ApiSearchResult>,
    /// Frameworks whose pipeline completed, in request order
    pub frameworks_searched: Vec<String>,
    /// Matches across all frameworks before the limit was applied
    pub total_found: usize,
}
