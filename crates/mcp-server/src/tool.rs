//! MCP tool definitions
//!
//! Input schemas for the `get_api_context` and `search_apis` tools.

use augments_context::{ApiContextRequest, SearchApisRequest};
use schemars::JsonSchema;
use serde::Deserialize;

/// Queries longer than this are rejected before parsing
pub(crate) const MAX_QUERY_LENGTH: usize = 1000;

/// Request schema for the get_api_context MCP tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetApiContextInput {
    /// Natural language query naming a framework and an API.
    /// Examples: "react useEffect cleanup", "zod object schema", "next v15 cookies"
    #[schemars(description = "Query naming a framework and an API, e.g. \"react useEffect cleanup\"")]
    pub query: String,

    #[schemars(description = "Framework key or npm package name; overrides detection from the query")]
    pub framework: Option<String>,

    #[schemars(description = "Package version or dist-tag; overrides a version in the query")]
    pub version: Option<String>,

    #[schemars(description = "Include usage examples (default true)")]
    pub include_examples: Option<bool>,

    #[schemars(description = "Maximum number of usage examples (default 2)")]
    pub max_examples: Option<usize>,
}

impl From<GetApiContextInput> for ApiContextRequest {
    fn from(input: GetApiContextInput) -> Self {
        Self {
            query: input.query,
            framework: input.framework,
            version: input.version,
            include_examples: input.include_examples,
            max_examples: input.max_examples,
        }
    }
}

/// Request schema for the search_apis MCP tool
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchApisInput {
    /// Words that must all appear in an API's name or signature
    #[schemars(description = "Search terms; every term must appear in the API name or signature")]
    pub query: String,

    #[schemars(
        description = "Framework keys or npm package names to search. Omit to search the configured defaults."
    )]
    pub frameworks: Option<Vec<String>>,

    #[schemars(description = "Maximum number of results (default 10)")]
    pub limit: Option<usize>,
}

impl From<SearchApisInput> for SearchApisRequest {
    fn from(input: SearchApisInput) -> Self {
        Self {
            query: input.query,
            frameworks: input.frameworks,
            limit: input.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_input_deserialization() {
        let json = r#"{
            "query": "react useEffect cleanup",
            "framework": "react",
            "version": "19",
            "include_examples": false,
            "max_examples": 1
        }"#;

        let input: GetApiContextInput = serde_json::from_str(json).unwrap();
        let request = ApiContextRequest::from(input);
        assert_eq!(request.query, "react useEffect cleanup");
        assert_eq!(request.framework.as_deref(), Some("react"));
        assert_eq!(request.version.as_deref(), Some("19"));
        assert_eq!(request.include_examples, Some(false));
        assert_eq!(request.max_examples, Some(1));
    }

    #[test]
    fn test_minimal_inputs() {
        let input: GetApiContextInput = serde_json::from_str(r#"{"query": "zod object"}"#).unwrap();
        assert!(input.framework.is_none());
        assert!(input.include_examples.is_none());

        let input: SearchApisInput = serde_json::from_str(r#"{"query": "use"}"#).unwrap();
        assert!(input.frameworks.is_none());
        assert!(input.limit.is_none());
    }

    #[test]
    fn test_search_input_frameworks() {
        let json = r#"{"query": "router", "frameworks": ["express", "hono"], "limit": 5}"#;
        let request = SearchApisRequest::from(serde_json::from_str::<SearchApisInput>(json).unwrap());
        assert_eq!(
            request.frameworks,
            Some(vec!["express".to_string(), "hono".to_string()])
        );
        assert_eq!(request.limit, Some(5));
    }
}
