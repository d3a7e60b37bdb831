//! Data shared between the fetch layer and the orchestrator

use serde::{Deserialize, Serialize};

/// A code snippet illustrating a concept
///
/// Produced by an example extractor and consumed read-only by the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExample {
    /// Snippet source text
    pub code: String,

    /// Fence language (e.g. `tsx`), `text` when unknown
    pub language: String,

    /// Where the snippet came from (usually a URL)
    pub source: String,

    /// Concepts the snippet illustrates
    #[serde(default)]
    pub concepts: Vec<String>,

    /// Surrounding prose, such as the nearest section heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Number of lines in `code`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<usize>,
}
