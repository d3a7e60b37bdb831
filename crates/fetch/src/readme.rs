//! Example extraction from package READMEs

use crate::http::HttpClient;
use crate::ExampleExtractor;
use async_trait::async_trait;
use augments_core::error::Result;
use augments_core::{CodeExample, FrameworkCatalog};
use regex::Regex;
use std::sync::{Arc, LazyLock};
use tracing::debug;

/// README file names tried in order
const README_NAMES: &[&str] = &["README.md", "readme.md", "Readme.md"];

/// Examples kept per README before the orchestrator applies its own cap
const MAX_EXAMPLES_PER_README: usize = 10;

static FENCE_OPEN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s{0,3}(```+|~~~+)\s*([A-Za-z0-9_+#.-]*)").ok());

static HEADING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s{0,3}#{1,6}\s+(.+?)\s*#*\s*$").ok());

/// Fenced code blocks in `markdown` that mention every term of `concept`
///
/// Matching is case-insensitive. An empty concept matches every block.
pub fn extract_examples(markdown: &str, concept: &str, source: &str) -> Vec<CodeExample> {
    let (Some(fence_open), Some(heading)) = (FENCE_OPEN.as_ref(), HEADING.as_ref()) else {
        return Vec::new();
    };

    let terms: Vec<String> = concept
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();

    let mut examples = Vec::new();
    let mut current_heading: Option<String> = None;
    let mut lines = markdown.lines();

    while let Some(line) = lines.next() {
        if let Some(caps) = heading.captures(line) {
            current_heading = Some(caps[1].to_string());
            continue;
        }

        let Some(caps) = fence_open.captures(line) else {
            continue;
        };
        let fence = caps[1].to_string();
        let language = match &caps[2] {
            "" => "text".to_string(),
            lang => lang.to_lowercase(),
        };

        let mut body = Vec::new();
        for inner in lines.by_ref() {
            if inner.trim_start().starts_with(&fence) {
                break;
            }
            body.push(inner);
        }

        let code = body.join("\n");
        if code.trim().is_empty() {
            continue;
        }
        let lowered = code.to_lowercase();
        if !terms.iter().all(|term| lowered.contains(term.as_str())) {
            continue;
        }

        examples.push(CodeExample {
            lines: Some(body.len()),
            code,
            language,
            source: source.to_string(),
            concepts: terms.clone(),
            context: current_heading.clone(),
        });
        if examples.len() >= MAX_EXAMPLES_PER_README {
            break;
        }
    }

    examples
}

/// Finds usage examples in the README a package ships on the CDN
#[derive(Debug, Clone)]
pub struct ReadmeExampleExtractor {
    http: HttpClient,
    cdn_url: String,
    catalog: Arc<FrameworkCatalog>,
}

impl ReadmeExampleExtractor {
    pub fn new(http: HttpClient, cdn_url: &str, catalog: Arc<FrameworkCatalog>) -> Self {
        Self {
            http,
            cdn_url: cdn_url.trim_end_matches('/').to_string(),
            catalog,
        }
    }

    async fn readme(&self, package: &str) -> Result<Option<(String, String)>> {
        for name in README_NAMES {
            let url = format!("{}/{}@latest/{}", self.cdn_url, package, name);
            if let Some(body) = self.http.get_text(&url, "latest").await? {
                return Ok(Some((url, body.to_string())));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl ExampleExtractor for ReadmeExampleExtractor {
    async fn examples_for_concept(&self, framework: &str, concept: &str) -> Result<Vec<CodeExample>> {
        let package = self.catalog.primary_package(framework).unwrap_or(framework);

        let Some((url, markdown)) = self.readme(package).await? else {
            debug!(package = %package, "No README on CDN");
            return Ok(Vec::new());
        };

        let examples = extract_examples(&markdown, concept, &url);
        debug!(package = %package, concept = %concept, found = examples.len(), "Extracted README examples");
        Ok(examples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const README: &str = "# zustand\n\nSmall state management.\n\n## First create a store\n\n```jsx\nimport { create } from 'zustand'\n\nconst useBearStore = create((set) => ({\n  bears: 0,\n}))\n```\n\n## Then bind your components\n\n```\nfunction BearCounter() {\n  const bears = useBearStore((state) => state.bears)\n}\n```\n\n```bash\nnpm install zustand\n```\n";

    #[test]
    fn test_keeps_blocks_mentioning_concept() {
        let examples = extract_examples(README, "create", "https://unpkg.com/zustand@latest/README.md");
        assert_eq!(examples.len(), 1);

        let example = &examples[0];
        assert_eq!(example.language, "jsx");
        assert_eq!(example.context.as_deref(), Some("First create a store"));
        assert_eq!(example.lines, Some(5));
        assert_eq!(example.concepts, vec!["create"]);
        assert!(example.code.starts_with("import { create }"));
    }

    #[test]
    fn test_unlabelled_fence_is_text() {
        let examples = extract_examples(README, "BearCounter", "readme");
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].language, "text");
        assert_eq!(examples[0].context.as_deref(), Some("Then bind your components"));
    }

    #[test]
    fn test_all_terms_required() {
        assert!(extract_examples(README, "create persist", "readme").is_empty());
        assert_eq!(extract_examples(README, "usebearstore bears", "readme").len(), 2);
    }

    #[test]
    fn test_unterminated_fence_keeps_remaining_lines() {
        let examples = extract_examples("```ts\nconst x = useThing()\n", "usething", "readme");
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].code, "const x = useThing()");
    }
}
