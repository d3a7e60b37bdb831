//! In-memory collaborators for tests
//!
//! Each fake records the calls it receives. A shared [`Barrier`] can be attached to
//! the type fetcher and the example extractor: the first call to each waits on it,
//! so a caller that awaits one before issuing the other never completes.

use crate::{ExampleExtractor, TypeContent, TypeFetcher, VersionRegistry};
use async_trait::async_trait;
use augments_core::error::{Error, Result};
use augments_core::CodeExample;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::Barrier;

fn record(log: &Mutex<Vec<String>>, entry: String) {
    log.lock().unwrap_or_else(PoisonError::into_inner).push(entry);
}

fn snapshot(log: &Mutex<Vec<String>>) -> Vec<String> {
    log.lock().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Waits on the barrier once, on the first call only
async fn rendezvous(barrier: &Mutex<Option<Arc<Barrier>>>) {
    let barrier = barrier.lock().unwrap_or_else(PoisonError::into_inner).take();
    if let Some(barrier) = barrier {
        barrier.wait().await;
    }
}

#[derive(Debug, Clone)]
struct PackageVersions {
    latest: String,
    published: Vec<String>,
}

/// Version registry answering from a fixed table
#[derive(Debug, Default)]
pub struct MockVersionRegistry {
    packages: HashMap<String, PackageVersions>,
    failing: HashSet<String>,
    requests: Mutex<Vec<String>>,
}

impl MockVersionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package; `latest` is also treated as published
    pub fn with_package(mut self, package: &str, latest: &str, published: &[&str]) -> Self {
        let mut versions: Vec<String> = published.iter().map(|v| v.to_string()).collect();
        versions.push(latest.to_string());
        self.packages.insert(
            package.to_string(),
            PackageVersions {
                latest: latest.to_string(),
                published: versions,
            },
        );
        self
    }

    /// Make every lookup for `package` fail
    pub fn with_failure(mut self, package: &str) -> Self {
        self.failing.insert(package.to_string());
        self
    }

    /// Packages looked up so far, in call order
    pub fn requests(&self) -> Vec<String> {
        snapshot(&self.requests)
    }
}

#[async_trait]
impl VersionRegistry for MockVersionRegistry {
    async fn resolve_version(&self, package: &str, requested: Option<&str>) -> Result<Option<String>> {
        record(&self.requests, package.to_string());
        if self.failing.contains(package) {
            return Err(Error::fetch(format!("registry unavailable for {package}")));
        }

        let Some(entry) = self.packages.get(package) else {
            return Ok(None);
        };
        Ok(match requested {
            None | Some("latest") => Some(entry.latest.clone()),
            Some(version) => entry
                .published
                .iter()
                .find(|v| v.as_str() == version.trim_start_matches('v'))
                .cloned(),
        })
    }
}

/// Type fetcher serving declaration text from memory
#[derive(Debug, Default)]
pub struct MockTypeFetcher {
    types: HashMap<String, String>,
    files: HashMap<(String, String), String>,
    barrel_paths: HashMap<String, Vec<String>>,
    failing: HashSet<String>,
    barrier: Mutex<Option<Arc<Barrier>>>,
    requests: Mutex<Vec<String>>,
}

impl MockTypeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Main declaration file for `package`
    pub fn with_types(mut self, package: &str, content: &str) -> Self {
        self.types.insert(package.to_string(), content.to_string());
        self
    }

    /// A sub-module declaration file reachable through `fetch_specific_type_file`
    pub fn with_file(mut self, package: &str, path: &str, content: &str) -> Self {
        self.files
            .insert((package.to_string(), path.to_string()), content.to_string());
        self
    }

    pub fn with_barrel_paths(mut self, package: &str, paths: &[&str]) -> Self {
        self.barrel_paths.insert(
            package.to_string(),
            paths.iter().map(|p| p.to_string()).collect(),
        );
        self
    }

    /// Make every fetch for `package` fail
    pub fn with_failure(mut self, package: &str) -> Self {
        self.failing.insert(package.to_string());
        self
    }

    pub fn with_barrier(self, barrier: Arc<Barrier>) -> Self {
        *self.barrier.lock().unwrap_or_else(PoisonError::into_inner) = Some(barrier);
        self
    }

    /// `package@version` for main files, `package@version/path` for specific files
    pub fn requests(&self) -> Vec<String> {
        snapshot(&self.requests)
    }

    fn content(package: &str, version: &str, path: &str, content: &str) -> TypeContent {
        TypeContent {
            content: content.to_string(),
            version: version.to_string(),
            file_path: path.to_string(),
            source: format!("memory://{package}@{version}/{path}"),
        }
    }
}

#[async_trait]
impl TypeFetcher for MockTypeFetcher {
    async fn fetch_types(&self, package: &str, version: &str) -> Result<Option<TypeContent>> {
        record(&self.requests, format!("{package}@{version}"));
        rendezvous(&self.barrier).await;

        if self.failing.contains(package) {
            return Err(Error::fetch(format!("types unavailable for {package}")));
        }
        Ok(self
            .types
            .get(package)
            .map(|content| Self::content(package, version, "index.d.ts", content)))
    }

    fn barrel_export_paths(&self, package: &str, _concept: &str) -> Vec<String> {
        self.barrel_paths.get(package).cloned().unwrap_or_default()
    }

    async fn fetch_specific_type_file(
        &self,
        package: &str,
        version: &str,
        path: &str,
    ) -> Result<Option<TypeContent>> {
        record(&self.requests, format!("{package}@{version}/{path}"));
        if self.failing.contains(package) {
            return Err(Error::fetch(format!("types unavailable for {package}")));
        }
        Ok(self
            .files
            .get(&(package.to_string(), path.to_string()))
            .map(|content| Self::content(package, version, path, content)))
    }
}

/// Example extractor returning canned examples per framework
#[derive(Debug, Default)]
pub struct MockExampleExtractor {
    examples: HashMap<String, Vec<CodeExample>>,
    failing: HashSet<String>,
    barrier: Mutex<Option<Arc<Barrier>>>,
    requests: Mutex<Vec<String>>,
}

impl MockExampleExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_examples(mut self, framework: &str, examples: Vec<CodeExample>) -> Self {
        self.examples.insert(framework.to_string(), examples);
        self
    }

    pub fn with_failure(mut self, framework: &str) -> Self {
        self.failing.insert(framework.to_string());
        self
    }

    pub fn with_barrier(self, barrier: Arc<Barrier>) -> Self {
        *self.barrier.lock().unwrap_or_else(PoisonError::into_inner) = Some(barrier);
        self
    }

    /// `framework/concept` per call
    pub fn requests(&self) -> Vec<String> {
        snapshot(&self.requests)
    }
}

#[async_trait]
impl ExampleExtractor for MockExampleExtractor {
    async fn examples_for_concept(&self, framework: &str, concept: &str) -> Result<Vec<CodeExample>> {
        record(&self.requests, format!("{framework}/{concept}"));
        rendezvous(&self.barrier).await;

        if self.failing.contains(framework) {
            return Err(Error::fetch(format!("examples unavailable for {framework}")));
        }
        Ok(self.examples.get(framework).cloned().unwrap_or_default())
    }
}

/// A code example with the given code, for building fixtures
pub fn example(code: &str, source: &str) -> CodeExample {
    CodeExample {
        code: code.to_string(),
        language: "tsx".to_string(),
        source: source.to_string(),
        concepts: Vec::new(),
        context: None,
        lines: Some(code.lines().count()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_registry_resolution() {
        let registry = MockVersionRegistry::new().with_package("react", "19.0.0", &["18.3.1"]);

        assert_eq!(
            registry.resolve_version("react", None).await.ok().flatten().as_deref(),
            Some("19.0.0")
        );
        assert_eq!(
            registry.resolve_version("react", Some("v18.3.1")).await.ok().flatten().as_deref(),
            Some("18.3.1")
        );
        assert_eq!(registry.resolve_version("react", Some("17")).await.ok().flatten(), None);
        assert_eq!(registry.resolve_version("vue", None).await.ok().flatten(), None);
        assert_eq!(registry.requests(), vec!["react", "react", "react", "vue"]);
    }

    #[tokio::test]
    async fn test_barrier_blocks_a_lone_caller() {
        let types = MockTypeFetcher::new()
            .with_types("react", "declare function useId(): string;")
            .with_barrier(Arc::new(Barrier::new(2)));

        let alone = tokio::time::timeout(
            Duration::from_millis(50),
            types.fetch_types("react", "19.0.0"),
        )
        .await;
        assert!(alone.is_err());
    }

    #[tokio::test]
    async fn test_barrier_releases_joined_callers() {
        let barrier = Arc::new(Barrier::new(2));
        let types = MockTypeFetcher::new()
            .with_types("react", "declare function useId(): string;")
            .with_barrier(Arc::clone(&barrier));
        let examples = MockExampleExtractor::new().with_barrier(barrier);

        let (fetched, found) = tokio::join!(
            types.fetch_types("react", "19.0.0"),
            examples.examples_for_concept("react", "useid")
        );
        assert!(fetched.ok().flatten().is_some());
        assert!(found.is_ok_and(|e| e.is_empty()));

        // The barrier is only used once
        assert!(types.fetch_types("react", "19.0.0").await.is_ok());
    }

    #[tokio::test]
    async fn test_failures_are_errors() {
        let types = MockTypeFetcher::new().with_failure("broken");
        assert!(types.fetch_types("broken", "1.0.0").await.is_err());
        assert!(types
            .fetch_specific_type_file("broken", "1.0.0", "dist/index.d.ts")
            .await
            .is_err());
    }
}
