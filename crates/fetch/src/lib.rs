//! Fetch layer: version resolution, declaration files and usage examples
//!
//! The orchestrator talks to three collaborators through the traits defined here:
//!
//! - [`VersionRegistry`] resolves a requested version against the package registry
//! - [`TypeFetcher`] downloads `.d.ts` content for a resolved version
//! - [`ExampleExtractor`] finds usage examples for a concept
//!
//! The HTTP implementations share one [`HttpClient`], whose response cache keeps
//! answers for a TTL chosen from the version string. In-memory fakes live in
//! [`mock`] behind the `test-support` feature.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod cache;
mod cdn;
mod error;
mod http;
mod npm;
mod readme;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use cache::ttl_for_version;
pub use cdn::{barrel_paths_for, definitely_typed_name, CdnTypeFetcher};
pub use error::FetchError;
pub use http::HttpClient;
pub use npm::NpmVersionRegistry;
pub use readme::{extract_examples, ReadmeExampleExtractor};

use async_trait::async_trait;
use augments_core::error::Result;
use augments_core::{CodeExample, Config, FrameworkCatalog};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Declaration text fetched for one package version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeContent {
    pub content: String,
    pub version: String,
    /// Path of the declaration file inside the package
    pub file_path: String,
    /// URL the content was fetched from
    pub source: String,
}

/// Resolves requested versions against a package registry
#[async_trait]
pub trait VersionRegistry: Send + Sync {
    /// `None` when the package or version cannot be resolved
    async fn resolve_version(&self, package: &str, requested: Option<&str>) -> Result<Option<String>>;
}

/// Fetches type declaration files
#[async_trait]
pub trait TypeFetcher: Send + Sync {
    /// The package's main declaration file, `None` when it bundles no types
    async fn fetch_types(&self, package: &str, version: &str) -> Result<Option<TypeContent>>;

    /// Sub-module paths to retry when the main file lacks a concept
    fn barrel_export_paths(&self, package: &str, concept: &str) -> Vec<String>;

    async fn fetch_specific_type_file(
        &self,
        package: &str,
        version: &str,
        path: &str,
    ) -> Result<Option<TypeContent>>;
}

/// Finds usage examples for a concept
#[async_trait]
pub trait ExampleExtractor: Send + Sync {
    async fn examples_for_concept(&self, framework: &str, concept: &str) -> Result<Vec<CodeExample>>;
}

/// The three collaborators the orchestrator depends on
#[derive(Clone)]
pub struct Collaborators {
    pub registry: Arc<dyn VersionRegistry>,
    pub types: Arc<dyn TypeFetcher>,
    pub examples: Arc<dyn ExampleExtractor>,
}

impl Collaborators {
    /// HTTP-backed collaborators sharing one client and response cache
    pub fn http(config: &Config, catalog: Arc<FrameworkCatalog>) -> Result<Self> {
        let http = HttpClient::new(&config.fetch)?;
        Ok(Self {
            registry: Arc::new(NpmVersionRegistry::new(http.clone(), &config.fetch.registry_url)),
            types: Arc::new(CdnTypeFetcher::new(http.clone(), &config.fetch.cdn_url)),
            examples: Arc::new(ReadmeExampleExtractor::new(http, &config.fetch.cdn_url, catalog)),
        })
    }
}
