//! npm registry version resolution

use crate::error::FetchError;
use crate::http::HttpClient;
use crate::VersionRegistry;
use async_trait::async_trait;
use augments_core::error::Result;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Abbreviated package metadata, enough for version resolution
const ABBREVIATED_METADATA: &str = "application/vnd.npm.install-v1+json";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PackageMetadata {
    #[serde(rename = "dist-tags", default)]
    dist_tags: HashMap<String, String>,
    #[serde(default)]
    versions: HashMap<String, IgnoredAny>,
}

impl PackageMetadata {
    #[cfg(test)]
    pub(crate) fn new(dist_tags: &[(&str, &str)], versions: &[&str]) -> Self {
        Self {
            dist_tags: dist_tags
                .iter()
                .map(|(tag, v)| (tag.to_string(), v.to_string()))
                .collect(),
            versions: versions.iter().map(|v| (v.to_string(), IgnoredAny)).collect(),
        }
    }

    /// Resolve a requested version (or dist-tag) against the published versions
    ///
    /// - no request: the `latest` dist-tag
    /// - a dist-tag name: the version it points at
    /// - a published version: itself
    /// - a partial version (`18`, `18.2`): the highest stable version with that prefix
    pub(crate) fn resolve(&self, requested: Option<&str>) -> Option<String> {
        let requested = requested
            .map(|r| r.trim().trim_start_matches(['v', 'V']))
            .filter(|r| !r.is_empty());

        let Some(requested) = requested else {
            return self.dist_tags.get("latest").cloned();
        };

        if let Some(tagged) = self.dist_tags.get(requested) {
            return Some(tagged.clone());
        }
        if self.versions.contains_key(requested) {
            return Some(requested.to_string());
        }

        let prefix = format!("{requested}.");
        self.versions
            .keys()
            .filter(|v| !v.contains('-') && v.starts_with(&prefix))
            .max_by(|a, b| compare_versions(a, b))
            .cloned()
    }
}

/// Compare dotted numeric versions component by component
fn compare_versions(a: &str, b: &str) -> Ordering {
    let parse = |v: &str| -> Vec<u64> {
        v.split(['.', '-'])
            .map_while(|part| part.parse::<u64>().ok())
            .collect()
    };
    parse(a).cmp(&parse(b))
}

/// Registry path segment for a package (`@scope/pkg` -> `@scope%2fpkg`)
fn encode_package(package: &str) -> String {
    package.replace('/', "%2f")
}

/// Resolves versions against an npm-compatible registry
#[derive(Debug, Clone)]
pub struct NpmVersionRegistry {
    http: HttpClient,
    registry_url: String,
}

impl NpmVersionRegistry {
    pub fn new(http: HttpClient, registry_url: &str) -> Self {
        Self {
            http,
            registry_url: registry_url.trim_end_matches('/').to_string(),
        }
    }

    async fn metadata(
        &self,
        package: &str,
        requested: Option<&str>,
    ) -> std::result::Result<Option<PackageMetadata>, FetchError> {
        let url = format!("{}/{}", self.registry_url, encode_package(package));
        let Some(body) = self
            .http
            .get_with_accept(&url, requested.unwrap_or("latest"), Some(ABBREVIATED_METADATA))
            .await?
        else {
            return Ok(None);
        };

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| FetchError::Decode(format!("{package} metadata: {e}")))
    }
}

#[async_trait]
impl VersionRegistry for NpmVersionRegistry {
    async fn resolve_version(&self, package: &str, requested: Option<&str>) -> Result<Option<String>> {
        let Some(metadata) = self.metadata(package, requested).await? else {
            debug!(package = %package, "Package not in registry");
            return Ok(None);
        };

        let resolved = metadata.resolve(requested);
        debug!(package = %package, requested = ?requested, resolved = ?resolved, "Resolved version");
        Ok(resolved)
    }
}
