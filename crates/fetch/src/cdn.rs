//! Type declaration fetching from an unpkg-style CDN

use crate::error::FetchError;
use crate::http::HttpClient;
use crate::{TypeContent, TypeFetcher};
use async_trait::async_trait;
use augments_core::error::Result;
use serde_json::Value;
use tracing::debug;

/// Entry point used when `package.json` names no declaration file
const DEFAULT_TYPES_ENTRY: &str = "index.d.ts";

/// Sub-module declaration files worth trying for any package
const GENERIC_BARREL_PATHS: &[&str] = &[
    "dist/index.d.ts",
    "dist/types/index.d.ts",
    "types/index.d.ts",
    "lib/index.d.ts",
];

/// Packages whose public API is spread over sub-module declaration files
const PACKAGE_BARREL_PATHS: &[(&str, &[&str])] = &[
    (
        "next",
        &[
            "dist/client/components/navigation.d.ts",
            "dist/client/link.d.ts",
            "dist/shared/lib/image-external.d.ts",
            "dist/shared/lib/dynamic.d.ts",
            "dist/server/web/spec-extension/request.d.ts",
            "dist/server/web/spec-extension/response.d.ts",
            "dist/server/request/cookies.d.ts",
            "dist/server/request/headers.d.ts",
        ],
    ),
    (
        "@tanstack/react-query",
        &["build/modern/index.d.ts", "build/legacy/index.d.ts"],
    ),
    ("@tanstack/query-core", &["build/modern/index.d.ts"]),
    ("vue", &["dist/vue.d.ts", "dist/vue.d.mts"]),
    ("@vue/runtime-core", &["dist/runtime-core.d.ts"]),
    ("@vue/reactivity", &["dist/reactivity.d.ts"]),
    (
        "@reduxjs/toolkit",
        &[
            "dist/index.d.ts",
            "dist/query/index.d.ts",
            "dist/query/react/index.d.ts",
        ],
    ),
    ("react-dom", &["client.d.ts", "server.d.ts"]),
    ("zod", &["lib/types.d.ts", "v3/types.d.ts"]),
    ("svelte", &["types/index.d.ts", "store.d.ts"]),
];

/// DefinitelyTyped package for `package` (`@scope/pkg` -> `@types/scope__pkg`)
pub fn definitely_typed_name(package: &str) -> String {
    if package.starts_with("@types/") {
        return package.to_string();
    }
    match package.strip_prefix('@').and_then(|p| p.split_once('/')) {
        Some((scope, name)) => format!("@types/{scope}__{name}"),
        None => format!("@types/{package}"),
    }
}

/// Ordered barrel paths for a package: package-specific first, then generic
///
/// Paths mentioning the concept move to the front, keeping relative order.
pub fn barrel_paths_for(package: &str, concept: &str) -> Vec<String> {
    let specific = PACKAGE_BARREL_PATHS
        .iter()
        .find(|(name, _)| *name == package)
        .map(|(_, paths)| *paths)
        .unwrap_or_default();

    let mut paths: Vec<String> = Vec::new();
    for path in specific.iter().chain(GENERIC_BARREL_PATHS) {
        if !paths.iter().any(|p| p == path) {
            paths.push((*path).to_string());
        }
    }

    let concept = concept.to_lowercase();
    if !concept.is_empty() {
        // stable partition
        let (mut matching, rest): (Vec<_>, Vec<_>) = paths
            .into_iter()
            .partition(|p| p.to_lowercase().contains(&concept));
        matching.extend(rest);
        paths = matching;
    }
    paths
}

/// Declaration entry named by a `package.json` document
pub(crate) fn types_entry(manifest: &Value) -> Option<String> {
    let exports_types = || {
        let root = manifest.get("exports")?.get(".")?;
        root.get("types")
            .or_else(|| root.get("import")?.get("types"))
            .or_else(|| root.get("require")?.get("types"))
    };

    manifest
        .get("types")
        .or_else(|| manifest.get("typings"))
        .or_else(exports_types)
        .and_then(Value::as_str)
        .map(|path| path.trim_start_matches("./").to_string())
        .filter(|path| !path.is_empty())
}

/// Fetches `.d.ts` files from `{cdn}/{package}@{version}/{path}`
#[derive(Debug, Clone)]
pub struct CdnTypeFetcher {
    http: HttpClient,
    cdn_url: String,
}

impl CdnTypeFetcher {
    pub fn new(http: HttpClient, cdn_url: &str) -> Self {
        Self {
            http,
            cdn_url: cdn_url.trim_end_matches('/').to_string(),
        }
    }

    fn file_url(&self, package: &str, version: &str, path: &str) -> String {
        format!(
            "{}/{}@{}/{}",
            self.cdn_url,
            package,
            version,
            path.trim_start_matches("./")
        )
    }

    async fn fetch_file(
        &self,
        package: &str,
        version: &str,
        path: &str,
    ) -> std::result::Result<Option<TypeContent>, FetchError> {
        let url = self.file_url(package, version, path);
        let Some(body) = self.http.get_text(&url, version).await? else {
            return Ok(None);
        };

        Ok(Some(TypeContent {
            content: body.to_string(),
            version: version.to_string(),
            file_path: path.trim_start_matches("./").to_string(),
            source: url,
        }))
    }
}

#[async_trait]
impl TypeFetcher for CdnTypeFetcher {
    async fn fetch_types(&self, package: &str, version: &str) -> Result<Option<TypeContent>> {
        let manifest_url = self.file_url(package, version, "package.json");
        let Some(manifest) = self.http.get_text(&manifest_url, version).await? else {
            debug!(package = %package, version = %version, "No package.json on CDN");
            return Ok(None);
        };

        let manifest: Value = serde_json::from_str(&manifest)
            .map_err(|e| FetchError::Decode(format!("{package}@{version} package.json: {e}")))?;

        let entry = types_entry(&manifest).unwrap_or_else(|| DEFAULT_TYPES_ENTRY.to_string());
        debug!(package = %package, version = %version, entry = %entry, "Fetching declarations");

        Ok(self.fetch_file(package, version, &entry).await?)
    }

    fn barrel_export_paths(&self, package: &str, concept: &str) -> Vec<String> {
        barrel_paths_for(package, concept)
    }

    async fn fetch_specific_type_file(
        &self,
        package: &str,
        version: &str,
        path: &str,
    ) -> Result<Option<TypeContent>> {
        Ok(self.fetch_file(package, version, path).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_definitely_typed_name() {
        assert_eq!(definitely_typed_name("react"), "@types/react");
        assert_eq!(definitely_typed_name("@babel/core"), "@types/babel__core");
        assert_eq!(definitely_typed_name("@types/node"), "@types/node");
    }

    #[test]
    fn test_types_entry_precedence() {
        assert_eq!(
            types_entry(&json!({"types": "./dist/index.d.ts", "typings": "x.d.ts"})).as_deref(),
            Some("dist/index.d.ts")
        );
        assert_eq!(
            types_entry(&json!({"typings": "lib/zod.d.ts"})).as_deref(),
            Some("lib/zod.d.ts")
        );
        assert_eq!(
            types_entry(&json!({"exports": {".": {"types": "./build/index.d.ts"}}})).as_deref(),
            Some("build/index.d.ts")
        );
        assert_eq!(
            types_entry(&json!({"exports": {".": {"import": {"types": "./esm/index.d.mts"}}}}))
                .as_deref(),
            Some("esm/index.d.mts")
        );
        assert_eq!(types_entry(&json!({"main": "index.js"})), None);
    }

    #[test]
    fn test_generic_barrel_paths_for_unknown_package() {
        assert_eq!(
            barrel_paths_for("left-pad", ""),
            vec![
                "dist/index.d.ts",
                "dist/types/index.d.ts",
                "types/index.d.ts",
                "lib/index.d.ts"
            ]
        );
    }

    #[test]
    fn test_concept_paths_move_first() {
        let paths = barrel_paths_for("next", "cookies");
        assert_eq!(paths[0], "dist/server/request/cookies.d.ts");
        assert_eq!(paths[1], "dist/client/components/navigation.d.ts");
        assert!(paths.contains(&"lib/index.d.ts".to_string()));
    }

    #[test]
    fn test_barrel_paths_are_deduplicated() {
        let paths = barrel_paths_for("@reduxjs/toolkit", "");
        let count = paths.iter().filter(|p| *p == "dist/index.d.ts").count();
        assert_eq!(count, 1);
        assert_eq!(paths[0], "dist/index.d.ts");
    }
}
