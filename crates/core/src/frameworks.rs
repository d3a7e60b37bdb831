//! Framework catalog
//!
//! Maps logical framework identities (e.g. `react`) to the npm packages that ship
//! their type declarations, the aliases users type for them, and API identifiers
//! that imply them. The built-in table can be extended from configuration.

use serde::{Deserialize, Serialize};

/// One known framework
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkInfo {
    /// Lowercase framework key (e.g. `tanstack-query`)
    pub key: String,

    /// npm packages for this framework; the first one is the primary package
    pub packages: Vec<String>,

    /// Alternative names, single- or multi-word (e.g. `nextjs`, `react query`)
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Lowercase API identifiers that imply this framework (e.g. `useeffect`)
    #[serde(default)]
    pub api_patterns: Vec<String>,
}

impl FrameworkInfo {
    fn builtin(key: &str, packages: &[&str], aliases: &[&str], api_patterns: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            packages: packages.iter().map(|p| p.to_string()).collect(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            api_patterns: api_patterns.iter().map(|p| p.to_string()).collect(),
        }
    }

    /// The package whose declarations describe this framework
    pub fn primary_package(&self) -> &str {
        self.packages.first().map(String::as_str).unwrap_or(&self.key)
    }
}

/// Ordered collection of known frameworks
#[derive(Debug, Clone)]
pub struct FrameworkCatalog {
    frameworks: Vec<FrameworkInfo>,
}

impl Default for FrameworkCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FrameworkCatalog {
    /// Create a catalog from explicit entries (keys and patterns are lowercased)
    pub fn new(frameworks: Vec<FrameworkInfo>) -> Self {
        let frameworks = frameworks
            .into_iter()
            .map(|mut f| {
                f.key = f.key.to_lowercase();
                f.aliases = f.aliases.iter().map(|a| a.to_lowercase()).collect();
                f.api_patterns = f.api_patterns.iter().map(|p| p.to_lowercase()).collect();
                f
            })
            .collect();
        Self { frameworks }
    }

    /// The built-in catalog of JavaScript/TypeScript frameworks
    pub fn builtin() -> Self {
        let b = FrameworkInfo::builtin;
        Self::new(vec![
            b(
                "react",
                &["react", "react-dom"],
                &["reactjs", "react.js"],
                &[
                    "usestate",
                    "useeffect",
                    "usecontext",
                    "usereducer",
                    "usecallback",
                    "usememo",
                    "useref",
                    "uselayouteffect",
                    "useid",
                    "usetransition",
                    "usedeferredvalue",
                    "usesyncexternalstore",
                    "useimperativehandle",
                    "useoptimistic",
                    "useactionstate",
                    "forwardref",
                    "createcontext",
                    "suspense",
                ],
            ),
            b(
                "next",
                &["next"],
                &["nextjs", "next.js"],
                &[
                    "getserversideprops",
                    "getstaticprops",
                    "getstaticpaths",
                    "userouter",
                    "usepathname",
                    "usesearchparams",
                    "nextresponse",
                    "nextrequest",
                    "generatemetadata",
                    "revalidatepath",
                    "revalidatetag",
                    "redirect",
                ],
            ),
            b(
                "vue",
                &["vue"],
                &["vuejs", "vue.js", "vue3"],
                &[
                    "defineprops",
                    "defineemits",
                    "definecomponent",
                    "onmounted",
                    "onunmounted",
                    "watcheffect",
                    "reactive",
                    "computed",
                    "userouter",
                    "nexttick",
                ],
            ),
            b(
                "svelte",
                &["svelte"],
                &["sveltejs"],
                &["onmount", "createeventdispatcher", "writable", "readable"],
            ),
            b(
                "angular",
                &["@angular/core"],
                &["ng", "angular2"],
                &["ngoninit", "ngondestroy", "injectable", "computed", "signal"],
            ),
            b(
                "solid",
                &["solid-js"],
                &["solidjs", "solid.js"],
                &[
                    "createsignal",
                    "createeffect",
                    "creatememo",
                    "createresource",
                    "createstore",
                ],
            ),
            b("preact", &["preact"], &[], &["signal"]),
            b(
                "express",
                &["express", "@types/express"],
                &["expressjs", "express.js"],
                &["requesthandler", "nextfunction", "urlencoded"],
            ),
            b(
                "fastify",
                &["fastify"],
                &[],
                &["fastifyinstance", "fastifyrequest", "fastifyreply"],
            ),
            b("hono", &["hono"], &["honojs"], &["honorequest"]),
            b(
                "zod",
                &["zod"],
                &[],
                &["safeparse", "zodtype", "zodschema", "zodobject"],
            ),
            b(
                "prisma",
                &["@prisma/client", "prisma"],
                &[],
                &["prismaclient", "findunique", "findmany", "findfirst"],
            ),
            b(
                "drizzle",
                &["drizzle-orm"],
                &["drizzle orm"],
                &["pgtable", "sqlitetable", "mysqltable"],
            ),
            b(
                "trpc",
                &["@trpc/server", "@trpc/client"],
                &[],
                &[
                    "createtrpcrouter",
                    "inittrpc",
                    "publicprocedure",
                    "usequery",
                    "usemutation",
                ],
            ),
            b(
                "tanstack-query",
                &["@tanstack/react-query", "react-query", "@tanstack/query-core"],
                &["react query", "tanstack query"],
                &[
                    "usequery",
                    "usemutation",
                    "queryclient",
                    "useinfinitequery",
                    "usequeryclient",
                ],
            ),
            b(
                "redux",
                &["@reduxjs/toolkit", "redux"],
                &["redux toolkit", "rtk"],
                &["createslice", "configurestore", "createasyncthunk", "createstore"],
            ),
            b("zustand", &["zustand"], &[], &["useshallow"]),
            b(
                "jotai",
                &["jotai"],
                &[],
                &["atomwithstorage", "useatom", "useatomvalue", "usesetatom"],
            ),
            b(
                "axios",
                &["axios"],
                &[],
                &["axiosinstance", "axiosrequestconfig", "axiosresponse", "axioserror"],
            ),
            b("mongoose", &["mongoose"], &[], &["objectid"]),
            b(
                "vitest",
                &["vitest"],
                &[],
                &["describe", "beforeeach", "tohavebeencalled"],
            ),
            b(
                "jest",
                &["@jest/globals", "jest"],
                &[],
                &["describe", "beforeeach", "tohavebeencalled"],
            ),
            b(
                "playwright",
                &["@playwright/test"],
                &[],
                &["getbyrole", "tohavescreenshot"],
            ),
            b(
                "remix",
                &["@remix-run/react", "@remix-run/node"],
                &["remix run"],
                &["useloaderdata", "useactiondata", "redirect"],
            ),
            b("astro", &["astro"], &[], &["getstaticpaths"]),
        ])
    }

    /// Built-in catalog with configured entries merged in
    ///
    /// An entry whose key already exists replaces the built-in one; new keys are
    /// appended in configuration order.
    pub fn with_extra(mut self, extra: &[FrameworkInfo]) -> Self {
        for entry in Self::new(extra.to_vec()).frameworks {
            match self.frameworks.iter_mut().find(|f| f.key == entry.key) {
                Some(existing) => {
                    tracing::debug!(framework = %entry.key, "Overriding built-in framework entry");
                    *existing = entry;
                }
                None => self.frameworks.push(entry),
            }
        }
        self
    }

    /// Catalog built from the configuration's extra entries
    pub fn from_config(config: &crate::Config) -> Self {
        Self::builtin().with_extra(&config.frameworks)
    }

    /// All frameworks, in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &FrameworkInfo> {
        self.frameworks.iter()
    }

    /// Look up a framework by key (case-insensitive)
    pub fn get(&self, key: &str) -> Option<&FrameworkInfo> {
        let key = key.to_lowercase();
        self.frameworks.iter().find(|f| f.key == key)
    }

    /// Find the framework owning a package name (case-insensitive)
    pub fn framework_for_package(&self, package: &str) -> Option<&FrameworkInfo> {
        let package = package.to_lowercase();
        self.frameworks
            .iter()
            .find(|f| f.packages.iter().any(|p| p.to_lowercase() == package))
    }

    /// Primary package for a framework key
    pub fn primary_package(&self, key: &str) -> Option<&str> {
        self.get(key).map(FrameworkInfo::primary_package)
    }

    /// Keys of every framework whose API patterns contain `api` (lowercase)
    pub fn frameworks_for_api(&self, api: &str) -> Vec<&str> {
        self.frameworks
            .iter()
            .filter(|f| f.api_patterns.iter().any(|p| p == api))
            .map(|f| f.key.as_str())
            .collect()
    }

    /// Number of frameworks in the catalog
    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_lookup_by_key_and_package() {
        let catalog = FrameworkCatalog::builtin();
        assert_eq!(catalog.primary_package("react"), Some("react"));
        assert_eq!(
            catalog.primary_package("tanstack-query"),
            Some("@tanstack/react-query")
        );
        assert_eq!(
            catalog
                .framework_for_package("@TanStack/React-Query")
                .map(|f| f.key.as_str()),
            Some("tanstack-query")
        );
        assert!(catalog.get("not-a-framework").is_none());
    }

    #[test]
    fn test_api_pattern_ambiguity_is_visible() {
        let catalog = FrameworkCatalog::builtin();
        assert_eq!(catalog.frameworks_for_api("useeffect"), vec!["react"]);
        let owners = catalog.frameworks_for_api("usequery");
        assert!(owners.len() > 1, "usequery should be shared: {owners:?}");
    }

    #[test]
    fn test_with_extra_replaces_and_appends() {
        let extra = vec![
            FrameworkInfo {
                key: "React".to_string(),
                packages: vec!["@types/react".to_string()],
                aliases: vec![],
                api_patterns: vec![],
            },
            FrameworkInfo {
                key: "effect".to_string(),
                packages: vec!["effect".to_string()],
                aliases: vec!["effect-ts".to_string()],
                api_patterns: vec!["Effect.gen".to_string()],
            },
        ];
        let before = FrameworkCatalog::builtin().len();
        let catalog = FrameworkCatalog::builtin().with_extra(&extra);

        assert_eq!(catalog.len(), before + 1);
        assert_eq!(catalog.primary_package("react"), Some("@types/react"));
        assert_eq!(catalog.frameworks_for_api("effect.gen"), vec!["effect"]);
    }
}
