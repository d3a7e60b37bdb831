//! `get_api_context`: query -> framework, version, signature and examples

use crate::types::{ApiContextRequest, ApiContextResponse};
use augments_core::error::Result;
use augments_core::{CodeExample, Config, ContextConfig, FrameworkCatalog, SearchConfig};
use augments_declarations::{ApiSignature, DeclarationParser};
use augments_fetch::{
    definitely_typed_name, Collaborators, ExampleExtractor, TypeContent, TypeFetcher,
    VersionRegistry,
};
use augments_query::QueryParser;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Declaration text together with the package that actually provided it
#[derive(Debug, Clone)]
pub(crate) struct ResolvedTypes {
    pub content: TypeContent,
    pub package: String,
    pub definitely_typed: bool,
}

/// Resolves developer queries into API signatures and searches declarations
///
/// Cheap to clone; parsers and collaborators are shared.
#[derive(Clone)]
pub struct ApiContextService {
    pub(crate) query_parser: Arc<QueryParser>,
    pub(crate) declarations: Arc<DeclarationParser>,
    pub(crate) registry: Arc<dyn VersionRegistry>,
    pub(crate) types: Arc<dyn TypeFetcher>,
    pub(crate) examples: Arc<dyn ExampleExtractor>,
    pub(crate) context: ContextConfig,
    pub(crate) search: SearchConfig,
}

impl ApiContextService {
    pub fn new(config: &Config, collaborators: Collaborators) -> Self {
        Self::with_catalog(config, Arc::new(FrameworkCatalog::from_config(config)), collaborators)
    }

    /// Build around a catalog that is also shared with the collaborators
    pub fn with_catalog(
        config: &Config,
        catalog: Arc<FrameworkCatalog>,
        collaborators: Collaborators,
    ) -> Self {
        Self::with_parsers(
            config,
            collaborators,
            Arc::new(QueryParser::new(catalog)),
            Arc::new(DeclarationParser::from_config(&config.parser)),
        )
    }

    /// Build around parser instances owned elsewhere
    pub fn with_parsers(
        config: &Config,
        collaborators: Collaborators,
        query_parser: Arc<QueryParser>,
        declarations: Arc<DeclarationParser>,
    ) -> Self {
        let Collaborators {
            registry,
            types,
            examples,
        } = collaborators;
        Self {
            query_parser,
            declarations,
            registry,
            types,
            examples,
            context: config.context.clone(),
            search: config.search.clone(),
        }
    }

    pub fn query_parser(&self) -> &QueryParser {
        &self.query_parser
    }

    pub fn declarations(&self) -> &DeclarationParser {
        &self.declarations
    }

    /// Resolve a query to an API signature, examples and notes
    ///
    /// Never fails. Anything that goes wrong along the way is reported in
    /// [`ApiContextResponse::notes`] and leaves the remaining fields empty.
    pub async fn get_api_context(&self, request: ApiContextRequest) -> ApiContextResponse {
        let parsed = self.query_parser.parse(&request.query);
        let concept = parsed.concept.clone();
        let mut response = ApiContextResponse::new(&request.query, &concept, parsed.confidence);

        let override_framework = request
            .framework
            .as_deref()
            .map(str::trim)
            .filter(|f| !f.is_empty());
        let target = match override_framework {
            Some(framework) => Some(self.lookup_framework(framework)),
            None => parsed.framework.clone().zip(parsed.package_name.clone()),
        };

        let Some((framework, package)) = target else {
            response.note("Could not identify a framework or package in the query.");
            response.note(
                "Name the framework in the query (e.g. \"react useEffect\") or pass it explicitly.",
            );
            return response;
        };
        response.framework = Some(framework.clone());
        response.package_name = Some(package.clone());

        if concept.is_empty() {
            response.note(format!(
                "No API name found in the query; ask about a specific {framework} API."
            ));
            return response;
        }

        let requested = request
            .version
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .or_else(|| parsed.version.clone());

        let version = match self
            .registry
            .resolve_version(&package, requested.as_deref())
            .await
        {
            Ok(Some(version)) => version,
            Ok(None) => {
                response.note(format!(
                    "Could not resolve version {} of {package}.",
                    requested.as_deref().unwrap_or("latest")
                ));
                return response;
            }
            Err(e) => {
                warn!(package = %package, error = %e, "Version lookup failed");
                response.note(format!("Version lookup for {package} failed: {e}"));
                return response;
            }
        };
        response.version = Some(version.clone());

        info!(
            framework = %framework,
            package = %package,
            version = %version,
            concept = %concept,
            "Resolving API context"
        );

        let include_examples = request.include_examples.unwrap_or(true);
        let max_examples = request
            .max_examples
            .unwrap_or(self.context.default_max_examples);

        // Both requests are in flight before either is awaited
        let (types, examples) = tokio::join!(
            self.resolve_types(&package, &version),
            self.find_examples(include_examples, &framework, &concept),
        );

        match types {
            Ok(Some(types)) => self.attach_signature(&mut response, &types, &concept, &version).await,
            Ok(None) => response.note(format!(
                "No type declarations available for {package}@{version}."
            )),
            Err(e) => {
                warn!(package = %package, error = %e, "Type fetch failed");
                response.note(format!("Fetching type declarations for {package} failed: {e}"));
            }
        }

        match examples {
            Ok(mut examples) => {
                examples.truncate(max_examples);
                response.examples = examples;
            }
            Err(e) => {
                warn!(framework = %framework, error = %e, "Example lookup failed");
                response.note(format!("Example lookup failed: {e}"));
            }
        }

        response
    }

    /// Framework key and package for an explicit framework name
    fn lookup_framework(&self, name: &str) -> (String, String) {
        let catalog = self.query_parser.catalog();
        let key = name.to_lowercase();
        if let Some(package) = catalog.primary_package(&key) {
            return (key, package.to_string());
        }
        if let Some(framework) = catalog.framework_for_package(name) {
            return (framework.key.clone(), name.to_string());
        }
        (name.to_string(), name.to_string())
    }

    /// Bundled declarations, else the DefinitelyTyped package's
    pub(crate) async fn resolve_types(
        &self,
        package: &str,
        version: &str,
    ) -> Result<Option<ResolvedTypes>> {
        if let Some(content) = self.types.fetch_types(package, version).await? {
            return Ok(Some(ResolvedTypes {
                content,
                package: package.to_string(),
                definitely_typed: false,
            }));
        }

        let fallback = definitely_typed_name(package);
        if fallback == package {
            return Ok(None);
        }
        debug!(package = %package, fallback = %fallback, "No bundled types, trying DefinitelyTyped");

        let Some(fallback_version) = self.registry.resolve_version(&fallback, None).await? else {
            return Ok(None);
        };
        Ok(self
            .types
            .fetch_types(&fallback, &fallback_version)
            .await?
            .map(|content| ResolvedTypes {
                content,
                package: fallback,
                definitely_typed: true,
            }))
    }

    async fn find_examples(
        &self,
        include: bool,
        framework: &str,
        concept: &str,
    ) -> Result<Vec<CodeExample>> {
        if !include {
            return Ok(Vec::new());
        }
        self.examples.examples_for_concept(framework, concept).await
    }

    /// Extract the signature from the main file, then from barrel sub-modules,
    /// then fall back to similar names
    async fn attach_signature(
        &self,
        response: &mut ApiContextResponse,
        types: &ResolvedTypes,
        concept: &str,
        version: &str,
    ) {
        if types.definitely_typed {
            response.note(format!(
                "Using community type definitions from {}@{}.",
                types.package, types.content.version
            ));
        }

        if let Some(api) = self.extract(&types.content, concept) {
            response.types_source = Some(types.content.source.clone());
            response.api = Some(api);
            return;
        }

        let content_version = if types.definitely_typed {
            types.content.version.as_str()
        } else {
            version
        };
        for path in self.types.barrel_export_paths(&types.package, concept) {
            if path == types.content.file_path {
                continue;
            }
            let file = match self
                .types
                .fetch_specific_type_file(&types.package, content_version, &path)
                .await
            {
                Ok(Some(file)) => file,
                Ok(None) => continue,
                Err(e) => {
                    warn!(package = %types.package, path = %path, error = %e, "Barrel file fetch failed");
                    continue;
                }
            };
            if let Some(api) = self.extract(&file, concept) {
                debug!(package = %types.package, path = %path, "Found concept in barrel export");
                response.note(format!("Found {} in {}.", api.name, file.file_path));
                response.types_source = Some(file.source);
                response.api = Some(api);
                return;
            }
        }

        let similar = self.declarations.search_apis(
            &types.content.content,
            concept,
            &types.content.file_path,
            self.context.similar_api_limit,
        );
        if similar.is_empty() {
            response.note(format!(
                "No declaration named {concept} in {}@{}.",
                types.package, types.content.version
            ));
            return;
        }

        response.note(format!(
            "No exact match for {concept}; {} similar APIs found.",
            similar.len()
        ));
        response.related_apis = similar.into_iter().map(|hit| hit.definition.name).collect();
        response.types_source = Some(types.content.source.clone());
    }

    fn extract(&self, content: &TypeContent, concept: &str) -> Option<ApiSignature> {
        self.declarations
            .extract_api_signature(&content.content, concept, &content.file_path)
    }
}
