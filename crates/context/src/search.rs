//! `search_apis`: one fetch and search pipeline per framework, merged by score

use crate::service::ApiContextService;
use crate::types::{ApiSearchResult, SearchApisRequest, SearchApisResponse};
use augments_core::error::{Error, Result};
use futures::future::join_all;
use tracing::{debug, info, warn};

impl ApiContextService {
    /// Search declarations of several frameworks at once
    ///
    /// Frameworks run independently; one that fails is left out of
    /// `frameworks_searched` and the others still answer.
    pub async fn search_apis(&self, request: SearchApisRequest) -> SearchApisResponse {
        let query = request.query.trim().to_string();
        let mut response = SearchApisResponse {
            query: query.clone(),
            ..SearchApisResponse::default()
        };
        if query.is_empty() {
            return response;
        }

        let frameworks: Vec<String> = request
            .frameworks
            .filter(|f| !f.is_empty())
            .unwrap_or_else(|| self.search.default_frameworks.clone())
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        let limit = request
            .limit
            .filter(|l| *l > 0)
            .unwrap_or(self.search.default_limit);

        info!(query = %query, frameworks = ?frameworks, limit, "Searching APIs");

        let outcomes = join_all(
            frameworks
                .iter()
                .map(|framework| self.search_framework(framework, &query, limit)),
        )
        .await;

        let mut results = Vec::new();
        for (framework, outcome) in frameworks.iter().zip(outcomes) {
            match outcome {
                Ok(found) => {
                    debug!(framework = %framework, found = found.len(), "Framework searched");
                    response.frameworks_searched.push(framework.clone());
                    results.extend(found);
                }
                Err(e) => {
                    warn!(framework = %framework, error = %e, "Framework search failed");
                }
            }
        }

        results.sort_by(|a, b| b.score.cmp(&a.score));
        response.total_found = results.len();
        results.truncate(limit);
        response.results = results;
        response
    }

    async fn search_framework(
        &self,
        framework: &str,
        query: &str,
        limit: usize,
    ) -> Result<Vec<ApiSearchResult>> {
        let package = self
            .query_parser
            .catalog()
            .primary_package(&framework.to_lowercase())
            .unwrap_or(framework)
            .to_string();

        let version = self
            .registry
            .resolve_version(&package, None)
            .await?
            .ok_or_else(|| Error::fetch(format!("{package} is not in the registry")))?;

        let types = self
            .resolve_types(&package, &version)
            .await?
            .ok_or_else(|| Error::fetch(format!("no type declarations for {package}@{version}")))?;

        let hits = self.declarations.search_apis(
            &types.content.content,
            query,
            &types.content.file_path,
            limit,
        );
        Ok(hits
            .into_iter()
            .map(|hit| ApiSearchResult::from_hit(framework, &types.package, &types.content.version, hit))
            .collect())
    }
}
