//! Cached HTTP GET client shared by the fetch implementations

use crate::cache::{ttl_for_version, ResponseCache};
use crate::error::FetchError;
use augments_core::FetchConfig;
use reqwest::{header, Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// HTTP client with a URL-keyed response cache in front of it
///
/// A 404 is an answer, not a failure: it is cached and returned as `None`.
/// Requests are never retried.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    cache: ResponseCache,
}

impl HttpClient {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            cache: ResponseCache::new(config.max_cached_responses),
        })
    }

    /// GET `url` as text; `version` selects how long the answer is cached
    pub async fn get_text(&self, url: &str, version: &str) -> Result<Option<Arc<str>>, FetchError> {
        self.get_with_accept(url, version, None).await
    }

    /// GET `url` with an explicit `Accept` header
    pub async fn get_with_accept(
        &self,
        url: &str,
        version: &str,
        accept: Option<&str>,
    ) -> Result<Option<Arc<str>>, FetchError> {
        if let Some(cached) = self.cache.get(url).await {
            debug!(url = %url, hit = cached.is_some(), "Response cache hit");
            return Ok(cached);
        }

        let mut request = self.client.get(url);
        if let Some(accept) = accept {
            request = request.header(header::ACCEPT, accept);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Http(format!("GET {url}: {e}")))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(url = %url, "Resource not found");
            self.cache.insert(url, None, ttl_for_version(version)).await;
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchError::Http(format!("GET {url} returned {status}")));
        }

        let body: Arc<str> = response
            .text()
            .await
            .map_err(|e| FetchError::Decode(format!("GET {url}: {e}")))?
            .into();

        debug!(url = %url, bytes = body.len(), "Fetched");
        self.cache
            .insert(url, Some(Arc::clone(&body)), ttl_for_version(version))
            .await;
        Ok(Some(body))
    }
}
