//! In-memory response cache with version-dependent expiry

use moka::future::Cache;
use moka::Expiry;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};

const HOUR: Duration = Duration::from_secs(60 * 60);

static EXACT_VERSION: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^v?\d+\.\d+\.\d+$").ok());

/// How long content fetched for `version` stays fresh
///
/// Prerelease channels move quickly; published exact versions never change.
pub fn ttl_for_version(version: &str) -> Duration {
    let version = version.trim().to_lowercase();
    if version.contains("dev") || version.contains("alpha") {
        HOUR
    } else if version.contains("beta") || version.contains("rc") {
        6 * HOUR
    } else if version == "latest"
        || version == "stable"
        || EXACT_VERSION
            .as_ref()
            .is_some_and(|re| re.is_match(&version))
    {
        24 * HOUR
    } else {
        3 * HOUR
    }
}

/// A cached body; `None` records a 404
#[derive(Debug, Clone)]
struct CachedResponse {
    body: Option<Arc<str>>,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<String, CachedResponse> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedResponse,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// URL-keyed response cache
#[derive(Clone)]
pub struct ResponseCache {
    cache: Cache<String, CachedResponse>,
}

impl ResponseCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(PerEntryTtl)
            .build();
        Self { cache }
    }

    /// `Some(None)` is a cached miss
    pub async fn get(&self, url: &str) -> Option<Option<Arc<str>>> {
        self.cache.get(url).await.map(|cached| cached.body)
    }

    pub async fn insert(&self, url: &str, body: Option<Arc<str>>, ttl: Duration) {
        self.cache
            .insert(url.to_string(), CachedResponse { body, ttl })
            .await;
    }
}

impl std::fmt::Debug for ResponseCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseCache")
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ttl_for_version() {
        assert_eq!(ttl_for_version("3.0.0-alpha.2"), HOUR);
        assert_eq!(ttl_for_version("15.1.0-canary.3-dev"), HOUR);
        assert_eq!(ttl_for_version("19.0.0-rc.1"), 6 * HOUR);
        assert_eq!(ttl_for_version("5.0.0-beta.4"), 6 * HOUR);
        assert_eq!(ttl_for_version("latest"), 24 * HOUR);
        assert_eq!(ttl_for_version("18.2.0"), 24 * HOUR);
        assert_eq!(ttl_for_version("18"), 3 * HOUR);
        assert_eq!(ttl_for_version("next"), 3 * HOUR);
    }

    #[tokio::test]
    async fn test_cache_round_trip_and_negative_entries() {
        let cache = ResponseCache::new(10);
        cache
            .insert("https://a", Some(Arc::from("body")), HOUR)
            .await;
        cache.insert("https://missing", None, HOUR).await;

        assert_eq!(cache.get("https://a").await, Some(Some(Arc::from("body"))));
        assert_eq!(cache.get("https://missing").await, Some(None));
        assert_eq!(cache.get("https://other").await, None);
    }
}
