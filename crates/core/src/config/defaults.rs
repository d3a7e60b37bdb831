//! Default values and functions for configuration

// Default constants
pub(crate) const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";
pub(crate) const DEFAULT_CDN_URL: &str = "https://unpkg.com";
pub(crate) const DEFAULT_USER_AGENT: &str = concat!("augments/", env!("CARGO_PKG_VERSION"));

pub(crate) fn default_cache_capacity() -> usize {
    50
}

pub(crate) fn default_registry_url() -> String {
    DEFAULT_REGISTRY_URL.to_string()
}

pub(crate) fn default_cdn_url() -> String {
    DEFAULT_CDN_URL.to_string()
}

pub(crate) fn default_timeout_secs() -> u64 {
    15
}

pub(crate) fn default_max_cached_responses() -> u64 {
    500
}

pub(crate) fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

pub(crate) fn default_max_examples() -> usize {
    2
}

pub(crate) fn default_max_response_chars() -> usize {
    8000
}

pub(crate) fn default_related_type_max_chars() -> usize {
    300
}

pub(crate) fn default_similar_api_limit() -> usize {
    5
}

pub(crate) fn default_search_frameworks() -> Vec<String> {
    vec![
        "react".to_string(),
        "vue".to_string(),
        "next".to_string(),
        "express".to_string(),
    ]
}

pub(crate) fn default_search_limit() -> usize {
    10
}
