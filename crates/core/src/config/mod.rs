//! Configuration module for the augments system
//!
//! This module provides configuration structures and loading mechanisms.
//! Configuration can be loaded from TOML files and/or environment variables.

mod defaults;
mod loading;


use crate::error::{Error, Result};
use crate::frameworks::FrameworkInfo;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use defaults::*;

/// Returns the path to the global configuration file
///
/// The global config is stored at `~/.augments/config.toml`.
pub fn global_config_path() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| Error::config("Unable to determine home directory".to_string()))?;
    Ok(home_dir.join(".augments").join("config.toml"))
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Declaration parser configuration
    #[serde(default)]
    pub parser: ParserConfig,

    /// Fetch layer configuration
    #[serde(default)]
    pub fetch: FetchConfig,

    /// `get_api_context` configuration
    #[serde(default)]
    pub context: ContextConfig,

    /// `search_apis` configuration
    #[serde(default)]
    pub search: SearchConfig,

    /// Extra framework catalog entries, merged over the built-in catalog
    #[serde(default)]
    pub frameworks: Vec<FrameworkInfo>,
}

/// Declaration parser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Number of parse results kept in the content-hash cache
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            cache_capacity: default_cache_capacity(),
        }
    }
}

/// Fetch layer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// npm registry base URL used for version resolution
    #[serde(default = "default_registry_url")]
    pub registry_url: String,

    /// Package CDN base URL used for type declarations and READMEs
    #[serde(default = "default_cdn_url")]
    pub cdn_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of HTTP response bodies kept in memory
    #[serde(default = "default_max_cached_responses")]
    pub max_cached_responses: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            registry_url: default_registry_url(),
            cdn_url: default_cdn_url(),
            timeout_secs: default_timeout_secs(),
            max_cached_responses: default_max_cached_responses(),
            user_agent: default_user_agent(),
        }
    }
}

/// Configuration for `get_api_context`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConfig {
    /// Examples returned when the request does not say
    #[serde(default = "default_max_examples")]
    pub default_max_examples: usize,

    /// Character budget for rendered responses
    #[serde(default = "default_max_response_chars")]
    pub max_response_chars: usize,

    /// Related type signatures longer than this are truncated when rendered
    #[serde(default = "default_related_type_max_chars")]
    pub related_type_max_chars: usize,

    /// Number of "similar APIs" suggested when no declaration matches
    #[serde(default = "default_similar_api_limit")]
    pub similar_api_limit: usize,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            default_max_examples: default_max_examples(),
            max_response_chars: default_max_response_chars(),
            related_type_max_chars: default_related_type_max_chars(),
            similar_api_limit: default_similar_api_limit(),
        }
    }
}

/// Configuration for `search_apis`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Frameworks searched when neither the request nor the query names one
    #[serde(default = "default_search_frameworks")]
    pub default_frameworks: Vec<String>,

    /// Result limit when the request does not say
    #[serde(default = "default_search_limit")]
    pub default_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_frameworks: default_search_frameworks(),
            default_limit: default_search_limit(),
        }
    }
}

impl Config {
    /// Validate value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.parser.cache_capacity == 0 {
            return Err(Error::config("parser.cache_capacity must be at least 1"));
        }
        if self.fetch.max_cached_responses == 0 {
            return Err(Error::config("fetch.max_cached_responses must be at least 1"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(Error::config("fetch.timeout_secs must be at least 1"));
        }
        if self.context.max_response_chars == 0 {
            return Err(Error::config("context.max_response_chars must be at least 1"));
        }
        if self.search.default_limit == 0 {
            return Err(Error::config("search.default_limit must be at least 1"));
        }
        for framework in &self.frameworks {
            if framework.key.trim().is_empty() {
                return Err(Error::config("frameworks entries need a non-empty key"));
            }
            if framework.packages.is_empty() {
                return Err(Error::config(format!(
                    "framework '{}' must list at least one package",
                    framework.key
                )));
            }
        }
        Ok(())
    }
}
