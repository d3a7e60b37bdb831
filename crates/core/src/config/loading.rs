//! Configuration loading from files and environment variables

use crate::error::{Error, Result};
use config::{Config as ConfigLib, ConfigBuilder as LibConfigBuilder, Environment, File};
use std::path::Path;

use super::defaults::*;
use super::{global_config_path, Config};

/// Helper to set a config default with consistent error mapping
fn set_config_default<T: Into<config::Value>>(
    builder: LibConfigBuilder<config::builder::DefaultState>,
    key: &str,
    value: T,
) -> Result<LibConfigBuilder<config::builder::DefaultState>> {
    builder
        .set_default(key, value)
        .map_err(|e| Error::config(format!("Failed to set {key} default: {e}")))
}

impl Config {
    /// Loads configuration from a TOML file with environment variable overrides
    ///
    /// Environment variables are prefixed with `AUGMENTS_` and use double underscores
    /// for nested values. For example:
    /// - `AUGMENTS_FETCH__TIMEOUT_SECS=5`
    /// - `AUGMENTS_SEARCH__DEFAULT_FRAMEWORKS=react,vue`
    pub fn from_file(path: &Path) -> Result<Self> {
        let builder = ConfigLib::builder();

        let builder = set_config_default(
            builder,
            "parser.cache_capacity",
            default_cache_capacity() as i64,
        )?;
        let builder = set_config_default(builder, "fetch.registry_url", default_registry_url())?;
        let builder = set_config_default(builder, "fetch.cdn_url", default_cdn_url())?;
        let builder =
            set_config_default(builder, "fetch.timeout_secs", default_timeout_secs() as i64)?;
        let builder = set_config_default(
            builder,
            "fetch.max_cached_responses",
            default_max_cached_responses() as i64,
        )?;
        let builder = set_config_default(
            builder,
            "context.max_response_chars",
            default_max_response_chars() as i64,
        )?;
        let mut builder = set_config_default(
            builder,
            "search.default_limit",
            default_search_limit() as i64,
        )?;

        // Add the config file if it exists
        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        // Add environment variables with AUGMENTS_ prefix
        builder = builder.add_source(
            Environment::with_prefix("AUGMENTS")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("search.default_frameworks")
                .try_parsing(true),
        );

        // Honor npm's own registry override
        if let Ok(registry) = std::env::var("NPM_CONFIG_REGISTRY") {
            let registry = registry.trim_end_matches('/').to_string();
            builder = builder
                .set_override("fetch.registry_url", registry)
                .map_err(|e| Error::config(format!("Failed to set NPM_CONFIG_REGISTRY: {e}")))?;
        }

        let config = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build config: {e}")))?;

        let config: Config = config
            .try_deserialize()
            .map_err(|e| Error::config(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Creates a config from a TOML string (useful for testing)
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration
    ///
    /// Precedence (lowest to highest):
    /// 1. Hardcoded defaults
    /// 2. Config file (~/.augments/config.toml or custom --config path)
    /// 3. Environment variables (AUGMENTS_*)
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => global_config_path()?,
        };
        Self::from_file(&path)
    }

    /// Render the effective configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::config(format!("Failed to serialize config: {e}")))
    }
}
