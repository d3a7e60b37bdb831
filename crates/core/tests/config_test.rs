use augments_core::config::{Config, ContextConfig, FetchConfig};
use augments_core::{FrameworkCatalog, FrameworkInfo};

#[test]
fn test_fetch_config_defaults() {
    let config = FetchConfig::default();
    assert_eq!(config.registry_url, "https://registry.npmjs.org");
    assert_eq!(config.cdn_url, "https://unpkg.com");
    assert_eq!(config.timeout_secs, 15);
    assert_eq!(config.max_cached_responses, 500);
    assert!(config.user_agent.starts_with("augments/"));
}

#[test]
fn test_context_config_defaults() {
    let config = ContextConfig::default();
    assert_eq!(config.default_max_examples, 2);
    assert_eq!(config.max_response_chars, 8000);
    assert_eq!(config.related_type_max_chars, 300);
    assert_eq!(config.similar_api_limit, 5);
}

#[test]
fn test_config_validation_limits() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    config.fetch.timeout_secs = 0;
    let result = config.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("fetch.timeout_secs"));

    config.fetch.timeout_secs = 1;
    config.search.default_limit = 0;
    assert!(config.validate().is_err());

    config.search.default_limit = 1;
    config.context.max_response_chars = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_framework_entries() {
    let mut config = Config::default();
    config.frameworks.push(FrameworkInfo {
        key: "  ".to_string(),
        packages: vec!["x".to_string()],
        aliases: vec![],
        api_patterns: vec![],
    });
    let result = config.validate();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("non-empty key"));
}

#[test]
fn test_catalog_from_config_merges_extra_frameworks() {
    let config = Config::from_toml_str(
        r#"
        [[frameworks]]
        key = "qwik"
        packages = ["@builder.io/qwik"]
        aliases = ["qwikjs"]
        api_patterns = ["useSignal"]
        "#,
    )
    .expect("valid config");

    let catalog = FrameworkCatalog::from_config(&config);
    assert_eq!(catalog.primary_package("qwik"), Some("@builder.io/qwik"));
    assert_eq!(catalog.frameworks_for_api("usesignal"), vec!["qwik"]);
    assert_eq!(
        catalog
            .framework_for_package("@builder.io/qwik")
            .map(|f| f.key.as_str()),
        Some("qwik")
    );
}
