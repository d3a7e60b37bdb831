//! Argument parsing and service wiring for the augments binary

use augments::{build_service, Cli, Commands};
use augments_core::Config;
use clap::Parser;
use pretty_assertions::assert_eq;
use std::io::Write;

#[test]
fn test_context_arguments() {
    let cli = Cli::try_parse_from([
        "augments",
        "context",
        "react useEffect cleanup",
        "--framework",
        "preact",
        "--version",
        "10",
        "--no-examples",
    ])
    .unwrap();

    let request = cli.command.unwrap().api_context_request().unwrap();
    assert_eq!(request.query, "react useEffect cleanup");
    assert_eq!(request.framework.as_deref(), Some("preact"));
    assert_eq!(request.version.as_deref(), Some("10"));
    assert_eq!(request.include_examples, Some(false));
    assert_eq!(request.max_examples, None);
}

#[test]
fn test_context_defaults_leave_examples_on() {
    let cli = Cli::try_parse_from(["augments", "context", "zod object", "--max-examples", "1"])
        .unwrap();

    let request = cli.command.unwrap().api_context_request().unwrap();
    assert_eq!(request.include_examples, None);
    assert_eq!(request.max_examples, Some(1));
    assert!(request.framework.is_none());
}

#[test]
fn test_search_arguments() {
    let cli = Cli::try_parse_from([
        "augments",
        "search",
        "router",
        "--framework",
        "express",
        "--framework",
        "hono",
        "--limit",
        "5",
        "--verbose",
    ])
    .unwrap();
    assert!(cli.verbose);

    let command = cli.command.unwrap();
    assert!(command.api_context_request().is_none());
    let request = command.search_request().unwrap();
    assert_eq!(
        request.frameworks,
        Some(vec!["express".to_string(), "hono".to_string()])
    );
    assert_eq!(request.limit, Some(5));
}

#[test]
fn test_search_without_frameworks_uses_defaults() {
    let cli = Cli::try_parse_from(["augments", "search", "use"]).unwrap();
    let request = cli.command.unwrap().search_request().unwrap();
    assert!(request.frameworks.is_none());
    assert!(request.limit.is_none());
}

#[test]
fn test_global_config_flag() {
    let cli = Cli::try_parse_from(["augments", "serve", "--config", "/tmp/augments.toml"]).unwrap();
    assert!(matches!(cli.command, Some(Commands::Serve)));
    assert_eq!(
        cli.config.as_deref(),
        Some(std::path::Path::new("/tmp/augments.toml"))
    );
}

#[test]
fn test_context_requires_query() {
    assert!(Cli::try_parse_from(["augments", "context"]).is_err());
}

#[test]
fn test_config_file_round_trips_through_service() {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    writeln!(
        file,
        "[search]\ndefault_frameworks = [\"vue\"]\ndefault_limit = 3\n\n[fetch]\ntimeout_secs = 4"
    )
    .unwrap();

    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config.search.default_frameworks, vec!["vue".to_string()]);
    assert_eq!(config.search.default_limit, 3);
    assert_eq!(config.fetch.timeout_secs, 4);

    let rendered = config.to_toml_string().unwrap();
    assert!(rendered.contains("default_limit = 3"));

    assert!(build_service(&config).is_ok());
}
