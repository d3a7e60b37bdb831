use augments_core::{Config, FrameworkCatalog};
use augments_fetch::{
    barrel_paths_for, definitely_typed_name, extract_examples, ttl_for_version, Collaborators,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

const HOUR: Duration = Duration::from_secs(3600);

#[test]
fn test_ttl_follows_release_channel() {
    assert_eq!(ttl_for_version("19.0.0-rc.1"), 6 * HOUR);
    assert_eq!(ttl_for_version("latest"), 24 * HOUR);
    assert_eq!(ttl_for_version("3.0.0-alpha.2"), HOUR);
    assert_eq!(ttl_for_version("0.0.0-dev-20240101"), HOUR);
    assert_eq!(ttl_for_version("5.0.0-beta.4"), 6 * HOUR);
    assert_eq!(ttl_for_version("18.3.1"), 24 * HOUR);
    assert_eq!(ttl_for_version("canary"), 3 * HOUR);
}

#[test]
fn test_definitely_typed_names() {
    assert_eq!(definitely_typed_name("express"), "@types/express");
    assert_eq!(
        definitely_typed_name("@testing-library/jest-dom"),
        "@types/testing-library__jest-dom"
    );
}

#[test]
fn test_tanstack_barrel_paths_precede_generic_ones() {
    let paths = barrel_paths_for("@tanstack/react-query", "useQuery");
    assert_eq!(
        paths,
        vec![
            "build/modern/index.d.ts",
            "build/legacy/index.d.ts",
            "dist/index.d.ts",
            "dist/types/index.d.ts",
            "types/index.d.ts",
            "lib/index.d.ts",
        ]
    );
}

#[test]
fn test_readme_examples_carry_source_and_heading() {
    let markdown = "# express\n\n## Quick Start\n\n```js\nconst app = express()\napp.get('/', (req, res) => res.send('ok'))\napp.listen(3000)\n```\n";
    let source = "https://unpkg.com/express@latest/README.md";

    let examples = extract_examples(markdown, "listen", source);
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].source, source);
    assert_eq!(examples[0].language, "js");
    assert_eq!(examples[0].context.as_deref(), Some("Quick Start"));
    assert_eq!(examples[0].lines, Some(3));
}

#[tokio::test]
async fn test_http_collaborators_build_from_default_config() {
    let config = Config::default();
    let catalog = Arc::new(FrameworkCatalog::from_config(&config));

    let collaborators = Collaborators::http(&config, catalog);
    assert!(collaborators.is_ok());
}
