//! Library interface for the augments CLI
//!
//! Argument definitions and service wiring live here so integration tests can
//! exercise them; `main.rs` only dispatches.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{Context, Result};
use augments_context::{ApiContextRequest, ApiContextService, SearchApisRequest};
use augments_core::{Config, FrameworkCatalog};
use augments_fetch::Collaborators;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "augments")]
#[command(about = "Framework API signatures from TypeScript declarations")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the MCP server on stdio
    Serve,
    /// Look up one API, e.g. `augments context "react useEffect"`
    Context {
        query: String,

        /// Framework key or npm package, overriding detection
        #[arg(long)]
        framework: Option<String>,

        /// Package version or dist-tag
        #[arg(long = "version", value_name = "VERSION")]
        package_version: Option<String>,

        /// Skip the README example lookup
        #[arg(long)]
        no_examples: bool,

        #[arg(long)]
        max_examples: Option<usize>,

        /// Print the raw response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Search declarations across frameworks
    Search {
        query: String,

        /// Framework to search; repeat for several
        #[arg(long = "framework", value_name = "FRAMEWORK")]
        frameworks: Vec<String>,

        #[arg(long)]
        limit: Option<usize>,

        /// Print the raw response as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the effective configuration
    Config,
}

impl Commands {
    /// Request for the `context` subcommand, `None` for any other
    pub fn api_context_request(&self) -> Option<ApiContextRequest> {
        match self {
            Commands::Context {
                query,
                framework,
                package_version,
                no_examples,
                max_examples,
                ..
            } => Some(ApiContextRequest {
                query: query.clone(),
                framework: framework.clone(),
                version: package_version.clone(),
                include_examples: no_examples.then_some(false),
                max_examples: *max_examples,
            }),
            _ => None,
        }
    }

    /// Request for the `search` subcommand, `None` for any other
    pub fn search_request(&self) -> Option<SearchApisRequest> {
        match self {
            Commands::Search {
                query,
                frameworks,
                limit,
                ..
            } => Some(SearchApisRequest {
                query: query.clone(),
                frameworks: (!frameworks.is_empty()).then(|| frameworks.clone()),
                limit: *limit,
            }),
            _ => None,
        }
    }
}

/// Initialize logging
///
/// Logs go to stderr; stdout carries the MCP transport or command output.
/// `RUST_LOG` replaces the default filter entirely.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("augments={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Build the shared service with HTTP collaborators
pub fn build_service(config: &Config) -> Result<ApiContextService> {
    let catalog = Arc::new(FrameworkCatalog::from_config(config));
    let collaborators = Collaborators::http(config, Arc::clone(&catalog))
        .context("Failed to create HTTP collaborators")?;
    Ok(ApiContextService::with_catalog(config, catalog, collaborators))
}
