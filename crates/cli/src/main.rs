//! augments CLI
//!
//! Serves the MCP tools over stdio or answers a single query from the shell.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use anyhow::{anyhow, Context, Result};
use augments::{build_service, init_logging, Cli, Commands};
use augments_core::Config;
use augments_mcp_server::{format_api_context, format_search_results, run_mcp_server, FormatOptions};
use clap::Parser;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    debug!("Configuration loaded");

    match cli.command {
        Some(Commands::Serve) => serve(config).await,
        Some(Commands::Config) => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
        Some(command @ Commands::Context { json, .. }) => {
            let request = command
                .api_context_request()
                .ok_or_else(|| anyhow!("not a context command"))?;
            let service = build_service(&config)?;
            let response = service.get_api_context(request).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!(
                    "{}",
                    format_api_context(&response, &FormatOptions::from_config(&config.context))
                );
            }
            Ok(())
        }
        Some(command @ Commands::Search { json, .. }) => {
            let request = command
                .search_request()
                .ok_or_else(|| anyhow!("not a search command"))?;
            let service = build_service(&config)?;
            let response = service.search_apis(request).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!(
                    "{}",
                    format_search_results(&response, &FormatOptions::from_config(&config.context))
                );
            }
            Ok(())
        }
        None => {
            println!("Run 'augments serve' to start the MCP server, or --help for more options");
            Ok(())
        }
    }
}

/// Start the MCP server
async fn serve(config: Config) -> Result<()> {
    info!("Preparing to start MCP server...");

    let service = build_service(&config)?;
    let format = FormatOptions::from_config(&config.context);

    run_mcp_server(service, format)
        .await
        .map_err(|e| anyhow!("MCP server error: {e}"))
}
