//! MCP Server for augments
//!
//! Provides a Model Context Protocol server with the `get_api_context` and
//! `search_apis` tools backed by `augments-context`, rendering each answer as
//! a size-bounded text block.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

mod error;
mod output_formatter;
mod server;
mod tool;

pub use error::{McpError, Result};
pub use output_formatter::{format_api_context, format_search_results, FormatOptions};
pub use server::{run_mcp_server, AugmentsMcpServer};
pub use tool::{GetApiContextInput, SearchApisInput};
