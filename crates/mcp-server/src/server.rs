//! MCP Server implementation for augments
//!
//! Exposes `get_api_context` and `search_apis` as MCP tools over stdio
//! using the rmcp SDK.

use crate::error::McpError;
use crate::output_formatter::{format_api_context, format_search_results, FormatOptions};
use crate::tool::{GetApiContextInput, SearchApisInput, MAX_QUERY_LENGTH};
use augments_context::ApiContextService;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolResult, Content, ErrorCode, ErrorData, Implementation, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    tool, tool_handler, tool_router, ServerHandler, ServiceExt,
};
use tracing::info;

/// MCP Server for augments
#[derive(Clone)]
pub struct AugmentsMcpServer {
    tool_router: ToolRouter<Self>,
    service: ApiContextService,
    format: FormatOptions,
}

impl std::fmt::Debug for AugmentsMcpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AugmentsMcpServer")
            .field("service", &"<ApiContextService>")
            .field("format", &self.format)
            .finish()
    }
}

impl AugmentsMcpServer {
    /// Create a new MCP server instance
    pub fn new(service: ApiContextService, format: FormatOptions) -> Self {
        Self {
            tool_router: Self::tool_router(),
            service,
            format,
        }
    }
}

#[tool_router]
impl AugmentsMcpServer {
    /// Look up the exact signature of a framework API.
    ///
    /// Parses the query into framework, API name and version, fetches the
    /// package's TypeScript declarations and returns the signature with its
    /// parameters, overloads, related types and examples.
    #[tool(
        name = "get_api_context",
        description = "Get the precise TypeScript signature of a JavaScript/TypeScript framework API from a natural language query such as \"react useEffect cleanup\" or \"zod v3 object\". Returns parameters, return type, overloads, related types, usage examples and deprecation notes."
    )]
    async fn get_api_context(
        &self,
        Parameters(input): Parameters<GetApiContextInput>,
    ) -> Result<CallToolResult, ErrorData> {
        info!("Executing get_api_context: query={}", input.query);
        check_query(&input.query).map_err(|e| to_mcp_error(&e))?;

        let response = self.service.get_api_context(input.into()).await;
        let text = format_api_context(&response, &self.format);

        info!(
            "get_api_context completed: found={}, notes={}",
            response.api.is_some(),
            response.notes.len()
        );

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }

    /// Search declarations across frameworks.
    #[tool(
        name = "search_apis",
        description = "Search the TypeScript declarations of one or more frameworks for APIs whose name or signature contains every query term. Results from all frameworks are ranked together."
    )]
    async fn search_apis(
        &self,
        Parameters(input): Parameters<SearchApisInput>,
    ) -> Result<CallToolResult, ErrorData> {
        info!("Executing search_apis: query={}", input.query);
        check_query(&input.query).map_err(|e| to_mcp_error(&e))?;

        let response = self.service.search_apis(input.into()).await;
        let text = format_search_results(&response, &self.format);

        info!(
            "search_apis completed: {} results from {} frameworks",
            response.results.len(),
            response.frameworks_searched.len()
        );

        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

#[tool_handler]
impl ServerHandler for AugmentsMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "augments-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Up-to-date API signatures for JavaScript/TypeScript frameworks, read from the \
                packages' own type declarations. Use get_api_context for one API and \
                search_apis to discover APIs by keyword."
                    .to_string(),
            ),
        }
    }
}

fn check_query(query: &str) -> crate::Result<()> {
    if query.chars().count() > MAX_QUERY_LENGTH {
        return Err(McpError::InvalidInput(format!(
            "query exceeds maximum length of {MAX_QUERY_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Convert McpError to rmcp ErrorData
fn to_mcp_error(err: &McpError) -> ErrorData {
    let code = match err {
        McpError::InvalidInput(_) => ErrorCode::INVALID_PARAMS,
        _ => ErrorCode::INTERNAL_ERROR,
    };
    ErrorData {
        code,
        message: err.to_tool_error_message().into(),
        data: None,
    }
}

/// Run the MCP server with stdio transport
///
/// This is the main entry point for the `augments serve` command.
/// It runs until the client disconnects.
pub async fn run_mcp_server(service: ApiContextService, format: FormatOptions) -> crate::Result<()> {
    info!(
        "Starting MCP server (response budget {} chars)",
        format.max_chars
    );

    let server = AugmentsMcpServer::new(service, format);

    let service = server
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| McpError::Transport(e.to_string()))?;

    info!("MCP server started, waiting for client requests");

    service
        .waiting()
        .await
        .map_err(|e| McpError::Transport(e.to_string()))?;

    info!("MCP server shutting down");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_length_limit() {
        assert!(check_query("react useState").is_ok());
        assert!(check_query("").is_ok());

        let err = check_query(&"x".repeat(MAX_QUERY_LENGTH + 1)).unwrap_err();
        assert!(matches!(err, McpError::InvalidInput(_)));
        assert_eq!(to_mcp_error(&err).code, ErrorCode::INVALID_PARAMS);
    }
}
