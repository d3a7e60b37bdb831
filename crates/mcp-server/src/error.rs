//! Error types for the MCP server

use thiserror::Error;

/// Result type alias for MCP operations
pub type Result<T> = std::result::Result<T, McpError>;

/// Errors that can occur in the MCP server
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("MCP transport error: {0}")]
    Transport(String),
}

impl McpError {
    /// Convert to MCP tool error format (isError: true response)
    pub fn to_tool_error_message(&self) -> String {
        match self {
            McpError::InvalidInput(msg) => {
                format!(
                    "Invalid input: {msg}\n\n\
                    Hint: ask about one API at a time, e.g. \"react useEffect cleanup\"."
                )
            }
            McpError::Transport(msg) => {
                format!("Transport error: {msg}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message_carries_hint() {
        let message = McpError::InvalidInput("query is too long".to_string()).to_tool_error_message();
        assert!(message.starts_with("Invalid input: query is too long"));
        assert!(message.contains("react useEffect cleanup"));
    }
}
