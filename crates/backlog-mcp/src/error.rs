//! Error types for the Backlog MCP server.

use thiserror::Error;

/// Errors that can occur while serving a tool call.
#[derive(Debug, Error)]
pub enum Error {
    /// Tool arguments did not match the tool's input schema.
    #[error("Invalid arguments for {tool}: {reason}")]
    InvalidArguments {
        /// The tool that rejected the arguments.
        tool: &'static str,
        /// What was wrong with them.
        reason: String,
    },

    /// No tool is registered under this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// An error from the Backlog API client.
    #[error(transparent)]
    Backlog(#[from] backlog_api::BacklogError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MCP transport or protocol error.
    #[error("MCP error: {0}")]
    Mcp(String),
}

impl Error {
    /// Whether the error was caused by the caller's arguments.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidArguments { .. })
    }
}

/// Result type for Backlog MCP operations.
pub type Result<T> = std::result::Result<T, Error>;
