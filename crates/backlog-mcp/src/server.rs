//! MCP server implementation.
//!
//! This module wires the tool registry into rmcp's `ServerHandler` and runs
//! it over stdio.

use crate::config::ServerArgs;
use crate::error::{Error, Result};
use crate::models::AttachmentPreview;
use crate::registry::{ToolContext, ToolRegistry};
use crate::tools::backlog_registry;
use backlog_api::BacklogClient;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Implementation, JsonObject, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::transport::stdio;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, ServiceExt};
use std::sync::Arc;
use tracing::info;

/// The Backlog MCP server.
///
/// Provides MCP protocol handling over stdio transport.
#[derive(Clone)]
pub struct BacklogMcpServer {
    /// Registered tools.
    registry: Arc<ToolRegistry>,
    /// Client and policies shared by all tool calls.
    context: Arc<ToolContext>,
}

impl BacklogMcpServer {
    /// Create a server exposing every Backlog tool.
    #[must_use]
    pub fn new(client: BacklogClient, attachment_preview: AttachmentPreview) -> Self {
        Self {
            registry: Arc::new(backlog_registry()),
            context: Arc::new(ToolContext::new(client, attachment_preview)),
        }
    }

    /// Create a server from parsed startup arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the arguments do not form a usable client
    /// configuration.
    pub fn from_args(args: &ServerArgs) -> Result<Self> {
        let client = BacklogClient::new(args.backlog_config())?;
        Ok(Self::new(client, args.attachment_preview()))
    }

    /// Names of the tools this server exposes.
    #[must_use]
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.registry.names()
    }

    /// Tool descriptors as sent in `tools/list`.
    #[must_use]
    pub fn tools(&self) -> Vec<Tool> {
        self.registry.list_tools()
    }

    /// Invoke a tool by name.
    pub async fn call(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        self.registry.dispatch(name, arguments, &self.context).await
    }

    /// Serve MCP over stdin/stdout until the host disconnects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Mcp`] if the MCP handshake fails or the service task
    /// aborts.
    pub async fn run(self) -> Result<()> {
        let service = self
            .serve(stdio())
            .await
            .map_err(|e| Error::Mcp(e.to_string()))?;
        let reason = service
            .waiting()
            .await
            .map_err(|e| Error::Mcp(e.to_string()))?;
        info!(?reason, "MCP session ended");
        Ok(())
    }
}

impl ServerHandler for BacklogMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "backlog-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Backlog MCP server. Read issues, comments, attachments and shared files by issue ID or key (e.g. PROJ-123)."
                    .into(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> std::result::Result<CallToolResult, McpError> {
        Ok(self.call(&request.name, request.arguments).await)
    }
}
