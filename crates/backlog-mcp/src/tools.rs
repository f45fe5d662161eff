//! MCP tool implementations.
//!
//! One tool per Backlog endpoint. Every tool parses its arguments first, so a
//! malformed call never reaches the network.

use crate::error::Result;
use crate::models::{GetIssueAttachmentParams, GetIssueCommentsParams, IssueParams};
use crate::registry::{
    BacklogTool, ToolContext, ToolRegistry, input_schema, parse_arguments, require_non_empty,
};
use async_trait::async_trait;
use rmcp::model::JsonObject;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Name of the issue identifier argument shared by all tools.
const ISSUE_FIELD: &str = "issueIdOrKey";

/// Register every Backlog tool.
pub fn register_backlog_tools(registry: &mut ToolRegistry) {
    registry.register(GetIssueTool);
    registry.register(GetIssueCommentsTool);
    registry.register(GetIssueAttachmentsTool);
    registry.register(GetIssueAttachmentTool);
    registry.register(GetIssueSharedFilesTool);
}

/// Build a registry holding every Backlog tool.
#[must_use]
pub fn backlog_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_backlog_tools(&mut registry);
    registry
}

fn issue_params(tool: &'static str, arguments: JsonObject) -> Result<IssueParams> {
    let params: IssueParams = parse_arguments(tool, arguments)?;
    require_non_empty(tool, ISSUE_FIELD, &params.issue_id_or_key)?;
    Ok(params)
}

/// `get_issue`: issue details.
pub struct GetIssueTool;

#[async_trait]
impl BacklogTool for GetIssueTool {
    fn name(&self) -> &'static str {
        "get_issue"
    }

    fn description(&self) -> &'static str {
        "Get the details of a Backlog issue by its ID or key."
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        input_schema::<IssueParams>()
    }

    async fn call(&self, arguments: JsonObject, context: &ToolContext) -> Result<Value> {
        let params = issue_params(self.name(), arguments)?;
        let issue = context.client.get_issue(&params.issue_id_or_key).await?;
        debug!(issue_key = ?issue.issue_key(), "Fetched issue");
        Ok(issue.into_value())
    }
}

/// `get_issue_comments`: comments on an issue.
pub struct GetIssueCommentsTool;

#[async_trait]
impl BacklogTool for GetIssueCommentsTool {
    fn name(&self) -> &'static str {
        "get_issue_comments"
    }

    fn description(&self) -> &'static str {
        "List comments on a Backlog issue. Optionally filter by comment ID range, limit the count (1-100, default 20) and choose the order (asc/desc, default desc)."
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        input_schema::<GetIssueCommentsParams>()
    }

    async fn call(&self, arguments: JsonObject, context: &ToolContext) -> Result<Value> {
        let params: GetIssueCommentsParams = parse_arguments(self.name(), arguments)?;
        require_non_empty(self.name(), ISSUE_FIELD, &params.issue_id_or_key)?;

        let list = context
            .client
            .get_issue_comments(&params.issue_id_or_key, &params.query())
            .await?;
        debug!(count = list.comments.len(), "Fetched comments");
        Ok(serde_json::to_value(list)?)
    }
}

/// `get_issue_attachments`: attachment metadata of an issue.
pub struct GetIssueAttachmentsTool;

#[async_trait]
impl BacklogTool for GetIssueAttachmentsTool {
    fn name(&self) -> &'static str {
        "get_issue_attachments"
    }

    fn description(&self) -> &'static str {
        "List the files attached to a Backlog issue (ID, name, size, creator, date)."
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        input_schema::<IssueParams>()
    }

    async fn call(&self, arguments: JsonObject, context: &ToolContext) -> Result<Value> {
        let params = issue_params(self.name(), arguments)?;
        let list = context
            .client
            .get_issue_attachments(&params.issue_id_or_key)
            .await?;
        Ok(serde_json::to_value(list)?)
    }
}

/// `get_issue_attachment`: download one attachment.
pub struct GetIssueAttachmentTool;

#[async_trait]
impl BacklogTool for GetIssueAttachmentTool {
    fn name(&self) -> &'static str {
        "get_issue_attachment"
    }

    fn description(&self) -> &'static str {
        "Download a file attached to a Backlog issue. Returns the content base64-encoded; long content is shortened to a preview."
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        input_schema::<GetIssueAttachmentParams>()
    }

    async fn call(&self, arguments: JsonObject, context: &ToolContext) -> Result<Value> {
        let params: GetIssueAttachmentParams = parse_arguments(self.name(), arguments)?;
        require_non_empty(self.name(), ISSUE_FIELD, &params.issue_id_or_key)?;
        require_non_empty(self.name(), "attachmentId", &params.attachment_id)?;

        let content = context
            .client
            .get_issue_attachment(&params.issue_id_or_key, &params.attachment_id)
            .await?;
        let response = context.attachment_preview.apply(&content);
        Ok(serde_json::to_value(response)?)
    }
}

/// `get_issue_shared_files`: shared files linked to an issue.
pub struct GetIssueSharedFilesTool;

#[async_trait]
impl BacklogTool for GetIssueSharedFilesTool {
    fn name(&self) -> &'static str {
        "get_issue_shared_files"
    }

    fn description(&self) -> &'static str {
        "List the shared files linked to a Backlog issue."
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        input_schema::<IssueParams>()
    }

    async fn call(&self, arguments: JsonObject, context: &ToolContext) -> Result<Value> {
        let params = issue_params(self.name(), arguments)?;
        let list = context
            .client
            .get_issue_shared_files(&params.issue_id_or_key)
            .await?;
        Ok(serde_json::to_value(list)?)
    }
}
