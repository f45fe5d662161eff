//! Tool registry and dispatch.
//!
//! Each tool declares a name, a description and a typed argument struct. The
//! registry validates incoming arguments against that struct before the tool
//! runs, and turns every outcome into a text content envelope. Failures never
//! escape as protocol errors: the host always gets a `CallToolResult`, with
//! `isError` set when something went wrong.

use crate::error::{Error, Result};
use crate::models::AttachmentPreview;
use async_trait::async_trait;
use backlog_api::BacklogClient;
use rmcp::handler::server::tool::cached_schema_for_type;
use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Read-only state shared by all tool calls.
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Client used for every Backlog request.
    pub client: BacklogClient,
    /// How attachment downloads are rendered.
    pub attachment_preview: AttachmentPreview,
}

impl ToolContext {
    /// Create a context with the given client and preview policy.
    #[must_use]
    pub fn new(client: BacklogClient, attachment_preview: AttachmentPreview) -> Self {
        Self {
            client,
            attachment_preview,
        }
    }
}

/// A single MCP tool backed by one Backlog API call.
#[async_trait]
pub trait BacklogTool: Send + Sync {
    /// Name the host uses to invoke the tool.
    fn name(&self) -> &'static str;

    /// Description shown to the model.
    fn description(&self) -> &'static str;

    /// JSON Schema of the tool's arguments.
    fn input_schema(&self) -> Arc<JsonObject>;

    /// Validate `arguments` and run the tool, returning the JSON to show.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] before any request is made if the
    /// arguments do not match the schema, or the client's error if the
    /// request fails.
    async fn call(&self, arguments: JsonObject, context: &ToolContext) -> Result<Value>;
}

/// Registry of tools, keyed by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, Box<dyn BacklogTool>>,
}

impl ToolRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, replacing any tool with the same name.
    pub fn register<T: BacklogTool + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.name(), Box::new(tool));
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn BacklogTool> {
        self.tools.get(name).map(|tool| tool.as_ref())
    }

    /// Registered tool names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Tool descriptors for `tools/list`, sorted by name.
    #[must_use]
    pub fn list_tools(&self) -> Vec<Tool> {
        self.names()
            .into_iter()
            .filter_map(|name| self.get(name))
            .map(|tool| Tool::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Number of registered tools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether no tools are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run the named tool and wrap the outcome in a content envelope.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
        context: &ToolContext,
    ) -> CallToolResult {
        let Some(tool) = self.get(name) else {
            warn!(tool = name, "Call to unknown tool");
            return failure_envelope(&Error::UnknownTool(name.to_string()));
        };

        debug!(tool = name, "Dispatching tool call");
        match tool.call(arguments.unwrap_or_default(), context).await {
            Ok(value) => success_envelope(&value),
            Err(e) => {
                warn!(tool = name, error = %e, "Tool call failed");
                failure_envelope(&e)
            }
        }
    }
}

/// Deserialize tool arguments into their typed form.
///
/// # Errors
///
/// Returns [`Error::InvalidArguments`] naming `tool` if the arguments have the
/// wrong type, miss a required field, or carry an unsupported value.
pub fn parse_arguments<T: DeserializeOwned>(
    tool: &'static str,
    arguments: JsonObject,
) -> Result<T> {
    serde_json::from_value(Value::Object(arguments)).map_err(|e| Error::InvalidArguments {
        tool,
        reason: e.to_string(),
    })
}

/// Reject identifiers that are empty or only whitespace.
///
/// # Errors
///
/// Returns [`Error::InvalidArguments`] naming `tool` and `field`.
pub fn require_non_empty(tool: &'static str, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::InvalidArguments {
            tool,
            reason: format!("`{field}` must not be empty"),
        });
    }
    Ok(())
}

/// JSON Schema object for a tool's argument struct.
///
/// Uses rmcp's generator (draft-07, nullable optionals) so the schema matches
/// what MCP hosts expect. Schemas are cached per type.
#[must_use]
pub fn input_schema<T: JsonSchema + 'static>() -> Arc<JsonObject> {
    cached_schema_for_type::<T>()
}

/// Success envelope holding pretty-printed JSON.
#[must_use]
pub fn success_envelope(value: &Value) -> CallToolResult {
    let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    CallToolResult::success(vec![Content::text(text)])
}

/// Failure envelope holding the error's message.
#[must_use]
pub fn failure_envelope(error: &Error) -> CallToolResult {
    CallToolResult::error(vec![Content::text(error.to_string())])
}
