//! MCP tool argument and response models.
//!
//! Argument structs double as the tools' input schemas: `schemars` turns
//! their field docs into the descriptions the host shows to the model.

use backlog_api::{AttachmentContent, CommentOrder, CommentQuery};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default number of base64 characters shown for a downloaded attachment.
pub const DEFAULT_PREVIEW_CHARS: usize = 100;

/// Message placed next to attachment data.
pub const ATTACHMENT_MESSAGE: &str = "File content returned as base64";

/// Arguments for tools that only need an issue.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueParams {
    /// Issue ID or issue key (e.g. "PROJ-123").
    pub issue_id_or_key: String,
}

/// Arguments for `get_issue_comments`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetIssueCommentsParams {
    /// Issue ID or issue key (e.g. "PROJ-123").
    pub issue_id_or_key: String,

    /// Minimum comment ID.
    pub min_id: Option<u64>,

    /// Maximum comment ID.
    pub max_id: Option<u64>,

    /// Number of comments to return (1-100). Defaults to 20.
    pub count: Option<u64>,

    /// Sort order, "asc" or "desc". Defaults to "desc".
    pub order: Option<CommentOrder>,
}

impl GetIssueCommentsParams {
    /// The optional filters as a client query.
    #[must_use]
    pub fn query(&self) -> CommentQuery {
        CommentQuery {
            min_id: self.min_id,
            max_id: self.max_id,
            count: self.count,
            order: self.order,
        }
    }
}

/// Arguments for `get_issue_attachment`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetIssueAttachmentParams {
    /// Issue ID or issue key (e.g. "PROJ-123").
    pub issue_id_or_key: String,

    /// Attachment ID.
    pub attachment_id: String,
}

/// How much of a downloaded attachment goes into the response text.
///
/// The envelope is meant for display, so by default only a short preview of
/// the encoded data is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachmentPreview {
    /// Keep at most `max_chars` characters of the encoded data.
    Truncate {
        /// Preview length in base64 characters.
        max_chars: usize,
    },
    /// Return the complete encoded data.
    Full,
}

impl Default for AttachmentPreview {
    fn default() -> Self {
        Self::Truncate {
            max_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl AttachmentPreview {
    /// Build the response for a downloaded attachment.
    #[must_use]
    pub fn apply(self, content: &AttachmentContent) -> AttachmentResponse {
        let data = content.file_data.as_str();
        let total_length = data.len();
        let (file_data, truncated) = match self {
            // base64 output is ASCII, so any byte index is a char boundary.
            Self::Truncate { max_chars } if total_length > max_chars => {
                (format!("{}...", &data[..max_chars]), true)
            }
            _ => (data.to_string(), false),
        };

        AttachmentResponse {
            message: ATTACHMENT_MESSAGE.to_string(),
            file_data,
            truncated,
            total_length,
        }
    }
}

/// Response of the `get_issue_attachment` tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentResponse {
    /// Human-readable note about the data.
    pub message: String,

    /// Base64 data, possibly cut to a preview ending in `...`.
    pub file_data: String,

    /// Whether `file_data` was cut.
    pub truncated: bool,

    /// Length of the complete base64 string.
    pub total_length: usize,
}
