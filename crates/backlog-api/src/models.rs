//! Backlog records and request/response shapes.
//!
//! Records wrap the JSON value the service returned. They serialize back to
//! exactly that value, key order included, so fields this crate does not
//! model (custom fields, new API additions, explicit `null`s) pass through
//! untouched.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Defines a record newtype over the raw JSON value with the accessors every
/// Backlog record shares.
macro_rules! remote_record {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Value);

        impl $name {
            /// Numeric identifier assigned by Backlog.
            #[must_use]
            pub fn id(&self) -> Option<u64> {
                self.0.get("id").and_then(Value::as_u64)
            }

            /// Creation timestamp.
            #[must_use]
            pub fn created(&self) -> Option<DateTime<Utc>> {
                timestamp(&self.0, "created")
            }

            /// Look up any top-level field by its API name.
            #[must_use]
            pub fn field(&self, name: &str) -> Option<&Value> {
                self.0.get(name)
            }

            /// The record exactly as received.
            #[must_use]
            pub fn as_value(&self) -> &Value {
                &self.0
            }

            /// Consume the record, returning the received JSON.
            #[must_use]
            pub fn into_value(self) -> Value {
                self.0
            }
        }

        impl From<Value> for $name {
            fn from(value: Value) -> Self {
                Self(value)
            }
        }
    };
}

remote_record! {
    /// An issue, as returned by `GET /issues/{issueIdOrKey}`.
    Issue
}

remote_record! {
    /// A comment on an issue.
    Comment
}

remote_record! {
    /// Metadata of a file attached to an issue.
    Attachment
}

remote_record! {
    /// A file from the space's shared file storage linked to an issue.
    SharedFile
}

impl Issue {
    /// Issue key such as `PROJ-12`.
    #[must_use]
    pub fn issue_key(&self) -> Option<&str> {
        str_field(&self.0, "issueKey")
    }

    /// One-line summary.
    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        str_field(&self.0, "summary")
    }

    /// Body text.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        str_field(&self.0, "description")
    }

    /// Name of the current status.
    #[must_use]
    pub fn status_name(&self) -> Option<&str> {
        self.0.get("status").and_then(|s| str_field(s, "name"))
    }

    /// Attachment metadata embedded in the issue record.
    #[must_use]
    pub fn attachments(&self) -> Vec<Attachment> {
        self.0
            .get("attachments")
            .and_then(Value::as_array)
            .map(|items| items.iter().cloned().map(Attachment).collect())
            .unwrap_or_default()
    }

    /// Last update timestamp.
    #[must_use]
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        timestamp(&self.0, "updated")
    }
}

impl Comment {
    /// Comment text. `None` for comments that only record field changes.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        str_field(&self.0, "content")
    }

    /// Number of field changes recorded with the comment.
    #[must_use]
    pub fn change_log_len(&self) -> usize {
        self.0
            .get("changeLog")
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }
}

impl Attachment {
    /// File name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        str_field(&self.0, "name")
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.0.get("size").and_then(Value::as_u64)
    }
}

impl SharedFile {
    /// Entry type, `file` or `directory`.
    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        str_field(&self.0, "type")
    }

    /// Directory path inside the shared storage.
    #[must_use]
    pub fn dir(&self) -> Option<&str> {
        str_field(&self.0, "dir")
    }

    /// File name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        str_field(&self.0, "name")
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.0.get("size").and_then(Value::as_u64)
    }
}

fn str_field<'a>(value: &'a Value, name: &str) -> Option<&'a str> {
    value.get(name).and_then(Value::as_str)
}

fn timestamp(value: &Value, name: &str) -> Option<DateTime<Utc>> {
    str_field(value, name)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|t| t.with_timezone(&Utc))
}

/// Response of [`BacklogClient::get_issue_comments`](crate::BacklogClient::get_issue_comments).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentList {
    /// Comments in the order the service returned them.
    pub comments: Vec<Comment>,
}

/// Response of [`BacklogClient::get_issue_attachments`](crate::BacklogClient::get_issue_attachments).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachmentList {
    /// Attachment metadata.
    pub attachments: Vec<Attachment>,
}

/// Response of [`BacklogClient::get_issue_shared_files`](crate::BacklogClient::get_issue_shared_files).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedFileList {
    /// Shared files linked to the issue.
    pub shared_files: Vec<SharedFile>,
}

/// A downloaded attachment, base64-encoded (standard alphabet, padded).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachmentContent {
    /// Encoded file bytes.
    pub file_data: String,
}

impl AttachmentContent {
    /// Encode raw file bytes.
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            file_data: STANDARD.encode(bytes),
        }
    }

    /// Decode back into the original bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if `file_data` is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        STANDARD.decode(&self.file_data)
    }
}

/// Sort order for comment listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CommentOrder {
    /// Oldest first.
    Asc,
    /// Newest first. The service default.
    Desc,
}

impl CommentOrder {
    /// Query parameter value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Optional filters for comment listings. Unset fields are not sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommentQuery {
    /// Only comments with an id at or above this value.
    pub min_id: Option<u64>,
    /// Only comments with an id at or below this value.
    pub max_id: Option<u64>,
    /// Number of comments to return (the service accepts 1-100, default 20).
    pub count: Option<u64>,
    /// Sort order.
    pub order: Option<CommentOrder>,
}

impl CommentQuery {
    /// Query parameters in the order they are sent.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(4);
        if let Some(min_id) = self.min_id {
            pairs.push(("minId", min_id.to_string()));
        }
        if let Some(max_id) = self.max_id {
            pairs.push(("maxId", max_id.to_string()));
        }
        if let Some(count) = self.count {
            pairs.push(("count", count.to_string()));
        }
        if let Some(order) = self.order {
            pairs.push(("order", order.as_str().to_string()));
        }
        pairs
    }
}
