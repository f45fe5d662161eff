//! Read-only client for the Backlog issue tracker.
//!
//! The client talks to `https://{space}.{domain}/api/v2/` and authenticates
//! with a static API key passed as the `apiKey` query parameter.
//!
//! # Operations
//!
//! - [`BacklogClient::get_issue`] - a single issue record
//! - [`BacklogClient::get_issue_comments`] - comments on an issue
//! - [`BacklogClient::get_issue_attachments`] - attachment metadata
//! - [`BacklogClient::get_issue_attachment`] - one attachment, base64-encoded
//! - [`BacklogClient::get_issue_shared_files`] - shared files linked to an issue
//!
//! Records are kept as the JSON the service returned, so nothing the service
//! sends is lost on the way through. Typed accessors cover the common fields.
//!
//! # Example
//!
//! ```no_run
//! use backlog_api::{BacklogClient, BacklogConfig};
//!
//! # async fn demo() -> backlog_api::Result<()> {
//! let client = BacklogClient::new(BacklogConfig::new("myspace", "api-key"))?;
//! let issue = client.get_issue("PROJ-1").await?;
//! println!("{:?}", issue.summary());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::BacklogClient;
pub use config::BacklogConfig;
pub use error::{BacklogError, Result};
pub use models::{
    Attachment, AttachmentContent, AttachmentList, Comment, CommentList, CommentOrder,
    CommentQuery, Issue, SharedFile, SharedFileList,
};
