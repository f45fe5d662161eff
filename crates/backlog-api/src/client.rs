//! HTTP client for the Backlog REST API.

use crate::config::BacklogConfig;
use crate::error::{BacklogError, Result};
use crate::models::{
    Attachment, AttachmentContent, AttachmentList, Comment, CommentList, CommentQuery, Issue,
    SharedFile, SharedFileList,
};
use reqwest::{Client as HttpClient, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Read-only Backlog client.
///
/// Holds only immutable configuration and a connection pool, so clones are
/// cheap and can be used from concurrent tasks.
#[derive(Clone)]
pub struct BacklogClient {
    http: HttpClient,
    config: BacklogConfig,
    api_root: Url,
}

impl BacklogClient {
    /// Create a client for the configured space.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogError::Config`] or [`BacklogError::InvalidUrl`] if the
    /// configuration is incomplete or does not form a valid URL.
    pub fn new(config: BacklogConfig) -> Result<Self> {
        config.validate()?;
        let api_root = config.api_root()?;
        let http = HttpClient::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| BacklogError::Config(e.to_string()))?;

        debug!(api_root = %api_root, "Created Backlog client");
        Ok(Self {
            http,
            config,
            api_root,
        })
    }

    /// The configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &BacklogConfig {
        &self.config
    }

    /// Fetch a single issue.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogError::Api`] on a non-2xx response or transport
    /// failure, and [`BacklogError::Json`] if the body is not JSON.
    pub async fn get_issue(&self, issue_id_or_key: &str) -> Result<Issue> {
        self.get_json(&["issues", issue_id_or_key], &[]).await
    }

    /// List comments on an issue. Only the set fields of `query` are sent.
    ///
    /// # Errors
    ///
    /// See [`BacklogClient::get_issue`].
    pub async fn get_issue_comments(
        &self,
        issue_id_or_key: &str,
        query: &CommentQuery,
    ) -> Result<CommentList> {
        let comments: Vec<Comment> = self
            .get_json(&["issues", issue_id_or_key, "comments"], &query.to_pairs())
            .await?;
        Ok(CommentList { comments })
    }

    /// List attachment metadata of an issue.
    ///
    /// # Errors
    ///
    /// See [`BacklogClient::get_issue`].
    pub async fn get_issue_attachments(&self, issue_id_or_key: &str) -> Result<AttachmentList> {
        let attachments: Vec<Attachment> = self
            .get_json(&["issues", issue_id_or_key, "attachments"], &[])
            .await?;
        Ok(AttachmentList { attachments })
    }

    /// Download one attachment and base64-encode its bytes.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogError::Api`] on a non-2xx response or if the
    /// connection fails while the body is read.
    pub async fn get_issue_attachment(
        &self,
        issue_id_or_key: &str,
        attachment_id: &str,
    ) -> Result<AttachmentContent> {
        let response = self
            .send(&["issues", issue_id_or_key, "attachments", attachment_id], &[])
            .await?;
        let bytes = response.bytes().await?;
        debug!(size = bytes.len(), "Downloaded attachment");
        Ok(AttachmentContent::from_bytes(&bytes))
    }

    /// List shared files linked to an issue.
    ///
    /// # Errors
    ///
    /// See [`BacklogClient::get_issue`].
    pub async fn get_issue_shared_files(&self, issue_id_or_key: &str) -> Result<SharedFileList> {
        let shared_files: Vec<SharedFile> = self
            .get_json(&["issues", issue_id_or_key, "sharedFiles"], &[])
            .await?;
        Ok(SharedFileList { shared_files })
    }

    async fn get_json<T>(&self, segments: &[&str], query: &[(&'static str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self.send(segments, query).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn send(&self, segments: &[&str], query: &[(&'static str, String)]) -> Result<Response> {
        let url = self.endpoint(segments)?;
        let path = url.path().to_string();
        debug!(method = "GET", path = %path, "Sending Backlog request");

        let response = self
            .http
            .get(url)
            .query(&[("apiKey", self.config.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(|e| {
                let e = e.without_url();
                warn!(path = %path, error = %e, "Backlog request failed");
                BacklogError::from(e)
            })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            warn!(path = %path, status = status.as_u16(), "Backlog returned an error status");
            Err(BacklogError::from_status(status))
        }
    }

    /// Append percent-encoded path segments to the API root.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.api_root.clone();
        url.path_segments_mut()
            .map_err(|()| BacklogError::InvalidUrl(self.api_root.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl std::fmt::Debug for BacklogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BacklogClient")
            .field("config", &self.config)
            .field("api_root", &self.api_root.as_str())
            .finish_non_exhaustive()
    }
}
