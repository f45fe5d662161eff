//! Startup configuration for the server binary.
//!
//! Settings come from command-line flags or, more commonly, from the
//! environment the MCP host launches the server with:
//!
//! ```bash
//! BACKLOG_API_TOKEN=xxxx BACKLOG_SPACE=myspace backlog-mcp
//! ```
//!
//! The API token and space are required. Without them clap prints a
//! diagnostic to stderr and exits with a non-zero status before the server
//! starts reading stdin.

use crate::models::{AttachmentPreview, DEFAULT_PREVIEW_CHARS};
use backlog_api::BacklogConfig;
use backlog_api::config::DEFAULT_DOMAIN;
use clap::Parser;
use clap::builder::{BoolishValueParser, NonEmptyStringValueParser};

/// Backlog MCP server - read-only Backlog issue data over the Model Context Protocol
///
/// Serves MCP over stdin/stdout. Diagnostics are written to stderr and can be
/// tuned with `RUST_LOG`.
#[derive(Parser, Clone)]
#[command(name = "backlog-mcp")]
#[command(author, version, about, long_about = None)]
pub struct ServerArgs {
    /// Backlog API key
    #[arg(
        long,
        env = "BACKLOG_API_TOKEN",
        hide_env_values = true,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub api_token: String,

    /// Backlog space name (the `myspace` in `myspace.backlog.jp`)
    #[arg(long, env = "BACKLOG_SPACE", value_parser = NonEmptyStringValueParser::new())]
    pub space: String,

    /// Domain the space is hosted under
    #[arg(long, env = "BACKLOG_DOMAIN", default_value = DEFAULT_DOMAIN)]
    pub domain: String,

    /// Explicit API host, overriding space and domain (e.g. `https://example.backlog.com`)
    #[arg(long, env = "BACKLOG_BASE_URL")]
    pub base_url: Option<String>,

    /// Number of base64 characters shown for downloaded attachments
    #[arg(long, env = "BACKLOG_ATTACHMENT_PREVIEW_CHARS", default_value_t = DEFAULT_PREVIEW_CHARS)]
    pub attachment_preview_chars: usize,

    /// Return complete attachment data instead of a preview
    ///
    /// The environment variable accepts `true`/`false`, `1`/`0`, `yes`/`no`
    /// and `on`/`off`.
    #[arg(
        long,
        env = "BACKLOG_FULL_ATTACHMENT_DATA",
        value_parser = BoolishValueParser::new()
    )]
    pub full_attachment_data: bool,
}

impl ServerArgs {
    /// Client configuration derived from the arguments.
    #[must_use]
    pub fn backlog_config(&self) -> BacklogConfig {
        let config = BacklogConfig::new(&self.space, &self.api_token).with_domain(&self.domain);
        match &self.base_url {
            Some(base_url) => config.with_base_url(base_url),
            None => config,
        }
    }

    /// Preview policy for attachment downloads.
    #[must_use]
    pub fn attachment_preview(&self) -> AttachmentPreview {
        if self.full_attachment_data {
            AttachmentPreview::Full
        } else {
            AttachmentPreview::Truncate {
                max_chars: self.attachment_preview_chars,
            }
        }
    }
}
