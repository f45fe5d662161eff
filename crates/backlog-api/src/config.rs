//! Connection settings for a Backlog space.

use crate::error::{BacklogError, Result};
use reqwest::Url;
use std::fmt;

/// Domain used when none is configured.
pub const DEFAULT_DOMAIN: &str = "backlog.jp";

/// Path of the REST API below the space host.
pub const API_PATH: &str = "api/v2";

/// `User-Agent` sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = concat!("backlog-mcp/", env!("CARGO_PKG_VERSION"));

/// Immutable configuration for a [`BacklogClient`](crate::BacklogClient).
#[derive(Clone, PartialEq, Eq)]
pub struct BacklogConfig {
    /// Space (tenant) identifier, the first label of the host name.
    pub space: String,
    /// API key sent as the `apiKey` query parameter.
    pub api_key: String,
    /// Domain the space lives under, e.g. `backlog.jp` or `backlog.com`.
    pub domain: String,
    /// Explicit host URL. Takes precedence over `space` and `domain`.
    pub base_url: Option<String>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
}

impl BacklogConfig {
    /// Create a configuration for `space` on the default domain.
    pub fn new(space: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            space: space.into(),
            api_key: api_key.into(),
            domain: DEFAULT_DOMAIN.to_string(),
            base_url: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Use a different domain than [`DEFAULT_DOMAIN`].
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Point the client at an explicit host, bypassing `space` and `domain`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Host URL without a trailing slash.
    #[must_use]
    pub fn host_url(&self) -> String {
        match &self.base_url {
            Some(base) => base.trim_end_matches('/').to_string(),
            None => format!("https://{}.{}", self.space, self.domain),
        }
    }

    /// Root of the REST API, always ending in `/`.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogError::InvalidUrl`] if the host does not form a valid URL.
    pub fn api_root(&self) -> Result<Url> {
        let raw = format!("{}/{API_PATH}/", self.host_url());
        let url = Url::parse(&raw).map_err(|e| BacklogError::InvalidUrl(format!("{raw}: {e}")))?;
        if url.cannot_be_a_base() {
            return Err(BacklogError::InvalidUrl(raw));
        }
        Ok(url)
    }

    /// Check that the required settings are present and usable.
    ///
    /// # Errors
    ///
    /// Returns [`BacklogError::Config`] if the API key is empty, or if no base
    /// URL is set and the space or domain is not a valid host label.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(BacklogError::Config("API key must not be empty".into()));
        }
        if self.base_url.is_some() {
            return Ok(());
        }
        if self.space.trim().is_empty() {
            return Err(BacklogError::Config("space must not be empty".into()));
        }
        if !self
            .space
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            return Err(BacklogError::Config(format!(
                "space '{}' may only contain ASCII letters, digits and '-'",
                self.space
            )));
        }
        if self.domain.trim().is_empty() || self.domain.contains('/') {
            return Err(BacklogError::Config(format!(
                "domain '{}' is not a host name",
                self.domain
            )));
        }
        Ok(())
    }
}

impl fmt::Debug for BacklogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BacklogConfig")
            .field("space", &self.space)
            .field("api_key", &"<redacted>")
            .field("domain", &self.domain)
            .field("base_url", &self.base_url)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_api_root_uses_space_and_default_domain() {
        let config = BacklogConfig::new("acme", "key");
        assert_eq!(
            config.api_root().unwrap().as_str(),
            "https://acme.backlog.jp/api/v2/"
        );
    }

    #[test]
    fn test_api_root_with_custom_domain() {
        let config = BacklogConfig::new("acme", "key").with_domain("backlog.com");
        assert_eq!(
            config.api_root().unwrap().as_str(),
            "https://acme.backlog.com/api/v2/"
        );
    }

    #[rstest]
    #[case::no_slash("http://127.0.0.1:1234")]
    #[case::trailing_slash("http://127.0.0.1:1234/")]
    fn test_base_url_overrides_space(#[case] base: &str) {
        let config = BacklogConfig::new("ignored", "key").with_base_url(base);
        assert_eq!(
            config.api_root().unwrap().as_str(),
            "http://127.0.0.1:1234/api/v2/"
        );
    }

    #[rstest]
    #[case::empty_key(BacklogConfig::new("acme", ""))]
    #[case::blank_key(BacklogConfig::new("acme", "   "))]
    #[case::empty_space(BacklogConfig::new("", "key"))]
    #[case::dotted_space(BacklogConfig::new("acme.evil.com/x", "key"))]
    #[case::slash_domain(BacklogConfig::new("acme", "key").with_domain("a/b"))]
    fn test_validate_rejects(#[case] config: BacklogConfig) {
        assert!(matches!(config.validate(), Err(BacklogError::Config(_))));
    }

    #[test]
    fn test_validate_accepts_base_url_without_space() {
        let config = BacklogConfig::new("", "key").with_base_url("http://localhost:8080");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = BacklogConfig::new("acme", "super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
