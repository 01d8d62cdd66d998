//! Client configuration.

use std::time::Duration;

use crate::error::{Result, TychoError};

/// Default endpoint prefix for the Assistants API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Feature-version header value required by the Assistants beta.
pub const DEFAULT_BETA_VERSION: &str = "assistants=v1";

/// Immutable configuration for a [`Client`](crate::Client).
///
/// Built once, in code or from the environment, and treated as read-only
/// afterwards. There is no process-global state: two clients with different
/// configs coexist without interfering.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Bearer credential attached to every request.
    pub api_key: String,
    /// Endpoint prefix, always treated as ending in `/`.
    pub base_url: String,
    /// Optional `OpenAI-Organization` header value.
    pub organization: Option<String>,
    /// `OpenAI-Beta` header value.
    pub beta_version: String,
    /// Per-request transport timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config with the given API key and defaults for everything else.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            organization: None,
            beta_version: DEFAULT_BETA_VERSION.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    /// Load from environment variables (`OPENAI_API_KEY`, `OPENAI_BASE_URL`,
    /// `OPENAI_ORG_ID`), reading a `.env` file if one is present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| TychoError::Configuration("OPENAI_API_KEY is not set".to_string()))?;

        let mut config = Self::new(api_key);
        if let Ok(url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = url;
        }
        if let Ok(org) = std::env::var("OPENAI_ORG_ID") {
            config.organization = Some(org);
        }
        Ok(config)
    }

    /// Override the endpoint prefix (for proxies and tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the organization header value.
    pub fn with_organization(mut self, organization: impl Into<String>) -> Self {
        self.organization = Some(organization.into());
        self
    }

    /// Override the feature-version header value.
    pub fn with_beta_version(mut self, beta_version: impl Into<String>) -> Self {
        self.beta_version = beta_version.into();
        self
    }

    /// Override the per-request transport timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The endpoint prefix with a guaranteed trailing slash.
    pub(crate) fn base_url_slashed(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }
}
