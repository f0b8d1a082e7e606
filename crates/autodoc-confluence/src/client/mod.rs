//! Confluence REST API client.
//!
//! Provides a sync HTTP client for the Confluence Cloud REST API with HTTP
//! Basic authentication (account email and API token).

mod pages;

use std::time::Duration;

use autodoc_config::ConfluenceConfig;
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use ureq::Agent;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_url: String,
    authorization: String,
}

impl ConfluenceClient {
    /// Create client from validated config.
    #[must_use]
    pub fn from_config(config: &ConfluenceConfig) -> Self {
        Self::new(&config.base_url, &config.username, &config.api_token)
    }

    /// Create client for `base_url` authenticating as `username`.
    #[must_use]
    pub fn new(base_url: &str, username: &str, api_token: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_owned(),
            authorization: basic_auth(username, api_token),
        }
    }

    /// Get the API base URL.
    fn api_url(&self) -> String {
        format!("{}/rest/api", self.base_url)
    }
}

/// `Authorization` header value for HTTP Basic authentication.
fn basic_auth(username: &str, api_token: &str) -> String {
    format!(
        "Basic {}",
        BASE64_STANDARD.encode(format!("{username}:{api_token}"))
    )
}
