//! Connection settings shared by every request a logger issues.

use std::time::Duration;

use ureq::{Agent, AgentBuilder};

/// Path appended to the configured host.
pub const INGEST_PATH: &str = "/ingest.json";
/// Default connection timeout for agents built by the logger.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
/// Default overall request timeout for agents built by the logger.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Authentication attached to ingestion requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthConfig {
    /// Requests carry no `Authorization` header.
    #[default]
    None,
    /// HTTP Basic authentication with an API token and secret.
    Basic { username: String, password: String },
}

impl AuthConfig {
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Endpoint URL for `host`.
///
/// The host is used as given; a trailing slash is not stripped.
pub fn ingest_url(host: &str) -> String {
    format!("{host}{INGEST_PATH}")
}

/// Build the agent a logger uses when the caller does not supply one.
///
/// Redirects are disabled so a 3xx response is reported rather than
/// followed.
pub fn build_agent(connect_timeout: Duration, timeout: Duration) -> Agent {
    AgentBuilder::new()
        .timeout_connect(connect_timeout)
        .timeout(timeout)
        .redirects(0)
        .build()
}
