//! Builder for [`Logger`](super::Logger).
//!
//! Collects the ingestion host, credentials, tagging strategy, error policy
//! and transport settings, validates them, and produces an immutable
//! logger.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use ureq::Agent;

use crate::ingest::{AuthConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, build_agent};
use crate::tags::{AutoTagger, Tagging};

use super::{ErrorSink, LogSink, Logger};

/// Errors that may occur while building a logger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Invalid user supplied configuration.
    #[error("invalid logger configuration: {0}")]
    InvalidConfig(String),
}

macro_rules! ensure_positive {
    ($value:expr, $field:expr) => {{
        if $value == 0 {
            Err(BuildError::InvalidConfig(format!(
                "{} must be greater than zero",
                $field
            )))
        } else {
            Ok($value)
        }
    }};
}

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Builder for constructing [`Logger`] instances.
#[derive(Clone, Default)]
pub struct LoggerBuilder {
    host: Option<String>,
    auth: AuthConfig,
    default_tags: Option<Vec<String>>,
    tagging: Tagging,
    suppress_errors: bool,
    agent: Option<Agent>,
    sink: Option<Arc<dyn ErrorSink>>,
    connect_timeout_ms: Option<u64>,
    timeout_ms: Option<u64>,
}

impl LoggerBuilder {
    /// Create a new builder with no host configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the ingestion service (required).
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Configure HTTP Basic authentication.
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = AuthConfig::basic(username, password);
        self
    }

    /// Replace the default tags.
    ///
    /// An empty list is still a configured list: entries carry `[]` rather
    /// than the `null` sent when no defaults were ever set.
    pub fn with_default_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Append a single default tag.
    pub fn with_default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tags
            .get_or_insert_with(Vec::new)
            .push(tag.into());
        self
    }

    /// Derive tags per argument with `tagger` instead of using the defaults.
    pub fn with_auto_tagger(mut self, tagger: impl AutoTagger + 'static) -> Self {
        self.tagging = Tagging::Auto(Arc::new(tagger));
        self
    }

    /// Discard delivery failures instead of reporting them.
    pub fn with_suppress_errors(mut self, suppress: bool) -> Self {
        self.suppress_errors = suppress;
        self
    }

    /// Send requests through a caller-owned agent.
    ///
    /// The connect and request timeouts are ignored when an agent is
    /// supplied; they belong to the agent's own configuration.
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Report delivery failures to `sink` rather than the `log` facade.
    pub fn with_sink(mut self, sink: impl ErrorSink + 'static) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    option_setter!(
        #[doc = "Set the connect timeout in milliseconds."]
        with_connect_timeout_ms,
        connect_timeout_ms,
        u64
    );
    option_setter!(
        #[doc = "Set the overall request timeout in milliseconds."]
        with_timeout_ms,
        timeout_ms,
        u64
    );

    /// The configured host, if any.
    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    /// The configured default tags, or `None` if never set.
    pub fn default_tags(&self) -> Option<&[String]> {
        self.default_tags.as_deref()
    }

    fn validate(&self) -> Result<(), BuildError> {
        self.validate_host()?;
        self.validate_timeouts()?;
        Ok(())
    }

    fn validate_host(&self) -> Result<(), BuildError> {
        match &self.host {
            None => Err(BuildError::InvalidConfig(
                "logger requires an ingestion host".into(),
            )),
            Some(host) if host.trim().is_empty() => Err(BuildError::InvalidConfig(
                "host must not be empty".into(),
            )),
            _ => Ok(()),
        }
    }

    fn validate_timeouts(&self) -> Result<(), BuildError> {
        if let Some(timeout) = self.connect_timeout_ms {
            ensure_positive!(timeout, "connect_timeout_ms")?;
        }
        if let Some(timeout) = self.timeout_ms {
            ensure_positive!(timeout, "timeout_ms")?;
        }
        Ok(())
    }

    /// Validate the configuration and construct the logger.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidConfig`] when the host is missing or
    /// blank, or a timeout is zero.
    pub fn build(self) -> Result<Logger, BuildError> {
        self.validate()?;

        let agent = match self.agent {
            Some(agent) => agent,
            None => build_agent(
                self.connect_timeout_ms
                    .map_or(DEFAULT_CONNECT_TIMEOUT, Duration::from_millis),
                self.timeout_ms.map_or(DEFAULT_TIMEOUT, Duration::from_millis),
            ),
        };
        Ok(Logger {
            host: self.host.unwrap_or_default(),
            auth: self.auth,
            default_tags: self.default_tags,
            tagging: self.tagging,
            suppress_errors: self.suppress_errors,
            agent,
            sink: self.sink.unwrap_or_else(|| Arc::new(LogSink)),
        })
    }
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("host", &self.host)
            .field("default_tags", &self.default_tags)
            .field("tagging", &self.tagging)
            .field("suppress_errors", &self.suppress_errors)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("timeout_ms", &self.timeout_ms)
            .finish_non_exhaustive()
    }
}
