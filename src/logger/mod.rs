//! Core logger implementation for the Mouseion client.
//!
//! A [`Logger`] holds an immutable configuration and turns each `print`,
//! `println` or `printf` call into exactly one synchronous delivery. The
//! call blocks until the request completes and never surfaces a failure to
//! its caller: failures go to the configured [`ErrorSink`] or are dropped
//! when error suppression is enabled.

mod builder;
mod sink;

use std::fmt;
use std::sync::Arc;

use ureq::Agent;

use crate::arg::LogArg;
use crate::format::{format_print, format_printf};
use crate::ingest::{AuthConfig, SendError, send};
use crate::tags::{Tagging, Tags, derive_tags};

pub use builder::{BuildError, LoggerBuilder};
pub use sink::{DIAGNOSTIC_TARGET, ErrorSink, LogSink};

/// Client forwarding log messages to a Mouseion ingestion service.
///
/// The logger is `Send + Sync` and holds no mutable state, so one instance
/// can be shared between threads. Concurrent calls race at the transport;
/// calls from one thread are delivered in order.
#[derive(Clone)]
pub struct Logger {
    host: String,
    auth: AuthConfig,
    default_tags: Option<Vec<String>>,
    tagging: Tagging,
    suppress_errors: bool,
    agent: Agent,
    sink: Arc<dyn ErrorSink>,
}

impl Logger {
    /// Start building a logger.
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Create a logger for `host` with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidConfig`] if `host` is blank.
    pub fn new(host: impl Into<String>) -> Result<Self, BuildError> {
        LoggerBuilder::new().with_host(host).build()
    }

    /// Send the concatenated arguments as one entry.
    pub fn print(&self, args: &[&dyn LogArg]) {
        self.report(self.try_print(args));
    }

    /// Alias of [`print`](Self::print); no newline is appended.
    pub fn println(&self, args: &[&dyn LogArg]) {
        self.print(args);
    }

    /// Send `format` with `args` substituted as one entry.
    pub fn printf(&self, format: &str, args: &[&dyn LogArg]) {
        self.report(self.try_printf(format, args));
    }

    /// Like [`print`](Self::print) but hands the outcome to the caller
    /// instead of the error sink.
    pub fn try_print(&self, args: &[&dyn LogArg]) -> Result<(), SendError> {
        self.deliver(&format_print(args), args)
    }

    /// Like [`printf`](Self::printf) but hands the outcome to the caller
    /// instead of the error sink.
    pub fn try_printf(&self, format: &str, args: &[&dyn LogArg]) -> Result<(), SendError> {
        self.deliver(&format_printf(format, args), args)
    }

    /// Tags an entry logged with `args` would carry.
    pub fn derive_tags(&self, args: &[&dyn LogArg]) -> Tags<'_> {
        derive_tags(self.default_tags.as_deref(), &self.tagging, args)
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn auth(&self) -> &AuthConfig {
        &self.auth
    }

    /// The configured default tags, or `None` if never set.
    pub fn default_tags(&self) -> Option<&[String]> {
        self.default_tags.as_deref()
    }

    pub fn suppress_errors(&self) -> bool {
        self.suppress_errors
    }

    fn deliver(&self, text: &str, args: &[&dyn LogArg]) -> Result<(), SendError> {
        send(
            &self.agent,
            &self.host,
            &self.auth,
            text,
            self.derive_tags(args),
        )
    }

    fn report(&self, result: Result<(), SendError>) {
        if let Err(err) = result
            && !self.suppress_errors
        {
            self.sink.report(&err);
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("host", &self.host)
            .field("default_tags", &self.default_tags)
            .field("tagging", &self.tagging)
            .field("suppress_errors", &self.suppress_errors)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use rstest::{fixture, rstest};
    use std::net::TcpListener;

    /// Host on a port nothing listens on.
    fn closed_host() -> String {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener");
        let addr = listener.local_addr().expect("listener has address");
        drop(listener);
        format!("http://{addr}")
    }

    #[derive(Clone, Default)]
    struct CollectingSink {
        reports: Arc<Mutex<Vec<String>>>,
    }

    impl CollectingSink {
        fn collected(&self) -> Vec<String> {
            self.reports.lock().clone()
        }
    }

    impl ErrorSink for CollectingSink {
        fn report(&self, error: &SendError) {
            self.reports.lock().push(error.to_string());
        }
    }

    #[fixture]
    fn sink() -> CollectingSink {
        CollectingSink::default()
    }

    fn unreachable_logger(sink: &CollectingSink, suppress: bool) -> Logger {
        Logger::builder()
            .with_host(closed_host())
            .with_connect_timeout_ms(500)
            .with_suppress_errors(suppress)
            .with_sink(sink.clone())
            .build()
            .expect("valid configuration")
    }

    #[rstest]
    fn failure_is_reported_once(sink: CollectingSink) {
        let logger = unreachable_logger(&sink, false);
        logger.print(&[&"lost"]);
        assert_eq!(sink.collected().len(), 1);
    }

    #[rstest]
    fn suppressed_failure_is_not_reported(sink: CollectingSink) {
        let logger = unreachable_logger(&sink, true);
        logger.print(&[&"lost"]);
        logger.println(&[&"lost"]);
        logger.printf("{}", &[&"lost"]);
        assert!(sink.collected().is_empty());
    }

    #[rstest]
    fn each_call_reports_its_own_failure(sink: CollectingSink) {
        let logger = unreachable_logger(&sink, false);
        logger.print(&[&"one"]);
        logger.println(&[&"two"]);
        logger.printf("{}", &[&"three"]);
        assert_eq!(sink.collected().len(), 3);
    }

    #[rstest]
    fn try_print_surfaces_transport_error(sink: CollectingSink) {
        let logger = unreachable_logger(&sink, false);
        let err = logger.try_print(&[&"lost"]).expect_err("nothing is listening");
        assert!(matches!(err, SendError::Transport { .. }), "got {err:?}");
        assert!(sink.collected().is_empty());
    }

    #[rstest]
    fn new_rejects_blank_host() {
        assert!(Logger::new(" ").is_err());
        assert!(Logger::new("http://localhost").is_ok());
    }

    #[rstest]
    fn debug_hides_credentials() {
        let logger = Logger::builder()
            .with_host("http://localhost")
            .with_basic_auth("token", "hunter2")
            .build()
            .expect("valid configuration");
        let rendered = format!("{logger:?}");
        assert!(rendered.contains("http://localhost"));
        assert!(!rendered.contains("hunter2"));
    }
}
