//! Client library forwarding application log messages to a Mouseion
//! ingestion service over HTTP.
//!
//! A [`Logger`] turns each `print`, `println` or `printf` call into one
//! timestamped, tagged [`LogEntry`] and posts it synchronously to
//! `{host}/ingest.json`. Delivery failures never reach the caller; they are
//! reported through an [`ErrorSink`] or discarded.
//!
//! ```rust,no_run
//! use mouseion::Logger;
//!
//! let logger = Logger::builder()
//!     .with_host("https://logs.example.com")
//!     .with_basic_auth("api-token", "api-secret")
//!     .with_default_tags(["web"])
//!     .build()
//!     .unwrap();
//! logger.print(&[&"cache miss for key ", &42]);
//! logger.printf("request {} took {}ms", &[&"GET /", &17]);
//! ```

pub mod arg;
pub mod entry;
pub mod file_config;
pub mod format;
pub mod ingest;
pub mod log_compat;
pub mod logger;
mod logging_macros;
pub mod tags;

pub use arg::{LogArg, Shown};
pub use entry::LogEntry;
pub use file_config::{ConfigFileError, load_ini};
pub use format::{format_print, format_printf};
pub use ingest::{AuthConfig, SendError, send};
pub use log_compat::{MouseionLogAdapter, install_global_logger};
pub use logger::{BuildError, DIAGNOSTIC_TARGET, ErrorSink, LogSink, Logger, LoggerBuilder};
pub use tags::{AutoTagger, Tagging, Tags, derive_tags};
