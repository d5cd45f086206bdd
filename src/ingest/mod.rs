//! Delivery of log entries to the Mouseion ingestion endpoint.
//!
//! [`send`] performs exactly one synchronous HTTP POST per entry against
//! `{host}/ingest.json` using a caller-supplied `ureq::Agent`. Nothing is
//! queued or retried.
//!
//! # Response Semantics
//!
//! - **200**: Success. The response body is ignored.
//! - **Anything else**: [`SendError::ServerRejected`], carrying the status
//!   code and the response body read on a best-effort basis. There is no
//!   range check; 201, 204 and redirects are failures.
//! - **Malformed URL or unknown scheme**: [`SendError::RequestConstruction`].
//! - **Network errors**: [`SendError::Transport`].

mod client;
mod config;
mod error;

pub use client::send;
pub use config::{
    AuthConfig, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, INGEST_PATH, build_agent, ingest_url,
};
pub use error::SendError;
