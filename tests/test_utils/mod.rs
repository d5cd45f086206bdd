//! Shared helpers for the integration tests.
#![allow(dead_code)]

pub mod mock_server;

pub use mock_server::{CapturedRequest, MockResponse, closed_host, spawn_mock_server};
