//! INI configuration for loggers.
//!
//! Reads a `[mouseion]` section with the `rust-ini` crate and turns it into
//! a [`LoggerBuilder`]:
//!
//! ```ini
//! [mouseion]
//! host = https://logs.example.com
//! username = api-token
//! password = api-secret
//! default_tags = web, eu-west
//! suppress_errors = false
//! connect_timeout_ms = 2000
//! timeout_ms = 10000
//! ```
//!
//! Unknown keys are ignored so one file can carry settings for other
//! components.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

use ini::Ini;
use thiserror::Error;

use crate::logger::LoggerBuilder;

/// Section holding the logger settings.
pub const SECTION: &str = "mouseion";

/// Errors raised while loading an INI configuration.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("{path} doesn't exist")]
    NotFound { path: String },
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("{path} is an empty file")]
    Empty { path: String },
    #[error("{path} is invalid: {message}")]
    Parse { path: String, message: String },
    #[error("{path} has no [mouseion] section")]
    MissingSection { path: String },
    #[error("{path}: [mouseion] requires `{key}`")]
    MissingKey { path: String, key: &'static str },
    #[error("{path}: invalid value for `{key}`: {value:?}")]
    InvalidValue {
        path: String,
        key: &'static str,
        value: String,
    },
}

/// Load logger settings from the INI file at `path`.
///
/// # Errors
///
/// Returns a [`ConfigFileError`] if the file cannot be read, is empty or
/// malformed, lacks the `[mouseion]` section or `host` key, or carries a
/// value that does not parse.
pub fn load_ini(path: impl AsRef<Path>) -> Result<LoggerBuilder, ConfigFileError> {
    let path = path.as_ref();
    let name = path.display().to_string();
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            return Err(ConfigFileError::NotFound { path: name });
        }
        Err(source) => return Err(ConfigFileError::Io { path: name, source }),
    };
    parse_ini(&name, &text)
}

/// Parse logger settings from INI `text`; `source` names it in errors.
///
/// # Errors
///
/// See [`load_ini`].
pub fn parse_ini(source: &str, text: &str) -> Result<LoggerBuilder, ConfigFileError> {
    if text.trim().is_empty() {
        return Err(ConfigFileError::Empty {
            path: source.to_owned(),
        });
    }
    let ini = Ini::load_from_str(text).map_err(|err| ConfigFileError::Parse {
        path: source.to_owned(),
        message: err.to_string(),
    })?;
    let section = ini
        .section(Some(SECTION))
        .ok_or_else(|| ConfigFileError::MissingSection {
            path: source.to_owned(),
        })?;

    let invalid = |key: &'static str, value: &str| ConfigFileError::InvalidValue {
        path: source.to_owned(),
        key,
        value: value.to_owned(),
    };

    let host = section.get("host").ok_or_else(|| ConfigFileError::MissingKey {
        path: source.to_owned(),
        key: "host",
    })?;
    let mut builder = LoggerBuilder::new().with_host(host);

    let username = section.get("username");
    let password = section.get("password");
    if username.is_some() || password.is_some() {
        builder = builder.with_basic_auth(username.unwrap_or_default(), password.unwrap_or_default());
    }
    if let Some(tags) = section.get("default_tags") {
        builder = builder.with_default_tags(split_tags(tags));
    }
    if let Some(value) = section.get("suppress_errors") {
        let suppress = parse_bool(value).ok_or_else(|| invalid("suppress_errors", value))?;
        builder = builder.with_suppress_errors(suppress);
    }
    if let Some(value) = section.get("connect_timeout_ms") {
        let ms = value
            .trim()
            .parse()
            .map_err(|_| invalid("connect_timeout_ms", value))?;
        builder = builder.with_connect_timeout_ms(ms);
    }
    if let Some(value) = section.get("timeout_ms") {
        let ms = value
            .trim()
            .parse()
            .map_err(|_| invalid("timeout_ms", value))?;
        builder = builder.with_timeout_ms(ms);
    }
    Ok(builder)
}

impl LoggerBuilder {
    /// Builder populated from the INI file at `path`.
    ///
    /// # Errors
    ///
    /// See [`load_ini`].
    pub fn from_ini_file(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        load_ini(path)
    }

    /// Builder populated from INI `text`.
    ///
    /// # Errors
    ///
    /// See [`load_ini`].
    pub fn from_ini_str(text: &str) -> Result<Self, ConfigFileError> {
        parse_ini("<string>", text)
    }
}

fn split_tags(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .collect()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
