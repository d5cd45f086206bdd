//! Single-attempt delivery over a shared `ureq` agent.

use std::io::Read;

use base64::{Engine, engine::general_purpose::STANDARD as BASE64_STANDARD};
use log::debug;
use ureq::{Agent, ErrorKind, Request, Response};

use crate::entry::LogEntry;
use crate::tags::Tags;

use super::{
    config::{AuthConfig, ingest_url},
    error::SendError,
};

/// Status code the ingestion service returns for an accepted entry.
const STATUS_ACCEPTED: u16 = 200;

/// Deliver one entry to `{host}/ingest.json`.
///
/// The entry is stamped with the current time, encoded as JSON and posted
/// once. Only a 200 response counts as success.
///
/// # Errors
///
/// * [`SendError::Serialization`] - the entry could not be encoded
/// * [`SendError::RequestConstruction`] - `host` does not form a valid URL
/// * [`SendError::Transport`] - the service could not be reached
/// * [`SendError::ServerRejected`] - the service answered with another status
pub fn send(
    agent: &Agent,
    host: &str,
    auth: &AuthConfig,
    text: &str,
    tags: Tags<'_>,
) -> Result<(), SendError> {
    let entry = LogEntry::now(text, tags);
    let payload = entry.to_json()?;
    let url = ingest_url(host);

    let request = apply_auth(agent.post(&url), auth).set("Content-Type", "application/json");
    match request.send_string(&payload) {
        Ok(response) => classify_response(response.status(), response),
        Err(ureq::Error::Status(status, response)) => classify_response(status, response),
        Err(ureq::Error::Transport(transport)) => Err(transport_error(url, transport)),
    }
}

fn apply_auth(req: Request, auth: &AuthConfig) -> Request {
    match auth {
        AuthConfig::None => req,
        AuthConfig::Basic { username, password } => {
            let encoded = basic_credentials(username, password);
            req.set("Authorization", &format!("Basic {encoded}"))
        }
    }
}

/// Base64 `username:password` pair for the Basic scheme.
fn basic_credentials(username: &str, password: &str) -> String {
    BASE64_STANDARD.encode(format!("{username}:{password}"))
}

fn classify_response(status: u16, response: Response) -> Result<(), SendError> {
    if status == STATUS_ACCEPTED {
        debug!("log entry accepted by {}", response.get_url());
        return Ok(());
    }
    Err(SendError::ServerRejected {
        status,
        body: read_body(response),
    })
}

/// Read the response body, yielding an empty string if reading fails.
fn read_body(response: Response) -> String {
    let mut bytes = Vec::new();
    match response.into_reader().read_to_end(&mut bytes) {
        Ok(_) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(_) => String::new(),
    }
}

fn transport_error(url: String, transport: ureq::Transport) -> SendError {
    match transport.kind() {
        ErrorKind::InvalidUrl | ErrorKind::UnknownScheme => SendError::RequestConstruction {
            url,
            message: transport.to_string(),
        },
        _ => SendError::Transport {
            url,
            source: Box::new(transport),
        },
    }
}
