//! Minimal HTTP/1.1 server capturing requests sent by the client.
//!
//! The server answers each accepted connection with the next scripted
//! [`MockResponse`] and forwards the parsed request over a channel. Every
//! response carries `Connection: close` so the client never reuses a socket
//! the server has already closed.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Scripted reply for one request.
#[derive(Clone, Debug)]
pub struct MockResponse {
    pub status: u16,
    pub body: String,
    /// `Content-Length` to advertise when it should differ from the body.
    pub declared_length: Option<usize>,
}

impl MockResponse {
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
            declared_length: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Advertise more body bytes than are sent, then close the socket.
    pub fn truncated(mut self, declared_length: usize) -> Self {
        self.declared_length = Some(declared_length);
        self
    }

    fn render(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status,
            status_text(self.status),
            self.declared_length.unwrap_or(self.body.len()),
            self.body
        )
    }
}

fn status_text(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        301 => "Moved Permanently",
        400 => "Bad Request",
        401 => "Unauthorized",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

#[derive(Debug)]
pub struct CapturedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl CapturedRequest {
    /// Value of header `name` (lowercase).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Request body parsed as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("request body is JSON")
    }

    /// Read one request: request line, headers up to the blank line, then
    /// exactly `Content-Length` body bytes. Header names are lowercased.
    fn read_from(stream: &TcpStream) -> Self {
        let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
        let mut reader = BufReader::new(stream);
        let mut lines = reader.by_ref().lines().map(|line| line.expect("read request head"));

        let request_line = lines.next().unwrap_or_default();
        let mut words = request_line.split_whitespace().map(str::to_owned);
        let method = words.next().unwrap_or_default();
        let path = words.next().unwrap_or_default();

        let headers: Vec<(String, String)> = lines
            .take_while(|line| !line.is_empty())
            .filter_map(|line| {
                let (name, value) = line.split_once(':')?;
                Some((name.trim().to_ascii_lowercase(), value.trim().to_owned()))
            })
            .collect();

        let length = headers
            .iter()
            .find(|(name, _)| name == "content-length")
            .and_then(|(_, value)| value.parse().ok())
            .unwrap_or(0);
        let mut body = vec![0u8; length];
        reader.read_exact(&mut body).expect("read request body");

        Self {
            method,
            path,
            headers,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
    }
}

/// Serve `responses` in order, one per connection.
///
/// Returns the base URL to use as the logger host and a receiver yielding
/// each captured request after its response has been written.
pub fn spawn_mock_server(responses: Vec<MockResponse>) -> (String, mpsc::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener");
    let addr = listener.local_addr().expect("listener has address");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        for response in responses {
            let Ok((mut stream, _)) = listener.accept() else {
                break;
            };
            let captured = CapturedRequest::read_from(&stream);
            let _ = stream.write_all(response.render().as_bytes());
            let _ = stream.flush();
            drop(stream);
            let _ = tx.send(captured);
        }
    });

    (format!("http://{addr}"), rx)
}

/// Host on a port nothing listens on.
pub fn closed_host() -> String {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind ephemeral listener");
    let addr = listener.local_addr().expect("listener has address");
    drop(listener);
    format!("http://{addr}")
}
