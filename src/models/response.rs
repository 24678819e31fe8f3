//! HTTP response data model.
//!
//! This is what the transport hands back to the caller after a request
//! completes, regardless of status code.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Represents an HTTP response received from a server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// Canonical reason phrase for the status code.
    pub status_text: String,

    /// Response headers in the order the server sent them.
    pub headers: Vec<(String, String)>,

    /// Response body as raw bytes.
    ///
    /// Kept as `Vec<u8>` so binary responses survive untouched.
    pub body: Vec<u8>,

    /// Wall-clock time from send to the last body byte.
    pub duration: Duration,

    /// Body size in bytes.
    pub size: usize,

    /// Final URL after redirects.
    pub url: String,
}

impl HttpResponse {
    /// Creates an empty response with the given status.
    pub fn new(status_code: u16, status_text: impl Into<String>) -> Self {
        Self {
            status_code,
            status_text: status_text.into(),
            headers: Vec::new(),
            body: Vec::new(),
            duration: Duration::ZERO,
            size: 0,
            url: String::new(),
        }
    }

    /// `true` if status code is in the 200-299 range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status_code)
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status_code)
    }

    /// Gets the first value of a header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Sets the body and keeps `size` in sync with it.
    pub fn set_body(&mut self, body: Vec<u8>) {
        self.size = body.len();
        self.body = body;
    }

    /// Body decoded as UTF-8, or `None` for binary content.
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Pretty-printed JSON body, or `None` if the body is not JSON.
    ///
    /// Object keys come out sorted since `serde_json::Value` maps are ordered.
    pub fn pretty_json(&self) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(&self.body).ok()?;
        serde_json::to_string_pretty(&value).ok()
    }

    /// Duration formatted for display: `"245 ms"` below one second, `"1.50 s"` above.
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration)
    }

    /// Size formatted for display using decimal units.
    pub fn formatted_size(&self) -> String {
        format_size(self.size)
    }
}

pub(crate) fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 1.0 {
        format!("{:.0} ms", secs * 1000.0)
    } else {
        format!("{:.2} s", secs)
    }
}

pub(crate) fn format_size(size: usize) -> String {
    const KB: f64 = 1000.0;
    const MB: f64 = KB * 1000.0;

    let bytes = size as f64;
    if bytes < KB {
        format!("{} bytes", size)
    } else if bytes < MB {
        format!("{:.1} KB", bytes / KB)
    } else {
        format!("{:.1} MB", bytes / MB)
    }
}
