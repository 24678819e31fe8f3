//! Fully resolved request descriptor.

use super::request::HttpMethod;
use serde::{Deserialize, Serialize};

/// A concrete, transport-ready request with every placeholder substituted and
/// every auth/body branch materialized.
///
/// This is the only representation the transport accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRequest {
    pub method: HttpMethod,

    /// Final URL including the appended query string.
    pub url: String,

    /// Header pairs in send order. Repeated names are kept as separate entries.
    pub headers: Vec<(String, String)>,

    pub body: Option<Vec<u8>>,

    /// `Content-Type` implied by the body kind, if any.
    pub content_type: Option<String>,
}

impl ResolvedRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            content_type: None,
        }
    }

    /// Returns the first header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns all values for the given header name (case-insensitive).
    pub fn header_values<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Body as UTF-8 text, if present and valid.
    pub fn body_text(&self) -> Option<&str> {
        self.body
            .as_deref()
            .and_then(|bytes| std::str::from_utf8(bytes).ok())
    }
}
