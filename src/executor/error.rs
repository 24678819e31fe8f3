//! Transport error types.
//!
//! Errors that can occur while sending a resolved request and reading the
//! response. An HTTP error status is not an error here: any response that
//! arrives is returned as an [`HttpResponse`](crate::models::HttpResponse).

use thiserror::Error;

/// Errors that can occur during HTTP request execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection failures, DNS resolution errors and other network-level issues.
    #[error("Network error: {0}")]
    Network(String),

    /// The request took longer than the configured timeout.
    #[error("Request timed out")]
    Timeout,

    /// Certificate validation or handshake failure.
    #[error("TLS/SSL error: {0}")]
    Tls(String),

    /// The response could not be read.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The HTTP client or request could not be constructed.
    #[error("Request build error: {0}")]
    Build(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_builder() {
            TransportError::Build(message)
        } else if message.contains("certificate")
            || message.contains("TLS")
            || message.contains("SSL")
        {
            TransportError::Tls(message)
        } else if err.is_body() || err.is_decode() {
            TransportError::InvalidResponse(message)
        } else {
            TransportError::Network(message)
        }
    }
}
