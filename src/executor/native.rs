//! Native HTTP transport using reqwest.

use super::config::ExecutionConfig;
use super::error::TransportError;
use super::Transport;
use crate::models::{HttpMethod, HttpResponse, ResolvedRequest};
use async_trait::async_trait;
use log::{debug, info};
use std::time::Instant;

/// Sends resolved requests with a shared reqwest client.
///
/// The client is built once from an [`ExecutionConfig`]; timeout, redirect
/// and certificate settings apply to every request sent through it.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ExecutionConfig,
}

impl HttpTransport {
    /// Builds a transport for the given execution settings.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the HTTP client cannot be created.
    pub fn new(config: ExecutionConfig) -> Result<Self, TransportError> {
        let redirect = if config.follow_redirects {
            reqwest::redirect::Policy::limited(config.max_redirects as usize)
        } else {
            reqwest::redirect::Policy::none()
        };

        let client = reqwest::Client::builder()
            .timeout(config.timeout_duration())
            .redirect(redirect)
            .danger_accept_invalid_certs(!config.validate_ssl)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| TransportError::Build(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Builds a transport from the global configuration.
    pub fn from_global_config() -> Result<Self, TransportError> {
        Self::new(ExecutionConfig::from_global_config())
    }

    pub fn config(&self) -> &ExecutionConfig {
        &self.config
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::HEAD => reqwest::Method::HEAD,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ResolvedRequest) -> Result<HttpResponse, TransportError> {
        let start_time = Instant::now();

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), &request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        // Explicit Content-Type headers win over the body's own type.
        if let Some(content_type) = &request.content_type {
            if request.header("Content-Type").is_none() {
                builder = builder.header(reqwest::header::CONTENT_TYPE, content_type);
            }
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        debug!(
            "Sending {} request with {} headers",
            request.method,
            request.headers.len()
        );

        let response = builder.send().await.map_err(TransportError::from)?;

        let status = response.status();
        let status_code = status.as_u16();
        let status_text = status.canonical_reason().unwrap_or("Unknown").to_string();
        let final_url = response.url().to_string();

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::InvalidResponse(e.to_string()))?
            .to_vec();

        let duration = start_time.elapsed();
        info!(
            "{} request completed with status {} in {} ms",
            request.method,
            status_code,
            duration.as_millis()
        );

        Ok(HttpResponse {
            status_code,
            status_text,
            headers,
            size: body.len(),
            body,
            duration,
            url: final_url,
        })
    }
}
