//! HTTP request executor.
//!
//! The [`Transport`] trait is the only async boundary in the crate: it takes
//! a fully [`ResolvedRequest`] and returns the server's response. Everything
//! before it (interpolation, assembly) is synchronous and pure.
//!
//! There is no retry. Cancellation is done by dropping the returned future.

pub mod config;
pub mod error;
pub mod native;

pub use config::ExecutionConfig;
pub use error::TransportError;
pub use native::HttpTransport;

use crate::models::{HttpResponse, ResolvedRequest};
use async_trait::async_trait;

/// Sends resolved requests over the network.
///
/// Any response that arrives, whatever its status code, is `Ok`. Errors are
/// reserved for requests that produced no response at all.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ResolvedRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: &ResolvedRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request).await
    }
}
