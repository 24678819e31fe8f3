//! Data models for request templates, variables and responses.
//!
//! This module contains the core data structures shared by the interpolator,
//! the request assembler, the cURL exporter and the transport.

pub mod environment;
pub mod request;
pub mod resolved;
pub mod response;
pub mod variable;

pub use environment::{Collection, Environment, Workspace, WorkspaceSettings};
pub use request::{
    ApiKeyLocation, AuthConfig, HttpMethod, KeyValue, MultipartKind, MultipartPart,
    RawContentType, RequestBody, RequestTemplate,
};
pub use resolved::ResolvedRequest;
pub use response::HttpResponse;
pub use variable::{SecretRef, Variable};
