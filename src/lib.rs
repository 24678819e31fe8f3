//! REST Workbench core.
//!
//! The request-building engine of a local, file-backed API client: it turns
//! a stored request template plus layered variables into a concrete HTTP
//! request, exports templates as cURL commands, sends requests and keeps a
//! searchable history.
//!
//! # Architecture
//!
//! - **models**: Templates, variables, environments, resolved requests and responses
//! - **variables**: `{{name}}` interpolation, scope merging and secret resolution
//! - **auth**: Turns auth settings into a header or query credential
//! - **assembler**: Builds a [`ResolvedRequest`](models::ResolvedRequest) from a template
//! - **curl**: Exports templates as cURL commands with credentials redacted
//! - **executor**: The async [`Transport`](executor::Transport) and its reqwest implementation
//! - **history**: JSONL request history with search and pruning
//! - **config**: Global settings singleton
//! - **client**: The send pipeline tying the above together
//!
//! # Request Flow
//!
//! ```text
//! Variable lists (workspace, environment, collection, request)
//!   -> secret resolution -> scope merge -> assemble -> transport -> history
//! ```
//!
//! Everything up to and including assembly is synchronous and pure. The
//! transport is the only async boundary and lives behind the `transport`
//! feature (enabled by default).
//!
//! # Example
//!
//! ```
//! use rest_workbench::assembler::assemble;
//! use rest_workbench::models::{HttpMethod, RequestTemplate, Variable};
//! use rest_workbench::variables::ScopeSet;
//!
//! let template = RequestTemplate::new("Get user", HttpMethod::GET, "{{baseUrl}}/users/{{id}}");
//! let scopes = ScopeSet::from_variables(
//!     &[Variable::new("baseUrl", "https://api.example.com")],
//!     &[],
//!     &[],
//!     &[Variable::new("id", "42")],
//! );
//!
//! let request = assemble(&template, &scopes.merged()).unwrap();
//! assert_eq!(request.url, "https://api.example.com/users/42");
//! ```

pub mod assembler;
pub mod auth;
#[cfg(feature = "transport")]
pub mod client;
pub mod config;
pub mod curl;
#[cfg(feature = "transport")]
pub mod executor;
pub mod history;
pub mod models;
pub mod variables;

pub use assembler::{assemble, AssemblyError};
#[cfg(feature = "transport")]
pub use client::{ClientError, RequestClient, SendContext};
pub use models::{RequestTemplate, ResolvedRequest};
pub use variables::{interpolate, InterpolationError};
