//! cURL command export.
//!
//! Renders a [`RequestTemplate`](crate::models::RequestTemplate) as a shell
//! command that reproduces it. Export walks the same steps as the
//! [assembler](crate::assembler): same interpolator, same query handling,
//! same auth and body branching. It only ever sees non-secret variables and
//! always redacts credentials, so the output is safe to paste anywhere.
//!
//! # Examples
//!
//! ```
//! use rest_workbench::curl::export;
//! use rest_workbench::models::{AuthConfig, Environment, HttpMethod, RequestTemplate, Variable};
//!
//! let template = RequestTemplate::new("Me", HttpMethod::GET, "{{baseUrl}}/me")
//!     .with_auth(AuthConfig::Bearer { token: "{{token}}".to_string() });
//! let env = Environment::with_variables(
//!     "dev",
//!     vec![Variable::new("baseUrl", "https://api.example.com")],
//! );
//!
//! let curl = export(&template, Some(&env)).unwrap();
//! assert_eq!(
//!     curl,
//!     "curl \\\n  'https://api.example.com/me' \\\n  -H 'Authorization: Bearer <token>'"
//! );
//! ```

pub mod generator;

pub use generator::{export, export_compact, export_with_options, CurlOptions};
