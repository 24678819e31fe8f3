//! HTTP authentication module.
//!
//! Turns an [`AuthConfig`] into the concrete credential a request carries:
//! either a header or an extra query parameter. Credential fields are
//! templates and are interpolated like every other field.

pub mod basic;
pub mod bearer;

use crate::models::{ApiKeyLocation, AuthConfig};
use crate::variables::{interpolate, InterpolationError};
use std::collections::HashMap;

/// Placeholder shown instead of a bearer token in exported commands.
pub const REDACTED_TOKEN: &str = "<token>";
/// Placeholder shown instead of a basic-auth password in exported commands.
pub const REDACTED_PASSWORD: &str = "<password>";
/// Placeholder shown instead of an API key value in exported commands.
pub const REDACTED_API_KEY: &str = "<api-key>";

/// Where a resolved credential goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthPlacement {
    /// Sent as a request header.
    Header { name: String, value: String },
    /// Appended to the query string after the template's own parameters.
    Query { name: String, value: String },
}

/// Resolves the credential for `auth`, interpolating every credential field.
///
/// - `None` adds nothing.
/// - `Bearer` adds `Authorization: Bearer <token>` unless the token resolves
///   to an empty string.
/// - `Basic` always adds `Authorization: Basic base64(user:pass)`, even when
///   both parts are empty.
/// - `ApiKey` adds a header or query parameter named by the resolved key.
///   A key that resolves to an empty name adds nothing.
pub fn resolve_auth(
    auth: &AuthConfig,
    variables: &HashMap<String, String>,
) -> Result<Option<AuthPlacement>, InterpolationError> {
    match auth {
        AuthConfig::None => Ok(None),
        AuthConfig::Bearer { token } => {
            let token = interpolate(token, variables)?;
            if !bearer::should_send(&token) {
                return Ok(None);
            }
            Ok(Some(AuthPlacement::Header {
                name: "Authorization".to_string(),
                value: bearer::bearer_token(&token),
            }))
        }
        AuthConfig::Basic { username, password } => {
            let username = interpolate(username, variables)?;
            let password = interpolate(password, variables)?;
            Ok(Some(AuthPlacement::Header {
                name: "Authorization".to_string(),
                value: basic::basic_auth(&username, &password),
            }))
        }
        AuthConfig::ApiKey {
            key,
            value,
            location,
        } => {
            let name = interpolate(key, variables)?;
            let value = interpolate(value, variables)?;
            if name.is_empty() {
                return Ok(None);
            }
            Ok(Some(match location {
                ApiKeyLocation::Header => AuthPlacement::Header { name, value },
                ApiKeyLocation::Query => AuthPlacement::Query { name, value },
            }))
        }
    }
}
