//! Basic HTTP authentication implementation.
//!
//! Encodes credentials according to RFC 7617.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encodes username and password into a Basic authentication header value.
///
/// The credentials are joined with a colon, base64-encoded and prefixed with
/// `"Basic "`. Empty usernames and passwords are encoded like any other value.
///
/// # Examples
///
/// ```
/// use rest_workbench::auth::basic::basic_auth;
///
/// let auth_header = basic_auth("user", "pass123");
/// assert_eq!(auth_header, "Basic dXNlcjpwYXNzMTIz");
/// ```
pub fn basic_auth(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    let encoded = STANDARD.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}
