//! Bearer token authentication (RFC 6750).

/// Formats a token into a Bearer authentication header value.
///
/// # Examples
///
/// ```
/// use rest_workbench::auth::bearer::bearer_token;
///
/// assert_eq!(bearer_token("abc123xyz"), "Bearer abc123xyz");
/// ```
pub fn bearer_token(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Whether a resolved token should produce a header at all.
///
/// An empty token would yield a malformed `Authorization: Bearer ` header, so
/// it produces nothing instead.
pub fn should_send(token: &str) -> bool {
    !token.is_empty()
}
