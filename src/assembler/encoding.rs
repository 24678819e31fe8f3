//! Query-string and form encoding.
//!
//! Keys and values are encoded with the `application/x-www-form-urlencoded`
//! byte serializer: unreserved characters pass through, spaces become `+`,
//! everything else (including `&`, `=`, `?`, `#` and non-ASCII bytes) is
//! percent-encoded.

use url::form_urlencoded;

/// Encodes one query or form component.
pub fn encode_component(component: &str) -> String {
    form_urlencoded::byte_serialize(component.as_bytes()).collect()
}

/// Encodes pairs as `k=v` joined with `&`, preserving order.
pub fn encode_pairs(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", encode_component(key), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Appends encoded pairs to `url` as a new `?k=v&...` block.
///
/// The block is appended even when `url` already contains a `?`, which
/// yields a second `?` rather than merging with `&`. Existing workspaces rely
/// on that shape, so it is kept as is.
pub fn append_query(url: &str, pairs: &[(String, String)]) -> String {
    if pairs.is_empty() {
        return url.to_string();
    }
    format!("{}?{}", url, encode_pairs(pairs))
}
