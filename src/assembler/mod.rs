//! Request assembly.
//!
//! Builds a concrete [`ResolvedRequest`] from a [`RequestTemplate`] and a
//! merged variable map. Every templated field goes through the same
//! interpolator. Assembly is pure and deterministic: the same template and
//! variables always produce byte-identical output, and the template is only
//! ever borrowed immutably.
//!
//! # Assembly Order
//!
//! 1. URL
//! 2. Query parameters (enabled, non-empty key), appended as `?k=v&...`
//! 3. Headers (enabled, non-empty key), order and duplicates preserved
//! 4. Auth (header, or query parameter after the template's own)
//! 5. Body and its content type
//! 6. Final URL validation

pub mod encoding;
pub mod error;

pub use error::AssemblyError;

use crate::auth::{resolve_auth, AuthPlacement};
use crate::models::{KeyValue, RequestBody, RequestTemplate, ResolvedRequest};
use crate::variables::{find_unresolved, interpolate, InterpolationError};
use log::debug;
use std::collections::{HashMap, HashSet};

/// `Content-Type` sent with url-encoded form bodies.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// Assembles a transport-ready request from a template.
///
/// # Errors
///
/// - [`AssemblyError::Interpolation`] if any field fails to interpolate
/// - [`AssemblyError::UnsupportedBody`] for multipart bodies
/// - [`AssemblyError::InvalidUrl`] if the final URL is not an absolute http(s) URL
///
/// # Examples
///
/// ```
/// use rest_workbench::assembler::assemble;
/// use rest_workbench::models::{AuthConfig, HttpMethod, RequestTemplate};
/// use std::collections::HashMap;
///
/// let template = RequestTemplate::new("List users", HttpMethod::GET, "{{baseUrl}}/users")
///     .with_query_param("page", "{{page}}")
///     .with_auth(AuthConfig::Bearer { token: "{{token}}".to_string() });
///
/// let mut vars = HashMap::new();
/// vars.insert("baseUrl".to_string(), "https://api.example.com".to_string());
/// vars.insert("page".to_string(), "2".to_string());
/// vars.insert("token".to_string(), "abc".to_string());
///
/// let request = assemble(&template, &vars).unwrap();
/// assert_eq!(request.url, "https://api.example.com/users?page=2");
/// assert_eq!(request.header("Authorization"), Some("Bearer abc"));
/// ```
pub fn assemble(
    template: &RequestTemplate,
    variables: &HashMap<String, String>,
) -> Result<ResolvedRequest, AssemblyError> {
    let url = interpolate(&template.url, variables)?;

    let mut query = resolve_pairs(&template.query_params, variables)?;
    let mut headers = resolve_headers(&template.headers, variables)?;

    match resolve_auth(&template.auth, variables)? {
        Some(AuthPlacement::Header { name, value }) => headers.push((name, value)),
        Some(AuthPlacement::Query { name, value }) => query.push((name, value)),
        None => {}
    }

    let (body, content_type) = resolve_body(&template.body, variables)?;

    let url = encoding::append_query(&url, &query);
    validate_url(&url)?;

    debug!(
        "Assembled {} {} ({} headers, body: {})",
        template.method,
        template.url,
        headers.len(),
        template.body.kind()
    );

    Ok(ResolvedRequest {
        method: template.method,
        url,
        headers,
        body,
        content_type,
    })
}

/// Filters rows to enabled, non-empty-key entries and interpolates both sides.
///
/// The empty-key check applies to the template key, before interpolation.
fn resolve_pairs(
    rows: &[KeyValue],
    variables: &HashMap<String, String>,
) -> Result<Vec<(String, String)>, InterpolationError> {
    rows.iter()
        .filter(|row| row.is_active())
        .map(|row| {
            Ok((
                interpolate(&row.key, variables)?,
                interpolate(&row.value, variables)?,
            ))
        })
        .collect()
}

/// Like [`resolve_pairs`], but also drops headers whose name interpolates to
/// nothing, since no transport accepts an empty header name.
fn resolve_headers(
    rows: &[KeyValue],
    variables: &HashMap<String, String>,
) -> Result<Vec<(String, String)>, InterpolationError> {
    let mut headers = resolve_pairs(rows, variables)?;
    headers.retain(|(name, _)| {
        let keep = !name.trim().is_empty();
        if !keep {
            debug!("Skipping header whose name resolved to empty");
        }
        keep
    });
    Ok(headers)
}

fn resolve_body(
    body: &RequestBody,
    variables: &HashMap<String, String>,
) -> Result<(Option<Vec<u8>>, Option<String>), AssemblyError> {
    match body {
        RequestBody::None => Ok((None, None)),
        RequestBody::Raw {
            content,
            content_type,
        } => {
            let content = interpolate(content, variables)?;
            Ok((
                Some(content.into_bytes()),
                Some(content_type.mime_type().to_string()),
            ))
        }
        RequestBody::FormUrlEncoded { fields } => {
            let fields = resolve_pairs(fields, variables)?;
            let encoded = encoding::encode_pairs(&fields);
            Ok((Some(encoded.into_bytes()), Some(FORM_URLENCODED.to_string())))
        }
        RequestBody::Multipart { parts } => Err(AssemblyError::UnsupportedBody {
            kind: body.kind().to_string(),
            parts: parts.len(),
        }),
    }
}

fn validate_url(url: &str) -> Result<(), AssemblyError> {
    let parsed = url::Url::parse(url).map_err(|_| AssemblyError::InvalidUrl(url.to_string()))?;

    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(()),
        _ => Err(AssemblyError::InvalidUrl(url.to_string())),
    }
}

/// Interpolated URL for live previews, falling back to the raw template URL
/// when interpolation fails.
pub fn preview_url(template: &RequestTemplate, variables: &HashMap<String, String>) -> String {
    interpolate(&template.url, variables).unwrap_or_else(|_| template.url.clone())
}

/// Placeholder names in the URL, enabled query parameters and enabled headers
/// that are not in `available`.
///
/// Each name is reported once, in order of first appearance.
pub fn unresolved_variables(
    template: &RequestTemplate,
    available: &HashSet<String>,
) -> Vec<String> {
    let rows = template
        .query_params
        .iter()
        .chain(template.headers.iter())
        .filter(|row| row.enabled)
        .flat_map(|row| [row.key.as_str(), row.value.as_str()]);

    let mut seen = HashSet::new();
    std::iter::once(template.url.as_str())
        .chain(rows)
        .flat_map(|field| find_unresolved(field, available))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ApiKeyLocation, AuthConfig, HttpMethod, MultipartKind, MultipartPart, RawContentType,
    };

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn get(url: &str) -> RequestTemplate {
        RequestTemplate::new("test", HttpMethod::GET, url)
    }

    #[test]
    fn test_plain_get() {
        let request = assemble(&get("https://example.com/users"), &HashMap::new()).unwrap();
        assert_eq!(request.method, HttpMethod::GET);
        assert_eq!(request.url, "https://example.com/users");
        assert!(request.headers.is_empty());
        assert_eq!(request.body, None);
        assert_eq!(request.content_type, None);
    }

    #[test]
    fn test_query_params_interpolated_and_encoded() {
        let mut template = get("{{base}}/search")
            .with_query_param("q", "{{term}}")
            .with_query_param("", "dropped");
        template
            .query_params
            .push(KeyValue::disabled("debug", "true"));

        let v = vars(&[("base", "https://example.com"), ("term", "a&b c")]);
        let request = assemble(&template, &v).unwrap();
        assert_eq!(request.url, "https://example.com/search?q=a%26b+c");
    }

    #[test]
    fn test_query_appended_even_with_existing_question_mark() {
        let template = get("https://example.com/x?a=1").with_query_param("b", "2");
        let request = assemble(&template, &HashMap::new()).unwrap();
        assert_eq!(request.url, "https://example.com/x?a=1?b=2");
    }

    #[test]
    fn test_headers_order_and_duplicates() {
        let mut template = get("https://example.com")
            .with_header("Accept", "application/json")
            .with_header("X-Tag", "{{one}}")
            .with_header("X-Tag", "two");
        template.headers.push(KeyValue::disabled("X-Debug", "1"));
        template.headers.push(KeyValue::new("", "no-name"));

        let request = assemble(&template, &vars(&[("one", "1")])).unwrap();
        assert_eq!(
            request.headers,
            vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("X-Tag".to_string(), "1".to_string()),
                ("X-Tag".to_string(), "two".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_key_interpolated() {
        let template = get("https://example.com").with_header("{{headerName}}", "v");
        let request = assemble(&template, &vars(&[("headerName", "X-Custom")])).unwrap();
        assert_eq!(request.header("X-Custom"), Some("v"));
    }

    #[test]
    fn test_header_key_resolving_to_empty_is_skipped() {
        let template = get("https://example.com")
            .with_header("{{hdr}}", "v")
            .with_header("X-Kept", "1");
        let request = assemble(&template, &vars(&[("hdr", "")])).unwrap();
        assert_eq!(
            request.headers,
            vec![("X-Kept".to_string(), "1".to_string())]
        );
    }

    #[test]
    fn test_bearer_auth_empty_and_present() {
        let empty = get("https://example.com").with_auth(AuthConfig::Bearer {
            token: String::new(),
        });
        let request = assemble(&empty, &HashMap::new()).unwrap();
        assert_eq!(request.header("Authorization"), None);

        let present = get("https://example.com").with_auth(AuthConfig::Bearer {
            token: "tok".to_string(),
        });
        let request = assemble(&present, &HashMap::new()).unwrap();
        assert_eq!(request.header("Authorization"), Some("Bearer tok"));
    }

    #[test]
    fn test_auth_header_follows_template_headers() {
        let template = get("https://example.com")
            .with_header("Accept", "*/*")
            .with_auth(AuthConfig::Basic {
                username: "u".to_string(),
                password: "p".to_string(),
            });
        let request = assemble(&template, &HashMap::new()).unwrap();
        assert_eq!(request.headers[0].0, "Accept");
        assert_eq!(
            request.headers[1],
            ("Authorization".to_string(), "Basic dTpw".to_string())
        );
    }

    #[test]
    fn test_api_key_query_after_template_params() {
        let template = get("https://example.com/data")
            .with_query_param("page", "1")
            .with_auth(AuthConfig::ApiKey {
                key: "api_key".to_string(),
                value: "{{key}}".to_string(),
                location: ApiKeyLocation::Query,
            });
        let request = assemble(&template, &vars(&[("key", "k/1")])).unwrap();
        assert_eq!(request.url, "https://example.com/data?page=1&api_key=k%2F1");
        assert_eq!(request.header("api_key"), None);
    }

    #[test]
    fn test_api_key_query_without_template_params() {
        let template = get("https://example.com/data").with_auth(AuthConfig::ApiKey {
            key: "api_key".to_string(),
            value: "k".to_string(),
            location: ApiKeyLocation::Query,
        });
        let request = assemble(&template, &HashMap::new()).unwrap();
        assert_eq!(request.url, "https://example.com/data?api_key=k");
    }

    #[test]
    fn test_api_key_header() {
        let template = get("https://example.com").with_auth(AuthConfig::ApiKey {
            key: "X-Api-Key".to_string(),
            value: "secret".to_string(),
            location: ApiKeyLocation::Header,
        });
        let request = assemble(&template, &HashMap::new()).unwrap();
        assert_eq!(request.header("X-Api-Key"), Some("secret"));
        assert_eq!(request.url, "https://example.com");
    }

    #[test]
    fn test_raw_body() {
        let template = RequestTemplate::new("create", HttpMethod::POST, "https://example.com")
            .with_body(RequestBody::Raw {
                content: r#"{"name": "{{name}}"}"#.to_string(),
                content_type: RawContentType::Json,
            });
        let request = assemble(&template, &vars(&[("name", "Ada")])).unwrap();
        assert_eq!(request.body_text(), Some(r#"{"name": "Ada"}"#));
        assert_eq!(request.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_raw_body_content_types() {
        for (kind, mime) in [
            (RawContentType::Text, "text/plain"),
            (RawContentType::Xml, "application/xml"),
            (RawContentType::Html, "text/html"),
        ] {
            let template = get("https://example.com").with_body(RequestBody::Raw {
                content: "x".to_string(),
                content_type: kind,
            });
            let request = assemble(&template, &HashMap::new()).unwrap();
            assert_eq!(request.content_type.as_deref(), Some(mime));
        }
    }

    #[test]
    fn test_form_body() {
        let template = get("https://example.com").with_body(RequestBody::FormUrlEncoded {
            fields: vec![
                KeyValue::new("user", "{{user}}"),
                KeyValue::disabled("skip", "me"),
                KeyValue::new("", "no-key"),
                KeyValue::new("note", "a b&c"),
            ],
        });
        let request = assemble(&template, &vars(&[("user", "ada@example.com")])).unwrap();
        assert_eq!(request.body_text(), Some("user=ada%40example.com&note=a+b%26c"));
        assert_eq!(request.content_type.as_deref(), Some(FORM_URLENCODED));
    }

    #[test]
    fn test_form_body_all_disabled_is_empty() {
        let template = get("https://example.com").with_body(RequestBody::FormUrlEncoded {
            fields: vec![KeyValue::disabled("a", "1")],
        });
        let request = assemble(&template, &HashMap::new()).unwrap();
        assert_eq!(request.body_text(), Some(""));
        assert_eq!(request.content_type.as_deref(), Some(FORM_URLENCODED));
    }

    #[test]
    fn test_multipart_is_rejected_not_dropped() {
        let template = get("https://example.com").with_body(RequestBody::Multipart {
            parts: vec![MultipartPart {
                key: "file".to_string(),
                kind: MultipartKind::File {
                    path: "/tmp/a.png".to_string(),
                    mime_type: None,
                },
                enabled: true,
            }],
        });
        assert_eq!(
            assemble(&template, &HashMap::new()),
            Err(AssemblyError::UnsupportedBody {
                kind: "multipart/form-data".to_string(),
                parts: 1,
            })
        );
    }

    #[test]
    fn test_invalid_url() {
        for url in ["", "not a url", "{{missing}}/users", "ftp://example.com/file"] {
            let result = assemble(&get(url), &HashMap::new());
            assert!(
                matches!(result, Err(AssemblyError::InvalidUrl(_))),
                "expected InvalidUrl for {:?}",
                url
            );
        }
    }

    #[test]
    fn test_unresolved_placeholder_in_path_still_assembles() {
        let request = assemble(&get("https://example.com/{{missing}}"), &HashMap::new()).unwrap();
        assert_eq!(request.url, "https://example.com/{{missing}}");
    }

    #[test]
    fn test_interpolation_error_aborts_assembly() {
        let template = get("https://example.com").with_header("X-Loop", "{{a}}");
        let result = assemble(&template, &vars(&[("a", "{{b}}"), ("b", "{{a}}")]));
        assert!(matches!(
            result,
            Err(AssemblyError::Interpolation(
                InterpolationError::CircularReference(_)
            ))
        ));
    }

    #[test]
    fn test_assembly_is_idempotent_and_does_not_mutate_template() {
        let template = get("{{base}}/x")
            .with_query_param("a", "{{a}}")
            .with_header("H", "{{a}}")
            .with_body(RequestBody::Raw {
                content: "{{a}}".to_string(),
                content_type: RawContentType::Text,
            });
        let snapshot = template.clone();
        let v = vars(&[("base", "https://example.com"), ("a", "1")]);

        let first = assemble(&template, &v).unwrap();
        let second = assemble(&template, &v).unwrap();
        assert_eq!(first, second);
        assert_eq!(template, snapshot);
    }

    #[test]
    fn test_preview_url_falls_back_on_error() {
        let template = get("{{a}}/x");
        assert_eq!(
            preview_url(&template, &vars(&[("a", "https://h")])),
            "https://h/x"
        );
        assert_eq!(preview_url(&template, &vars(&[("a", "{{a}}")])), "{{a}}/x");
    }

    #[test]
    fn test_unresolved_variables_deduplicated() {
        let mut template = get("{{base}}/{{id}}")
            .with_query_param("token", "{{token}}")
            .with_header("X-Id", "{{id}}");
        template
            .headers
            .push(KeyValue::disabled("X-Off", "{{ignored}}"));

        let available: HashSet<String> = ["base".to_string()].into_iter().collect();
        assert_eq!(unresolved_variables(&template, &available), vec!["id", "token"]);
    }
}
