//! cURL command generator.
//!
//! Converts request templates into cURL commands with shell escaping and
//! multi-line formatting. Credentials are replaced by fixed placeholders.

use crate::assembler::encoding::{encode_component, encode_pairs};
use crate::auth::{REDACTED_API_KEY, REDACTED_PASSWORD, REDACTED_TOKEN};
use crate::models::{
    ApiKeyLocation, AuthConfig, Environment, HttpMethod, KeyValue, MultipartKind, RequestBody,
    RequestTemplate,
};
use crate::variables::{interpolate, merge, public_variables, InterpolationError};
use std::collections::HashMap;

/// Separator between arguments in the multi-line form.
const LINE_CONTINUATION: &str = " \\\n  ";

/// Options for cURL command generation.
#[derive(Debug, Clone, Default)]
pub struct CurlOptions {
    /// Generate a compact single-line command
    pub compact: bool,
    /// Include `-k` to skip certificate validation
    pub insecure: bool,
    /// Include `-L` to follow redirects
    pub follow_redirects: bool,
}

/// Generates a multi-line cURL command for `template`.
///
/// Placeholders are resolved against the non-secret variables of
/// `environment` and of the template itself; anything else stays as a
/// literal `{{name}}`.
///
/// # Arguments
///
/// * `template` - The request to export
/// * `environment` - The active environment, if any
///
/// # Returns
///
/// The command with one argument per line, joined by ` \` continuations.
///
/// # Errors
///
/// Returns an [`InterpolationError`] when a field contains a circular or
/// too deeply nested reference.
pub fn export(
    template: &RequestTemplate,
    environment: Option<&Environment>,
) -> Result<String, InterpolationError> {
    export_with_options(template, environment, &CurlOptions::default())
}

/// Generates the same command as [`export`] on a single line.
pub fn export_compact(
    template: &RequestTemplate,
    environment: Option<&Environment>,
) -> Result<String, InterpolationError> {
    let options = CurlOptions {
        compact: true,
        ..CurlOptions::default()
    };
    export_with_options(template, environment, &options)
}

/// Generates a cURL command with custom formatting options.
pub fn export_with_options(
    template: &RequestTemplate,
    environment: Option<&Environment>,
    options: &CurlOptions,
) -> Result<String, InterpolationError> {
    let variables = export_variables(template, environment);
    let parts = build_parts(template, &variables, options)?;

    let separator = if options.compact {
        " "
    } else {
        LINE_CONTINUATION
    };
    Ok(parts.join(separator))
}

/// Non-secret lookup table: environment first, template variables on top.
fn export_variables(
    template: &RequestTemplate,
    environment: Option<&Environment>,
) -> HashMap<String, String> {
    let env = environment
        .map(|e| public_variables(&e.variables))
        .unwrap_or_default();
    let request = public_variables(&template.variables);
    merge(&HashMap::new(), &env, &HashMap::new(), &request)
}

fn build_parts(
    template: &RequestTemplate,
    variables: &HashMap<String, String>,
    options: &CurlOptions,
) -> Result<Vec<String>, InterpolationError> {
    let mut parts = vec!["curl".to_string()];

    if options.insecure {
        parts.push("-k".to_string());
    }
    if options.follow_redirects {
        parts.push("-L".to_string());
    }

    if template.method != HttpMethod::GET {
        parts.push(format!("-X {}", template.method.as_str()));
    }

    parts.push(escape_shell_arg(&build_url(template, variables)?));

    for (key, value) in active_pairs(&template.headers, variables)? {
        if key.trim().is_empty() {
            continue;
        }
        parts.push(format!("-H {}", escape_shell_arg(&format!("{}: {}", key, value))));
    }

    if let Some(auth) = auth_part(&template.auth, variables)? {
        parts.push(auth);
    }

    parts.extend(body_parts(&template.body, variables)?);

    Ok(parts)
}

/// URL with template query parameters and an API key query placeholder.
fn build_url(
    template: &RequestTemplate,
    variables: &HashMap<String, String>,
) -> Result<String, InterpolationError> {
    let url = interpolate(&template.url, variables)?;
    let mut query = encode_pairs(&active_pairs(&template.query_params, variables)?);

    if let AuthConfig::ApiKey {
        key,
        location: ApiKeyLocation::Query,
        ..
    } = &template.auth
    {
        let name = interpolate(key, variables)?;
        if !name.is_empty() {
            if !query.is_empty() {
                query.push('&');
            }
            query.push_str(&format!("{}={}", encode_component(&name), REDACTED_API_KEY));
        }
    }

    if query.is_empty() {
        Ok(url)
    } else {
        Ok(format!("{}?{}", url, query))
    }
}

fn active_pairs(
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

fn auth_part(
    auth: &AuthConfig,
    variables: &HashMap<String, String>,
) -> Result<Option<String>, InterpolationError> {
    let part = match auth {
        AuthConfig::None => None,
        AuthConfig::Bearer { token } => {
            if interpolate(token, variables)?.is_empty() {
                None
            } else {
                Some(format!(
                    "-H {}",
                    escape_shell_arg(&format!("Authorization: Bearer {}", REDACTED_TOKEN))
                ))
            }
        }
        AuthConfig::Basic { username, .. } => {
            let username = interpolate(username, variables)?;
            Some(format!(
                "-u {}",
                escape_shell_arg(&format!("{}:{}", username, REDACTED_PASSWORD))
            ))
        }
        AuthConfig::ApiKey {
            key,
            location: ApiKeyLocation::Header,
            ..
        } => {
            let name = interpolate(key, variables)?;
            if name.is_empty() {
                None
            } else {
                Some(format!(
                    "-H {}",
                    escape_shell_arg(&format!("{}: {}", name, REDACTED_API_KEY))
                ))
            }
        }
        // Rendered into the URL.
        AuthConfig::ApiKey { .. } => None,
    };
    Ok(part)
}

fn body_parts(
    body: &RequestBody,
    variables: &HashMap<String, String>,
) -> Result<Vec<String>, InterpolationError> {
    let mut parts = Vec::new();

    match body {
        RequestBody::None => {}
        RequestBody::Raw {
            content,
            content_type,
        } => {
            let content = interpolate(content, variables)?;
            parts.push(format!(
                "-H {}",
                escape_shell_arg(&format!("Content-Type: {}", content_type.mime_type()))
            ));
            parts.push(format!("-d {}", escape_shell_arg(&content)));
        }
        RequestBody::FormUrlEncoded { fields } => {
            for (key, value) in active_pairs(fields, variables)? {
                parts.push(format!(
                    "--data-urlencode {}",
                    escape_shell_arg(&format!("{}={}", key, value))
                ));
            }
        }
        RequestBody::Multipart { parts: fields } => {
            for part in fields.iter().filter(|p| p.enabled && !p.key.is_empty()) {
                let key = interpolate(&part.key, variables)?;
                let value = match &part.kind {
                    MultipartKind::Text { value } => interpolate(value, variables)?,
                    MultipartKind::File { path, .. } => format!("@{}", path),
                };
                parts.push(format!("-F {}", escape_shell_arg(&format!("{}={}", key, value))));
            }
        }
    }

    Ok(parts)
}

/// Wraps an argument in single quotes, escaping embedded single quotes.
fn escape_shell_arg(arg: &str) -> String {
    format!("'{}'", arg.replace('\'', "'\\''"))
}
