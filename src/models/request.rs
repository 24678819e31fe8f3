//! Request template data models.
//!
//! A [`RequestTemplate`] is the not-yet-resolved description of an HTTP
//! request as stored in the workspace. Every string field may contain
//! `{{variable}}` placeholders. Auth and body are tagged enums so that every
//! consumer has to handle every kind explicitly.

use super::variable::Variable;
use serde::{Deserialize, Serialize};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HttpMethod {
    #[default]
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
    HEAD,
    OPTIONS,
}

impl HttpMethod {
    /// Returns the string representation of the HTTP method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::OPTIONS => "OPTIONS",
        }
    }

    /// Parses a method name, case-insensitively.
    ///
    /// # Returns
    ///
    /// `Some(HttpMethod)` if the string is a supported HTTP method, `None` otherwise.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(HttpMethod::GET),
            "POST" => Some(HttpMethod::POST),
            "PUT" => Some(HttpMethod::PUT),
            "PATCH" => Some(HttpMethod::PATCH),
            "DELETE" => Some(HttpMethod::DELETE),
            "HEAD" => Some(HttpMethod::HEAD),
            "OPTIONS" => Some(HttpMethod::OPTIONS),
            _ => None,
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A templated key/value row: header, query parameter or form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyValue {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

fn default_true() -> bool {
    true
}

impl KeyValue {
    /// Creates an enabled row.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled row.
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enabled: false,
            ..Self::new(key, value)
        }
    }

    /// Whether this row takes part in assembly: enabled and with a key.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.key.is_empty()
    }
}

/// Where an API key credential is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    #[default]
    Header,
    Query,
}

impl ApiKeyLocation {
    pub fn display_name(&self) -> &'static str {
        match self {
            ApiKeyLocation::Header => "Header",
            ApiKeyLocation::Query => "Query Parameter",
        }
    }
}

/// Authentication configuration of a request.
///
/// Credential fields are templates; secret values normally reach them through
/// a `{{variable}}` backed by the secret store.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AuthConfig {
    #[default]
    None,
    Bearer {
        token: String,
    },
    Basic {
        username: String,
        password: String,
    },
    ApiKey {
        key: String,
        value: String,
        location: ApiKeyLocation,
    },
}

/// Content type of a raw body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawContentType {
    #[default]
    Json,
    Text,
    Xml,
    Html,
}

impl RawContentType {
    /// MIME type sent as the `Content-Type` header.
    pub fn mime_type(&self) -> &'static str {
        match self {
            RawContentType::Json => "application/json",
            RawContentType::Text => "text/plain",
            RawContentType::Xml => "application/xml",
            RawContentType::Html => "text/html",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RawContentType::Json => "JSON",
            RawContentType::Text => "Text",
            RawContentType::Xml => "XML",
            RawContentType::Html => "HTML",
        }
    }
}

/// Payload of one multipart part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MultipartKind {
    Text {
        value: String,
    },
    File {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
    },
}

/// One part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipartPart {
    pub key: String,
    pub kind: MultipartKind,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

/// Body of a request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum RequestBody {
    #[default]
    None,
    Raw {
        content: String,
        content_type: RawContentType,
    },
    FormUrlEncoded {
        fields: Vec<KeyValue>,
    },
    Multipart {
        parts: Vec<MultipartPart>,
    },
}

impl RequestBody {
    /// Short name of the body kind, used in logs and errors.
    pub fn kind(&self) -> &'static str {
        match self {
            RequestBody::None => "none",
            RequestBody::Raw { .. } => "raw",
            RequestBody::FormUrlEncoded { .. } => "application/x-www-form-urlencoded",
            RequestBody::Multipart { .. } => "multipart/form-data",
        }
    }
}

/// A request definition as stored in the workspace, with placeholders intact.
///
/// Assembly reads a template by shared reference and never mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestTemplate {
    /// Stable identifier, used for history correlation.
    pub id: String,

    /// Display name.
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub method: HttpMethod,

    #[serde(default)]
    pub url: String,

    /// Header rows in send order. Duplicates are allowed.
    #[serde(default)]
    pub headers: Vec<KeyValue>,

    #[serde(default)]
    pub query_params: Vec<KeyValue>,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub body: RequestBody,

    /// Request-scope variable overrides.
    #[serde(default)]
    pub variables: Vec<Variable>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
}

impl RequestTemplate {
    /// Creates a template with a generated id and no headers, params, auth or body.
    pub fn new(name: impl Into<String>, method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            method,
            url: url.into(),
            headers: Vec::new(),
            query_params: Vec::new(),
            auth: AuthConfig::None,
            body: RequestBody::None,
            variables: Vec::new(),
            collection_id: None,
        }
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(KeyValue::new(key, value));
        self
    }

    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push(KeyValue::new(key, value));
        self
    }

    pub fn with_auth(mut self, auth: AuthConfig) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn with_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }
}
