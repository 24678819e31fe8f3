//! Variable and secret reference data models.
//!
//! Variables are the raw material of interpolation. Each scope (workspace,
//! environment, collection, request) owns an ordered list of them; keys are
//! only unique within a single scope.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keychain service name used when a secret reference does not name one.
pub const DEFAULT_SECRET_SERVICE: &str = "com.restworkbench.secrets";

/// Opaque handle to a value held in external secret storage.
///
/// A `SecretRef` never carries the secret itself. Its `Display` output only
/// shows the identifier so it is safe to log.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretRef {
    /// Account identifier inside the secret store.
    pub id: String,

    /// Service namespace inside the secret store.
    #[serde(default = "default_service")]
    pub service: String,
}

fn default_service() -> String {
    DEFAULT_SECRET_SERVICE.to_string()
}

impl SecretRef {
    /// Creates a reference with a freshly generated identifier.
    pub fn generate() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    /// Creates a reference to an existing secret identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            service: default_service(),
        }
    }
}

impl fmt::Display for SecretRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "secret:{}", self.id)
    }
}

/// A single named value in one variable scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    pub key: String,

    /// Plain value. For secret variables this is ignored once the secret
    /// store returns the real value.
    #[serde(default)]
    pub value: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub is_secret: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<SecretRef>,
}

fn default_true() -> bool {
    true
}

impl Variable {
    /// Creates an enabled, non-secret variable.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
            is_secret: false,
            secret_ref: None,
        }
    }

    /// Creates an enabled variable whose value lives in the secret store.
    pub fn secret(key: impl Into<String>, secret_ref: SecretRef) -> Self {
        Self {
            key: key.into(),
            value: String::new(),
            enabled: true,
            is_secret: true,
            secret_ref: Some(secret_ref),
        }
    }

    /// Returns a copy of this variable with `enabled` set.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}
