//! Secret storage boundary.
//!
//! Secret variables only hold a [`SecretRef`]; the plaintext lives in an
//! external key/value vault. Once fetched, a secret is treated as just another
//! variable value. Plaintext is never logged or written anywhere by this crate.

use crate::models::{SecretRef, Variable};
use log::warn;
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Errors returned by a secret store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecretError {
    #[error("secret not found: {0}")]
    NotFound(String),

    #[error("secret storage error: {0}")]
    Storage(String),
}

/// A key/value vault keyed by opaque secret reference.
pub trait SecretStore: Send + Sync {
    /// Returns the plaintext for `secret_ref`.
    fn retrieve(&self, secret_ref: &SecretRef) -> Result<String, SecretError>;

    /// Stores or replaces the plaintext for `secret_ref`.
    fn store(&self, secret_ref: &SecretRef, secret: &str) -> Result<(), SecretError>;

    /// Deletes a secret. Deleting a missing secret is not an error.
    fn delete(&self, secret_ref: &SecretRef) -> Result<(), SecretError>;

    fn exists(&self, secret_ref: &SecretRef) -> bool {
        self.retrieve(secret_ref).is_ok()
    }
}

/// Process-local secret store.
///
/// Useful for tests and for hosts that unlock the real vault up front.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<(String, String), String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(secret_ref: &SecretRef) -> (String, String) {
        (secret_ref.service.clone(), secret_ref.id.clone())
    }
}

impl SecretStore for MemorySecretStore {
    fn retrieve(&self, secret_ref: &SecretRef) -> Result<String, SecretError> {
        let secrets = self
            .secrets
            .read()
            .map_err(|e| SecretError::Storage(e.to_string()))?;
        secrets
            .get(&Self::slot(secret_ref))
            .cloned()
            .ok_or_else(|| SecretError::NotFound(secret_ref.id.clone()))
    }

    fn store(&self, secret_ref: &SecretRef, secret: &str) -> Result<(), SecretError> {
        let mut secrets = self
            .secrets
            .write()
            .map_err(|e| SecretError::Storage(e.to_string()))?;
        secrets.insert(Self::slot(secret_ref), secret.to_string());
        Ok(())
    }

    fn delete(&self, secret_ref: &SecretRef) -> Result<(), SecretError> {
        let mut secrets = self
            .secrets
            .write()
            .map_err(|e| SecretError::Storage(e.to_string()))?;
        secrets.remove(&Self::slot(secret_ref));
        Ok(())
    }
}

/// Reduces a scope's variables to a lookup map, fetching secret values.
///
/// Same rules as [`reduce_enabled`](super::scope::reduce_enabled), except that
/// a secret variable takes its value from `store`. A secret that cannot be
/// fetched leaves the key absent so its placeholders stay visible; only the
/// key and reference id are logged.
pub fn resolve_variables(variables: &[Variable], store: &dyn SecretStore) -> HashMap<String, String> {
    let mut resolved = HashMap::with_capacity(variables.len());

    for variable in variables.iter().filter(|v| v.enabled) {
        match (&variable.secret_ref, variable.is_secret) {
            (Some(secret_ref), true) => match store.retrieve(secret_ref) {
                Ok(secret) => {
                    resolved.insert(variable.key.clone(), secret);
                }
                Err(e) => {
                    warn!("Secret variable '{}' unavailable ({}): {}", variable.key, secret_ref, e);
                    resolved.remove(&variable.key);
                }
            },
            _ => {
                resolved.insert(variable.key.clone(), variable.value.clone());
            }
        }
    }

    resolved
}

/// Reduces a scope's variables to a lookup map without touching secrets.
///
/// Secret variables are left out entirely. Used wherever output is shown to
/// the user rather than sent, so secret values can never leak into it.
pub fn public_variables(variables: &[Variable]) -> HashMap<String, String> {
    variables
        .iter()
        .filter(|v| v.enabled && !v.is_secret)
        .map(|v| (v.key.clone(), v.value.clone()))
        .collect()
}
