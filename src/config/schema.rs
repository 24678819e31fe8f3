//! Configuration schema for the workbench.
//!
//! Defines the user-configurable settings and their validation. Per-workspace
//! settings are layered on top with [`WorkbenchConfig::merge`].

use crate::models::WorkspaceSettings;
use serde::{Deserialize, Serialize};

/// Upper bound for any request timeout, in milliseconds (5 minutes).
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Main configuration structure.
///
/// Missing settings fall back to their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbenchConfig {
    /// Request timeout in milliseconds.
    ///
    /// Covers connection, headers and body download. Defaults to 30000ms.
    /// Must be greater than 0 and at most [`MAX_TIMEOUT_MS`].
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Whether to automatically follow HTTP redirects. Defaults to true.
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,

    /// Maximum number of redirects to follow.
    ///
    /// Only used when `follow_redirects` is true. Defaults to 10.
    #[serde(default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Whether to validate SSL/TLS certificates. Defaults to true.
    ///
    /// **Warning:** Disabling SSL validation can expose you to security risks.
    #[serde(default = "default_validate_ssl")]
    pub validate_ssl: bool,

    /// Maximum number of entries kept in request history. Must be > 0.
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Age in days after which history entries are pruned. Must be > 0.
    #[serde(default = "default_history_retention_days")]
    pub history_retention_days: u32,

    /// `User-Agent` header value sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for WorkbenchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            follow_redirects: default_follow_redirects(),
            max_redirects: default_max_redirects(),
            validate_ssl: default_validate_ssl(),
            history_limit: default_history_limit(),
            history_retention_days: default_history_retention_days(),
            user_agent: default_user_agent(),
        }
    }
}

impl WorkbenchConfig {
    /// Validates the configuration and returns errors if any settings are invalid.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all settings are valid, or `Err` with a descriptive error message.
    pub fn validate(&self) -> Result<(), String> {
        if self.timeout_ms == 0 {
            return Err("timeoutMs must be greater than 0".to_string());
        }

        if self.timeout_ms > MAX_TIMEOUT_MS {
            return Err(format!("timeoutMs must be at most {}", MAX_TIMEOUT_MS));
        }

        if self.history_limit == 0 {
            return Err("historyLimit must be greater than 0".to_string());
        }

        if self.history_retention_days == 0 {
            return Err("historyRetentionDays must be greater than 0".to_string());
        }

        // max_redirects can be 0 (no redirects)

        Ok(())
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }

    /// Applies per-workspace settings on top of this configuration.
    ///
    /// The workspace timeout is clamped to [`MAX_TIMEOUT_MS`]; a zero timeout
    /// keeps the global value.
    ///
    /// # Arguments
    ///
    /// * `settings` - Workspace settings (take precedence)
    ///
    /// # Returns
    ///
    /// A new `WorkbenchConfig` with merged values.
    pub fn merge(&self, settings: &WorkspaceSettings) -> Self {
        let timeout_ms = match settings.timeout_ms {
            0 => self.timeout_ms,
            ms => ms.min(MAX_TIMEOUT_MS),
        };

        Self {
            timeout_ms,
            follow_redirects: settings.follow_redirects,
            validate_ssl: settings.validate_ssl,
            ..self.clone()
        }
    }
}

// Default value functions for serde

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_follow_redirects() -> bool {
    true
}

fn default_max_redirects() -> u32 {
    10
}

fn default_validate_ssl() -> bool {
    true
}

fn default_history_limit() -> usize {
    1000
}

fn default_history_retention_days() -> u32 {
    30
}

fn default_user_agent() -> String {
    format!("RestWorkbench/{}", env!("CARGO_PKG_VERSION"))
}
