//! HTTP request execution configuration.
//!
//! The subset of [`WorkbenchConfig`] the transport needs, optionally with
//! per-workspace settings applied on top.

use crate::config::{get_config, WorkbenchConfig};
use crate::models::WorkspaceSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for HTTP request execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionConfig {
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,

    pub follow_redirects: bool,

    /// Redirect limit, only used when `follow_redirects` is set.
    pub max_redirects: u32,

    pub validate_ssl: bool,

    pub user_agent: String,
}

impl ExecutionConfig {
    /// Creates an ExecutionConfig from the given configuration.
    pub fn from_config(config: &WorkbenchConfig) -> Self {
        Self {
            timeout_ms: config.timeout_ms,
            follow_redirects: config.follow_redirects,
            max_redirects: config.max_redirects,
            validate_ssl: config.validate_ssl,
            user_agent: config.user_agent.clone(),
        }
    }

    /// Creates an ExecutionConfig from the global configuration.
    pub fn from_global_config() -> Self {
        Self::from_config(&get_config())
    }

    /// Global configuration with a workspace's settings applied.
    pub fn for_workspace(settings: &WorkspaceSettings) -> Self {
        Self::from_config(&get_config().merge(settings))
    }

    /// Returns the timeout as a `std::time::Duration`.
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ExecutionConfig {
    /// Reads the current global configuration.
    fn default() -> Self {
        Self::from_global_config()
    }
}
