//! Workspace, environment and collection models.
//!
//! These are the owners of the workspace, environment and collection variable
//! scopes. Only the parts the request pipeline consumes are modelled here.

use super::variable::Variable;
use serde::{Deserialize, Serialize};

/// A named set of variables (e.g. "dev", "staging", "production").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl Environment {
    /// Creates an empty environment with a generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            variables: Vec::new(),
        }
    }

    /// Creates an environment with the given variables.
    pub fn with_variables(name: impl Into<String>, variables: Vec<Variable>) -> Self {
        Self {
            variables,
            ..Self::new(name)
        }
    }

    /// Appends a plain variable.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.push(Variable::new(key, value));
    }

    /// Iterates over enabled variables in list order.
    pub fn enabled_variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter().filter(|v| v.enabled)
    }
}

/// A folder of requests that may carry its own variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent collection for nested collections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            parent_id: None,
            variables: Vec::new(),
        }
    }
}

/// Per-workspace request settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_environment_id: Option<String>,

    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_true")]
    pub follow_redirects: bool,

    #[serde(default = "default_true")]
    pub validate_ssl: bool,
}

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_true() -> bool {
    true
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            default_environment_id: None,
            timeout_ms: default_timeout_ms(),
            follow_redirects: true,
            validate_ssl: true,
        }
    }
}

/// The root of a file-backed workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Workspace-scope variables, the lowest-priority scope.
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub settings: WorkspaceSettings,
}

impl Workspace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            description: None,
            variables: Vec::new(),
            settings: WorkspaceSettings::default(),
        }
    }
}
