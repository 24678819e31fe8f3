//! Integration tests for the request pipeline.
//!
//! Shared fixtures for the scenario tests in this directory.

pub mod curl_export_test;
pub mod history_test;
#[cfg(feature = "transport")]
pub mod pipeline_test;

use rest_workbench::models::{Environment, Variable, Workspace};
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize test environment (run once)
pub fn init_test_env() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Workspace with a base URL and an API version.
pub fn demo_workspace(base_url: &str) -> Workspace {
    let mut workspace = Workspace::new("Demo");
    workspace.variables = vec![
        Variable::new("baseUrl", base_url),
        Variable::new("apiVersion", "v1"),
    ];
    workspace
}

pub fn environment(name: &str, pairs: &[(&str, &str)]) -> Environment {
    Environment::with_variables(
        name,
        pairs.iter().map(|(k, v)| Variable::new(*k, *v)).collect(),
    )
}
