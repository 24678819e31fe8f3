//! Configuration management for the workbench.
//!
//! Configuration is loaded from a settings JSON document under the
//! `"rest-workbench"` key, merged with defaults, validated and stored in a
//! process-wide singleton.

pub mod schema;

pub use schema::{WorkbenchConfig, MAX_TIMEOUT_MS};

use log::warn;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Settings key the workbench reads from a settings document.
pub const SETTINGS_KEY: &str = "rest-workbench";

/// Global configuration instance.
///
/// Lazily initialized with defaults on first access.
static CONFIG: Lazy<RwLock<WorkbenchConfig>> =
    Lazy::new(|| RwLock::new(WorkbenchConfig::default()));

/// Loads configuration from a settings JSON value.
///
/// Reads the `"rest-workbench"` object, fills missing fields with defaults,
/// validates the result and updates the global configuration. Settings that
/// fail to deserialize are ignored with a warning.
///
/// # Arguments
///
/// * `settings_json` - Optional settings document
///
/// # Returns
///
/// `Ok(WorkbenchConfig)` with the loaded configuration, or `Err` if validation fails.
/// On error the global configuration is left unchanged.
///
/// # Example
///
/// ```no_run
/// use rest_workbench::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "rest-workbench": {
///         "timeoutMs": 60000,
///         "validateSsl": false
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.timeout_ms, 60000);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<WorkbenchConfig, String> {
    let mut config = WorkbenchConfig::default();

    if let Some(section) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<WorkbenchConfig>(section.clone()) {
            Ok(user_config) => config = user_config,
            Err(e) => {
                warn!("Failed to parse {} settings: {}. Using defaults.", SETTINGS_KEY, e);
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets a clone of the current global configuration.
///
/// Returns the defaults if nothing has been loaded yet.
pub fn get_config() -> WorkbenchConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| WorkbenchConfig::default())
}

/// Updates the global configuration in place.
///
/// If the updated configuration fails validation it is reset to defaults.
///
/// # Example
///
/// ```no_run
/// use rest_workbench::config::update_config;
///
/// update_config(|config| {
///     config.timeout_ms = 60000;
/// });
/// ```
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut WorkbenchConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            warn!("Configuration validation failed after update: {}", e);
            *config = WorkbenchConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = WorkbenchConfig::default();
    }
}
