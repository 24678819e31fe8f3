//! Template interpolation engine.
//!
//! Replaces `{{variable}}` placeholders with values from a merged variable
//! map. Values may themselves contain placeholders, which are resolved
//! recursively against the same map. Resolution is a pure function of its
//! inputs: no I/O, no shared state.
//!
//! Rules:
//! - The name between the braces is trimmed; braces do not nest.
//! - Unknown names leave the placeholder untouched (not an error).
//! - A name that reappears on its own resolution path is a
//!   [`InterpolationError::CircularReference`]. Sibling placeholders do not
//!   share that path.
//! - Expanding a known variable more than [`MAX_INTERPOLATION_DEPTH`] hops
//!   below the template fails with [`InterpolationError::MaxDepthExceeded`],
//!   cycle or not. Unknown names at any depth still pass through.
//! - On any error the whole call fails; there is no partially resolved output.

use super::error::InterpolationError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Maximum number of nested variable hops below the template itself.
///
/// `{{v0}}` with `v0 -> v1 -> ... -> v10` resolves; one more hop fails.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Cached regex pattern for matching `{{name}}` with optional whitespace.
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\{([^}]+)\}\}").expect("placeholder regex is valid"));

/// Resolves every placeholder in `template` against `variables`.
///
/// # Examples
///
/// ```
/// use rest_workbench::variables::interpolate;
/// use std::collections::HashMap;
///
/// let mut vars = HashMap::new();
/// vars.insert("host".to_string(), "api.example.com".to_string());
/// vars.insert("baseUrl".to_string(), "https://{{host}}".to_string());
///
/// let url = interpolate("{{ baseUrl }}/users/{{id}}", &vars).unwrap();
/// assert_eq!(url, "https://api.example.com/users/{{id}}");
/// ```
pub fn interpolate(
    template: &str,
    variables: &HashMap<String, String>,
) -> Result<String, InterpolationError> {
    // Fast path: nothing that could start a placeholder
    if !template.contains("{{") {
        return Ok(template.to_string());
    }

    interpolate_with_depth(template, variables, 0, &HashSet::new())
}

/// Recursive worker. `visiting` holds the names being expanded on this
/// branch only; children receive an extended copy and never mutate it.
fn interpolate_with_depth(
    text: &str,
    variables: &HashMap<String, String>,
    depth: usize,
    visiting: &HashSet<String>,
) -> Result<String, InterpolationError> {
    let re = &*PLACEHOLDER_REGEX;

    if !re.is_match(text) {
        return Ok(text.to_string());
    }

    let mut result = String::with_capacity(text.len() + text.len() / 4);
    let mut last_match_end = 0;

    for cap in re.captures_iter(text) {
        let (Some(full_match), Some(name_match)) = (cap.get(0), cap.get(1)) else {
            continue;
        };
        let name = name_match.as_str().trim();

        result.push_str(&text[last_match_end..full_match.start()]);
        last_match_end = full_match.end();

        if visiting.contains(name) {
            return Err(InterpolationError::CircularReference(name.to_string()));
        }

        match variables.get(name) {
            Some(value) => {
                // `depth` counts the variables already expanded on this path
                if depth > MAX_INTERPOLATION_DEPTH {
                    return Err(InterpolationError::MaxDepthExceeded);
                }

                let mut branch = visiting.clone();
                branch.insert(name.to_string());

                let resolved = interpolate_with_depth(value, variables, depth + 1, &branch)?;
                result.push_str(&resolved);
            }
            // Unknown names pass through exactly as written
            None => result.push_str(full_match.as_str()),
        }
    }

    result.push_str(&text[last_match_end..]);

    Ok(result)
}

/// Returns every placeholder name in `template`, first to last, duplicates
/// included.
pub fn extract_variable_names(template: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(template)
        .filter_map(|cap| cap.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Returns the placeholder names in `template` that are not in `available`.
///
/// Used to warn before sending; assembly itself tolerates unresolved names.
pub fn find_unresolved(template: &str, available: &HashSet<String>) -> Vec<String> {
    extract_variable_names(template)
        .into_iter()
        .filter(|name| !available.contains(name))
        .collect()
}

/// Stateless handle over the interpolation functions.
///
/// Holds nothing between calls, so it can be copied freely wherever a value
/// is more convenient than a free function.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpolator;

impl Interpolator {
    pub fn new() -> Self {
        Self
    }

    pub fn interpolate(
        &self,
        template: &str,
        variables: &HashMap<String, String>,
    ) -> Result<String, InterpolationError> {
        interpolate(template, variables)
    }

    pub fn extract_variable_names(&self, template: &str) -> Vec<String> {
        extract_variable_names(template)
    }

    pub fn find_unresolved(&self, template: &str, available: &HashSet<String>) -> Vec<String> {
        find_unresolved(template, available)
    }
}
