//! Interpolation error types.

use thiserror::Error;

use super::interpolation::MAX_INTERPOLATION_DEPTH;

/// Errors that can occur while resolving `{{variable}}` placeholders.
///
/// An unresolved placeholder is not an error: it passes through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    /// A variable's value refers back to itself, directly or through other
    /// variables, on the current resolution path.
    #[error("Circular reference detected for variable: {0}")]
    CircularReference(String),

    /// Nested resolution went deeper than [`MAX_INTERPOLATION_DEPTH`] levels.
    #[error("Maximum variable nesting depth exceeded (limit: {limit})", limit = MAX_INTERPOLATION_DEPTH)]
    MaxDepthExceeded,

    /// Reserved for strict-mode validation of variable names.
    #[error("Invalid variable: {0}")]
    InvalidVariable(String),
}
