//! Request assembly error types.

use crate::variables::InterpolationError;
use thiserror::Error;

/// Errors that abort request assembly.
///
/// Assembly fails fast: the first error is returned and no partially built
/// request is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// A templated field could not be interpolated.
    #[error(transparent)]
    Interpolation(#[from] InterpolationError),

    /// The final URL does not parse as an absolute http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The body kind has no encoder yet.
    #[error("Unsupported body type: {kind} ({parts} parts)")]
    UnsupportedBody { kind: String, parts: usize },

    /// Body content could not be represented in the required encoding.
    #[error("Invalid body encoding: {0}")]
    InvalidEncoding(String),
}
