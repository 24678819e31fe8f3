//! Variables module.
//!
//! This module provides placeholder interpolation, scope merging and secret
//! resolution for request templates.

pub mod error;
pub mod interpolation;
pub mod scope;
pub mod secrets;

pub use error::InterpolationError;
pub use interpolation::{
    extract_variable_names, find_unresolved, interpolate, Interpolator, MAX_INTERPOLATION_DEPTH,
};
pub use scope::{merge, reduce_enabled, ScopeSet, VariableScope};
pub use secrets::{public_variables, resolve_variables, MemorySecretStore, SecretError, SecretStore};
