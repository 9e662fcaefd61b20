//! Build errors for containers.

use thiserror::Error;

/// Errors that can occur when building a container.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Initial state must be a map, found {found}")]
    InitialStateNotAMap { found: &'static str },

    #[error("Initial state could not be serialized: {0}")]
    SerializationFailed(String),
}
