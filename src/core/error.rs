//! Errors raised by path operations on state values.

use thiserror::Error;

/// Errors that can occur when reading or rebuilding a [`Value`](super::Value) by path.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StateError {
    #[error("Cannot address key '{key}' inside a {kind} value")]
    NotAContainer { kind: &'static str, key: String },

    #[error("List index {index} out of bounds (length: {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("List segment '{segment}' is not a valid index")]
    InvalidIndex { segment: String },

    #[error("Path must contain at least one segment")]
    EmptyPath,
}
