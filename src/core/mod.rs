//! Core state types.
//!
//! This module contains the pure data layer of the container:
//! - The persistent [`Value`] that holds application state
//! - The [`IntoPlain`] boundary conversion applied to query results
//! - The [`NextState`] interpretation of transition results
//!
//! Nothing here performs side effects or knows about subscribers.

mod error;
mod next_state;
mod plain;
mod value;

pub use error::StateError;
pub use next_state::NextState;
pub use plain::{IntoPlain, Raw};
pub use value::Value;
