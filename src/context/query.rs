//! Read-only state snapshots handed to queries and transitions.

use crate::core::Value;

/// Passed to query functions.
///
/// Holds a snapshot of the state taken when the query started; cloning the
/// persistent value is O(1).
#[derive(Debug)]
pub struct QueryContext {
    state: Value,
}

impl QueryContext {
    pub(crate) fn new(state: Value) -> Self {
        Self { state }
    }

    /// The current state.
    pub fn state(&self) -> &Value {
        &self.state
    }
}

/// Passed to transition functions.
#[derive(Debug)]
pub struct TransitionContext {
    state: Value,
}

impl TransitionContext {
    pub(crate) fn new(state: Value) -> Self {
        Self { state }
    }

    /// The state as of the start of this transition.
    pub fn state(&self) -> &Value {
        &self.state
    }
}
