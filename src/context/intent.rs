//! Capabilities available to intents.

use crate::app::{App, StateUpdate};
use crate::context::{QueryContext, TransitionContext};
use crate::core::{IntoPlain, NextState};
use std::fmt;

/// Passed to intent functions.
///
/// An intent is the unit of work that reads state, requests transitions,
/// and reaches external services. Each `update_state` call commits (and
/// notifies) on its own; there is no batching and no rollback.
///
/// # Example
///
/// ```rust
/// use flowcell::{AppBuilder, IntentContext, Value};
/// use serde_json::json;
///
/// let app = AppBuilder::new()
///     .initial_state(json!({ "count": 1 }))
///     .build()
///     .unwrap();
///
/// fn increment(ctx: &IntentContext, by: i64) -> i64 {
///     let current = ctx.query_state(|q, _| q.state().get("count").and_then(Value::as_i64), ());
///     let next = current.unwrap_or(0) + by;
///     ctx.update_state(|t, next| t.state().set("count", next).ok(), next);
///     next
/// }
///
/// assert_eq!(app.invoke_intent(increment, 2), 3);
/// ```
pub struct IntentContext<Svc = ()> {
    app: App<Svc>,
}

impl<Svc> IntentContext<Svc> {
    pub(crate) fn new(app: App<Svc>) -> Self {
        Self { app }
    }

    /// Run `query` against the current state and convert its result to plain data.
    pub fn query_state<A, R, Q>(&self, query: Q, args: A) -> R::Plain
    where
        Q: FnOnce(&QueryContext, A) -> R,
        R: IntoPlain,
    {
        self.app.query_state(query, args)
    }

    /// Run `transition` and commit its result if it differs from the current state.
    pub fn update_state<A, O, T>(&self, transition: T, args: A) -> StateUpdate
    where
        T: FnOnce(&TransitionContext, A) -> O,
        O: NextState,
    {
        self.app.update_state(transition, args)
    }

    /// Like [`update_state`](Self::update_state) for transitions that can fail.
    ///
    /// An `Err` leaves the state untouched and is returned as-is.
    pub fn try_update_state<A, O, E, T>(&self, transition: T, args: A) -> Result<StateUpdate, E>
    where
        T: FnOnce(&TransitionContext, A) -> Result<O, E>,
        O: NextState,
    {
        self.app.try_update_state(transition, args)
    }

    /// Forward a call to an external service with the configured service context.
    pub fn invoke_service<A, R, F>(&self, service: F, args: A) -> R
    where
        F: FnOnce(&Svc, A) -> R,
    {
        self.app.invoke_service(service, args)
    }
}

impl<Svc> fmt::Debug for IntentContext<Svc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntentContext")
            .field("app", &self.app.id())
            .finish()
    }
}
