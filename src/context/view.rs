//! Capabilities available to subscribers.

use crate::app::App;
use crate::context::{IntentContext, QueryContext, TransitionContext, ValueLink};
use crate::core::{IntoPlain, NextState};
use std::fmt;

/// Passed to subscribers on every notification.
///
/// One view is built per notification round and shared by every subscriber
/// in that round. It can read state and start intents but cannot request
/// transitions directly.
pub struct ViewContext<Svc = ()> {
    app: App<Svc>,
}

impl<Svc> ViewContext<Svc> {
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

    /// Start an intent from inside a notification.
    ///
    /// Runs to completion, including any nested notification rounds, before
    /// returning.
    pub fn invoke_intent<A, R, I>(&self, intent: I, args: A) -> R
    where
        I: FnOnce(&IntentContext<Svc>, A) -> R,
    {
        self.app.invoke_intent(intent, args)
    }

    /// Bind a query and a transition into a two-way [`ValueLink`].
    pub fn value_link<Q, R, T, V, O>(&self, query: Q, transition: T) -> ValueLink<Svc, Q, T>
    where
        Q: Fn(&QueryContext, ()) -> R,
        R: IntoPlain,
        T: Fn(&TransitionContext, V) -> O,
        O: NextState,
    {
        ValueLink::new(self.app.clone(), query, transition)
    }
}

impl<Svc> fmt::Debug for ViewContext<Svc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewContext")
            .field("app", &self.app.id())
            .finish()
    }
}
