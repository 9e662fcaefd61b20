//! The state container.
//!
//! [`App`] owns the current state and the subscriber list. Everything else
//! reaches it through contexts:
//!
//! - intents get an [`IntentContext`] from [`App::invoke_intent`]
//! - subscribers get a [`ViewContext`] on every notification
//!
//! # Ordering
//!
//! A committed transition swaps the state first and notifies second, so a
//! subscriber that queries always sees the post-change state. Notification
//! is synchronous; re-entrant intents started by a subscriber run to
//! completion (with their own rounds) before the next subscriber is called.
//! No `RefCell` borrow is held while user code runs.

mod error;
mod report;
mod subscribers;

pub use error::{NotifyError, SubscriberFailure};
pub use report::{NotifyReport, StateUpdate};
pub use subscribers::{SubscriberOutcome, Subscription, SubscriptionId};

use crate::context::{IntentContext, QueryContext, TransitionContext, ViewContext};
use crate::core::{IntoPlain, NextState, Value};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use stillwater::validation::Validation;
use subscribers::{Callback, SubscriberList};
use uuid::Uuid;

/// Handle to a state container.
///
/// Cloning the handle is cheap and yields another handle to the same
/// container. Each call to [`create_app`](crate::create_app) creates an
/// independent container.
pub struct App<Svc = ()> {
    inner: Rc<Inner<Svc>>,
}

struct Inner<Svc> {
    id: Uuid,
    state: RefCell<Value>,
    subscribers: RefCell<SubscriberList<Svc>>,
    service: Svc,
}

impl<Svc> Clone for App<Svc> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<Svc> App<Svc> {
    pub(crate) fn from_parts(state: Value, service: Svc) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(app = %id, entries = state.len(), "created app");
        Self {
            inner: Rc::new(Inner {
                id,
                state: RefCell::new(state),
                subscribers: RefCell::new(SubscriberList::default()),
                service,
            }),
        }
    }

    /// Identifier used in log events.
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.subscribers.borrow().active_count()
    }

    /// Register `subscriber` to be called after every committed change and on
    /// [`trigger_update`](Self::trigger_update).
    ///
    /// Subscribers are called in registration order. Registering the same
    /// closure twice creates two registrations.
    pub fn subscribe<F, R>(&self, subscriber: F) -> Subscription
    where
        Svc: 'static,
        F: Fn(&ViewContext<Svc>) -> R + 'static,
        R: SubscriberOutcome,
    {
        let callback: Callback<Svc> =
            Rc::new(move |view: &ViewContext<Svc>| subscriber(view).into_outcome());
        let subscription = self
            .inner
            .subscribers
            .borrow_mut()
            .push(self.inner.id, callback);
        tracing::debug!(app = %self.inner.id, subscription = %subscription.id(), "subscribed");
        subscription
    }

    /// Notify every current subscriber without a state change.
    pub fn trigger_update(&self) -> NotifyReport {
        tracing::trace!(app = %self.inner.id, "update triggered");
        self.notify()
    }

    /// Run `intent` with an [`IntentContext`] and return its result unchanged.
    pub fn invoke_intent<A, R, I>(&self, intent: I, args: A) -> R
    where
        I: FnOnce(&IntentContext<Svc>, A) -> R,
    {
        let _span = tracing::trace_span!("invoke_intent", app = %self.inner.id).entered();
        intent(&IntentContext::new(self.clone()), args)
    }

    fn snapshot(&self) -> Value {
        self.inner.state.borrow().clone()
    }

    pub(crate) fn query_state<A, R, Q>(&self, query: Q, args: A) -> R::Plain
    where
        Q: FnOnce(&QueryContext, A) -> R,
        R: IntoPlain,
    {
        tracing::trace!(app = %self.inner.id, "query");
        query(&QueryContext::new(self.snapshot()), args).into_plain()
    }

    pub(crate) fn update_state<A, O, T>(&self, transition: T, args: A) -> StateUpdate
    where
        T: FnOnce(&TransitionContext, A) -> O,
        O: NextState,
    {
        let next = transition(&TransitionContext::new(self.snapshot()), args);
        self.commit(next.into_next_state())
    }

    pub(crate) fn try_update_state<A, O, E, T>(
        &self,
        transition: T,
        args: A,
    ) -> Result<StateUpdate, E>
    where
        T: FnOnce(&TransitionContext, A) -> Result<O, E>,
        O: NextState,
    {
        let next = transition(&TransitionContext::new(self.snapshot()), args)?;
        Ok(self.commit(next.into_next_state()))
    }

    pub(crate) fn invoke_service<A, R, F>(&self, service: F, args: A) -> R
    where
        F: FnOnce(&Svc, A) -> R,
    {
        tracing::trace!(app = %self.inner.id, "invoke service");
        service(&self.inner.service, args)
    }

    /// Swap in `next` when it differs structurally, then notify.
    fn commit(&self, next: Option<Value>) -> StateUpdate {
        let Some(next) = next else {
            tracing::trace!(app = %self.inner.id, "transition declined");
            return StateUpdate::Unchanged;
        };

        {
            let mut current = self.inner.state.borrow_mut();
            if *current == next {
                tracing::trace!(app = %self.inner.id, "transition produced an equal state");
                return StateUpdate::Unchanged;
            }
            *current = next;
        }

        tracing::debug!(
            app = %self.inner.id,
            subscribers = self.subscriber_count(),
            "state committed"
        );
        StateUpdate::Committed(self.notify())
    }

    fn notify(&self) -> NotifyReport {
        let registrations = self.inner.subscribers.borrow_mut().snapshot();
        let view = ViewContext::new(self.clone());

        let mut delivered = 0;
        let checks: Vec<_> = registrations
            .iter()
            .filter(|registration| registration.is_active())
            .map(|registration| {
                delivered += 1;
                registration.deliver(&view)
            })
            .collect();

        NotifyReport::new(delivered, Validation::all_vec(checks).map(|_| ()))
    }
}

impl<Svc> fmt::Debug for App<Svc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("id", &self.inner.id)
            .field("state", &*self.inner.state.borrow())
            .field("subscribers", &self.subscriber_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::AppBuilder;
    use serde_json::json;
    use std::cell::Cell;

    fn app_with(initial: serde_json::Value) -> App {
        AppBuilder::new().initial_state(initial).build().unwrap()
    }

    fn set_name(ctx: &IntentContext, name: &'static str) -> StateUpdate {
        ctx.update_state(|t, name| t.state().set("name", name).ok(), name)
    }

    #[test]
    fn equal_state_is_not_committed() {
        let app = app_with(json!({ "name": "Ann" }));
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        app.subscribe(move |_| counter.set(counter.get() + 1));

        let update = app.invoke_intent(set_name, "Ann");

        assert_eq!(update, StateUpdate::Unchanged);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn changed_state_is_committed_and_reported() {
        let app = app_with(json!({ "name": "Ann" }));
        app.subscribe(|_| ());
        app.subscribe(|_| ());

        let update = app.invoke_intent(set_name, "Bob");

        assert_eq!(update.report().map(NotifyReport::delivered), Some(2));
    }

    #[test]
    fn declined_transition_keeps_state() {
        let app = app_with(json!({ "name": "Ann" }));

        let update = app.invoke_intent(|ctx, _| ctx.update_state(|_, _| None::<Value>, ()), ());
        let name = app.invoke_intent(
            |ctx, _| ctx.query_state(|q, _| q.state().get("name").cloned(), ()),
            (),
        );

        assert_eq!(update, StateUpdate::Unchanged);
        assert_eq!(name, Some(json!("Ann")));
    }

    #[test]
    fn transition_sees_state_at_start() {
        let app = app_with(json!({ "count": 1 }));

        let seen = app.invoke_intent(
            |ctx, _| {
                let mut seen = None;
                ctx.update_state(
                    |t, _| {
                        seen = t.state().get("count").and_then(Value::as_i64);
                        t.state().set("count", 2).ok()
                    },
                    (),
                );
                seen
            },
            (),
        );

        assert_eq!(seen, Some(1));
    }

    #[test]
    fn subscriber_count_tracks_unsubscribe() {
        let app = app_with(json!({}));
        let first = app.subscribe(|_| ());
        let _second = app.subscribe(|_| ());
        assert_eq!(app.subscriber_count(), 2);

        first.unsubscribe();
        assert_eq!(app.subscriber_count(), 1);
    }

    #[test]
    fn debug_output_names_the_app() {
        let app = app_with(json!({ "k": 1 }));
        let rendered = format!("{app:?}");

        assert!(rendered.starts_with("App"));
        assert!(rendered.contains(&app.id().to_string()));
    }
}
