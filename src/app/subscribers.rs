//! Ordered subscriber registrations.
//!
//! Registrations live in a plain `Vec` in subscription order. Unsubscribing
//! flips a shared liveness flag; dead entries are pruned lazily the next
//! time the list is snapshotted or appended to. A notification round works
//! from a snapshot and re-checks the flag right before each delivery, so a
//! subscriber removed mid-round is never called later in that round.

use super::error::SubscriberFailure;
use crate::context::ViewContext;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use uuid::Uuid;

/// Unique identifier of one `subscribe` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// What a subscriber callback may return.
///
/// `()` always succeeds; `Err` values are recorded as failures of the round.
pub trait SubscriberOutcome {
    fn into_outcome(self) -> Result<(), String>;
}

impl SubscriberOutcome for () {
    fn into_outcome(self) -> Result<(), String> {
        Ok(())
    }
}

impl<E: fmt::Display> SubscriberOutcome for Result<(), E> {
    fn into_outcome(self) -> Result<(), String> {
        self.map_err(|e| e.to_string())
    }
}

/// Handle returned by `subscribe`.
///
/// Dropping the handle keeps the subscription alive; call
/// [`unsubscribe`](Self::unsubscribe) to remove it.
#[derive(Clone, Debug)]
pub struct Subscription {
    id: SubscriptionId,
    app: Uuid,
    active: Rc<Cell<bool>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Remove this registration.
    ///
    /// Returns `true` only for the call that actually removed it; later calls
    /// are no-ops.
    pub fn unsubscribe(&self) -> bool {
        let was_active = self.active.replace(false);
        if was_active {
            tracing::debug!(app = %self.app, subscription = %self.id, "unsubscribed");
        }
        was_active
    }
}

pub(crate) type Callback<Svc> = Rc<dyn Fn(&ViewContext<Svc>) -> Result<(), String>>;

pub(crate) struct Registration<Svc> {
    id: SubscriptionId,
    active: Rc<Cell<bool>>,
    callback: Callback<Svc>,
}

impl<Svc> Clone for Registration<Svc> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Rc::clone(&self.active),
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<Svc> Registration<Svc> {
    pub(crate) fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Call the subscriber, turning an `Err` or a panic into a recorded failure.
    pub(crate) fn deliver(
        &self,
        view: &ViewContext<Svc>,
    ) -> Validation<(), NonEmptyVec<SubscriberFailure>> {
        let message = match panic::catch_unwind(AssertUnwindSafe(|| (self.callback)(view))) {
            Ok(Ok(())) => return Validation::success(()),
            Ok(Err(message)) => message,
            Err(payload) => panic_message(payload.as_ref()),
        };

        tracing::warn!(subscription = %self.id, error = %message, "subscriber failed");
        Validation::fail(SubscriberFailure {
            subscription: self.id,
            message,
        })
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}

pub(crate) struct SubscriberList<Svc> {
    entries: Vec<Registration<Svc>>,
}

impl<Svc> Default for SubscriberList<Svc> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<Svc> SubscriberList<Svc> {
    pub(crate) fn push(&mut self, app: Uuid, callback: Callback<Svc>) -> Subscription {
        self.prune();

        let id = SubscriptionId::new();
        let active = Rc::new(Cell::new(true));
        self.entries.push(Registration {
            id,
            active: Rc::clone(&active),
            callback,
        });

        Subscription { id, app, active }
    }

    /// Live registrations in subscription order.
    pub(crate) fn snapshot(&mut self) -> Vec<Registration<Svc>> {
        self.prune();
        self.entries.clone()
    }

    pub(crate) fn active_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.is_active()).count()
    }

    fn prune(&mut self) {
        self.entries.retain(Registration::is_active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Callback<()> {
        Rc::new(|_: &ViewContext| Ok::<(), String>(()))
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let mut list: SubscriberList<()> = SubscriberList::default();
        let subscription = list.push(Uuid::new_v4(), noop());

        assert!(subscription.is_active());
        assert!(subscription.unsubscribe());
        assert!(!subscription.unsubscribe());
        assert!(!subscription.is_active());
    }

    #[test]
    fn snapshot_drops_unsubscribed_entries() {
        let mut list: SubscriberList<()> = SubscriberList::default();
        let app = Uuid::new_v4();
        let first = list.push(app, noop());
        let second = list.push(app, noop());
        let third = list.push(app, noop());

        second.unsubscribe();

        let ids: Vec<_> = list.snapshot().iter().map(|entry| entry.id).collect();
        assert_eq!(ids, vec![first.id(), third.id()]);
        assert_eq!(list.active_count(), 2);
    }

    #[test]
    fn registrations_get_distinct_ids() {
        let mut list: SubscriberList<()> = SubscriberList::default();
        let app = Uuid::new_v4();
        let first = list.push(app, noop());
        let second = list.push(app, noop());

        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn subscriber_outcomes() {
        assert_eq!(().into_outcome(), Ok(()));
        assert_eq!(Ok::<(), String>(()).into_outcome(), Ok(()));
        assert_eq!(
            Err::<(), _>("disk full").into_outcome(),
            Err("disk full".to_string())
        );
    }

    #[test]
    fn panic_payloads_are_described() {
        assert_eq!(panic_message(&"boom"), "panicked: boom");
        assert_eq!(panic_message(&String::from("bang")), "panicked: bang");
        assert_eq!(panic_message(&42_u8), "panicked");
    }
}
