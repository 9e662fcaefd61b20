//! Notification errors.

use super::subscribers::SubscriptionId;
use thiserror::Error;

/// One subscriber that returned an error or panicked during a notification round.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("Subscriber {subscription} failed: {message}")]
pub struct SubscriberFailure {
    pub subscription: SubscriptionId,
    pub message: String,
}

/// Errors surfaced after a notification round has finished.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NotifyError {
    #[error("{} of {delivered} subscriber(s) failed during notification", .failures.len())]
    SubscribersFailed {
        delivered: usize,
        failures: Vec<SubscriberFailure>,
    },
}
