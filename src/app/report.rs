//! Outcomes of state updates and notification rounds.

use super::error::{NotifyError, SubscriberFailure};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of one notification round.
///
/// Every live subscriber is called even when earlier ones fail; the report
/// carries every failure of the round.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NotifyReport {
    delivered: usize,
    failures: Vec<SubscriberFailure>,
}

impl NotifyReport {
    pub(crate) fn new(
        delivered: usize,
        outcome: Validation<(), NonEmptyVec<SubscriberFailure>>,
    ) -> Self {
        let failures = match outcome {
            Validation::Success(_) => Vec::new(),
            Validation::Failure(errors) => errors.iter().cloned().collect(),
        };
        Self {
            delivered,
            failures,
        }
    }

    /// Number of subscribers invoked in this round.
    pub fn delivered(&self) -> usize {
        self.delivered
    }

    pub fn failures(&self) -> &[SubscriberFailure] {
        &self.failures
    }

    /// True when no subscriber failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn accumulated failures into an error; `Ok` carries the delivered count.
    pub fn into_result(self) -> Result<usize, NotifyError> {
        if self.failures.is_empty() {
            Ok(self.delivered)
        } else {
            Err(NotifyError::SubscribersFailed {
                delivered: self.delivered,
                failures: self.failures,
            })
        }
    }
}

/// Result of a single `update_state` call.
#[derive(Clone, Debug, PartialEq)]
pub enum StateUpdate {
    /// The transition declined to update, or produced an equal state.
    Unchanged,

    /// The state was replaced and subscribers were notified.
    Committed(NotifyReport),
}

impl StateUpdate {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    /// The notification report, when the update was committed.
    pub fn report(&self) -> Option<&NotifyReport> {
        match self {
            Self::Committed(report) => Some(report),
            Self::Unchanged => None,
        }
    }
}
