//! Two-way bindings for rendering layers.

use crate::app::{App, StateUpdate};
use crate::context::{QueryContext, TransitionContext};
use crate::core::{IntoPlain, NextState};
use std::fmt;

/// A query/transition pair bound to a container.
///
/// The link keeps no value of its own: [`value`](Self::value) re-runs the
/// query on every call and [`request_change`](Self::request_change) runs the
/// transition with the new value as its argument.
///
/// # Example
///
/// ```rust
/// use flowcell::{AppBuilder, QueryContext, TransitionContext};
/// use serde_json::json;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let app = AppBuilder::new()
///     .initial_state(json!({ "name": "Ann" }))
///     .build()
///     .unwrap();
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&seen);
/// app.subscribe(move |view| {
///     let link = view.value_link(
///         |q: &QueryContext, _: ()| q.state().get("name").cloned(),
///         |t: &TransitionContext, name: String| t.state().set("name", name).ok(),
///     );
///     sink.borrow_mut().push(link.value());
/// });
///
/// app.trigger_update();
/// assert_eq!(*seen.borrow(), vec![Some(json!("Ann"))]);
/// ```
pub struct ValueLink<Svc, Q, T> {
    app: App<Svc>,
    query: Q,
    transition: T,
}

impl<Svc, Q, T> ValueLink<Svc, Q, T> {
    pub(crate) fn new(app: App<Svc>, query: Q, transition: T) -> Self {
        Self {
            app,
            query,
            transition,
        }
    }

    /// Current result of the bound query, read at call time.
    pub fn value<R>(&self) -> R::Plain
    where
        Q: Fn(&QueryContext, ()) -> R,
        R: IntoPlain,
    {
        self.app.query_state(&self.query, ())
    }

    /// Run the bound transition with `value` as its argument.
    pub fn request_change<V, O>(&self, value: V) -> StateUpdate
    where
        T: Fn(&TransitionContext, V) -> O,
        O: NextState,
    {
        self.app.update_state(&self.transition, value)
    }
}

impl<Svc, Q, T> fmt::Debug for ValueLink<Svc, Q, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueLink")
            .field("app", &self.app.id())
            .finish_non_exhaustive()
    }
}
