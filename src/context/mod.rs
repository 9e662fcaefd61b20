//! Capability-scoped views of a container.
//!
//! Each context exposes a fixed, closed set of operations:
//!
//! | Context | Exposes |
//! |---|---|
//! | [`QueryContext`] | `state()` |
//! | [`TransitionContext`] | `state()` as of transition start |
//! | [`IntentContext`] | `query_state`, `update_state`, `try_update_state`, `invoke_service` |
//! | [`ViewContext`] | `query_state`, `invoke_intent`, `value_link` |
//!
//! Contexts have private fields and only `&self` methods, so nothing handed
//! to user code can reassign container-owned data. Reading through the
//! accessor compiles:
//!
//! ```
//! use flowcell::{create_app, AppOptions};
//!
//! let app = create_app(AppOptions::<()>::default()).unwrap();
//! app.invoke_intent(|ctx, _| ctx.query_state(|query, _| query.state().clone(), ()), ());
//! ```
//!
//! while naming the field directly does not:
//!
//! ```compile_fail
//! use flowcell::{create_app, AppOptions};
//!
//! let app = create_app(AppOptions::<()>::default()).unwrap();
//! app.invoke_intent(|ctx, _| ctx.query_state(|query, _| query.state.clone(), ()), ());
//! ```

mod intent;
mod link;
mod query;
mod view;

pub use intent::IntentContext;
pub use link::ValueLink;
pub use query::{QueryContext, TransitionContext};
pub use view::ViewContext;
