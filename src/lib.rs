//! Flowcell: a unidirectional-data-flow state container
//!
//! Application state lives in one persistent, immutable [`Value`]. All reads
//! and writes go through narrowly scoped, read-only contexts, and changes
//! are observed through subscriptions.
//!
//! # Core Concepts
//!
//! - **State**: a persistent map compared structurally, never mutated in place
//! - **Queries**: read state through a [`QueryContext`]; results cross the
//!   boundary as plain data
//! - **Transitions**: compute the next state from a [`TransitionContext`];
//!   only structurally different results are committed
//! - **Intents**: units of work with query, transition, and service access
//!   through an [`IntentContext`]
//! - **Subscribers**: notified synchronously after each commit with a
//!   [`ViewContext`]
//!
//! # Example
//!
//! ```rust
//! use flowcell::{AppBuilder, IntentContext};
//! use serde_json::json;
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! fn rename(ctx: &IntentContext, name: &'static str) {
//!     ctx.update_state(|t, name| t.state().set("name", name).ok(), name);
//! }
//!
//! let app = AppBuilder::new()
//!     .initial_state(json!({ "name": "Ann" }))
//!     .build()
//!     .unwrap();
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! app.subscribe(move |view| {
//!     let name = view.query_state(|q, _| q.state().get("name").cloned(), ());
//!     sink.borrow_mut().push(name);
//! });
//!
//! app.invoke_intent(rename, "Ann"); // equal state, no notification
//! app.invoke_intent(rename, "Bob");
//!
//! assert_eq!(*seen.borrow(), vec![Some(json!("Bob"))]);
//! ```

pub mod app;
pub mod builder;
pub mod context;
pub mod core;

// Re-export commonly used types
pub use app::{
    App, NotifyError, NotifyReport, StateUpdate, SubscriberFailure, SubscriberOutcome,
    Subscription, SubscriptionId,
};
pub use builder::{create_app, AppBuilder, AppOptions, BuildError};
pub use context::{IntentContext, QueryContext, TransitionContext, ValueLink, ViewContext};
pub use self::core::{IntoPlain, NextState, Raw, StateError, Value};
