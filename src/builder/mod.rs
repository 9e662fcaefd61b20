//! Construction of containers.
//!
//! [`create_app`] takes an [`AppOptions`] value; [`AppBuilder`] is the
//! fluent equivalent. Both convert the plain initial data into its
//! persistent form exactly once.

pub mod error;

pub use error::BuildError;

use crate::app::App;
use crate::core::Value;
use serde::Serialize;

/// Options recognized by [`create_app`].
#[derive(Clone, Debug, Default)]
pub struct AppOptions<Svc = ()> {
    /// Plain nested data; `None` and `null` mean an empty map.
    pub initial_state: Option<serde_json::Value>,

    /// Opaque value handed to services; the container never inspects it.
    pub service_context: Svc,
}

/// Create a container from `options`.
///
/// # Example
///
/// ```rust
/// use flowcell::{create_app, AppOptions};
/// use serde_json::json;
///
/// let app = create_app(AppOptions {
///     initial_state: Some(json!({ "some": { "nested": "values" } })),
///     service_context: (),
/// })
/// .unwrap();
///
/// let nested = app.invoke_intent(
///     |ctx, _| ctx.query_state(|q, _| q.state().get_in(["some", "nested"]).cloned(), ()),
///     (),
/// );
/// assert_eq!(nested, Some(json!("values")));
/// ```
pub fn create_app<Svc>(options: AppOptions<Svc>) -> Result<App<Svc>, BuildError> {
    let state = initial_state(options.initial_state)?;
    Ok(App::from_parts(state, options.service_context))
}

fn initial_state(plain: Option<serde_json::Value>) -> Result<Value, BuildError> {
    match plain {
        None | Some(serde_json::Value::Null) => Ok(Value::empty()),
        Some(plain @ serde_json::Value::Object(_)) => Ok(Value::from_plain(plain)),
        Some(other) => Err(BuildError::InitialStateNotAMap {
            found: Value::from_plain(other).kind(),
        }),
    }
}

/// Builder for constructing containers with a fluent API.
pub struct AppBuilder<Svc = ()> {
    initial_state: Option<serde_json::Value>,
    service_context: Svc,
}

impl AppBuilder {
    /// Create a new builder with no initial data and no service context.
    pub fn new() -> Self {
        Self {
            initial_state: None,
            service_context: (),
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<Svc> AppBuilder<Svc> {
    /// Set the initial state from plain data.
    pub fn initial_state(mut self, plain: serde_json::Value) -> Self {
        self.initial_state = Some(plain);
        self
    }

    /// Set the initial state from any serializable value.
    pub fn initial_state_from<T: Serialize>(self, data: &T) -> Result<Self, BuildError> {
        let plain = serde_json::to_value(data)
            .map_err(|e| BuildError::SerializationFailed(e.to_string()))?;
        Ok(self.initial_state(plain))
    }

    /// Set the service context, replacing any previous one.
    pub fn service_context<S>(self, service_context: S) -> AppBuilder<S> {
        AppBuilder {
            initial_state: self.initial_state,
            service_context,
        }
    }

    /// Build the container.
    /// Returns an error if the initial state is not a map.
    pub fn build(self) -> Result<App<Svc>, BuildError> {
        create_app(AppOptions {
            initial_state: self.initial_state,
            service_context: self.service_context,
        })
    }
}
