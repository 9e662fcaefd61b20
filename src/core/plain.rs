//! Conversion of query results into plain data.
//!
//! Queries may return persistent structures. The container converts them
//! exactly once, when the query result leaves `query_state`, so callers
//! never hold a persistent value they did not ask for.

use super::value::Value;
use imbl::{OrdMap, Vector};

/// A query result that can cross the container boundary.
///
/// Persistent values convert into `serde_json::Value`; containers of
/// convertible values convert element-wise; everything else passes through.
pub trait IntoPlain {
    type Plain;

    fn into_plain(self) -> Self::Plain;
}

/// Wraps a query result that must cross the boundary untouched.
///
/// # Example
///
/// ```rust
/// use flowcell::{IntoPlain, Raw, Value};
///
/// let kept = Raw(Value::empty()).into_plain();
/// assert_eq!(kept, Value::empty());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Raw<T>(pub T);

impl<T> IntoPlain for Raw<T> {
    type Plain = T;

    fn into_plain(self) -> T {
        self.0
    }
}

impl IntoPlain for Value {
    type Plain = serde_json::Value;

    fn into_plain(self) -> serde_json::Value {
        self.to_plain()
    }
}

impl IntoPlain for OrdMap<String, Value> {
    type Plain = serde_json::Value;

    fn into_plain(self) -> serde_json::Value {
        Value::Map(self).to_plain()
    }
}

impl IntoPlain for Vector<Value> {
    type Plain = serde_json::Value;

    fn into_plain(self) -> serde_json::Value {
        Value::List(self).to_plain()
    }
}

impl<T: IntoPlain> IntoPlain for Option<T> {
    type Plain = Option<T::Plain>;

    fn into_plain(self) -> Self::Plain {
        self.map(IntoPlain::into_plain)
    }
}

impl<T: IntoPlain> IntoPlain for Vec<T> {
    type Plain = Vec<T::Plain>;

    fn into_plain(self) -> Self::Plain {
        self.into_iter().map(IntoPlain::into_plain).collect()
    }
}

impl<T: IntoPlain, E> IntoPlain for Result<T, E> {
    type Plain = Result<T::Plain, E>;

    fn into_plain(self) -> Self::Plain {
        self.map(IntoPlain::into_plain)
    }
}

impl<A: IntoPlain, B: IntoPlain> IntoPlain for (A, B) {
    type Plain = (A::Plain, B::Plain);

    fn into_plain(self) -> Self::Plain {
        (self.0.into_plain(), self.1.into_plain())
    }
}

impl<A: IntoPlain, B: IntoPlain, C: IntoPlain> IntoPlain for (A, B, C) {
    type Plain = (A::Plain, B::Plain, C::Plain);

    fn into_plain(self) -> Self::Plain {
        (self.0.into_plain(), self.1.into_plain(), self.2.into_plain())
    }
}

macro_rules! impl_passthrough {
    ($($ty:ty),* $(,)?) => {
        $(
            impl IntoPlain for $ty {
                type Plain = $ty;

                fn into_plain(self) -> $ty {
                    self
                }
            }
        )*
    };
}

impl_passthrough!(
    (),
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    String,
    &'static str,
    serde_json::Value,
    serde_json::Number,
);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn persistent_value_becomes_plain() {
        let state = Value::from_plain(json!({ "obj": { "k": "v" } }));
        let obj = state.get("obj").cloned();

        assert_eq!(obj.into_plain(), Some(json!({ "k": "v" })));
    }

    #[test]
    fn scalars_pass_through() {
        assert_eq!("Fred".to_string().into_plain(), "Fred");
        assert_eq!(42_i64.into_plain(), 42);
    }

    #[test]
    fn containers_convert_element_wise() {
        let items = vec![Value::from(1), Value::from("two")];
        assert_eq!(items.into_plain(), vec![json!(1), json!("two")]);

        let pair = (Value::from(true), 7_u32);
        assert_eq!(pair.into_plain(), (json!(true), 7));
    }

    #[test]
    fn errors_are_left_alone() {
        let failed: Result<Value, &str> = Err("no such user");
        assert_eq!(failed.into_plain(), Err("no such user"));

        let found: Result<Value, &str> = Ok(Value::from("Ann"));
        assert_eq!(found.into_plain(), Ok(json!("Ann")));
    }

    #[test]
    fn persistent_collections_become_plain() {
        let list: Vector<Value> = vec![Value::from(1), Value::from(2)].into_iter().collect();
        assert_eq!(list.into_plain(), json!([1, 2]));

        let map: OrdMap<String, Value> = [("a".to_string(), Value::Null)].into_iter().collect();
        assert_eq!(map.into_plain(), json!({ "a": null }));
    }

    #[test]
    fn raw_skips_conversion() {
        let raw = Raw(Value::from("kept"));
        assert_eq!(raw.into_plain(), Value::from("kept"));
    }
}
