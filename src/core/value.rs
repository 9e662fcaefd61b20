//! Persistent state values.
//!
//! A [`Value`] is the single immutable data graph held by a container. Maps
//! and lists are backed by `imbl` persistent collections, so cloning a value
//! is O(1) and every "write" returns a new value that shares structure with
//! the old one. Equality is structural.

use super::error::StateError;
use imbl::{OrdMap, Vector};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Number;
use std::fmt;

/// Persistent, structurally comparable application state.
///
/// # Example
///
/// ```rust
/// use flowcell::Value;
/// use serde_json::json;
///
/// let state = Value::from_plain(json!({ "user": { "name": "Ann" } }));
/// let renamed = state.set_in(&["user", "name"], "Bob").unwrap();
///
/// assert_eq!(state.get_in(["user", "name"]).and_then(Value::as_str), Some("Ann"));
/// assert_eq!(renamed.get_in(["user", "name"]).and_then(Value::as_str), Some("Bob"));
/// assert_ne!(state, renamed);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vector<Value>),
    Map(OrdMap<String, Value>),
}

impl Default for Value {
    fn default() -> Self {
        Self::empty()
    }
}

impl Value {
    /// An empty map, the state of a container built without initial data.
    pub fn empty() -> Self {
        Self::Map(OrdMap::new())
    }

    /// Convert plain nested data into its persistent form.
    pub fn from_plain(plain: serde_json::Value) -> Self {
        match plain {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Self::from_plain).collect())
            }
            serde_json::Value::Object(entries) => Self::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Self::from_plain(value)))
                    .collect(),
            ),
        }
    }

    /// Deep conversion back into plain data.
    pub fn to_plain(&self) -> serde_json::Value {
        match self {
            Self::Null => serde_json::Value::Null,
            Self::Bool(b) => serde_json::Value::Bool(*b),
            Self::Number(n) => serde_json::Value::Number(n.clone()),
            Self::String(s) => serde_json::Value::String(s.clone()),
            Self::List(items) => serde_json::Value::Array(items.iter().map(Self::to_plain).collect()),
            Self::Map(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_plain()))
                    .collect(),
            ),
        }
    }

    /// Deserialize a typed value out of the plain form of this one.
    pub fn deserialize_into<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_value(self.to_plain())
    }

    /// Short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Number(_) => "number",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Number of entries in a map or list; scalars have none.
    pub fn len(&self) -> usize {
        match self {
            Self::List(items) => items.len(),
            Self::Map(entries) => entries.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&Vector<Value>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&OrdMap<String, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a map key, or a list index written in decimal.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Self::Map(entries) => entries.get(key),
            Self::List(items) => key.parse::<usize>().ok().and_then(|index| items.get(index)),
            _ => None,
        }
    }

    /// Follow `path` one segment at a time; `None` as soon as a segment is missing.
    pub fn get_in<I, K>(&self, path: I) -> Option<&Value>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        path.into_iter()
            .try_fold(self, |node, key| node.get(key.as_ref()))
    }

    /// Return a copy of this value with `key` bound to `value`.
    ///
    /// On lists the key is an index; writing at `len` appends.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<Value, StateError> {
        match self {
            Self::Map(entries) => Ok(Self::Map(entries.update(key.to_owned(), value.into()))),
            Self::List(items) => {
                let index = parse_index(key)?;
                if index < items.len() {
                    Ok(Self::List(items.update(index, value.into())))
                } else if index == items.len() {
                    let mut items = items.clone();
                    items.push_back(value.into());
                    Ok(Self::List(items))
                } else {
                    Err(StateError::IndexOutOfBounds {
                        index,
                        len: items.len(),
                    })
                }
            }
            other => Err(StateError::NotAContainer {
                kind: other.kind(),
                key: key.to_owned(),
            }),
        }
    }

    /// Return a copy with the value at `path` replaced.
    ///
    /// Missing or null intermediate segments are created as empty maps.
    pub fn set_in<K: AsRef<str>>(
        &self,
        path: &[K],
        value: impl Into<Value>,
    ) -> Result<Value, StateError> {
        let (head, rest) = path.split_first().ok_or(StateError::EmptyPath)?;
        let key = head.as_ref();
        if rest.is_empty() {
            return self.set(key, value);
        }

        let child = match self.get(key) {
            Some(child) if !child.is_null() => child.set_in(rest, value)?,
            _ => Self::empty().set_in(rest, value)?,
        };
        self.set(key, child)
    }

    /// Return a copy with the value at `path` replaced by `f(current)`.
    pub fn update_in<K, F>(&self, path: &[K], f: F) -> Result<Value, StateError>
    where
        K: AsRef<str>,
        F: FnOnce(Option<&Value>) -> Value,
    {
        let next = f(self.get_in(path));
        self.set_in(path, next)
    }

    /// Return a copy without `key`. Removing an absent map key is not an error.
    pub fn remove(&self, key: &str) -> Result<Value, StateError> {
        match self {
            Self::Map(entries) => Ok(Self::Map(entries.without(key))),
            Self::List(items) => {
                let index = parse_index(key)?;
                if index >= items.len() {
                    return Err(StateError::IndexOutOfBounds {
                        index,
                        len: items.len(),
                    });
                }
                let mut items = items.clone();
                items.remove(index);
                Ok(Self::List(items))
            }
            other => Err(StateError::NotAContainer {
                kind: other.kind(),
                key: key.to_owned(),
            }),
        }
    }
}

fn parse_index(segment: &str) -> Result<usize, StateError> {
    segment.parse().map_err(|_| StateError::InvalidIndex {
        segment: segment.to_owned(),
    })
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_plain())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::List(items) => serializer.collect_seq(items.iter()),
            Self::Map(entries) => serializer.collect_map(entries.iter()),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Self::from_plain)
    }
}

impl From<serde_json::Value> for Value {
    fn from(plain: serde_json::Value) -> Self {
        Self::from_plain(plain)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

macro_rules! impl_from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Self::Number(Number::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// Non-finite floats have no plain representation and become `Null`.
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(Self::Null, Self::Number)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<Vector<Value>> for Value {
    fn from(items: Vector<Value>) -> Self {
        Self::List(items)
    }
}

impl From<OrdMap<String, Value>> for Value {
    fn from(entries: OrdMap<String, Value>) -> Self {
        Self::Map(entries)
    }
}

impl<K, V> FromIterator<(K, V)> for Value
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Map(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_is_an_empty_map() {
        let state = Value::empty();
        assert_eq!(state.kind(), "map");
        assert!(state.is_empty());
        assert_eq!(state, Value::default());
    }

    #[test]
    fn plain_conversion_preserves_nested_data() {
        let plain = json!({
            "some": { "nested": "values" },
            "items": [1, 2, { "deep": true }],
            "missing": null,
        });

        let state = Value::from_plain(plain.clone());

        assert_eq!(
            state.get_in(["some", "nested"]).and_then(Value::as_str),
            Some("values")
        );
        assert_eq!(
            state.get_in(["items", "2", "deep"]).and_then(Value::as_bool),
            Some(true)
        );
        assert_eq!(state.to_plain(), plain);
    }

    #[test]
    fn equality_is_structural() {
        let built = Value::empty()
            .set("b", 2)
            .and_then(|v| v.set("a", 1))
            .unwrap();
        let converted = Value::from_plain(json!({ "a": 1, "b": 2 }));

        assert_eq!(built, converted);
    }

    #[test]
    fn set_leaves_original_untouched() {
        let original = Value::from_plain(json!({ "name": "Ann" }));
        let updated = original.set("name", "Bob").unwrap();

        assert_eq!(original.get("name").and_then(Value::as_str), Some("Ann"));
        assert_eq!(updated.get("name").and_then(Value::as_str), Some("Bob"));
    }

    #[test]
    fn set_in_creates_missing_maps() {
        let state = Value::empty()
            .set_in(&["settings", "theme", "accent"], "teal")
            .unwrap();

        assert_eq!(
            state.to_plain(),
            json!({ "settings": { "theme": { "accent": "teal" } } })
        );
    }

    #[test]
    fn set_in_replaces_null_intermediate() {
        let state = Value::from_plain(json!({ "profile": null }));
        let updated = state.set_in(&["profile", "age"], 31).unwrap();

        assert_eq!(updated.to_plain(), json!({ "profile": { "age": 31 } }));
    }

    #[test]
    fn set_in_rejects_scalar_intermediate() {
        let state = Value::from_plain(json!({ "name": "Ann" }));
        let result = state.set_in(&["name", "first"], "A");

        assert_eq!(
            result,
            Err(StateError::NotAContainer {
                kind: "string",
                key: "first".to_string(),
            })
        );
    }

    #[test]
    fn set_in_requires_a_path() {
        let empty: [&str; 0] = [];
        assert_eq!(
            Value::empty().set_in(&empty, 1),
            Err(StateError::EmptyPath)
        );
    }

    #[test]
    fn list_set_updates_appends_and_bounds_checks() {
        let list = Value::from_plain(json!(["a", "b"]));

        assert_eq!(list.set("0", "z").unwrap().to_plain(), json!(["z", "b"]));
        assert_eq!(list.set("2", "c").unwrap().to_plain(), json!(["a", "b", "c"]));
        assert_eq!(
            list.set("5", "x"),
            Err(StateError::IndexOutOfBounds { index: 5, len: 2 })
        );
        assert!(matches!(
            list.set("first", "x"),
            Err(StateError::InvalidIndex { .. })
        ));
    }

    #[test]
    fn remove_from_map_and_list() {
        let state = Value::from_plain(json!({ "a": 1, "b": [1, 2, 3] }));

        let without_a = state.remove("a").unwrap();
        assert_eq!(without_a.to_plain(), json!({ "b": [1, 2, 3] }));
        assert_eq!(state.remove("absent").unwrap(), state);

        let list = state.get("b").unwrap();
        assert_eq!(list.remove("1").unwrap().to_plain(), json!([1, 3]));
        assert!(list.remove("3").is_err());
    }

    #[test]
    fn update_in_sees_current_value() {
        let state = Value::from_plain(json!({ "counter": { "value": 41 } }));
        let updated = state
            .update_in(&["counter", "value"], |current| {
                Value::from(current.and_then(Value::as_i64).unwrap_or(0) + 1)
            })
            .unwrap();

        assert_eq!(updated.get_in(["counter", "value"]).and_then(Value::as_i64), Some(42));
    }

    #[test]
    fn non_finite_float_becomes_null() {
        assert!(Value::from(f64::NAN).is_null());
        assert_eq!(Value::from(1.5).as_f64(), Some(1.5));
    }

    #[test]
    fn collects_pairs_into_map() {
        let state: Value = [("name", "Ann"), ("role", "admin")].into_iter().collect();
        assert_eq!(state.to_plain(), json!({ "name": "Ann", "role": "admin" }));
    }

    #[test]
    fn serde_matches_plain_form() {
        let plain = json!({ "list": [true, null, 3], "text": "hi" });
        let state = Value::from_plain(plain.clone());

        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<serde_json::Value>(&json).unwrap(), plain);

        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn deserialize_into_typed_struct() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct User {
            name: String,
            age: u32,
        }

        let state = Value::from_plain(json!({ "name": "Ann", "age": 31 }));
        let user: User = state.deserialize_into().unwrap();

        assert_eq!(
            user,
            User {
                name: "Ann".to_string(),
                age: 31
            }
        );
    }

    #[test]
    fn display_renders_json() {
        let state = Value::from_plain(json!({ "k": "v" }));
        assert_eq!(state.to_string(), r#"{"k":"v"}"#);
    }
}
