//! Interpretation of transition results.

use super::value::Value;

/// What a transition hands back to the container.
///
/// `None` and falsy values (`Null`, `false`, zero, the empty string) mean
/// "no update intended"; the container keeps its current state without
/// comparing.
pub trait NextState {
    fn into_next_state(self) -> Option<Value>;
}

impl NextState for Value {
    fn into_next_state(self) -> Option<Value> {
        (!is_falsy(&self)).then_some(self)
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::List(_) | Value::Map(_) => false,
    }
}

impl NextState for Option<Value> {
    fn into_next_state(self) -> Option<Value> {
        self.and_then(NextState::into_next_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_is_a_candidate() {
        let next = Value::empty().set("k", "v").unwrap();
        assert_eq!(next.clone().into_next_state(), Some(next));
    }

    #[test]
    fn none_and_null_decline_the_update() {
        assert_eq!(None::<Value>.into_next_state(), None);
        assert_eq!(Value::Null.into_next_state(), None);
        assert_eq!(Some(Value::Null).into_next_state(), None);
    }

    #[test]
    fn falsy_scalars_decline_the_update() {
        assert_eq!(Value::from(false).into_next_state(), None);
        assert_eq!(Value::from(0).into_next_state(), None);
        assert_eq!(Value::from(0.0).into_next_state(), None);
        assert_eq!(Value::from("").into_next_state(), None);
        assert_eq!(Some(Value::from(false)).into_next_state(), None);
    }

    #[test]
    fn empty_containers_are_still_candidates() {
        assert_eq!(Value::empty().into_next_state(), Some(Value::empty()));
        assert_eq!(Value::from(true).into_next_state(), Some(Value::from(true)));
    }
}
