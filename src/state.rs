//! Per-call view over a resource's state map.

use crate::error::{ProviderError, Result};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Key holding the resource id in every state map.
pub const ID_KEY: &str = "id";

/// The state a CRUD callback reads its arguments from and writes results to.
///
/// Built from the planned (or current) state, optionally with the prior
/// state so callbacks can ask which fields changed.
#[derive(Debug, Clone, Default)]
pub struct ResourceData {
    id: String,
    state: Map<String, Value>,
    prior: Option<Map<String, Value>>,
}

fn into_map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

impl ResourceData {
    /// Wrap `state`; its `id` field becomes the resource id.
    pub fn new(state: Value) -> Self {
        let state = into_map(state);
        let id = state
            .get(ID_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        Self {
            id,
            state,
            prior: None,
        }
    }

    /// Wrap `planned` with `prior` for change detection.
    pub fn with_prior(prior: Value, planned: Value) -> Self {
        let prior = into_map(prior);
        let mut data = Self::new(Value::Object(planned.as_object().cloned().unwrap_or_default()));
        if data.id.is_empty() {
            if let Some(id) = prior.get(ID_KEY).and_then(Value::as_str) {
                data.id = id.to_string();
            }
        }
        data.prior = Some(prior);
        data
    }

    /// Empty state carrying only `id`, as used by import.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// The resource id; empty once the resource is gone.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Set the id. An empty id marks the resource as gone.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Raw value of `key`, null when unset.
    pub fn get(&self, key: &str) -> &Value {
        self.state.get(key).unwrap_or(&Value::Null)
    }

    /// Value of `key` if set to something other than its zero value.
    pub fn get_ok(&self, key: &str) -> Option<&Value> {
        self.state.get(key).filter(|v| !is_zero(v))
    }

    /// String value of `key` if set and non-empty.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get_ok(key).and_then(Value::as_str)
    }

    /// Integer value of `key` if set. Zero is returned as `Some(0)`.
    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.state.get(key).and_then(Value::as_i64)
    }

    /// Boolean value of `key` if set.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.state.get(key).and_then(Value::as_bool)
    }

    /// Elements of the list or set at `key`; empty when unset.
    pub fn get_list(&self, key: &str) -> &[Value] {
        self.state
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// String elements of the list at `key`.
    pub fn get_string_list(&self, key: &str) -> Vec<String> {
        self.get_list(key)
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    /// Required string at `key`.
    pub fn require_str(&self, key: &str) -> Result<&str> {
        self.get_str(key)
            .ok_or_else(|| ProviderError::Validation(format!("argument `{}` is required", key)))
    }

    /// Decode the whole state map into a typed argument struct.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(Value::Object(self.state.clone()))?)
    }

    /// Decode the value at `key`.
    pub fn decode_key<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.state.get(key) {
            None | Some(Value::Null) => Ok(T::default()),
            Some(v) => Ok(serde_json::from_value(v.clone())?),
        }
    }

    /// Set `key` to `value`. `None` stores null.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        self.state.insert(key.to_string(), value.into());
    }

    /// Whether `key` differs from the prior state. Without a prior state
    /// every set field counts as changed.
    pub fn has_change(&self, key: &str) -> bool {
        match &self.prior {
            None => self.get_ok(key).is_some(),
            Some(prior) => {
                let before = prior.get(key).unwrap_or(&Value::Null);
                !values_equal(before, self.get(key))
            },
        }
    }

    /// Whether any of `keys` changed.
    pub fn has_changes(&self, keys: &[&str]) -> bool {
        keys.iter().any(|k| self.has_change(k))
    }

    /// Reject the update when any of `keys` changed.
    pub fn check_immutable(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            if self.has_change(key) {
                return Err(ProviderError::Validation(format!(
                    "argument `{}` cannot be changed",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Final state map, or null when the resource is gone.
    pub fn into_state(self) -> Value {
        if self.id.is_empty() {
            return Value::Null;
        }
        let mut state = self.state;
        state.insert(ID_KEY.to_string(), Value::String(self.id));
        Value::Object(state)
    }

    /// Current state map including the id, without consuming.
    pub fn to_state(&self) -> Value {
        self.clone().into_state()
    }
}

fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Compare two state values, treating null like an empty collection and
/// numbers by value.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y).all(|(l, r)| values_equal(l, r))
        },
        (Value::Object(x), Value::Object(y)) => {
            let keys = x.keys().chain(y.keys());
            keys.into_iter().all(|k| {
                values_equal(
                    x.get(k).unwrap_or(&Value::Null),
                    y.get(k).unwrap_or(&Value::Null),
                )
            })
        },
        (Value::Null, other) | (other, Value::Null) => match other {
            Value::Null => true,
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
            _ => false,
        },
        _ => a == b,
    }
}
