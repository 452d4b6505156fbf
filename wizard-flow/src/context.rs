use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Form state shared by every screen of a wizard session.
///
/// Values are stored as JSON so screens can write whatever shape a field
/// needs (scalar, list of selected ids, nested record). Clones share the
/// same underlying map.
#[derive(Clone, Debug)]
pub struct Context {
    data: Arc<DashMap<String, Value>>,
}

impl Context {
    pub fn new() -> Self {
        Self {
            data: Arc::new(DashMap::new()),
        }
    }

    pub async fn set(&self, key: impl Into<String>, value: impl serde::Serialize) {
        self.set_sync(key, value);
    }

    /// Merge one field into the store, last write wins.
    pub fn set_sync(&self, key: impl Into<String>, value: impl serde::Serialize) {
        let key = key.into();
        match serde_json::to_value(value) {
            Ok(value) => {
                debug!(field = %key, value = %value, "field updated");
                self.data.insert(key, value);
            }
            Err(e) => warn!(field = %key, error = %e, "dropping unserializable field value"),
        }
    }

    pub async fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get_sync(key)
    }

    pub fn get_sync<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Raw JSON value of a field, if set.
    pub fn get_value(&self, key: &str) -> Option<Value> {
        self.data.get(key).map(|v| v.clone())
    }

    /// True when the field exists and is not JSON `null`.
    pub fn contains(&self, key: &str) -> bool {
        self.data.get(key).is_some_and(|v| !v.is_null())
    }

    /// Flip membership of `id` in a multi-select field.
    ///
    /// Returns true when `id` is selected after the call. A field holding
    /// something other than a list is replaced by a fresh selection.
    pub async fn toggle(&self, key: &str, id: &str) -> bool {
        let mut entry = self
            .data
            .entry(key.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !entry.is_array() {
            *entry = Value::Array(Vec::new());
        }
        let Value::Array(items) = entry.value_mut() else {
            return false;
        };

        let before = items.len();
        items.retain(|item| item.as_str() != Some(id));
        let selected = items.len() == before;
        if selected {
            items.push(Value::String(id.to_string()));
        }
        debug!(field = %key, option = %id, selected, "multi-select toggled");
        selected
    }

    pub async fn remove(&self, key: &str) -> Option<Value> {
        self.data.remove(key).map(|(_, v)| v)
    }

    pub async fn clear(&self) {
        self.data.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Key-ordered copy of the current fields.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.data
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}
