use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use prefs_types::{Dictionary, Value};
use tracing::debug;

use crate::traits::PreferenceStore;

/// In-memory, HashMap-based preferences store.
///
/// Intended for tests and embedding. All values are held in memory behind a
/// `RwLock` for safe concurrent access. Values are cloned on read/write.
pub struct InMemoryPreferenceStore {
    values: RwLock<HashMap<String, Value>>,
}

impl InMemoryPreferenceStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store pre-populated with `values`.
    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: RwLock::new(values.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// Number of names currently holding a value.
    pub fn len(&self) -> usize {
        self.values.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Remove every value from the store.
    pub fn clear(&self) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for InMemoryPreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, name: &str) -> Option<Value> {
        let map = self.values.read().unwrap_or_else(PoisonError::into_inner);
        map.get(name).cloned()
    }

    fn set(&self, name: &str, value: Value) {
        debug!(name, kind = %value.kind(), "set preference");
        let mut map = self.values.write().unwrap_or_else(PoisonError::into_inner);
        map.insert(name.to_owned(), value);
    }

    fn remove(&self, name: &str) -> bool {
        let mut map = self.values.write().unwrap_or_else(PoisonError::into_inner);
        let existed = map.remove(name).is_some();
        if existed {
            debug!(name, "removed preference");
        }
        existed
    }

    fn keys(&self) -> Vec<String> {
        let map = self.values.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn contains(&self, name: &str) -> bool {
        let map = self.values.read().unwrap_or_else(PoisonError::into_inner);
        map.contains_key(name)
    }

    fn snapshot(&self) -> Dictionary {
        let map = self.values.read().unwrap_or_else(PoisonError::into_inner);
        map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

impl std::fmt::Debug for InMemoryPreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPreferenceStore")
            .field("value_count", &self.len())
            .finish()
    }
}
