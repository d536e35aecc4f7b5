use prefs_types::{Dictionary, Value};

use crate::error::StoreResult;

/// Untyped key/value preferences store.
///
/// All implementations must satisfy these invariants:
/// - A name maps to at most one [`Value`]. `set` replaces any prior value,
///   regardless of its kind.
/// - Reads and removals of missing names are not errors.
/// - Each individual call is atomic with respect to other calls; sequences
///   of calls are not.
/// - The store never interprets values beyond their primitive kind.
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `name`, or `None` if absent.
    fn get(&self, name: &str) -> Option<Value>;

    /// Store `value` under `name`, replacing whatever was there.
    fn set(&self, name: &str, value: Value);

    /// Remove the value under `name`. Returns `true` if a value existed.
    fn remove(&self, name: &str) -> bool;

    /// Every name currently holding a value, sorted.
    fn keys(&self) -> Vec<String>;

    /// Check whether any value is stored under `name`.
    ///
    /// Default implementation clones the value through `get()`. Backends
    /// should override when a cheaper membership test exists.
    fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Copy of the whole store as a single dictionary.
    fn snapshot(&self) -> Dictionary {
        self.keys()
            .into_iter()
            .filter_map(|name| self.get(&name).map(|value| (name, value)))
            .collect()
    }

    /// Persist pending writes. Backends without durable state do nothing.
    fn flush(&self) -> StoreResult<()> {
        Ok(())
    }
}
