//! The typed preferences facade.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use prefs_archive::{Archiver, BincodeArchiver};
use prefs_store::{
    FilePreferenceStore, InMemoryPreferenceStore, PreferenceStore, StoreConfig, StoreResult,
};
use prefs_types::Value;
use tracing::debug;

use crate::coerce::Storable;
use crate::key::Key;
use crate::preference::{save_value, Preference};
use crate::proxy::Proxy;

/// Typed access to a preferences store.
///
/// `Defaults` holds a shared handle to the store and the archiver used for
/// object values. Clones share the same store.
///
/// Every call is a single request against the store. Compound operations
/// such as [`mutate`](Self::mutate) read the whole value, change it in
/// memory and write it back; concurrent mutators of the same key can
/// overwrite each other. Callers that need atomic read-modify-write must
/// serialize access themselves.
#[derive(Clone)]
pub struct Defaults<A = BincodeArchiver> {
    store: Arc<dyn PreferenceStore>,
    archiver: A,
}

impl Defaults<BincodeArchiver> {
    /// Defaults over a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryPreferenceStore::new()))
    }

    /// Defaults over the file-backed store described by `config`.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let store = FilePreferenceStore::open(config)?;
        Ok(Self::with_store(Arc::new(store)))
    }

    /// Defaults over an existing store, archiving with bincode.
    pub fn with_store(store: Arc<dyn PreferenceStore>) -> Self {
        Self::with_archiver(store, BincodeArchiver::new())
    }
}

impl<A: Archiver> Defaults<A> {
    /// Defaults over an existing store with a custom archiver.
    pub fn with_archiver(store: Arc<dyn PreferenceStore>, archiver: A) -> Self {
        Self { store, archiver }
    }

    /// The underlying untyped store.
    pub fn store(&self) -> &Arc<dyn PreferenceStore> {
        &self.store
    }

    pub fn archiver(&self) -> &A {
        &self.archiver
    }

    // ---- Typed access ----

    /// Read `key` according to its type's coercion rules.
    pub fn get<T: Preference>(&self, key: &Key<T>) -> T {
        T::load(self.store.as_ref(), key.name())
    }

    /// Write `value` under `key`. For optional keys, `None` removes.
    pub fn set<T: Preference>(&self, key: &Key<T>, value: T) {
        value.save(self.store.as_ref(), key.name());
    }

    /// Remove whatever is stored under `key`'s name.
    pub fn remove<T>(&self, key: &Key<T>) -> bool {
        self.store.remove(key.name())
    }

    /// Returns `true` if any value is stored under `key`'s name, even one
    /// that does not coerce to `T`.
    pub fn contains<T>(&self, key: &Key<T>) -> bool {
        self.store.contains(key.name())
    }

    // ---- Untyped access ----

    /// Returns `true` if any value is stored under `name`.
    pub fn contains_name(&self, name: &str) -> bool {
        self.store.contains(name)
    }

    /// Untyped write. `None` removes the value.
    pub fn set_value(&self, name: &str, value: Option<Value>) {
        save_value(self.store.as_ref(), name, value);
    }

    /// Best-effort untyped view of the value under `name`.
    pub fn proxy(&self, name: impl Into<String>) -> Proxy {
        Proxy::new(Arc::clone(&self.store), name.into())
    }

    /// Every name currently holding a value.
    pub fn keys(&self) -> Vec<String> {
        self.store.keys()
    }

    /// Remove every value in the store, including ones not written through
    /// this facade.
    pub fn remove_all(&self) {
        let keys = self.store.keys();
        debug!(count = keys.len(), "removing all preferences");
        for name in keys {
            self.store.remove(&name);
        }
    }

    /// Persist pending writes to durable storage.
    pub fn flush(&self) -> StoreResult<()> {
        self.store.flush()
    }

    // ---- Read-modify-write ----

    /// Read `key`, apply `f`, and write the result back.
    ///
    /// Not atomic: a concurrent writer between the read and the write is
    /// overwritten.
    pub fn mutate<T, R>(&self, key: &Key<T>, f: impl FnOnce(&mut T) -> R) -> R
    where
        T: Preference,
    {
        let mut value = self.get(key);
        let result = f(&mut value);
        self.set(key, value);
        result
    }

    /// Append `element` to the sequence under `key`.
    pub fn push<E: Storable>(&self, key: &Key<Vec<E>>, element: E) {
        self.mutate(key, |items| items.push(element));
    }

    /// Element `index` of the sequence under `key`.
    pub fn element<E: Storable>(&self, key: &Key<Vec<E>>, index: usize) -> Option<E> {
        let mut items = self.get(key);
        if index < items.len() {
            Some(items.swap_remove(index))
        } else {
            None
        }
    }

    /// Replace element `index` of the sequence under `key`.
    ///
    /// Returns `false`, writing nothing, if `index` is out of bounds.
    pub fn set_element<E: Storable>(&self, key: &Key<Vec<E>>, index: usize, element: E) -> bool {
        let mut items = self.get(key);
        match items.get_mut(index) {
            Some(slot) => {
                *slot = element;
                self.set(key, items);
                true
            }
            None => false,
        }
    }

    /// Insert an entry into the dictionary under `key`, returning the
    /// previous entry value.
    pub fn insert_entry<V: Storable>(
        &self,
        key: &Key<BTreeMap<String, V>>,
        entry: impl Into<String>,
        value: V,
    ) -> Option<V> {
        self.mutate(key, |map| map.insert(entry.into(), value))
    }

    /// Remove an entry from the dictionary under `key`.
    pub fn remove_entry<V: Storable>(
        &self,
        key: &Key<BTreeMap<String, V>>,
        entry: &str,
    ) -> Option<V> {
        self.mutate(key, |map| map.remove(entry))
    }
}

impl Default for Defaults<BincodeArchiver> {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl<A> fmt::Debug for Defaults<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defaults")
            .field("key_count", &self.store.keys().len())
            .field("archiver", &std::any::type_name::<A>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use chrono::Utc;
    use url::Url;

    // -----------------------------------------------------------------------
    // Scalars
    // -----------------------------------------------------------------------

    #[test]
    fn string_key() {
        let defaults = Defaults::in_memory();
        let key = Key::<String>::new("string");
        assert_eq!(defaults.get(&key), "");
        defaults.set(&key, "foo".into());
        defaults.mutate(&key, |s| s.push_str("bar"));
        assert_eq!(defaults.get(&key), "foobar");
    }

    #[test]
    fn int_key() {
        let defaults = Defaults::in_memory();
        let key = Key::<i64>::new("int");
        assert_eq!(defaults.get(&key), 0);
        defaults.mutate(&key, |i| *i += 10);
        assert_eq!(defaults.get(&key), 10);
    }

    #[test]
    fn optional_int_key() {
        let defaults = Defaults::in_memory();
        let key = Key::<Option<i64>>::new("int");
        assert_eq!(defaults.get(&key), None);
        defaults.set(&key, Some(10));
        assert_eq!(defaults.get(&key), Some(10));
    }

    #[test]
    fn double_key() {
        let defaults = Defaults::in_memory();
        let key = Key::<f64>::new("double");
        assert_eq!(defaults.get(&key), 0.0);
        defaults.set(&key, 2.25);
        defaults.mutate(&key, |d| *d += 1.0);
        assert_eq!(defaults.get(&key), 3.25);
    }

    #[test]
    fn bool_keys() {
        let defaults = Defaults::in_memory();
        let key = Key::<bool>::new("bool");
        assert!(!defaults.contains(&key));
        assert!(!defaults.get(&key));
        defaults.set(&key, true);
        assert!(defaults.get(&key));

        let opt = Key::<Option<bool>>::new("bool");
        defaults.set(&opt, Some(false));
        assert_eq!(defaults.get(&opt), Some(false));
    }

    #[test]
    fn data_keys() {
        let defaults = Defaults::in_memory();
        let key = Key::<Bytes>::new("data");
        assert_eq!(defaults.get(&key), Bytes::new());
        defaults.set(&key, Bytes::from_static(b"foobar"));
        assert_eq!(defaults.get(&key), Bytes::from_static(b"foobar"));

        let opt = Key::<Option<Bytes>>::new("data");
        assert_eq!(defaults.get(&opt), Some(Bytes::from_static(b"foobar")));
    }

    #[test]
    fn date_key() {
        let defaults = Defaults::in_memory();
        let key = Key::<Option<chrono::DateTime<Utc>>>::new("date");
        assert_eq!(defaults.get(&key), None);
        let now = Utc::now();
        defaults.set(&key, Some(now));
        assert_eq!(defaults.get(&key), Some(now));
    }

    #[test]
    fn url_key() {
        let defaults = Defaults::in_memory();
        let key = Key::<Option<Url>>::new("url");
        assert_eq!(defaults.get(&key), None);
        let github = Url::parse("https://github.com").unwrap();
        defaults.set(&key, Some(github.clone()));
        assert_eq!(defaults.get(&key), Some(github));

        if let Some(home) = dirs::home_dir() {
            defaults.set_value("url", Some(Value::from("~/Desktop")));
            let expected = Url::from_file_path(home.join("Desktop")).unwrap();
            assert_eq!(defaults.get(&key), Some(expected));
        }
    }

    #[test]
    fn any_value_key() {
        let defaults = Defaults::in_memory();
        let key = Key::<Option<Value>>::new("object");
        assert_eq!(defaults.get(&key), None);
        defaults.set(&key, Some(Value::from("foo")));
        assert_eq!(defaults.get(&key), Some(Value::from("foo")));
        let past = chrono::DateTime::<Utc>::MIN_UTC;
        defaults.set(&key, Some(Value::from(past)));
        assert_eq!(defaults.get(&key), Some(Value::from(past)));
    }

    // -----------------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------------

    #[test]
    fn any_array_mutation() {
        let defaults = Defaults::in_memory();
        let key = Key::<Vec<Value>>::new("array");
        assert!(defaults.get(&key).is_empty());
        defaults.push(&key, Value::from(1i64));
        defaults.push(&key, Value::from("foo"));
        defaults.push(&key, Value::from(false));
        defaults.push(&key, Value::from(Bytes::new()));
        assert_eq!(
            defaults.get(&key),
            vec![
                Value::from(1i64),
                Value::from("foo"),
                Value::from(false),
                Value::from(Bytes::new()),
            ]
        );
    }

    #[test]
    fn string_array_append_and_bad_types() {
        let defaults = Defaults::in_memory();
        let key = Key::<Vec<String>>::new("strings");
        defaults.set(&key, vec!["foo".into(), "bar".into()]);
        defaults.push(&key, "baz".to_string());
        assert_eq!(defaults.get(&key), vec!["foo", "bar", "baz"]);

        defaults.set_value(
            "strings",
            Some(Value::from(vec![
                Value::from(1i64),
                Value::from(2i64),
                Value::from(false),
                Value::from("foo"),
            ])),
        );
        assert!(defaults.get(&key).is_empty());
        assert_eq!(defaults.get(&key.retype::<Option<Vec<String>>>()), None);
    }

    #[test]
    fn optional_sequence_mutation_is_noop_when_absent() {
        let defaults = Defaults::in_memory();
        let key = Key::<Option<Vec<String>>>::new("strings");
        defaults.mutate(&key, |items| {
            if let Some(items) = items {
                items.push("baz".into());
            }
        });
        assert!(!defaults.contains(&key));

        defaults.set(&key, Some(vec!["foo".into()]));
        defaults.mutate(&key, |items| {
            if let Some(items) = items {
                items.push("baz".into());
            }
        });
        assert_eq!(defaults.get(&key), Some(vec!["foo".into(), "baz".into()]));
    }

    #[test]
    fn int_array_sort_in_place() {
        let defaults = Defaults::in_memory();
        let key = Key::<Vec<i64>>::new("ints");
        defaults.set(&key, vec![3, 2, 1]);
        defaults.mutate(&key, |items| items.sort());
        assert_eq!(defaults.get(&key), vec![1, 2, 3]);
    }

    #[test]
    fn indexed_element_access() {
        let defaults = Defaults::in_memory();
        let key = Key::<Vec<f64>>::new("doubles");
        defaults.set(&key, vec![1.1, 2.2, 3.3]);
        assert_eq!(defaults.element(&key, 1), Some(2.2));
        assert_eq!(defaults.element(&key, 3), None);

        assert!(defaults.set_element(&key, 0, 9.9));
        assert_eq!(defaults.get(&key), vec![9.9, 2.2, 3.3]);

        assert!(!defaults.set_element(&key, 10, 0.0));
        assert_eq!(defaults.get(&key).len(), 3);
    }

    #[test]
    fn set_element_on_missing_sequence_writes_nothing() {
        let defaults = Defaults::in_memory();
        let key = Key::<Vec<bool>>::new("bools");
        assert!(!defaults.set_element(&key, 0, true));
        assert!(!defaults.contains(&key));
    }

    #[test]
    fn dictionary_entries() {
        let defaults = Defaults::in_memory();
        let key = Key::<BTreeMap<String, Value>>::new("dictionary");
        assert!(defaults.get(&key).is_empty());

        let mut map = BTreeMap::new();
        map.insert("foo".to_string(), Value::from("bar"));
        map.insert("bar".to_string(), Value::from(123i64));
        map.insert("baz".to_string(), Value::from(Bytes::new()));
        defaults.set(&key, map);

        let far_future = chrono::DateTime::<Utc>::MAX_UTC;
        assert!(defaults
            .insert_entry(&key, "lol", Value::from(far_future))
            .is_none());
        assert_eq!(defaults.get(&key)["lol"], Value::from(far_future));

        defaults.remove_entry(&key, "lol");
        assert_eq!(defaults.remove_entry(&key, "baz"), Some(Value::from(Bytes::new())));

        let remaining = defaults.get(&key);
        assert_eq!(remaining.len(), 2);
        assert_eq!(remaining["foo"], Value::from("bar"));
        assert_eq!(remaining["bar"], Value::from(123i64));
    }

    // -----------------------------------------------------------------------
    // Existence / removal
    // -----------------------------------------------------------------------

    #[test]
    fn empty_collection_counts_as_present() {
        let defaults = Defaults::in_memory();
        let key = Key::<Vec<String>>::new("strings");
        assert!(!defaults.contains(&key));
        defaults.set(&key, vec![]);
        assert!(defaults.contains(&key));
        assert!(defaults.get(&key).is_empty());
        assert!(defaults.remove(&key));
        assert!(!defaults.contains(&key));
    }

    #[test]
    fn remove_all_clears_every_name() {
        let defaults = Defaults::in_memory();
        defaults.set_value("a", Some(Value::from("test")));
        defaults.set_value("b", Some(Value::from("test2")));
        assert_eq!(defaults.keys().len(), 2);
        defaults.remove_all();
        assert!(!defaults.contains_name("a"));
        assert!(!defaults.contains_name("b"));
        assert!(defaults.keys().is_empty());
    }

    #[test]
    fn clones_share_the_store() {
        let defaults = Defaults::in_memory();
        let other = defaults.clone();
        let key = Key::<i64>::new("shared");
        defaults.set(&key, 5);
        assert_eq!(other.get(&key), 5);
    }

    #[test]
    fn debug_format() {
        let defaults = Defaults::in_memory();
        let debug = format!("{defaults:?}");
        assert!(debug.contains("Defaults"));
        assert!(debug.contains("BincodeArchiver"));
    }
}
