//! Untyped, best-effort views over one stored value.
//!
//! A [`Proxy`] never converts across kinds: a stored string is not a
//! number, and a stored number is not a string. The only widening it does
//! is within the numeric family, where integers, floats and bools are
//! readable as one another. Every accessor re-reads the live store.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use prefs_store::PreferenceStore;
use prefs_types::{Dictionary, Number, Value};

/// View of the value stored under a single name.
#[derive(Clone)]
pub struct Proxy {
    store: Arc<dyn PreferenceStore>,
    name: String,
}

impl Proxy {
    pub(crate) fn new(store: Arc<dyn PreferenceStore>, name: String) -> Self {
        Self { store, name }
    }

    /// The name this proxy is bound to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if any value is stored, whatever its kind.
    pub fn has_value(&self) -> bool {
        self.store.contains(&self.name)
    }

    /// The raw stored primitive.
    pub fn object(&self) -> Option<Value> {
        self.store.get(&self.name)
    }

    pub fn string(&self) -> Option<String> {
        match self.object()? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn string_value(&self) -> String {
        self.string().unwrap_or_default()
    }

    pub fn number(&self) -> Option<Number> {
        self.object()?.as_number()
    }

    pub fn number_value(&self) -> Number {
        self.number().unwrap_or_default()
    }

    pub fn int(&self) -> Option<i64> {
        self.number().map(Number::as_i64)
    }

    pub fn int_value(&self) -> i64 {
        self.int().unwrap_or_default()
    }

    pub fn double(&self) -> Option<f64> {
        self.number().map(Number::as_f64)
    }

    pub fn double_value(&self) -> f64 {
        self.double().unwrap_or_default()
    }

    pub fn bool(&self) -> Option<bool> {
        self.number().map(Number::as_bool)
    }

    pub fn bool_value(&self) -> bool {
        self.bool().unwrap_or_default()
    }

    pub fn array(&self) -> Option<Vec<Value>> {
        match self.object()? {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn array_value(&self) -> Vec<Value> {
        self.array().unwrap_or_default()
    }

    pub fn dictionary(&self) -> Option<Dictionary> {
        match self.object()? {
            Value::Dictionary(map) => Some(map),
            _ => None,
        }
    }

    pub fn dictionary_value(&self) -> Dictionary {
        self.dictionary().unwrap_or_default()
    }

    pub fn data(&self) -> Option<Bytes> {
        match self.object()? {
            Value::Data(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_value(&self) -> Bytes {
        self.data().unwrap_or_default()
    }

    /// Stored date. Dates have no defaulting variant.
    pub fn date(&self) -> Option<DateTime<Utc>> {
        self.object()?.as_date()
    }
}

impl fmt::Debug for Proxy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Proxy")
            .field("name", &self.name)
            .field("value", &self.object())
            .finish()
    }
}
