//! Conversions between typed values and stored primitives.
//!
//! [`Storable`] is the per-type rule. Numeric types read through the
//! generic [`Number`](prefs_types::Number) view, so any stored integer,
//! float or bool satisfies them. Every other type requires its exact
//! primitive kind. Collections are strict: one element of the wrong kind
//! makes the whole collection unreadable, except for collections of
//! [`Value`], which pass elements through uninterpreted.

use std::collections::BTreeMap;
use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use prefs_types::Value;
use url::Url;

/// A type with a documented mapping to and from a stored primitive.
pub trait Storable: Sized {
    /// The primitive written for this value.
    fn into_value(self) -> Value;

    /// Reads `value` as `Self`, or `None` if its kind does not coerce.
    fn from_value(value: &Value) -> Option<Self>;
}

impl Storable for String {
    fn into_value(self) -> Value {
        Value::String(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(str::to_owned)
    }
}

impl Storable for i64 {
    fn into_value(self) -> Value {
        Value::Integer(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_number().map(|n| n.as_i64())
    }
}

impl Storable for i32 {
    fn into_value(self) -> Value {
        Value::Integer(i64::from(self))
    }

    /// Values outside the `i32` range do not coerce.
    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_number()
            .and_then(|n| i32::try_from(n.as_i64()).ok())
    }
}

impl Storable for f64 {
    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_number().map(|n| n.as_f64())
    }
}

impl Storable for f32 {
    fn into_value(self) -> Value {
        Value::Float(f64::from(self))
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_number().map(|n| n.as_f64() as f32)
    }
}

impl Storable for bool {
    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_number().map(|n| n.as_bool())
    }
}

impl Storable for Bytes {
    fn into_value(self) -> Value {
        Value::Data(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_data().cloned()
    }
}

impl Storable for DateTime<Utc> {
    fn into_value(self) -> Value {
        Value::Date(self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_date()
    }
}

impl Storable for Url {
    fn into_value(self) -> Value {
        Value::String(self.into())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().and_then(resolve_url)
    }
}

/// The "any" type: stored primitives pass through unchanged.
impl Storable for Value {
    fn into_value(self) -> Value {
        self
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl<T: Storable> Storable for Vec<T> {
    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(Storable::into_value).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_array()?.iter().map(T::from_value).collect()
    }
}

impl<T: Storable> Storable for BTreeMap<String, T> {
    fn into_value(self) -> Value {
        Value::Dictionary(self.into_iter().map(|(k, v)| (k, v.into_value())).collect())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value
            .as_dictionary()?
            .iter()
            .map(|(k, v)| T::from_value(v).map(|v| (k.clone(), v)))
            .collect()
    }
}

/// Interprets a stored string as a URL.
///
/// Absolute URLs parse as-is. Anything else is treated as a filesystem
/// path: a leading `~` expands to the home directory, and relative paths
/// resolve against it.
pub(crate) fn resolve_url(s: &str) -> Option<Url> {
    if s.trim().is_empty() {
        return None;
    }
    if let Ok(url) = Url::parse(s) {
        return Some(url);
    }
    let home = dirs::home_dir()?;
    let path = if s == "~" {
        home
    } else if let Some(rest) = s.strip_prefix("~/") {
        home.join(rest)
    } else if Path::new(s).is_absolute() {
        Path::new(s).to_path_buf()
    } else {
        home.join(s)
    };
    Url::from_file_path(path).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefs_types::Dictionary;
    use proptest::prelude::*;

    fn mixed() -> Value {
        Value::Array(vec![
            Value::from(1i64),
            Value::from(2i64),
            Value::from(false),
            Value::from("foo"),
        ])
    }

    // -----------------------------------------------------------------------
    // Scalars
    // -----------------------------------------------------------------------

    #[test]
    fn string_requires_string_kind() {
        assert_eq!(String::from_value(&Value::from("x")), Some("x".to_string()));
        assert_eq!(String::from_value(&Value::from(100i64)), None);
    }

    #[test]
    fn numbers_cross_convert() {
        let stored = Value::from(100i64);
        assert_eq!(f64::from_value(&stored), Some(100.0));
        assert_eq!(bool::from_value(&stored), Some(true));
        assert_eq!(bool::from_value(&Value::from(0.0)), Some(false));
        assert_eq!(i64::from_value(&Value::from(3.75)), Some(3));
        assert_eq!(i64::from_value(&Value::from(true)), Some(1));
    }

    #[test]
    fn numbers_do_not_parse_strings() {
        assert_eq!(i64::from_value(&Value::from("100")), None);
        assert_eq!(bool::from_value(&Value::from("true")), None);
    }

    #[test]
    fn i32_rejects_out_of_range() {
        assert_eq!(i32::from_value(&Value::from(i64::MAX)), None);
        assert_eq!(i32::from_value(&Value::from(-5i64)), Some(-5));
    }

    #[test]
    fn data_and_date_require_native_kind() {
        let data = Bytes::from_static(b"foo");
        assert_eq!(Bytes::from_value(&Value::from(data.clone())), Some(data));
        assert_eq!(Bytes::from_value(&Value::from("foo")), None);
        assert_eq!(DateTime::<Utc>::from_value(&Value::from(0i64)), None);
    }

    // -----------------------------------------------------------------------
    // URLs
    // -----------------------------------------------------------------------

    #[test]
    fn absolute_url_parses() {
        let url = Url::from_value(&Value::from("https://github.com")).unwrap();
        assert_eq!(url.as_str(), "https://github.com/");
    }

    #[test]
    fn url_writes_as_string() {
        let url = Url::parse("https://example.com/a?b=c").unwrap();
        assert_eq!(url.into_value(), Value::from("https://example.com/a?b=c"));
    }

    #[test]
    fn tilde_path_expands_to_file_url() {
        if let Some(home) = dirs::home_dir() {
            let url = Url::from_value(&Value::from("~/Desktop")).unwrap();
            assert_eq!(url, Url::from_file_path(home.join("Desktop")).unwrap());
        }
    }

    #[test]
    fn relative_path_resolves_against_home() {
        if let Some(home) = dirs::home_dir() {
            let url = resolve_url("notes/today.txt").unwrap();
            assert_eq!(url, Url::from_file_path(home.join("notes/today.txt")).unwrap());
        }
    }

    #[test]
    fn blank_url_is_none() {
        assert!(resolve_url("").is_none());
        assert!(resolve_url("   ").is_none());
        assert!(Url::from_value(&Value::from(1i64)).is_none());
    }

    // -----------------------------------------------------------------------
    // Collections
    // -----------------------------------------------------------------------

    #[test]
    fn strict_sequence_rejects_mixed_elements() {
        assert_eq!(Vec::<i64>::from_value(&mixed()), None);
        assert_eq!(Vec::<String>::from_value(&mixed()), None);
    }

    #[test]
    fn any_sequence_passes_elements_through() {
        let items = Vec::<Value>::from_value(&mixed()).unwrap();
        assert_eq!(items.len(), 4);
        assert_eq!(items[3], Value::from("foo"));
    }

    #[test]
    fn empty_sequence_is_present() {
        assert_eq!(Vec::<String>::from_value(&Value::Array(vec![])), Some(vec![]));
    }

    #[test]
    fn sequence_is_not_a_scalar() {
        assert_eq!(Vec::<i64>::from_value(&Value::from("100")), None);
    }

    #[test]
    fn strict_dictionary_filters_by_value_kind() {
        let mut map = Dictionary::new();
        map.insert("a".into(), Value::from("x"));
        map.insert("b".into(), Value::from(1i64));
        let value = Value::from(map);
        assert_eq!(BTreeMap::<String, String>::from_value(&value), None);
        assert_eq!(BTreeMap::<String, Value>::from_value(&value).unwrap().len(), 2);
    }

    proptest! {
        #[test]
        fn int_sequences_roundtrip(items in proptest::collection::vec(any::<i64>(), 0..16)) {
            let stored = items.clone().into_value();
            prop_assert_eq!(Vec::<i64>::from_value(&stored), Some(items));
        }

        #[test]
        fn finite_floats_roundtrip(f in proptest::num::f64::NORMAL | proptest::num::f64::ZERO) {
            prop_assert_eq!(f64::from_value(&f.into_value()), Some(f));
        }
    }
}
