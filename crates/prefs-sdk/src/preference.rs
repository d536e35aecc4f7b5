//! Read/write rules per key flavor.
//!
//! A key's type parameter picks its [`Preference`] impl:
//!
//! - `Key<Option<T>>` is the optional flavor. A missing value, or one whose
//!   kind does not coerce to `T`, reads as `None`. Writing `None` removes
//!   the stored value.
//! - `Key<T>` for the defaulted types below is the non-optional flavor. A
//!   miss reads as `T::default()` (`""`, `0`, `0.0`, `false`, empty blob,
//!   empty collection).
//!
//! Dates, URLs and untyped [`Value`]s have no meaningful zero value and so
//! only exist in the optional flavor.

use std::collections::BTreeMap;

use bytes::Bytes;
use prefs_store::PreferenceStore;
use prefs_types::Value;
use tracing::debug;

use crate::coerce::Storable;

/// How values of a key's type are read from and written to the store.
pub trait Preference: Sized {
    fn load(store: &dyn PreferenceStore, name: &str) -> Self;

    fn save(self, store: &dyn PreferenceStore, name: &str);
}

impl<T: Storable> Preference for Option<T> {
    fn load(store: &dyn PreferenceStore, name: &str) -> Self {
        let value = store.get(name)?;
        let coerced = T::from_value(&value);
        if coerced.is_none() {
            debug!(name, kind = %value.kind(), "stored value does not coerce; reading as absent");
        }
        coerced
    }

    fn save(self, store: &dyn PreferenceStore, name: &str) {
        match self {
            Some(value) => store.set(name, value.into_value()),
            None => {
                store.remove(name);
            }
        }
    }
}

macro_rules! defaulted_preference {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Preference for $ty {
                fn load(store: &dyn PreferenceStore, name: &str) -> Self {
                    Option::<$ty>::load(store, name).unwrap_or_default()
                }

                fn save(self, store: &dyn PreferenceStore, name: &str) {
                    store.set(name, self.into_value());
                }
            }
        )+
    };
}

defaulted_preference!(String, i64, i32, f64, f32, bool, Bytes);

impl<T: Storable> Preference for Vec<T> {
    fn load(store: &dyn PreferenceStore, name: &str) -> Self {
        Option::<Vec<T>>::load(store, name).unwrap_or_default()
    }

    fn save(self, store: &dyn PreferenceStore, name: &str) {
        store.set(name, self.into_value());
    }
}

impl<T: Storable> Preference for BTreeMap<String, T> {
    fn load(store: &dyn PreferenceStore, name: &str) -> Self {
        Option::<BTreeMap<String, T>>::load(store, name).unwrap_or_default()
    }

    fn save(self, store: &dyn PreferenceStore, name: &str) {
        store.set(name, self.into_value());
    }
}

/// Untyped writes: `None` removes, anything else is stored verbatim.
pub(crate) fn save_value(store: &dyn PreferenceStore, name: &str, value: Option<Value>) {
    Option::<Value>::save(value, store, name);
}
