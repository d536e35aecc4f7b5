//! Typed keys.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A store name bound at compile time to one value type.
///
/// The type parameter selects how reads and writes are coerced; it carries
/// no runtime payload. Keys are cheap to construct and usually declared as
/// constants:
///
/// ```
/// use prefs_sdk::Key;
///
/// const LAUNCH_COUNT: Key<i64> = Key::new("launch_count");
/// const LAST_USER: Key<Option<String>> = Key::new("last_user");
/// ```
///
/// Several keys may share a name with different types. They all observe
/// the same stored primitive, each through its own coercion rules.
pub struct Key<T> {
    name: Cow<'static, str>,
    _value: PhantomData<fn() -> T>,
}

impl<T> Key<T> {
    /// Create a key with a static name. Usable in `const` position.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            _value: PhantomData,
        }
    }

    /// Create a key from a name computed at runtime.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            _value: PhantomData,
        }
    }

    /// The store name this key reads and writes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A key with the same name but a different value type.
    pub fn retype<U>(&self) -> Key<U> {
        Key {
            name: self.name.clone(),
            _value: PhantomData,
        }
    }
}

impl<T> Clone for Key<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            _value: PhantomData,
        }
    }
}

impl<T> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T> Eq for Key<T> {}

impl<T> Hash for Key<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("name", &self.name)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T> fmt::Display for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
