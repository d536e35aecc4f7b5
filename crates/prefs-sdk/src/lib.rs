//! Typed preferences over an untyped store.
//!
//! Provides compile-time typed keys, documented coercion between stored
//! primitives and logical types, an untyped [`Proxy`] view, and archiving
//! for types the store cannot hold natively. This is the main entry point
//! for applications.
//!
//! ```
//! use prefs_sdk::{Defaults, Key};
//!
//! const VOLUME: Key<f64> = Key::new("volume");
//! const NICKNAME: Key<Option<String>> = Key::new("nickname");
//!
//! let defaults = Defaults::in_memory();
//! assert_eq!(defaults.get(&VOLUME), 0.0);
//! defaults.set(&VOLUME, 0.5);
//! defaults.set(&NICKNAME, Some("ada".to_string()));
//! assert_eq!(defaults.get(&NICKNAME).as_deref(), Some("ada"));
//!
//! defaults.set(&NICKNAME, None);
//! assert!(!defaults.contains(&NICKNAME));
//! ```

pub mod archive;
pub mod coerce;
pub mod defaults;
pub mod key;
pub mod preference;
pub mod proxy;
pub mod raw;

pub use coerce::Storable;
pub use defaults::Defaults;
pub use key::Key;
pub use preference::Preference;
pub use proxy::Proxy;
pub use raw::RawRepresentable;

// Re-export key types
pub use prefs_archive::{
    archivable, Archivable, ArchiveError, ArchiveResult, Archiver, BincodeArchiver, JsonArchiver,
};
pub use prefs_store::{
    FilePreferenceStore, InMemoryPreferenceStore, PreferenceStore, StoreConfig, StoreError,
    StoreResult,
};
pub use prefs_types::{Dictionary, Number, Value, ValueKind};
