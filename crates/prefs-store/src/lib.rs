//! Untyped preferences storage.
//!
//! This crate is the primitive store adapter: a process-wide mapping from a
//! string name to a single [`Value`](prefs_types::Value). It knows nothing
//! about typed keys or coercion; those live in `prefs-sdk`.
//!
//! # Storage Backends
//!
//! All backends implement the [`PreferenceStore`] trait:
//!
//! - [`InMemoryPreferenceStore`] -- `HashMap`-based store for tests and embedding
//! - [`FilePreferenceStore`] -- JSON document on disk, flushed atomically
//!
//! # Design Rules
//!
//! 1. A name maps to at most one value; writing replaces the prior value and kind.
//! 2. Reads never fail. A missing name is `None`, not an error.
//! 3. Single get/set/remove calls are thread-safe (last writer wins).
//! 4. No operation spans more than one call; multi-step updates are not atomic.
//! 5. Only durable I/O (`open`, `flush`) reports errors.

pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use file::FilePreferenceStore;
pub use memory::InMemoryPreferenceStore;
pub use traits::PreferenceStore;
