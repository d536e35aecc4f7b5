//! Archiving values the store cannot hold natively.
//!
//! Raw-representable types are stored as their raw scalar and read back
//! through the scalar coercion rules. Archivable objects are encoded by the
//! facade's [`Archiver`] into a blob and stored as data.
//!
//! Every unarchive is total. A missing value, a value of the wrong kind, a
//! raw value outside the type's domain and a blob that fails to decode all
//! read as `None`.

use bytes::Bytes;
use prefs_archive::{Archivable, ArchiveResult, Archiver};
use prefs_types::Value;
use tracing::debug;

use crate::coerce::Storable;
use crate::defaults::Defaults;
use crate::key::Key;
use crate::raw::RawRepresentable;

impl<A: Archiver> Defaults<A> {
    // ---- Raw-representable ----

    /// Store `value` as its raw scalar.
    pub fn archive_raw<T: RawRepresentable>(&self, key: &Key<T>, value: &T) {
        self.store().set(key.name(), value.raw_value().into_value());
    }

    /// Store `value` as its raw scalar, or remove the key for `None`.
    pub fn archive_raw_optional<T: RawRepresentable>(
        &self,
        key: &Key<Option<T>>,
        value: Option<&T>,
    ) {
        match value {
            Some(value) => self.store().set(key.name(), value.raw_value().into_value()),
            None => {
                self.store().remove(key.name());
            }
        }
    }

    pub fn unarchive_raw<T: RawRepresentable>(&self, key: &Key<T>) -> Option<T> {
        self.read_raw(key.name())
    }

    pub fn unarchive_raw_optional<T: RawRepresentable>(&self, key: &Key<Option<T>>) -> Option<T> {
        self.read_raw(key.name())
    }

    /// Like [`unarchive_raw`](Self::unarchive_raw), substituting `fallback`
    /// on a miss.
    pub fn unarchive_raw_or<T: RawRepresentable>(&self, key: &Key<T>, fallback: T) -> T {
        self.read_raw(key.name()).unwrap_or(fallback)
    }

    fn read_raw<T: RawRepresentable>(&self, name: &str) -> Option<T> {
        let value = self.store().get(name)?;
        let raw = T::Raw::from_value(&value)?;
        let restored = T::from_raw_value(raw);
        if restored.is_none() {
            debug!(name, "stored raw value is outside the type's domain");
        }
        restored
    }

    // ---- Archivable objects ----

    /// Encode `value` and store the archive.
    ///
    /// Fails only if the archiver cannot encode `value`; the store is left
    /// untouched in that case.
    pub fn archive_object<T: Archivable>(&self, key: &Key<T>, value: &T) -> ArchiveResult<()> {
        self.write_object(key.name(), value)
    }

    /// Encode and store `value`, or remove the key for `None`.
    pub fn archive_object_optional<T: Archivable>(
        &self,
        key: &Key<Option<T>>,
        value: Option<&T>,
    ) -> ArchiveResult<()> {
        match value {
            Some(value) => self.write_object(key.name(), value),
            None => {
                self.store().remove(key.name());
                Ok(())
            }
        }
    }

    /// Decode the archive under `key`.
    ///
    /// Archived objects have no zero value, so even the non-optional flavor
    /// reads as `Option`. Use [`unarchive_object_or`](Self::unarchive_object_or)
    /// to supply one.
    pub fn unarchive_object<T: Archivable>(&self, key: &Key<T>) -> Option<T> {
        self.read_object(key.name())
    }

    pub fn unarchive_object_optional<T: Archivable>(&self, key: &Key<Option<T>>) -> Option<T> {
        self.read_object(key.name())
    }

    pub fn unarchive_object_or<T: Archivable>(&self, key: &Key<T>, fallback: T) -> T {
        self.read_object(key.name()).unwrap_or(fallback)
    }

    fn write_object<T: Archivable>(&self, name: &str, value: &T) -> ArchiveResult<()> {
        let blob = self.archiver().encode(value)?;
        debug!(name, tag = %T::archive_tag(), size = blob.len(), "archived object");
        self.store().set(name, Value::Data(Bytes::from(blob)));
        Ok(())
    }

    fn read_object<T: Archivable>(&self, name: &str) -> Option<T> {
        let blob = Bytes::from_value(&self.store().get(name)?)?;
        match self.archiver().decode(&blob) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(name, tag = %T::archive_tag(), error = %e, "failed to unarchive object");
                None
            }
        }
    }
}
