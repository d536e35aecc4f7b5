use crate::archivable::Archivable;
use crate::error::{ArchiveError, ArchiveResult};

/// Strategy for turning archivable values into opaque blobs and back.
///
/// Implementations must record the value's [`Archivable::archive_tag`] in
/// the blob and refuse to decode it as any type with a different tag.
pub trait Archiver: Send + Sync {
    /// Encode `value` into a self-describing blob.
    fn encode<T: Archivable>(&self, value: &T) -> ArchiveResult<Vec<u8>>;

    /// Decode a blob produced by [`encode`](Self::encode) as a `T`.
    fn decode<T: Archivable>(&self, blob: &[u8]) -> ArchiveResult<T>;
}

/// Fails with [`ArchiveError::TypeMismatch`] unless `found` is `T`'s tag.
pub(crate) fn check_tag<T: Archivable>(found: &str) -> ArchiveResult<()> {
    let expected = T::archive_tag();
    if expected != found {
        return Err(ArchiveError::TypeMismatch {
            expected: expected.into_owned(),
            found: found.to_owned(),
        });
    }
    Ok(())
}
