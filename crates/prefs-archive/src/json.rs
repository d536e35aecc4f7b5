use serde::{Deserialize, Serialize};

use crate::archivable::Archivable;
use crate::archiver::{check_tag, Archiver};
use crate::error::{ArchiveError, ArchiveResult};
use crate::finite::ensure_finite;

#[derive(Serialize, Deserialize)]
struct Envelope {
    tag: String,
    payload: serde_json::Value,
}

/// Human-readable archives encoded as JSON.
///
/// Larger than [`BincodeArchiver`](crate::BincodeArchiver) output but
/// inspectable with ordinary tools, which helps when debugging a store.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonArchiver;

impl JsonArchiver {
    pub fn new() -> Self {
        Self
    }
}

impl Archiver for JsonArchiver {
    /// Fails with [`ArchiveError::Encode`] if `value` holds a NaN or
    /// infinite float, which JSON would silently turn into `null`.
    fn encode<T: Archivable>(&self, value: &T) -> ArchiveResult<Vec<u8>> {
        ensure_finite(value).map_err(|e| ArchiveError::Encode(e.to_string()))?;
        let payload =
            serde_json::to_value(value).map_err(|e| ArchiveError::Encode(e.to_string()))?;
        let envelope = Envelope {
            tag: T::archive_tag().into_owned(),
            payload,
        };
        serde_json::to_vec(&envelope).map_err(|e| ArchiveError::Encode(e.to_string()))
    }

    fn decode<T: Archivable>(&self, blob: &[u8]) -> ArchiveResult<T> {
        let envelope: Envelope =
            serde_json::from_slice(blob).map_err(|e| ArchiveError::Decode(e.to_string()))?;
        check_tag::<T>(&envelope.tag)?;
        serde_json::from_value(envelope.payload).map_err(|e| ArchiveError::Decode(e.to_string()))
    }
}
