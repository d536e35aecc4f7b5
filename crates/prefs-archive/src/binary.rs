use serde::{Deserialize, Serialize};

use crate::archivable::Archivable;
use crate::archiver::{check_tag, Archiver};
use crate::error::{ArchiveError, ArchiveResult};

#[derive(Serialize, Deserialize)]
struct Envelope {
    tag: String,
    payload: Vec<u8>,
}

/// Compact binary archives encoded with bincode.
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeArchiver;

impl BincodeArchiver {
    pub fn new() -> Self {
        Self
    }
}

impl Archiver for BincodeArchiver {
    fn encode<T: Archivable>(&self, value: &T) -> ArchiveResult<Vec<u8>> {
        let payload =
            bincode::serialize(value).map_err(|e| ArchiveError::Encode(e.to_string()))?;
        let envelope = Envelope {
            tag: T::archive_tag().into_owned(),
            payload,
        };
        bincode::serialize(&envelope).map_err(|e| ArchiveError::Encode(e.to_string()))
    }

    fn decode<T: Archivable>(&self, blob: &[u8]) -> ArchiveResult<T> {
        let envelope: Envelope =
            bincode::deserialize(blob).map_err(|e| ArchiveError::Decode(e.to_string()))?;
        check_tag::<T>(&envelope.tag)?;
        bincode::deserialize(&envelope.payload).map_err(|e| ArchiveError::Decode(e.to_string()))
    }
}
