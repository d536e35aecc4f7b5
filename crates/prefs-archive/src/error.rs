use thiserror::Error;

/// Errors from archiving or unarchiving a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ArchiveError {
    /// The value could not be encoded.
    #[error("encode failed: {0}")]
    Encode(String),

    /// The blob is corrupt or not an archive produced by this archiver.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The archive holds a different type than the one requested.
    #[error("archived type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
}

/// Result alias for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;
