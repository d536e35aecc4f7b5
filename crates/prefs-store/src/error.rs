/// Errors from durable preference store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The on-disk document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The store configuration is invalid or could not be parsed.
    #[error("invalid store config: {0}")]
    Config(String),

    /// No explicit path was configured and the platform config directory
    /// could not be determined.
    #[error("cannot determine configuration directory")]
    NoConfigDir,
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
