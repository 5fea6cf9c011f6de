//! Error types for the table store.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while persisting or restoring session state
#[derive(Debug, Error)]
pub enum StoreError {
    /// A previously saved snapshot no longer deserializes. The session
    /// row format carries no schema versioning, so this is fatal: the
    /// caller should report it and require a restart rather than try a
    /// partial recovery.
    #[error("session data is corrupted, restart the session: {0}")]
    Corrupted(String),

    /// Snapshot I/O failed
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot serialization failed
    #[error("failed to serialize session state: {0}")]
    Serialization(String),
}
