//! Error types for the export pipeline.
//!
//! All of these are data-correctness errors detected during the
//! validation and resolution passes, before the first byte of the
//! document is written. The corrective action is always an edit to the
//! offending table followed by a new export attempt.

use thiserror::Error;

use crate::model::EntityKind;

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that abort an export. No partial document is ever produced.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Two rows share a name within a uniqueness scope
    #[error("{kind} names must be unique, found duplicate '{name}'")]
    DuplicateName { kind: EntityKind, name: String },

    /// A room's parent matches no subserver or room
    #[error("parent of room '{room}' does not exist")]
    UnresolvedParent { room: String },

    /// A user's sectors span more than one elevation
    #[error("elevation conflict on user '{user}'")]
    ConflictingElevation { user: String },

    /// None of a user's sectors maps to an elevation
    #[error("no elevation applies to user '{user}'")]
    MissingElevation { user: String },

    /// There are no subservers, so there is no tree to export
    #[error("there are no subservers to export")]
    EmptyDocument,

    /// Writing the finished document to the sink failed
    #[error("failed to write document: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the finished document failed
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}
