//! Error types for the store layer.

use newsdesk_types::{LocalId, RemoteId};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failure in the durable key-value medium.
    #[error("state store error: {0}")]
    Backend(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No item with the given local id.
    #[error("no item with local id {0}")]
    NotFound(LocalId),

    /// A patch or bulk commit would link one remote post to two
    /// local items.
    #[error("remote id {remote_id} is already linked to local item {held_by}")]
    RemoteIdConflict {
        remote_id: RemoteId,
        held_by: LocalId,
    },

    /// A bulk commit carried the same local id twice.
    #[error("duplicate local id {0} in item set")]
    DuplicateLocalId(LocalId),

    /// Stored data failed structural validation.
    #[error("invalid stored content: {0}")]
    InvalidData(String),
}
