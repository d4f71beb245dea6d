//! Error types for the sync layer.

use thiserror::Error;

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

/// Errors that can occur during a sync pass.
///
/// Both variants wrap the failing layer's own error so the
/// remediation hints in its `Display` survive into the status line.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The local repository rejected or failed a mutation.
    #[error("store error: {0}")]
    Store(#[from] newsdesk_store::StoreError),

    /// The remote CMS rejected or failed a request.
    #[error("remote error: {0}")]
    Remote(#[from] newsdesk_remote::RemoteError),
}
