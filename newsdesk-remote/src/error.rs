//! Error classification for CMS calls.
//!
//! Every failure is folded into one of these variants so the UI can
//! tell the operator what to actually do: fix credentials, fix the
//! URL, wait out a server problem, or check the network.

use thiserror::Error;

/// Result type for CMS operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors that can occur talking to the remote CMS.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Rejected locally before any network traffic.
    #[error("invalid post: {0}")]
    Validation(String),

    /// HTTP 401. The credentials are wrong or revoked.
    #[error("authentication failed: check the CMS username and application password")]
    Unauthorized,

    /// HTTP 403. Authenticated, but the account lacks the rights.
    #[error("permission denied: the CMS account is not allowed to manage posts")]
    Forbidden,

    /// HTTP 404. Wrong base URL, or the post no longer exists.
    #[error("not found: check the CMS address, or the post was deleted remotely")]
    NotFound,

    /// Any other unexpected status. The problem is on the CMS side.
    #[error("CMS error (status {status}): {detail}")]
    Server { status: u16, detail: String },

    /// The request never got an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The CMS answered with a body this client cannot use.
    #[error("unusable CMS response: {0}")]
    InvalidPost(String),
}

impl RemoteError {
    /// Maps an HTTP error status onto the taxonomy.
    pub(crate) fn from_status(status: reqwest::StatusCode, detail: String) -> Self {
        match status.as_u16() {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            code => Self::Server {
                status: code,
                detail,
            },
        }
    }

    /// True for the two credential-shaped failures.
    #[must_use]
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden)
    }
}
