//! Core type definitions for Newsdesk.
//!
//! This crate defines the content model shared by the repository, the
//! remote CMS client, and the sync engine:
//! - Local and remote identifiers (plain integers)
//! - `ContentItem` and its publication status
//! - Partial mutation types (`NewContent`, `ContentPatch`)
//!
//! Rendering, routing, and anything else UI-facing lives outside the
//! engine and consumes these types as-is.

mod ids;
mod item;
mod status;

pub use ids::{LocalId, RemoteId};
pub use item::{ContentItem, ContentPatch, NewContent};
pub use status::{ContentKind, ContentStatus};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("unknown status: {0}")]
    UnknownStatus(String),
}
