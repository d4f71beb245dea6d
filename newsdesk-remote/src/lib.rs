//! REST client for the remote CMS.
//!
//! Talks the WordPress-style wire protocol: Basic auth with an
//! application password, `/posts` collection routes under a versioned
//! base path, updates by POST to the post route. The client owns a
//! bounded TTL cache for list results and connection probes, consults
//! it before every read, and invalidates it after every mutation.
//!
//! Every failure is classified into [`RemoteError`] so callers can
//! show an actionable message instead of a raw HTTP status.

mod client;
mod config;
mod error;
mod wire;

pub use client::{CmsClient, ConnectionCheck};
pub use config::CmsConfig;
pub use error::{RemoteError, RemoteResult};
pub use wire::{status_from_wire, wire_status, ListQuery, PostDraft, PostPatch, RemotePost};
