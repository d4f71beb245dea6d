//! Local content repository for Newsdesk.
//!
//! The repository owns the full set of content items and is the
//! authority the rest of the engine defers to: remote failures never
//! roll back a local mutation. Items are persisted wholesale to a
//! durable key-value medium behind the [`StateStore`] trait after
//! every successful mutation.
//!
//! Loading is deliberately forgiving. Stored data that is missing,
//! malformed, or structurally wrong yields the built-in seed dataset
//! instead of an error; the app never starts empty and never crashes
//! on a corrupt state file.

mod error;
mod repository;
mod seed;
mod state_store;

pub use error::{StoreError, StoreResult};
pub use repository::{next_local_id, ContentRepository};
pub use seed::seed_items;
pub use state_store::{MemoryStateStore, SqliteStateStore, StateStore};
