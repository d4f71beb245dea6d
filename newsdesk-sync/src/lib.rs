//! Bidirectional sync engine between the Newsdesk repository and a
//! remote CMS.
//!
//! # Architecture
//!
//! The local repository is the source of truth. Every edit lands there
//! first; the remote is a mirror that is brought up to date by pushes
//! and consulted by pulls. A remote failure therefore never costs
//! local data, it only leaves the mirror stale until the next sync.
//!
//! ## Components
//!
//! - **Orchestrator**: Drives pushes and pulls and owns the decision
//!   of what needs sending
//! - **Settings**: The two persisted switches gating all remote work
//! - **Status**: One observable line describing the sync in progress
//!   or how the last one ended
//! - **Reports**: Per-pass counters handed back to callers
//!
//! ## Sync Process
//!
//! 1. **Pull**: List published posts and merge them in, newer writer
//!    wins per item, ties stay local
//! 2. **Push**: Send every item whose content the remote is not known
//!    to carry; unlinked items are created, linked ones updated
//! 3. **Link**: A successful create stores the returned post id on
//!    the item, so later pushes address the same post
//!
//! # Example
//!
//! ```
//! use newsdesk_remote::{CmsClient, CmsConfig};
//! use newsdesk_store::{ContentRepository, MemoryStateStore, StateStore};
//! use newsdesk_sync::{SyncOptions, SyncOrchestrator};
//! use std::sync::Arc;
//!
//! let store: Arc<dyn StateStore> = Arc::new(MemoryStateStore::new());
//! let repo = Arc::new(ContentRepository::load(Arc::clone(&store)));
//! let client = Arc::new(CmsClient::new(CmsConfig::default()));
//!
//! let orchestrator =
//!     SyncOrchestrator::new(repo, client, store, SyncOptions::default());
//! assert!(!orchestrator.settings().remote_sync_enabled);
//! ```

mod error;
mod orchestrator;
mod report;
mod settings;
mod status;

pub use error::{SyncError, SyncResult};
pub use orchestrator::{SyncOptions, SyncOrchestrator};
pub use report::{PullSummary, PushSummary, SyncReport};
pub use settings::SyncSettings;
pub use status::{SyncPhase, SyncStatus};
