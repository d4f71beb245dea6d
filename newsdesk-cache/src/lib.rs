//! Bounded TTL cache for remote query results.
//!
//! Sits between the CMS client and the wire: list and probe responses
//! are stored under string keys with a time-to-live, and whole key
//! families can be invalidated by prefix after a mutation. Nothing in
//! here returns `Result`; a cache miss and a cache failure are the
//! same thing to callers, so the API is deliberately infallible.
//!
//! Capacity is fixed at construction. When a new key would exceed it,
//! the oldest-inserted entry is evicted (insertion order, not expiry
//! order). Expired entries are dropped lazily on read; a periodic
//! `purge_expired` call keeps memory tidy but is never required for
//! correctness.

mod cache;
mod config;

pub use cache::TtlCache;
pub use config::CacheConfig;
