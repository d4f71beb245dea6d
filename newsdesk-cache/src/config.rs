//! Cache construction parameters.

use std::time::Duration;

/// Capacity and default freshness window for a [`crate::TtlCache`].
///
/// Constructed explicitly and handed to `TtlCache::new`; there is no
/// ambient global cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of stored entries. Zero disables the cache
    /// entirely (inserts become no-ops).
    pub capacity: usize,
    /// Freshness window applied by `insert`; `insert_with_ttl`
    /// overrides it per entry.
    pub default_ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            default_ttl: Duration::from_secs(300),
        }
    }
}
