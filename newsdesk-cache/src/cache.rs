//! The cache itself.

use crate::CacheConfig;
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

/// One stored value with its freshness window.
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    stored_at: Instant,
    expires_at: Instant,
}

impl<V> CacheEntry<V> {
    /// An entry is visible up to and including its expiry instant.
    fn is_fresh(&self, now: Instant) -> bool {
        now <= self.expires_at
    }
}

/// Bounded in-memory cache with per-entry TTLs and string keys.
///
/// `entries` and `order` always hold the same key set; `order` front
/// is the oldest surviving insertion and is the eviction victim when
/// a new key would exceed capacity. Re-setting an existing key keeps
/// its original insertion position.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: HashMap<String, CacheEntry<V>>,
    order: VecDeque<String>,
    config: CacheConfig,
}

impl<V: Clone> TtlCache<V> {
    /// Creates an empty cache with the given capacity and default TTL.
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            config,
        }
    }

    /// Stores `value` under `key` with the configured default TTL.
    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let ttl = self.config.default_ttl;
        self.insert_with_ttl(key, value, ttl);
    }

    /// Stores `value` under `key`, fresh for `ttl` from now.
    ///
    /// A new key at capacity evicts the oldest-inserted entry first.
    pub fn insert_with_ttl(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        if self.config.capacity == 0 {
            return;
        }
        let key = key.into();
        let now = Instant::now();
        let entry = CacheEntry {
            value,
            stored_at: now,
            expires_at: now + ttl,
        };
        if self.entries.contains_key(&key) {
            self.entries.insert(key, entry);
            return;
        }
        if self.entries.len() >= self.config.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, entry);
    }

    /// Returns a clone of the fresh value under `key`, if any.
    ///
    /// An expired entry is physically removed on the way out and
    /// reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<V> {
        let now = Instant::now();
        match self.entries.get(key) {
            None => return None,
            Some(entry) if entry.is_fresh(now) => return Some(entry.value.clone()),
            Some(_) => {}
        }
        // Present but expired.
        self.entries.remove(key);
        self.order.retain(|k| k != key);
        None
    }

    /// True when a fresh value is stored under `key`. Does not clone
    /// or remove anything.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        let now = Instant::now();
        self.entries.get(key).is_some_and(|e| e.is_fresh(now))
    }

    /// How long ago the fresh value under `key` was stored.
    #[must_use]
    pub fn age(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|e| e.is_fresh(now))
            .map(|e| now.duration_since(e.stored_at))
    }

    /// Drops the entry under `key`. Returns whether anything was
    /// stored there, fresh or not.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.order.retain(|k| k != key);
        }
        removed
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    /// Drops every entry whose key starts with `prefix` and returns
    /// how many were removed. Used to invalidate a whole family of
    /// cached queries after a mutation.
    pub fn clear_prefix(&mut self, prefix: &str) -> usize {
        let before = self.entries.len();
        self.entries.retain(|k, _| !k.starts_with(prefix));
        self.order.retain(|k| !k.starts_with(prefix));
        before - self.entries.len()
    }

    /// Physically drops expired entries and returns how many went.
    /// Correctness never depends on this being called; it exists for
    /// periodic housekeeping.
    pub fn purge_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        let Self { entries, order, .. } = self;
        entries.retain(|_, e| e.is_fresh(now));
        order.retain(|k| entries.contains_key(k));
        before - self.entries.len()
    }

    /// Number of stored entries, including expired ones not yet
    /// purged. This is the count capacity is enforced against.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
