//! Byte-budgeted LRU store for cached responses.
//!
//! # Responsibilities
//! - O(1) expected key lookup with most-recently-used promotion
//! - Replace-aware size accounting on insert
//! - Synchronous least-recently-used eviction under capacity pressure
//!
//! # Design Decisions
//! - One mutex guards map, access order, and the running byte total: the
//!   replace-then-account sequence must be a single critical section or
//!   concurrent inserts for the same key double-count
//! - Access order is a doubly-linked list threaded through the map's nodes
//!   (prev/next hold neighbor keys), so promotion and eviction are a
//!   constant number of hash operations, never a scan
//! - Entry payloads are immutable `Bytes`, so the lock is never held while
//!   a caller reads a body
//! - An entry larger than the whole budget is silently skipped; the request
//!   it came from still succeeded, it just is not memoized

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::cache::{CacheEntry, CacheKey};
use crate::observability::metrics;

/// A thread-safe LRU cache with a fixed byte capacity.
///
/// Cloning shares the underlying store, so one instance can be handed to
/// every request task.
#[derive(Clone)]
pub struct LruCache {
    capacity: u64,
    inner: Arc<Mutex<Inner>>,
}

/// Map node: the entry plus its access-order links. `prev` points toward
/// the most recently used end, `next` toward the least.
struct Node {
    entry: CacheEntry,
    prev: Option<CacheKey>,
    next: Option<CacheKey>,
}

#[derive(Default)]
struct Inner {
    nodes: HashMap<CacheKey, Node>,
    /// Most recently used key.
    head: Option<CacheKey>,
    /// Least recently used key, the eviction victim.
    tail: Option<CacheKey>,
    used_bytes: u64,
}

impl Inner {
    /// Detach a key from the access-order list, fixing its neighbors.
    fn unlink(&mut self, key: &CacheKey) {
        let (prev, next) = match self.nodes.get_mut(key) {
            Some(node) => (node.prev.take(), node.next.take()),
            None => return,
        };
        match &prev {
            Some(p) => {
                if let Some(node) = self.nodes.get_mut(p) {
                    node.next = next.clone();
                }
            }
            None => self.head = next.clone(),
        }
        match &next {
            Some(n) => {
                if let Some(node) = self.nodes.get_mut(n) {
                    node.prev = prev.clone();
                }
            }
            None => self.tail = prev,
        }
    }

    /// Link an unlinked key in at the most-recently-used end.
    fn push_front(&mut self, key: CacheKey) {
        match self.head.take() {
            Some(old_head) => {
                if let Some(node) = self.nodes.get_mut(&old_head) {
                    node.prev = Some(key.clone());
                }
                if let Some(node) = self.nodes.get_mut(&key) {
                    node.prev = None;
                    node.next = Some(old_head);
                }
            }
            None => {
                if let Some(node) = self.nodes.get_mut(&key) {
                    node.prev = None;
                    node.next = None;
                }
                self.tail = Some(key.clone());
            }
        }
        self.head = Some(key);
    }

    /// Unlink and remove a key, returning its entry.
    fn remove(&mut self, key: &CacheKey) -> Option<CacheEntry> {
        if !self.nodes.contains_key(key) {
            return None;
        }
        self.unlink(key);
        self.nodes.remove(key).map(|node| node.entry)
    }
}

impl LruCache {
    /// Create a store with a fixed capacity in bytes.
    pub fn new(capacity: u64) -> Self {
        Self {
            capacity,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Look up an entry, promoting it to most recently used on a hit.
    pub fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let mut inner = self.locked();
        let entry = inner.nodes.get(key)?.entry.clone();
        inner.unlink(key);
        inner.push_front(key.clone());
        Some(entry)
    }

    /// Insert or replace the entry for `key`, evicting least-recently-used
    /// entries until the new entry fits.
    ///
    /// Never fails: an entry larger than the total capacity is not admitted
    /// and leaves the store unchanged.
    pub fn insert(&self, key: CacheKey, entry: CacheEntry) {
        let size = entry.size_bytes();
        if size > self.capacity {
            tracing::debug!(
                key = %key,
                size_bytes = size,
                capacity_bytes = self.capacity,
                "Entry exceeds cache capacity, not stored"
            );
            return;
        }

        let mut inner = self.locked();

        // Replace, not append: the old entry's size leaves the total before
        // the new one is charged.
        if let Some(old) = inner.remove(&key) {
            inner.used_bytes -= old.size_bytes();
        }

        while inner.used_bytes + size > self.capacity {
            let Some(victim) = inner.tail.clone() else {
                break;
            };
            if let Some(evicted) = inner.remove(&victim) {
                inner.used_bytes -= evicted.size_bytes();
                metrics::record_cache_eviction();
                tracing::debug!(key = %victim, "Evicted least recently used entry");
            }
        }

        inner.used_bytes += size;
        inner.nodes.insert(
            key.clone(),
            Node {
                entry,
                prev: None,
                next: None,
            },
        );
        inner.push_front(key);
        metrics::record_cache_size(inner.nodes.len(), inner.used_bytes);
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.locked().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locked().nodes.is_empty()
    }

    /// Total bytes currently charged against the capacity.
    pub fn used_bytes(&self) -> u64 {
        self.locked().used_bytes
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
