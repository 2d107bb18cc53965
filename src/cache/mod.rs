//! Bounded concurrent memoization
//!
//! [`MemoCache`] maps keys to lazily computed values. Each resident key is
//! computed at most once: the first caller installs an empty slot and runs the
//! computation, concurrent callers for the same key block on that slot and
//! receive the same value. When the cache grows past its capacity the least
//! recently used entries are evicted down to a low watermark. Entries whose
//! computation is still running are pinned and never evicted, so the cache
//! may briefly hold more than its capacity. An evicted key is simply
//! recomputed on its next use.

use std::hash::Hash;
use std::ops::AddAssign;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Counters describing cache effectiveness
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,

    /// Entries resident when the snapshot was taken
    pub entries: usize,
}

impl AddAssign for CacheStats {
    fn add_assign(&mut self, other: Self) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.evictions += other.evictions;
        self.entries += other.entries;
    }
}

struct Slot<V> {
    value: Arc<OnceLock<V>>,
    last_used: AtomicU64,
}

impl<V> Slot<V> {
    fn new(tick: u64) -> Self {
        Self {
            value: Arc::new(OnceLock::new()),
            last_used: AtomicU64::new(tick),
        }
    }
}

/// Capacity-bounded, thread-safe, compute-once cache
pub struct MemoCache<K, V> {
    /// Maximum resident entries; 0 disables caching
    capacity: usize,

    entries: DashMap<K, Slot<V>>,

    /// Logical clock for recency
    clock: AtomicU64,

    hits: AtomicU64,
    misses: AtomicU64,
    evictions: AtomicU64,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: DashMap::with_capacity(capacity),
            clock: AtomicU64::new(0),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            evictions: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the cached value for `key`, computing it with `compute` if absent
    pub fn get_or_compute<F>(&self, key: K, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if self.capacity == 0 {
            self.misses.fetch_add(1, Ordering::Relaxed);
            return compute();
        }

        let tick = self.clock.fetch_add(1, Ordering::Relaxed);

        // The shard guard must be released before computing or evicting
        let (cell, inserted) = match self.entries.entry(key) {
            Entry::Occupied(entry) => {
                entry.get().last_used.store(tick, Ordering::Relaxed);
                (Arc::clone(&entry.get().value), false)
            }
            Entry::Vacant(entry) => {
                let slot = Slot::new(tick);
                let cell = Arc::clone(&slot.value);
                entry.insert(slot);
                (cell, true)
            }
        };

        if inserted {
            self.misses.fetch_add(1, Ordering::Relaxed);
            if self.entries.len() > self.capacity {
                self.evict_least_recent();
            }
        } else {
            self.hits.fetch_add(1, Ordering::Relaxed);
        }

        cell.get_or_init(compute).clone()
    }

    /// Drop the least recently used finished entries until the cache is back
    /// under its low watermark
    fn evict_least_recent(&self) {
        let resident = self.entries.len();

        // Another thread may have evicted in the meantime
        if resident <= self.capacity {
            return;
        }

        // In-flight slots have waiters that expect this exact cell
        let mut ages: Vec<(u64, K)> = self
            .entries
            .iter()
            .filter(|entry| entry.value().value.get().is_some())
            .map(|entry| (entry.value().last_used.load(Ordering::Relaxed), entry.key().clone()))
            .collect();

        let watermark = self.capacity - self.capacity / 8;
        let excess = (resident - watermark).min(ages.len());
        if excess == 0 {
            return;
        }
        ages.select_nth_unstable_by_key(excess - 1, |(tick, _)| *tick);

        for (_, key) in ages.into_iter().take(excess) {
            if self.entries.remove(&key).is_some() {
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }

        log::debug!("Evicted {} cache entries", excess);
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            entries: self.entries.len(),
        }
    }
}
