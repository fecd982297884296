// ABOUTME: In-memory cache implementation with TTL freshness and oldest-first capacity eviction
// ABOUTME: Includes background cleanup task for expired entries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{key_pattern, CacheConfig};
use crate::constants::cache::DEFAULT_CACHE_MAX_ENTRIES;
use crate::errors::RecipeResult;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::debug;

/// Cache entry with the instant its fetch started
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    fetched_at: Instant,
    ttl: Duration,
}

impl<V> CacheEntry<V> {
    fn is_fresh(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.fetched_at) <= self.ttl
    }
}

type Entries<V> = DashMap<String, CacheEntry<V>>;

/// Keys covered by an invalidation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Barrier {
    All,
    Key(String),
    Pattern(glob::Pattern),
}

impl Barrier {
    fn covers(&self, key: &str) -> bool {
        match self {
            Self::All => true,
            Self::Key(barred) => barred == key,
            Self::Pattern(pattern) => pattern.matches(key),
        }
    }
}

/// In-memory cache with TTL freshness and background cleanup
///
/// Entries live in a sharded `DashMap`, so operations on different keys
/// never wait on each other. The map is behind an `Arc` because the cleanup
/// task spawned in [`CacheLayer::new`] sweeps it concurrently.
///
/// Invalidation leaves a barrier stamped with the invalidation instant.
/// [`CacheLayer::put_if_newer`] refuses values whose fetch started before a
/// barrier covering their key, so a fetch already running when its key was
/// invalidated cannot write its result back.
pub struct CacheLayer<V> {
    entries: Arc<Entries<V>>,
    barriers: DashMap<Barrier, Instant>,
    max_entries: usize,
    shutdown_tx: Option<mpsc::Sender<()>>,
}

impl<V> CacheLayer<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache, spawning the cleanup task when enabled
    ///
    /// The task is only started when called inside a Tokio runtime.
    #[must_use]
    pub fn new(config: &CacheConfig) -> Self {
        let max_entries = if config.max_entries == 0 {
            DEFAULT_CACHE_MAX_ENTRIES
        } else {
            config.max_entries
        };
        let entries: Arc<Entries<V>> = Arc::new(DashMap::new());

        let background = config.enable_background_cleanup && !config.cleanup_interval.is_zero();
        let shutdown_tx = if background {
            Self::spawn_cleanup(&entries, config.cleanup_interval)
        } else {
            None
        };

        Self {
            entries,
            barriers: DashMap::new(),
            max_entries,
            shutdown_tx,
        }
    }

    fn spawn_cleanup(entries: &Arc<Entries<V>>, every: Duration) -> Option<mpsc::Sender<()>> {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("No Tokio runtime available, cache background cleanup disabled");
            return None;
        };

        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let entries = Arc::clone(entries);
        runtime.spawn(async move {
            let mut interval = tokio::time::interval(every);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        Self::remove_expired(&entries);
                    }
                    _ = shutdown_rx.recv() => {
                        debug!("Cache cleanup task received shutdown signal");
                        break;
                    }
                }
            }
        });

        Some(shutdown_tx)
    }

    fn remove_expired(entries: &Entries<V>) -> usize {
        let now = Instant::now();
        let mut removed = 0;
        entries.retain(|_, entry| {
            let keep = entry.is_fresh(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        if removed > 0 {
            debug!("Cleaned up {} expired cache entries", removed);
        }
        removed
    }

    /// Look up a fresh value; an expired entry is removed and reported as a miss
    #[must_use]
    pub fn get(&self, key: &str) -> Option<V> {
        let now = Instant::now();
        let fresh = self
            .entries
            .get(key)
            .and_then(|entry| entry.is_fresh(now).then(|| entry.value.clone()));

        if fresh.is_none() {
            self.entries.remove_if(key, |_, entry| !entry.is_fresh(now));
        }
        fresh
    }

    /// Store a value fetched just now, replacing any existing entry
    pub fn put(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        self.make_room(&key);
        self.entries.insert(
            key,
            CacheEntry {
                value,
                fetched_at: Instant::now(),
                ttl,
            },
        );
    }

    /// Store a value unless the existing entry came from a later fetch
    ///
    /// `fetched_at` is when the fetch producing `value` started. The value is
    /// also refused when the key was invalidated after `fetched_at`. Returns
    /// whether the value was stored.
    pub fn put_if_newer(
        &self,
        key: impl Into<String>,
        value: V,
        ttl: Duration,
        fetched_at: Instant,
    ) -> bool {
        let key = key.into();
        self.make_room(&key);

        let entry = CacheEntry {
            value,
            fetched_at,
            ttl,
        };
        let slot = self.entries.entry(key);
        if self.is_barred(slot.key(), fetched_at) {
            debug!(key = %slot.key(), "Discarding result of a fetch started before invalidation");
            return false;
        }
        match slot {
            Entry::Occupied(mut occupied) => {
                if occupied.get().fetched_at > fetched_at {
                    debug!(key = %occupied.key(), "Discarding stale fetch result");
                    return false;
                }
                occupied.insert(entry);
                true
            }
            Entry::Vacant(vacant) => {
                vacant.insert(entry);
                true
            }
        }
    }

    /// Remove one entry
    pub fn invalidate(&self, key: &str) {
        self.raise_barrier(Barrier::Key(key.to_owned()));
        self.entries.remove(key);
    }

    /// Remove every entry whose key matches a glob pattern such as `search:*`
    ///
    /// # Errors
    ///
    /// Returns `RecipeError::InvalidQuery` if the pattern is not a valid glob
    pub fn invalidate_pattern(&self, pattern: &str) -> RecipeResult<usize> {
        let glob_pattern = key_pattern(pattern)?;
        self.barriers.retain(|barrier, _| match barrier {
            Barrier::Key(key) => !glob_pattern.matches(key),
            Barrier::All | Barrier::Pattern(_) => true,
        });
        self.raise_barrier(Barrier::Pattern(glob_pattern.clone()));

        let mut removed = 0;
        self.entries.retain(|key, _| {
            let matched = glob_pattern.matches(key);
            if matched {
                removed += 1;
            }
            !matched
        });
        debug!(pattern, removed, "Invalidated cache entries by pattern");
        Ok(removed)
    }

    /// Remove every entry
    pub fn clear(&self) {
        self.barriers.clear();
        self.raise_barrier(Barrier::All);
        self.entries.clear();
    }

    /// Remove all expired entries now, returning how many were removed
    pub fn sweep_expired(&self) -> usize {
        Self::remove_expired(&self.entries)
    }

    /// Number of stored entries, including expired ones not yet swept
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record an invalidation; must happen before the matching entries are removed
    fn raise_barrier(&self, barrier: Barrier) {
        self.barriers.insert(barrier, Instant::now());
    }

    fn is_barred(&self, key: &str, fetched_at: Instant) -> bool {
        self.barriers
            .iter()
            .any(|barrier| *barrier.value() > fetched_at && barrier.key().covers(key))
    }

    /// Ensure inserting `incoming` keeps the cache within capacity
    fn make_room(&self, incoming: &str) {
        if self.entries.len() < self.max_entries || self.entries.contains_key(incoming) {
            return;
        }
        if self.sweep_expired() > 0 && self.entries.len() < self.max_entries {
            return;
        }

        let oldest = self
            .entries
            .iter()
            .min_by_key(|entry| entry.fetched_at)
            .map(|entry| entry.key().clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
            debug!(key = %key, "Evicted oldest cache entry at capacity");
        }
    }
}

impl<V> Drop for CacheLayer<V> {
    fn drop(&mut self) {
        // Errors are expected if the task already exited
        if let Some(tx) = &self.shutdown_tx {
            if let Err(e) = tx.try_send(()) {
                debug!(error = ?e, "Cache shutdown signal send failed (channel likely closed)");
            }
        }
    }
}
