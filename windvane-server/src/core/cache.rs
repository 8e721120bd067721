use super::scavenge::{MemoryPressureTrigger, ScavengeTrigger};
use super::types::{CacheConfig, CacheEntry, CacheStats};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::{debug, trace};

/// Expiring key-value cache for one logical cache name.
///
/// Entries expire after their TTL (per-entry override or the cache default).
/// Staleness is resolved lazily on reads; under memory pressure a single
/// deferred background sweep removes everything currently expired.
#[derive(Clone)]
pub struct Cache<T> {
    name: Arc<String>,
    entries: Arc<RwLock<HashMap<String, CacheEntry<T>>>>,
    stats: Arc<RwLock<CacheStats>>,
    /// Default TTL in milliseconds, settable at runtime
    default_ttl_ms: Arc<AtomicU64>,
    /// True while a sweep is scheduled or running; at most one at a time
    scavenge_scheduled: Arc<AtomicBool>,
    scavenge_delay: Duration,
    trigger: Arc<dyn ScavengeTrigger>,
}

impl<T: Clone + Send + Sync + 'static> Cache<T> {
    /// Create a cache with the default memory-pressure trigger
    pub fn new(name: impl Into<String>, config: CacheConfig) -> Self {
        let trigger = Arc::new(MemoryPressureTrigger::new(config.memory_pressure_ratio));
        Self::with_trigger(name, config, trigger)
    }

    /// Create a cache with a custom scavenge trigger
    pub fn with_trigger(
        name: impl Into<String>,
        config: CacheConfig,
        trigger: Arc<dyn ScavengeTrigger>,
    ) -> Self {
        let name = name.into();
        debug!(
            "Initializing cache '{}' (default_ttl={}min, scavenge_delay={}s)",
            name, config.default_ttl_minutes, config.scavenge_delay_secs
        );

        Self {
            name: Arc::new(name),
            entries: Arc::new(RwLock::new(HashMap::new())),
            stats: Arc::new(RwLock::new(CacheStats::default())),
            default_ttl_ms: Arc::new(AtomicU64::new(config.default_ttl().as_millis() as u64)),
            scavenge_scheduled: Arc::new(AtomicBool::new(false)),
            scavenge_delay: config.scavenge_delay(),
            trigger,
        }
    }

    /// Cache name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store or replace the entry for `key` with insertion time "now".
    ///
    /// `ttl = None` defers to the cache default at lookup time. Overwriting
    /// an existing key silently replaces the old entry and restarts its
    /// expiration clock. May schedule a background sweep as a side effect.
    pub fn add(&self, key: &str, value: T, ttl: Option<Duration>) {
        trace!("ADD cache={} key={} ttl={:?}", self.name, key, ttl);

        {
            let mut entries = self.entries.write();
            entries.insert(key.to_string(), CacheEntry::new(value, ttl));

            let mut stats = self.stats.write();
            stats.adds += 1;
            stats.entries = entries.len();
        }

        if self.trigger.should_scavenge() {
            self.schedule_scavenge();
        }
    }

    /// Look up a value. Absent and expired keys both return `None`; an
    /// expired entry encountered here is removed on the spot.
    pub fn get(&self, key: &str) -> Option<T> {
        let mut entries = self.entries.write();
        let mut stats = self.stats.write();
        stats.gets += 1;

        match entries.get(key) {
            Some(entry) if entry.is_expired(self.default_ttl()) => {
                trace!("Key expired: cache={} key={}", self.name, key);
                entries.remove(key);
                stats.entries = entries.len();
                stats.misses += 1;
                None
            }
            Some(entry) => {
                stats.hits += 1;
                Some(entry.value.clone())
            }
            None => {
                stats.misses += 1;
                None
            }
        }
    }

    /// Check whether `key` holds a fresh value, removing it if it turns
    /// out to be stale. Same lazy-expiry semantics as `get`.
    pub fn contains_fresh(&self, key: &str) -> bool {
        let mut entries = self.entries.write();

        match entries.get(key) {
            Some(entry) if entry.is_expired(self.default_ttl()) => {
                entries.remove(key);
                self.stats.write().entries = entries.len();
                false
            }
            Some(_) => true,
            None => false,
        }
    }

    /// Remove a key; removing an absent key is a no-op
    pub fn remove(&self, key: &str) {
        let mut entries = self.entries.write();
        if entries.remove(key).is_some() {
            self.stats.write().entries = entries.len();
        }
    }

    /// Remove every entry; idempotent
    pub fn remove_all(&self) {
        let mut entries = self.entries.write();
        let count = entries.len();
        entries.clear();
        self.stats.write().entries = 0;

        debug!("Cleared cache '{}' ({} entries)", self.name, count);
    }

    /// Remove every currently expired entry and return how many were
    /// removed. Stale keys are collected first, then deleted, so the map
    /// is never mutated while being scanned.
    pub fn remove_expired(&self) -> usize {
        let default_ttl = self.default_ttl();
        let mut entries = self.entries.write();

        let expired_keys: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(default_ttl))
            .map(|(key, _)| key.clone())
            .collect();

        let count = expired_keys.len();
        if count > 0 {
            for key in expired_keys {
                entries.remove(&key);
            }
            self.stats.write().entries = entries.len();
            debug!("Removed {} expired entries from cache '{}'", count, self.name);
        }

        count
    }

    /// Default TTL applied to entries without an override
    pub fn default_ttl(&self) -> Duration {
        Duration::from_millis(self.default_ttl_ms.load(Ordering::Relaxed))
    }

    /// Change the default TTL; affects every entry without an override,
    /// including ones already stored
    pub fn set_default_ttl(&self, ttl: Duration) {
        self.default_ttl_ms
            .store(ttl.as_millis() as u64, Ordering::Relaxed);
    }

    /// Number of stored entries, including stale ones not yet observed
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when the cache holds no entries at all
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of the currently stored keys
    pub fn keys(&self) -> Vec<String> {
        self.entries.read().keys().cloned().collect()
    }

    /// Snapshot of cache statistics
    pub fn stats(&self) -> CacheStats {
        self.stats.read().clone()
    }

    /// Schedule one deferred sweep unless one is already in flight. The
    /// compare-and-swap makes "check flag, set flag, spawn" a single unit,
    /// so concurrent adds can never enqueue two overlapping sweeps.
    fn schedule_scavenge(&self) {
        if self
            .scavenge_scheduled
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            // No runtime to defer onto; lazy expiration still applies
            self.scavenge_scheduled.store(false, Ordering::SeqCst);
            return;
        };

        trace!("Scheduling scavenge for cache '{}'", self.name);

        let cache = self.clone();
        handle.spawn(async move {
            tokio::time::sleep(cache.scavenge_delay).await;

            let removed = cache.remove_expired();
            {
                let mut stats = cache.stats.write();
                stats.scavenge_runs += 1;
                stats.scavenged += removed as u64;
            }
            cache.scavenge_scheduled.store(false, Ordering::SeqCst);

            if removed > 0 {
                debug!("Scavenged {} entries from cache '{}'", removed, cache.name());
            }
        });
    }
}
