use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// A single cached value with its insertion metadata.
///
/// `inserted_at` is fixed at construction; replacing a key stores a brand
/// new entry rather than mutating the old one.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// Cached value
    pub value: T,
    /// When the value was inserted
    pub inserted_at: Instant,
    /// Per-entry TTL override; `None` defers to the cache default at lookup time
    pub ttl: Option<Duration>,
}

impl<T> CacheEntry<T> {
    /// Create a new entry inserted now
    pub fn new(value: T, ttl: Option<Duration>) -> Self {
        Self {
            value,
            inserted_at: Instant::now(),
            ttl,
        }
    }

    /// Check whether the entry has outlived its TTL, falling back to the
    /// cache-wide default when no override was recorded.
    pub fn is_expired(&self, default_ttl: Duration) -> bool {
        let ttl = self.ttl.unwrap_or(default_ttl);
        Instant::now() > self.inserted_at + ttl
    }
}

/// Configuration for a cache instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Default TTL in minutes for entries without an override
    pub default_ttl_minutes: u64,
    /// Delay before a scheduled scavenge sweep runs, in seconds
    pub scavenge_delay_secs: u64,
    /// Scavenge when available/total memory drops below this ratio
    pub memory_pressure_ratio: f64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl_minutes: 15,
            scavenge_delay_secs: 5,
            memory_pressure_ratio: 0.10,
        }
    }
}

impl CacheConfig {
    /// Default TTL as a duration
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl_minutes * 60)
    }

    /// Scavenge delay as a duration
    pub fn scavenge_delay(&self) -> Duration {
        Duration::from_secs(self.scavenge_delay_secs)
    }
}

/// Statistics for a cache instance
#[derive(Debug, Default, Clone, Serialize)]
pub struct CacheStats {
    /// Current number of entries (including not-yet-observed stale ones)
    pub entries: usize,
    /// Number of add operations
    pub adds: u64,
    /// Number of get operations
    pub gets: u64,
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses (absent or expired)
    pub misses: u64,
    /// Number of completed scavenge sweeps
    pub scavenge_runs: u64,
    /// Total entries removed by scavenge sweeps
    pub scavenged: u64,
}

impl CacheStats {
    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
