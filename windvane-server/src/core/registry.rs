use super::cache::Cache;
use super::error::{Result, WindvaneError};
use super::types::CacheConfig;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

/// Process-wide registry handing out named cache instances.
///
/// Built once at startup and passed explicitly to whoever needs a cache;
/// each distinct name maps to exactly one `Cache` for the registry's
/// lifetime, created lazily on first access.
#[derive(Clone)]
pub struct CacheRegistry<T> {
    caches: Arc<RwLock<HashMap<String, Arc<Cache<T>>>>>,
    config: CacheConfig,
}

impl<T: Clone + Send + Sync + 'static> CacheRegistry<T> {
    /// Create an empty registry; new caches inherit `config`
    pub fn new(config: CacheConfig) -> Self {
        info!("Initializing cache registry");
        Self {
            caches: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Return the cache registered under `name`, creating it on first
    /// access. Creation is atomic across concurrent callers racing on the
    /// same name. Blank names are rejected.
    pub fn get_or_create(&self, name: &str) -> Result<Arc<Cache<T>>> {
        if name.trim().is_empty() {
            return Err(WindvaneError::InvalidCacheName);
        }

        let mut caches = self.caches.write();
        let cache = caches
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(Cache::new(name, self.config.clone())));

        Ok(Arc::clone(cache))
    }

    /// Drop the whole cache registered under `name`, entries included.
    /// No-op when the name is blank or unknown; a later `get_or_create`
    /// starts over with a fresh, empty cache.
    pub fn remove(&self, name: &str) {
        if name.trim().is_empty() {
            return;
        }

        if self.caches.write().remove(name).is_some() {
            debug!("Removed cache '{}' from registry", name);
        }
    }

    /// Names of the currently registered caches
    pub fn names(&self) -> Vec<String> {
        self.caches.read().keys().cloned().collect()
    }

    /// Number of registered caches
    pub fn len(&self) -> usize {
        self.caches.read().len()
    }

    /// True when no cache has been created yet
    pub fn is_empty(&self) -> bool {
        self.caches.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> CacheRegistry<String> {
        CacheRegistry::new(CacheConfig::default())
    }

    #[test]
    fn get_or_create_returns_same_instance() {
        let registry = registry();

        let first = registry.get_or_create("foo").unwrap();
        let second = registry.get_or_create("foo").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_names_distinct_caches() {
        let registry = registry();

        let a = registry.get_or_create("a").unwrap();
        let b = registry.get_or_create("b").unwrap();

        assert!(!Arc::ptr_eq(&a, &b));
        a.add("k", "v".to_string(), None);
        assert_eq!(b.get("k"), None);
    }

    #[test]
    fn blank_name_rejected() {
        let registry = registry();

        assert!(matches!(
            registry.get_or_create(""),
            Err(WindvaneError::InvalidCacheName)
        ));
        assert!(matches!(
            registry.get_or_create("   "),
            Err(WindvaneError::InvalidCacheName)
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn remove_drops_cache_and_restarts_fresh() {
        let registry = registry();

        let cache = registry.get_or_create("wind").unwrap();
        cache.add("08831", "reading".to_string(), None);

        registry.remove("wind");
        assert!(registry.is_empty());

        let fresh = registry.get_or_create("wind").unwrap();
        assert!(!Arc::ptr_eq(&cache, &fresh));
        assert_eq!(fresh.get("08831"), None);
    }

    #[test]
    fn remove_blank_or_absent_is_noop() {
        let registry = registry();
        registry.get_or_create("keep").unwrap();

        registry.remove("");
        registry.remove("   ");
        registry.remove("unknown");

        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_get_or_create_single_instance() {
        let registry = registry();

        let mut handles = Vec::new();
        for _ in 0..16 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move {
                registry.get_or_create("shared").unwrap()
            }));
        }

        let mut caches = Vec::new();
        for handle in handles {
            caches.push(handle.await.unwrap());
        }

        let first = &caches[0];
        assert!(caches.iter().all(|c| Arc::ptr_eq(first, c)));
        assert_eq!(registry.len(), 1);
    }
}
