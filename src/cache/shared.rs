//! Shared Cache Module
//!
//! Thread-safe handle over a [`CacheStore`] plus the cache-aside wrapper used
//! by data-access code.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{generate_key, CacheStats, CacheStore, Namespace};
use crate::config::Config;

// == Shared Cache ==
/// Cloneable handle to the process-wide cache.
///
/// Built once by the composition root and handed to every consumer. Clones
/// share the same underlying store.
#[derive(Debug, Clone)]
pub struct SharedCache {
    inner: Arc<RwLock<CacheStore>>,
}

impl SharedCache {
    /// Wraps a store for shared use.
    pub fn new(store: CacheStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates a shared cache sized by the configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheStore::new(config.max_entries, config.default_ttl()))
    }

    // Reads take the write lock: expiry and counters mutate the store.
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.inner.write().await.get(key)
    }

    pub async fn set(&self, key: impl Into<String>, value: Value, ttl: Option<Duration>) {
        self.inner.write().await.set(key, value, ttl);
    }

    pub async fn delete(&self, key: &str) -> bool {
        self.inner.write().await.delete(key)
    }

    pub async fn clear(&self) -> usize {
        let removed = self.inner.write().await.clear();
        info!(removed, "Cache cleared");
        removed
    }

    // == Invalidate ==
    /// Removes every entry belonging to `namespace`.
    pub async fn invalidate(&self, namespace: Namespace) -> usize {
        let removed = self.inner.write().await.invalidate(namespace);
        info!(namespace = %namespace, removed, "Cache namespace invalidated");
        removed
    }

    pub async fn stats(&self) -> CacheStats {
        self.inner.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    // == Get Or Fetch ==
    /// Cache-aside read.
    ///
    /// Looks up the key built from `operation` and `params`. On a hit the
    /// cached value is returned. On a miss `fetch` runs, its result is stored
    /// with `ttl` (or the store default) and returned.
    ///
    /// Errors from `fetch` are returned unchanged and nothing is cached. The
    /// lock is not held while `fetch` runs, so two concurrent misses on the
    /// same key may both reach the backing store.
    ///
    /// A cached value that does not deserialize into `T` counts as a miss and
    /// is replaced by the fresh result.
    pub async fn get_or_fetch<T, E, F, Fut>(
        &self,
        operation: &str,
        params: Option<&Value>,
        ttl: Option<Duration>,
        fetch: F,
    ) -> Result<T, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let key = generate_key(operation, params);

        if let Some(cached) = self.get(&key).await {
            match serde_json::from_value::<T>(cached) {
                Ok(value) => {
                    debug!(key = %key, "Cache hit");
                    return Ok(value);
                }
                Err(err) => {
                    warn!(key = %key, error = %err, "Cached value has unexpected shape, refetching");
                }
            }
        } else {
            debug!(key = %key, "Cache miss");
        }

        let fresh = fetch().await?;

        match serde_json::to_value(&fresh) {
            Ok(value) => self.set(key, value, ttl).await,
            Err(err) => warn!(key = %key, error = %err, "Result not cacheable"),
        }

        Ok(fresh)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn shared_with_clock() -> (SharedCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(0));
        let store = CacheStore::with_clock(100, Duration::from_secs(300), clock.clone());
        (SharedCache::new(store), clock)
    }

    #[tokio::test]
    async fn test_clones_share_the_store() {
        let (cache, _) = shared_with_clock();
        let other = cache.clone();

        cache.set("k", json!("v"), None).await;
        assert_eq!(other.get("k").await, Some(json!("v")));

        assert!(other.delete("k").await);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_or_fetch_caches_result() {
        let (cache, _) = shared_with_clock();
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        for _ in 0..2 {
            let value: Result<Vec<u32>, String> = cache
                .get_or_fetch("getProducts", None, None, || async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![1, 2, 3])
                })
                .await;
            assert_eq!(value, Ok(vec![1, 2, 3]));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_or_fetch_refetches_after_ttl() {
        let (cache, clock) = shared_with_clock();
        let counter = AtomicUsize::new(0);
        let calls = &counter;
        let ttl = Some(Duration::from_millis(100));

        let fetch = || async move { Ok::<_, String>(calls.fetch_add(1, Ordering::SeqCst)) };

        assert_eq!(cache.get_or_fetch("getBrands", None, ttl, fetch).await, Ok(0));
        clock.advance(Duration::from_millis(150));
        assert_eq!(cache.get_or_fetch("getBrands", None, ttl, fetch).await, Ok(1));
    }

    #[tokio::test]
    async fn test_get_or_fetch_does_not_cache_errors() {
        let (cache, _) = shared_with_clock();
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let result: Result<String, String> = cache
            .get_or_fetch("getUsers", None, None, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("database down".to_string())
            })
            .await;

        assert_eq!(result, Err("database down".to_string()));
        assert!(cache.is_empty().await);

        let retry: Result<String, String> = cache
            .get_or_fetch("getUsers", None, None, || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok("ok".to_string())
            })
            .await;

        assert_eq!(retry, Ok("ok".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_get_or_fetch_replaces_mismatched_value() {
        let (cache, _) = shared_with_clock();
        cache.set(generate_key("getBrands", None), json!("not a list"), None).await;

        let value: Result<Vec<String>, String> = cache
            .get_or_fetch("getBrands", None, None, || async { Ok(vec!["acme".to_string()]) })
            .await;

        assert_eq!(value, Ok(vec!["acme".to_string()]));
        assert_eq!(
            cache.get(&generate_key("getBrands", None)).await,
            Some(json!(["acme"]))
        );
    }

    #[tokio::test]
    async fn test_invalidate_and_stats() {
        let (cache, _) = shared_with_clock();
        cache.set(generate_key("getProducts", None), json!([]), None).await;
        cache.set(generate_key("getUsers", None), json!([]), None).await;

        assert_eq!(cache.invalidate(Namespace::Products).await, 1);
        assert_eq!(cache.clear().await, 1);

        let stats = cache.stats().await;
        assert_eq!(stats.invalidations, 2);
        assert_eq!(stats.total_entries, 0);
    }
}
