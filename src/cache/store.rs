//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with insertion-order eviction,
//! lazy TTL expiration and namespace invalidation.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, Clock, InsertionOrder, Namespace, SystemClock};

// == Cache Store ==
/// Process-local cache storage with TTL expiry and capacity eviction.
///
/// Not synchronized on its own; share it through [`crate::cache::SharedCache`].
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Insertion order used for capacity eviction
    order: InsertionOrder,
    /// Activity counters
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
    /// TTL applied when `set` is called without one
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore backed by the system clock.
    ///
    /// # Arguments
    /// * `max_entries` - Maximum number of entries the cache can hold (at least 1)
    /// * `default_ttl` - TTL for entries stored without an explicit one
    pub fn new(max_entries: usize, default_ttl: Duration) -> Self {
        Self::with_clock(max_entries, default_ttl, Arc::new(SystemClock))
    }

    /// Creates a new CacheStore reading time from `clock`.
    pub fn with_clock(max_entries: usize, default_ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_entries: max_entries.max(1),
            default_ttl,
            clock,
        }
    }

    // == Set ==
    /// Stores a value under `key` with an optional TTL.
    ///
    /// Expired entries are swept first. When the key is new and the store is
    /// still at capacity, the oldest-inserted entry is evicted. Overwriting an
    /// existing key resets its timestamp and makes it the newest insertion.
    ///
    /// # Arguments
    /// * `key` - The key to store
    /// * `value` - The value to store
    /// * `ttl` - Optional TTL (uses the default TTL if None)
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl: Option<Duration>) {
        let key = key.into();
        let now = self.clock.now_ms();

        self.sweep_expired_at(now);

        let is_overwrite = self.entries.contains_key(&key);
        if !is_overwrite {
            while self.entries.len() >= self.max_entries {
                let Some(oldest) = self.order.pop_oldest() else {
                    break;
                };
                self.entries.remove(&oldest);
                self.stats.record_eviction();
                debug!(key = %oldest, "Evicted oldest cache entry");
            }
        }

        let ttl_ms = ttl.unwrap_or(self.default_ttl).as_millis() as u64;
        self.entries
            .insert(key.clone(), CacheEntry::new(value, now, ttl_ms));
        self.order.record(&key);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns None if the key is missing or expired. Expired entries are
    /// removed on the way out.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => {
                self.stats.record_hit();
                return Some(entry.value.clone());
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            debug!(key, "Cache entry expired");
        }
        self.stats.record_miss();
        None
    }

    // == Delete ==
    /// Removes an entry by key. Returns true if the key was present.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key)
    }

    // == Clear ==
    /// Removes every entry. Returns the number of entries removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.stats.record_invalidations(removed);
        self.stats.set_total_entries(0);
        removed
    }

    // == Invalidate ==
    /// Removes every entry whose operation name belongs to `namespace`.
    ///
    /// Returns the number of entries removed.
    pub fn invalidate(&mut self, namespace: Namespace) -> usize {
        if namespace == Namespace::All {
            return self.clear();
        }

        let matching: Vec<String> = self
            .entries
            .keys()
            .filter(|key| namespace.matches(key))
            .cloned()
            .collect();

        for key in &matching {
            self.remove_entry(key);
        }

        self.stats.record_invalidations(matching.len());
        matching.len()
    }

    // == Sweep Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.sweep_expired_at(now)
    }

    fn sweep_expired_at(&mut self, now: u64) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        self.stats.record_expirations(expired_keys.len());
        expired_keys.len()
    }

    fn remove_entry(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Returns the keys currently stored, expired or not.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    // == Length ==
    /// Returns the number of physically stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{generate_key, ManualClock};
    use serde_json::json;

    const TTL: Duration = Duration::from_secs(300);

    fn store_with_clock(max_entries: usize) -> (CacheStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_000_000));
        let store = CacheStore::with_clock(max_entries, TTL, clock.clone());
        (store, clock)
    }

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(100, TTL);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.max_entries(), 100);
        assert_eq!(store.default_ttl(), TTL);
    }

    #[test]
    fn test_zero_capacity_is_raised_to_one() {
        let (mut store, _) = store_with_clock(0);
        store.set("a", json!(1), None);
        store.set("b", json!(2), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("b"), Some(json!(2)));
    }

    #[test]
    fn test_store_set_and_get() {
        let (mut store, _) = store_with_clock(100);

        store.set("key1", json!({"name": "Desk Lamp"}), None);

        assert_eq!(store.get("key1"), Some(json!({"name": "Desk Lamp"})));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let (mut store, _) = store_with_clock(100);
        assert_eq!(store.get("nonexistent"), None);
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_delete() {
        let (mut store, _) = store_with_clock(100);

        store.set("key1", json!("value1"), None);
        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_store_overwrite() {
        let (mut store, _) = store_with_clock(100);

        store.set("key1", json!("value1"), None);
        store.set("key1", json!("value2"), None);

        assert_eq!(store.get("key1"), Some(json!("value2")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_overwrite_resets_ttl() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1", json!(1), Some(Duration::from_millis(100)));
        clock.advance(Duration::from_millis(80));
        store.set("key1", json!(2), Some(Duration::from_millis(100)));
        clock.advance(Duration::from_millis(80));

        assert_eq!(store.get("key1"), Some(json!(2)));
    }

    #[test]
    fn test_store_ttl_expiration() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1", json!("value1"), Some(Duration::from_millis(100)));
        assert_eq!(store.get("key1"), Some(json!("value1")));

        clock.advance(Duration::from_millis(150));

        assert_eq!(store.get("key1"), None);
        // Lazily removed on read
        assert_eq!(store.len(), 0);
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_default_ttl_applies() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1", json!(true), None);
        clock.advance(TTL);
        assert_eq!(store.get("key1"), Some(json!(true)));

        clock.advance(Duration::from_millis(1));
        assert_eq!(store.get("key1"), None);
    }

    #[test]
    fn test_expired_entry_lingers_until_touched() {
        let (mut store, clock) = store_with_clock(100);

        store.set("key1", json!(1), Some(Duration::from_millis(10)));
        clock.advance(Duration::from_millis(50));

        assert_eq!(store.len(), 1);
        assert_eq!(store.sweep_expired(), 1);
        assert!(store.is_empty());
    }

    #[test]
    fn test_set_sweeps_expired_entries() {
        let (mut store, clock) = store_with_clock(100);

        store.set("short", json!(1), Some(Duration::from_millis(10)));
        store.set("long", json!(2), Some(Duration::from_secs(60)));
        clock.advance(Duration::from_millis(20));

        store.set("new", json!(3), None);

        assert_eq!(store.len(), 2);
        assert!(store.keys().all(|k| k != "short"));
    }

    #[test]
    fn test_capacity_eviction_is_insertion_order() {
        let (mut store, _) = store_with_clock(3);

        store.set("k1", json!(1), None);
        store.set("k2", json!(2), None);
        store.set("k3", json!(3), None);
        store.set("k4", json!(4), None);

        assert_eq!(store.len(), 3);
        assert_eq!(store.get("k1"), None);
        assert_eq!(store.get("k2"), Some(json!(2)));
        assert_eq!(store.get("k3"), Some(json!(3)));
        assert_eq!(store.get("k4"), Some(json!(4)));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_reads_do_not_affect_eviction_order() {
        let (mut store, _) = store_with_clock(3);

        store.set("k1", json!(1), None);
        store.set("k2", json!(2), None);
        store.set("k3", json!(3), None);

        // Reading k1 does not protect it
        store.get("k1");
        store.set("k4", json!(4), None);

        assert_eq!(store.get("k1"), None);
        assert_eq!(store.get("k2"), Some(json!(2)));
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let (mut store, _) = store_with_clock(2);

        store.set("k1", json!(1), None);
        store.set("k2", json!(2), None);
        store.set("k1", json!(10), None);

        assert_eq!(store.len(), 2);
        assert_eq!(store.stats().evictions, 0);

        // k1 is now the newest insertion, so k2 goes first
        store.set("k3", json!(3), None);
        assert_eq!(store.get("k2"), None);
        assert_eq!(store.get("k1"), Some(json!(10)));
    }

    #[test]
    fn test_expired_entries_free_capacity_before_eviction() {
        let (mut store, clock) = store_with_clock(2);

        store.set("k1", json!(1), None);
        store.set("short", json!(2), Some(Duration::from_millis(10)));
        clock.advance(Duration::from_millis(20));
        store.set("k3", json!(3), None);

        assert_eq!(store.get("k1"), Some(json!(1)));
        assert_eq!(store.get("k3"), Some(json!(3)));
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_invalidate_products_keeps_users() {
        let (mut store, _) = store_with_clock(100);

        let products = generate_key("getProducts", Some(&json!({"page": 1})));
        let product = generate_key("getProductById", Some(&json!({"id": 7})));
        let search = generate_key("searchProducts", Some(&json!({"q": "mug"})));
        let users = generate_key("getUsers", None);

        for key in [&products, &product, &search, &users] {
            store.set(key.as_str(), json!([]), None);
        }

        assert_eq!(store.invalidate(Namespace::Products), 3);
        assert_eq!(store.get(&products), None);
        assert_eq!(store.get(&product), None);
        assert_eq!(store.get(&search), None);
        assert_eq!(store.get(&users), Some(json!([])));
    }

    #[test]
    fn test_invalidate_all() {
        let (mut store, _) = store_with_clock(100);

        store.set(generate_key("getBrands", None), json!(1), None);
        store.set(generate_key("getUsers", None), json!(2), None);
        store.set("custom", json!(3), None);

        assert_eq!(store.invalidate(Namespace::All), 3);
        assert!(store.is_empty());
        assert_eq!(store.stats().invalidations, 3);
    }

    #[test]
    fn test_invalidate_with_no_matches() {
        let (mut store, _) = store_with_clock(100);
        store.set(generate_key("getUsers", None), json!(1), None);

        assert_eq!(store.invalidate(Namespace::Brands), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_clear() {
        let (mut store, _) = store_with_clock(100);
        store.set("a", json!(1), None);
        store.set("b", json!(2), None);

        assert_eq!(store.clear(), 2);
        assert!(store.is_empty());
        assert_eq!(store.get("a"), None);
    }

    #[test]
    fn test_store_stats() {
        let (mut store, _) = store_with_clock(100);

        store.set("key1", json!("value1"), None);
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }
}
