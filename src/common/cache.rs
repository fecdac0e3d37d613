//! In-memory cache for storing key-value pairs.
//!
//! Uses moka's high-performance concurrent cache implementation.

use moka::sync::Cache;

/// Thread-safe unbounded in-memory cache.
///
/// Used for storing translated strings of the active language
/// (`MemCache<String, String>`). Nothing is evicted; entries only go
/// away when the cache is cleared wholesale.
#[derive(Clone)]
pub struct MemCache<K, V> {
    entries: Cache<K, V>,
}

impl<K, V> Default for MemCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemCache<K, V>
where
    K: std::hash::Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Allocate a new [`MemCache`].
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
        }
    }

    /// Insert or replace an entry.
    pub fn set(
        &self,
        key: K,
        value: V,
    ) {
        self.entries.insert(key, value);
    }

    /// Get an entry through key `&K`.
    pub fn get(
        &self,
        key: &K,
    ) -> Option<V> {
        self.entries.get(key)
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.entries.invalidate_all();
        self.entries.run_pending_tasks();
    }

    /// Number of live entries after pending maintenance has run.
    pub fn len(&self) -> u64 {
        self.entries.run_pending_tasks();
        self.entries.entry_count()
    }
}

#[cfg(test)]
mod tests {
    use super::MemCache;

    #[test]
    fn test_set_replaces() {
        let cache = MemCache::new();
        cache.set("a".to_string(), 1);
        cache.set("a".to_string(), 2);
        assert_eq!(cache.get(&"a".to_string()), Some(2));
        assert_eq!(cache.get(&"b".to_string()), None);
    }

    #[test]
    fn test_nothing_evicted() {
        let cache = MemCache::new();
        for i in 0..500 {
            cache.set(i, i.to_string());
        }
        assert_eq!(cache.len(), 500);
        assert_eq!(cache.get(&0).as_deref(), Some("0"));
    }

    #[test]
    fn test_clear() {
        let cache = MemCache::new();
        cache.set(1, "one".to_string());
        cache.set(2, "two".to_string());
        assert_eq!(cache.len(), 2);
        cache.clear();
        assert_eq!(cache.len(), 0);
        assert_eq!(cache.get(&1), None);
    }
}
