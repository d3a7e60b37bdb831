//! Content-hash keyed parse cache with oldest-first eviction

use crate::syntax::Dialect;
use crate::types::{CacheStats, ParseResult};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;
use twox_hash::XxHash3_128;

/// Cache key: content hash plus the grammar it was parsed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct CacheKey {
    hash: u128,
    dialect: Dialect,
}

impl CacheKey {
    pub fn new(content: &str, dialect: Dialect) -> Self {
        Self {
            hash: XxHash3_128::oneshot(content.as_bytes()),
            dialect,
        }
    }
}

#[derive(Debug, Default)]
struct Entries {
    values: HashMap<CacheKey, Arc<ParseResult>>,
    /// Insertion order, oldest first
    order: VecDeque<CacheKey>,
}

/// Bounded parse cache
///
/// Hits hand back the same `Arc` that was stored. Two concurrent misses on the
/// same key both parse; the later insert wins.
#[derive(Debug)]
pub(crate) struct ParseCache {
    capacity: usize,
    entries: Mutex<Entries>,
}

impl ParseCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(Entries::default()),
        }
    }

    pub fn get(&self, key: &CacheKey) -> Option<Arc<ParseResult>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.values.get(key).cloned()
    }

    pub fn insert(&self, key: CacheKey, value: Arc<ParseResult>) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = entries.values.get_mut(&key) {
            *existing = value;
            return;
        }

        while entries.order.len() >= self.capacity {
            let Some(oldest) = entries.order.pop_front() else {
                break;
            };
            entries.values.remove(&oldest);
            debug!(capacity = self.capacity, "Evicted oldest parse result");
        }

        entries.order.push_back(key);
        entries.values.insert(key, value);
    }

    pub fn clear(&self) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.values.clear();
        entries.order.clear();
    }

    pub fn stats(&self) -> CacheStats {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        CacheStats {
            entries: entries.values.len(),
            capacity: self.capacity,
        }
    }

    #[cfg(test)]
    fn contains(&self, key: &CacheKey) -> bool {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.values.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(content: &str) -> CacheKey {
        CacheKey::new(content, Dialect::TypeScript)
    }

    #[test]
    fn test_hit_returns_same_arc() {
        let cache = ParseCache::new(2);
        let value = Arc::new(ParseResult::default());
        cache.insert(key("a"), Arc::clone(&value));

        let hit = cache.get(&key("a")).expect("cached");
        assert!(Arc::ptr_eq(&hit, &value));
        assert!(cache.get(&key("b")).is_none());
    }

    #[test]
    fn test_evicts_exactly_the_oldest() {
        let cache = ParseCache::new(3);
        for content in ["a", "b", "c", "d"] {
            cache.insert(key(content), Arc::new(ParseResult::default()));
            assert!(cache.stats().entries <= 3);
        }

        assert!(!cache.contains(&key("a")));
        assert!(cache.contains(&key("b")));
        assert!(cache.contains(&key("c")));
        assert!(cache.contains(&key("d")));
    }

    #[test]
    fn test_reinsert_does_not_evict() {
        let cache = ParseCache::new(2);
        cache.insert(key("a"), Arc::new(ParseResult::default()));
        cache.insert(key("b"), Arc::new(ParseResult::default()));
        cache.insert(key("a"), Arc::new(ParseResult::default()));

        assert!(cache.contains(&key("a")));
        assert!(cache.contains(&key("b")));
        assert_eq!(cache.stats().entries, 2);
    }

    #[test]
    fn test_dialect_is_part_of_key() {
        assert_ne!(
            CacheKey::new("x", Dialect::TypeScript),
            CacheKey::new("x", Dialect::Tsx)
        );
    }

    #[test]
    fn test_clear() {
        let cache = ParseCache::new(2);
        cache.insert(key("a"), Arc::new(ParseResult::default()));
        cache.clear();
        assert_eq!(
            cache.stats(),
            CacheStats {
                entries: 0,
                capacity: 2
            }
        );
    }
}
