//! Bounded memoization of query results.
//!
//! Results are keyed by the full statement (SQL text plus rendered
//! parameters) and held in an LRU map: entries are never invalidated, only
//! evicted by capacity pressure. Alongside the settled entries the cache
//! tracks one in-flight slot per key so concurrent misses collapse onto a
//! single store execution.

use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use tokio::sync::OnceCell;

use crate::db::statement::StatementKey;
use crate::db::table::ResultTable;

/// Shared single-flight slot for one uncached key.
pub(crate) type FlightSlot = Arc<OnceCell<Arc<ResultTable>>>;

pub struct QueryCache {
    entries: Mutex<LruCache<StatementKey, Arc<ResultTable>>>,
    in_flight: Mutex<HashMap<StatementKey, FlightSlot>>,
    capacity: usize,
}

impl QueryCache {
    /// Create a cache holding at most `max_entries` settled results.
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries.max(1)).unwrap();
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            in_flight: Mutex::new(HashMap::new()),
            capacity: capacity.get(),
        }
    }

    /// Look up a settled result, refreshing its recency.
    pub fn get(&self, key: &StatementKey) -> Option<Arc<ResultTable>> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    /// Settle a result, possibly evicting the least recently used entry.
    pub fn insert(&self, key: StatementKey, table: Arc<ResultTable>) {
        self.entries.lock().unwrap().put(key, table);
    }

    /// (entries used, capacity)
    pub fn stats(&self) -> (usize, usize) {
        (self.entries.lock().unwrap().len(), self.capacity)
    }

    /// The single-flight slot for `key`, creating it if this is the first
    /// concurrent miss.
    pub(crate) fn flight_slot(&self, key: &StatementKey) -> FlightSlot {
        self.in_flight
            .lock()
            .unwrap()
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    /// Retire a flight slot once its execution settled or failed. Only the
    /// exact slot is removed, so a newer attempt under the same key survives.
    pub(crate) fn clear_flight_slot(&self, key: &StatementKey, slot: &FlightSlot) {
        let mut in_flight = self.in_flight.lock().unwrap();
        if let Some(current) = in_flight.get(key) {
            if Arc::ptr_eq(current, slot) {
                in_flight.remove(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Statement;

    fn table(name: &str) -> Arc<ResultTable> {
        Arc::new(
            ResultTable::try_new(
                vec!["name".to_string()],
                vec![vec![crate::db::SqlValue::Text(name.to_string())]],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_insert_then_get() {
        let cache = QueryCache::new(4);
        let key = Statement::new("SELECT 1").key();

        assert!(cache.get(&key).is_none());
        cache.insert(key.clone(), table("Celtics"));
        assert!(cache.get(&key).is_some());
        assert_eq!(cache.stats(), (1, 4));
    }

    #[test]
    fn test_capacity_evicts_least_recent() {
        let cache = QueryCache::new(2);
        let k1 = Statement::new("SELECT 1").key();
        let k2 = Statement::new("SELECT 2").key();
        let k3 = Statement::new("SELECT 3").key();

        cache.insert(k1.clone(), table("a"));
        cache.insert(k2.clone(), table("b"));
        // Touch k1 so k2 is the eviction candidate
        assert!(cache.get(&k1).is_some());
        cache.insert(k3.clone(), table("c"));

        assert!(cache.get(&k1).is_some());
        assert!(cache.get(&k2).is_none());
        assert!(cache.get(&k3).is_some());
    }

    #[test]
    fn test_zero_capacity_clamps_to_one() {
        let cache = QueryCache::new(0);
        assert_eq!(cache.stats(), (0, 1));
    }

    #[test]
    fn test_flight_slot_reuse_and_retire() {
        let cache = QueryCache::new(4);
        let key = Statement::new("SELECT 1").key();

        let first = cache.flight_slot(&key);
        let second = cache.flight_slot(&key);
        assert!(Arc::ptr_eq(&first, &second));

        cache.clear_flight_slot(&key, &first);
        let third = cache.flight_slot(&key);
        assert!(!Arc::ptr_eq(&first, &third));

        // Retiring a stale slot does not disturb the newer one
        cache.clear_flight_slot(&key, &first);
        let fourth = cache.flight_slot(&key);
        assert!(Arc::ptr_eq(&third, &fourth));
    }
}
