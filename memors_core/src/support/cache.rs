//! Capacity bounded memoization of check results
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

use indexmap::IndexMap;

/// Number of models whose pure metabolic reactions are remembered by default
pub const PURE_METABOLIC_CACHE_CAPACITY: usize = 2;

/// Cache of pure metabolic reaction ids, keyed by [`Model::fingerprint`]
///
/// [`Model::fingerprint`]: crate::metabolic_model::model::Model::fingerprint
pub type PureMetabolicCache = LruCache<u64, BTreeSet<String>>;

/// Map holding at most `capacity` entries, evicting the least recently used one when full
///
/// The cache is owned by whoever runs the checks, and is not meant to be shared between
/// threads.
#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    /// Entries ordered from least to most recently used
    entries: IndexMap<K, V>,
    capacity: usize,
}

impl<K: Hash + Eq + Debug, V> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries, a capacity of 0 disables caching
    pub fn new(capacity: usize) -> Self {
        LruCache {
            entries: IndexMap::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check for `key` without marking it as used
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Get the value of `key`, marking it as the most recently used entry
    pub fn get(&mut self, key: &K) -> Option<&V> {
        let index = self.entries.get_index_of(key)?;
        let last = self.entries.len() - 1;
        self.entries.move_index(index, last);
        self.entries.get_index(last).map(|(_, value)| value)
    }

    /// Insert `value` for `key` as the most recently used entry, evicting as needed
    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        self.entries.shift_remove(&key);
        while self.entries.len() >= self.capacity {
            if let Some((evicted, _)) = self.entries.shift_remove_index(0) {
                log::debug!("Evicting {evicted:?} from cache");
            }
        }
        self.entries.insert(key, value);
    }

    /// Get the value of `key`, computing and storing it with `compute` on a miss
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, compute: F) -> V
    where
        V: Clone,
    {
        if let Some(value) = self.get(&key) {
            log::debug!("Cache hit for {key:?}");
            return value.clone();
        }
        log::debug!("Cache miss for {key:?}");
        let value = compute();
        self.insert(key, value.clone());
        value
    }
}

impl<K: Hash + Eq + Debug, V> Default for LruCache<K, V> {
    fn default() -> Self {
        LruCache::new(PURE_METABOLIC_CACHE_CAPACITY)
    }
}
