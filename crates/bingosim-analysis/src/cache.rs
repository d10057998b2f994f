use std::{
    collections::{HashMap, VecDeque},
    hash::Hash,
    time::{Duration, Instant},
};

/// Limits applied to a [`MemoCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries. `0` disables caching.
    pub capacity: usize,
    /// Entries older than this are treated as absent. `None` keeps them until evicted.
    pub ttl: Option<Duration>,
}

impl CacheConfig {
    pub const DEFAULT_CAPACITY: usize = 10_000;
    pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
            ttl: Some(Self::DEFAULT_TTL),
        }
    }
}

/// Lookup counters of a [`MemoCache`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Entries dropped to stay within capacity.
    pub evictions: u64,
    /// Entries dropped because their TTL ran out.
    pub expirations: u64,
}

#[derive(Debug)]
struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Bounded result cache with insertion-order eviction and an optional TTL.
///
/// When full, the entry inserted longest ago is dropped first. Lookups do
/// not refresh an entry's position. Re-inserting an existing key replaces
/// its value and moves it to the back.
///
/// # Example
///
/// ```
/// use bingosim_analysis::cache::{CacheConfig, MemoCache};
///
/// let mut cache = MemoCache::new(CacheConfig { capacity: 2, ttl: None });
/// assert_eq!(cache.get_or_insert_with("a", || 1), 1);
/// assert_eq!(cache.get_or_insert_with("a", || 2), 1);
/// cache.insert("b", 2);
/// cache.insert("c", 3);
/// assert_eq!(cache.get(&"a"), None);
/// assert_eq!(cache.stats().evictions, 1);
/// ```
#[derive(Debug)]
pub struct MemoCache<K, V> {
    config: CacheConfig,
    entries: HashMap<K, Entry<V>>,
    order: VecDeque<K>,
    stats: CacheStats,
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    #[must_use]
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            order: VecDeque::new(),
            stats: CacheStats::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> CacheConfig {
        self.config
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns a clone of the value cached for `key`, dropping it first if it has expired.
    pub fn get(&mut self, key: &K) -> Option<V> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.misses += 1;
                return None;
            }
            Some(entry) => self.is_expired(entry),
        };
        if expired {
            self.remove(key);
            self.stats.expirations += 1;
            self.stats.misses += 1;
            return None;
        }
        self.stats.hits += 1;
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    /// Stores `value` under `key`, evicting the oldest entries if over capacity.
    pub fn insert(&mut self, key: K, value: V) {
        if self.config.capacity == 0 {
            return;
        }
        if self.entries.contains_key(&key) {
            self.order.retain(|k| k != &key);
        }
        self.order.push_back(key.clone());
        self.entries.insert(
            key,
            Entry {
                value,
                inserted_at: Instant::now(),
            },
        );
        while self.entries.len() > self.config.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
            self.stats.evictions += 1;
        }
    }

    /// Returns the cached value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with<F>(&mut self, key: K, f: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = f();
        self.insert(key, value.clone());
        value
    }

    /// Drops every entry. Counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn is_expired(&self, entry: &Entry<V>) -> bool {
        self.config
            .ttl
            .is_some_and(|ttl| entry.inserted_at.elapsed() >= ttl)
    }

    fn remove(&mut self, key: &K) {
        if self.entries.remove(key).is_some() {
            self.order.retain(|k| k != key);
        }
    }
}
