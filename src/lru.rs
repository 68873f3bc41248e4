//! Least Recently Used (LRU) Store Implementation
//!
//! This module provides the recency-ordered, capacity-bounded store every other
//! cache in the crate is built from. It has O(1) insert, lookup and eviction,
//! and enforces either an entry-count budget or a byte-size budget depending
//! on its [`SizePolicy`].
//!
//! # Algorithm
//!
//! Entries live in a recency list, most recently used at the front. A lookup
//! or an update moves the entry to the front, so the back is always the entry
//! that was touched longest ago. When an insert would push usage over the
//! budget, entries are removed from the back until it fits.
//!
//! ```text
//!   put(d), budget 3
//!
//!   front                 back          front                 back
//!   ┌───┐   ┌───┐   ┌───┐               ┌───┐   ┌───┐   ┌───┐
//!   │ a │──▶│ c │──▶│ b │      ──▶      │ d │──▶│ a │──▶│ c │     b evicted
//!   └───┘   └───┘   └───┘               └───┘   └───┘   └───┘
//! ```
//!
//! There are no timestamps: the order of operations is the clock.
//!
//! # Capacity Rules
//!
//! - The budget is at least 1; a configured 0 becomes 1.
//! - An entry whose size exceeds the whole budget is dropped and the store is
//!   left untouched.
//! - Replacing a value charges the new size; if that overflows the budget,
//!   older entries are evicted, never the one just written.
//! - Explicit removal and [`clear`](LruCache::clear) never run the eviction
//!   callback. It runs only for capacity-triggered removals.
//!
//! # Performance Characteristics
//!
//! - Get / Put / Remove: O(1) amortized
//! - Space: one arena node per entry plus one hash map slot; the key is stored
//!   twice (map and node)
//!
//! # Thread Safety
//!
//! [`LruCache`] wraps its state in a `parking_lot::Mutex` and every operation,
//! including `get`, takes it exclusively because lookups reorder the list.
//! For less contention, use the sharded [`ByteCache`](crate::ByteCache).

use crate::cacher::Cacher;
use crate::config::LruCacheConfig;
use crate::entry::CacheEntry;
use crate::list::{List, Slot};
use crate::metrics::CacheMetrics;
use crate::size::{EntryCount, SizePolicy};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use tracing::trace;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Callback run with the key and value of every entry removed to make room.
///
/// It runs while the store's lock is held and must not call back into the
/// same store.
pub type EvictionCallback<K, V> = Box<dyn FnMut(K, V) + Send + Sync>;

/// Unsynchronized LRU state shared by [`LruCache`] and the shards of
/// [`ByteCache`](crate::ByteCache). All algorithm logic lives here.
pub(crate) struct LruSegment<K, V, P = EntryCount, S = DefaultHashBuilder> {
    list: List<CacheEntry<K, V>>,
    map: HashMap<K, Slot, S>,
    max_size: u64,
    current_size: u64,
    evictions: u64,
    policy: P,
    on_evict: Option<EvictionCallback<K, V>>,
}

impl<K, V, P, S> LruSegment<K, V, P, S>
where
    K: Hash + Eq,
    P: SizePolicy<K, V>,
    S: BuildHasher,
{
    pub(crate) fn with_hasher(
        max_size: u64,
        policy: P,
        on_evict: Option<EvictionCallback<K, V>>,
        hash_builder: S,
    ) -> Self {
        LruSegment {
            list: List::new(),
            map: HashMap::with_hasher(hash_builder),
            max_size: max_size.max(1),
            current_size: 0,
            evictions: 0,
            policy,
            on_evict,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    #[inline]
    pub(crate) fn max_size(&self) -> u64 {
        self.max_size
    }

    #[inline]
    pub(crate) fn current_size(&self) -> u64 {
        self.current_size
    }

    #[inline]
    pub(crate) fn evictions(&self) -> u64 {
        self.evictions
    }

    pub(crate) fn portion_filled(&self) -> f64 {
        if self.max_size == 0 {
            return 0.0;
        }
        self.current_size as f64 / self.max_size as f64
    }

    pub(crate) fn put(&mut self, key: K, value: V)
    where
        K: Clone,
    {
        let size = self.policy.size_of(&key, &value).max(1);
        if size > self.max_size {
            trace!(size, max_size = self.max_size, "dropping oversized entry");
            return;
        }

        // An update is unlinked first so it is never the entry evicted to
        // make room for its own new size.
        if let Some(slot) = self.map.remove(&key) {
            if let Some(old) = self.list.remove(slot) {
                self.current_size -= old.size;
            }
        }

        self.evict_until_fits(size);
        let slot = self.list.push_front(CacheEntry::new(key.clone(), value, size));
        self.map.insert(key, slot);
        self.current_size += size;
    }

    pub(crate) fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = self.map.get(key).copied()?;
        self.list.move_to_front(slot);
        self.list.get(slot).map(|entry| &entry.value)
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(key)
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let slot = self.map.remove(key)?;
        let entry = self.list.remove(slot)?;
        self.current_size -= entry.size;
        Some(entry.value)
    }

    pub(crate) fn clear(&mut self) {
        self.map.clear();
        self.list.clear();
        self.current_size = 0;
    }

    /// Iterates entries from most to least recently used.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &CacheEntry<K, V>> + '_ {
        self.list.iter()
    }

    fn evict_until_fits(&mut self, incoming: u64) {
        // current_size <= max_size and incoming <= max_size hold here.
        while incoming > self.max_size - self.current_size {
            let Some(entry) = self.list.remove_last() else {
                break;
            };
            self.map.remove(&entry.key);
            self.current_size -= entry.size;
            self.evictions += 1;
            trace!(size = entry.size, "evicted least recently used entry");
            if let Some(on_evict) = self.on_evict.as_mut() {
                on_evict(entry.key, entry.value);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.map.len(), self.list.len(), "map and list disagree");
        let mut total = 0;
        for entry in self.list.iter() {
            let slot = self.map.get(&entry.key).copied();
            assert!(slot.is_some(), "listed key missing from map");
            total += entry.size;
        }
        assert_eq!(total, self.current_size, "usage does not match entries");
        assert!(self.current_size <= self.max_size, "usage over budget");
        if let Some(front) = self.list.front() {
            assert!(self.list.get(front).is_some());
        }
    }
}

impl<K, V, P, S> fmt::Debug for LruSegment<K, V, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruSegment")
            .field("max_size", &self.max_size)
            .field("current_size", &self.current_size)
            .field("len", &self.list.len())
            .finish()
    }
}

/// A thread-safe, capacity-bounded LRU store.
///
/// The budget unit comes from the size policy `P`: entries with the default
/// [`EntryCount`], bytes with [`ByteSize`](crate::size::ByteSize), or anything
/// a closure computes. When a `put` would exceed the budget, the least recently
/// used entries are removed, and each removal is reported to the eviction
/// callback if one was configured.
///
/// # Examples
///
/// ```
/// use recency_cache::LruCache;
///
/// let cache = LruCache::new(2);
///
/// cache.put("apple", 1);
/// cache.put("banana", 2);
///
/// // Accessing items updates their recency
/// assert_eq!(cache.get(&"apple"), Some(1));
///
/// // Adding beyond capacity evicts the least recently used item
/// cache.put("cherry", 3);
/// assert_eq!(cache.get(&"banana"), None);
/// assert_eq!(cache.get(&"apple"), Some(1));
/// assert_eq!(cache.get(&"cherry"), Some(3));
/// ```
///
/// Byte-bounded with an eviction callback:
///
/// ```
/// use recency_cache::config::LruCacheConfig;
/// use recency_cache::size::ByteSize;
/// use recency_cache::LruCache;
/// use std::sync::mpsc;
///
/// let (tx, rx) = mpsc::channel();
/// let cache: LruCache<String, String, ByteSize> = LruCache::init(
///     LruCacheConfig::new(10),
///     ByteSize,
///     Some(Box::new(move |key: String, _value: String| {
///         tx.send(key).unwrap()
///     })),
/// );
///
/// cache.put("a".to_string(), "1234".to_string()); // 5 bytes
/// cache.put("b".to_string(), "1234".to_string()); // 10 bytes
/// cache.put("c".to_string(), "12".to_string());   // needs 3, evicts "a"
///
/// assert_eq!(rx.try_recv(), Ok("a".to_string()));
/// assert_eq!(cache.current_size(), 8);
/// ```
pub struct LruCache<K, V, P = EntryCount, S = DefaultHashBuilder> {
    segment: Mutex<LruSegment<K, V, P, S>>,
}

impl<K: Hash + Eq, V> LruCache<K, V> {
    /// Creates an entry-count bounded store holding at most `capacity` entries.
    pub fn new(capacity: u64) -> Self {
        Self::from_config(LruCacheConfig::new(capacity))
    }

    /// Creates an entry-count bounded store from a configuration.
    pub fn from_config(config: LruCacheConfig) -> Self {
        Self::init(config, EntryCount, None)
    }

    /// Creates an entry-count bounded store that reports capacity evictions
    /// to `on_evict`.
    pub fn with_on_evict<F>(capacity: u64, on_evict: F) -> Self
    where
        F: FnMut(K, V) + Send + Sync + 'static,
    {
        Self::init(
            LruCacheConfig::new(capacity),
            EntryCount,
            Some(Box::new(on_evict)),
        )
    }
}

impl<K, V, P> LruCache<K, V, P>
where
    K: Hash + Eq,
    P: SizePolicy<K, V>,
{
    /// Creates a store whose budget is `max_size` units of `policy`.
    pub fn with_size_policy(max_size: u64, policy: P) -> Self {
        Self::init(LruCacheConfig::new(max_size), policy, None)
    }

    /// Creates a store from a configuration, size policy and optional
    /// eviction callback.
    pub fn init(
        config: LruCacheConfig,
        policy: P,
        on_evict: Option<EvictionCallback<K, V>>,
    ) -> Self {
        Self::init_with_hasher(config, policy, on_evict, DefaultHashBuilder::default())
    }
}

impl<K, V, P, S> LruCache<K, V, P, S>
where
    K: Hash + Eq,
    P: SizePolicy<K, V>,
    S: BuildHasher,
{
    /// Creates a store with a custom hash builder for its key map.
    pub fn init_with_hasher(
        config: LruCacheConfig,
        policy: P,
        on_evict: Option<EvictionCallback<K, V>>,
        hash_builder: S,
    ) -> Self {
        Self {
            segment: Mutex::new(LruSegment::with_hasher(
                config.normalized_capacity(),
                policy,
                on_evict,
                hash_builder,
            )),
        }
    }

    /// Returns the budget, in size-policy units.
    pub fn capacity(&self) -> u64 {
        self.segment.lock().max_size()
    }

    /// Returns the combined size of all live entries.
    pub fn current_size(&self) -> u64 {
        self.segment.lock().current_size()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.segment.lock().len()
    }

    /// Returns `true` if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.segment.lock().is_empty()
    }

    /// Returns `current_size / capacity`.
    pub fn portion_filled(&self) -> f64 {
        self.segment.lock().portion_filled()
    }

    /// Returns how many entries were removed to make room since creation.
    pub fn evictions(&self) -> u64 {
        self.segment.lock().evictions()
    }

    /// Inserts or replaces `key` and marks it most recently used.
    ///
    /// Entries larger than the whole budget are silently dropped.
    pub fn put(&self, key: K, value: V)
    where
        K: Clone,
    {
        self.segment.lock().put(key, value)
    }

    /// Returns a clone of the value for `key`, marking it most recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: Clone,
    {
        self.segment.lock().get(key).cloned()
    }

    /// Applies `f` to the value for `key` while holding the lock, marking it
    /// most recently used. Avoids cloning the value.
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&V) -> R,
    {
        self.segment.lock().get(key).map(f)
    }

    /// Checks whether `key` is present without changing its recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().contains_key(key)
    }

    /// Removes `key` and returns its value. The eviction callback is not run.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.segment.lock().remove(key)
    }

    /// Removes every entry. The eviction callback is not run.
    pub fn clear(&self) {
        self.segment.lock().clear()
    }

    /// Returns the keys from most to least recently used.
    pub fn keys(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.segment
            .lock()
            .iter()
            .map(|entry| entry.key.clone())
            .collect()
    }
}

impl<K, V, P, S> Cacher<K, V> for LruCache<K, V, P, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    P: SizePolicy<K, V>,
    S: BuildHasher,
{
    fn put(&self, key: K, value: V) {
        self.segment.lock().put(key, value)
    }

    fn get(&self, key: &K) -> Option<V> {
        self.segment.lock().get(key).cloned()
    }

    fn evict(&self, key: &K) {
        self.segment.lock().remove(key);
    }

    fn flush(&self) {
        self.segment.lock().clear()
    }

    fn len(&self) -> usize {
        self.segment.lock().len()
    }

    fn portion_filled(&self) -> f64 {
        self.segment.lock().portion_filled()
    }
}

impl<K, V, P, S> CacheMetrics for LruCache<K, V, P, S>
where
    K: Hash + Eq,
    P: SizePolicy<K, V>,
    S: BuildHasher,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        let segment = self.segment.lock();
        let mut metrics = BTreeMap::new();
        metrics.insert("cache_size".to_string(), segment.current_size() as f64);
        metrics.insert("cache_utilization".to_string(), segment.portion_filled());
        metrics.insert("evictions".to_string(), segment.evictions() as f64);
        metrics.insert("len".to_string(), segment.len() as f64);
        metrics.insert("max_cache_size".to_string(), segment.max_size() as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "LRU"
    }
}

impl<K, V, P, S> fmt::Debug for LruCache<K, V, P, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("segment", &*self.segment.lock())
            .finish()
    }
}
