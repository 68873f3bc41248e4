//! Sharded Byte Cache Implementation
//!
//! A thread-safe cache for byte keys and byte values, bounded by the total
//! number of key + value bytes it holds. The keyspace is split across a fixed
//! set of shards, each an independent LRU store behind its own lock.
//!
//! # How It Works
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │                            ByteCache                                 │
//! │                                                                      │
//! │  xor(key bytes) & (N - 1)  ──▶  Shard Selection                      │
//! │                                                                      │
//! │  ┌──────────────┐ ┌──────────────┐     ┌──────────────┐              │
//! │  │   Shard 0    │ │   Shard 1    │ ... │  Shard N-1   │              │
//! │  │  ┌────────┐  │ │  ┌────────┐  │     │  ┌────────┐  │              │
//! │  │  │ RwLock │  │ │  │ RwLock │  │     │  │ RwLock │  │              │
//! │  │  └────┬───┘  │ │  └────┬───┘  │     │  └────┬───┘  │              │
//! │  │  ┌────▼───┐  │ │  ┌────▼───┐  │     │  ┌────▼───┐  │              │
//! │  │  │  LRU   │  │ │  │  LRU   │  │     │  │  LRU   │  │              │
//! │  │  └────────┘  │ │  └────────┘  │     │  └────────┘  │              │
//! │  └──────────────┘ └──────────────┘     └──────────────┘              │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The shard of a key is the XOR of all its bytes, masked to the shard count.
//! The same key always lands in the same shard. Each shard gets an equal share
//! of the byte budget and evicts on its own, so a skewed key distribution can
//! make one shard evict while others still have room.
//!
//! ## Locking
//!
//! Shards use `parking_lot::RwLock`. `has` and the read-only scans behind
//! `len`, `current_size` and the stats take the shared lock. Every other
//! operation promotes or mutates the entry and takes the exclusive lock.
//! Cross-shard operations lock one shard at a time and are not atomic.
//!
//! ## Copy Semantics
//!
//! `set` copies the key and value into buffers owned by the cache. `get`
//! copies the stored value into a caller-supplied buffer, so the caller can
//! reuse one allocation across many lookups. Stored bytes are never aliased.
//!
//! # Example
//!
//! ```
//! use recency_cache::ByteCache;
//!
//! let cache = ByteCache::new(32 * 1024 * 1024);
//! cache.set(b"user:42", b"alice");
//!
//! let buf = cache.get(Vec::new(), b"user:42");
//! assert_eq!(buf, b"alice");
//!
//! // Reuse the buffer; a miss leaves it empty.
//! let buf = cache.get(buf, b"user:43");
//! assert!(buf.is_empty());
//!
//! let stats = cache.stats();
//! assert_eq!(stats.set_calls, 1);
//! assert_eq!(stats.get_calls, 2);
//! assert_eq!(stats.misses, 1);
//! ```

use super::stats::{Stats, StatsCounters};
use crate::cacher::Cacher;
use crate::config::ByteCacheConfig;
use crate::error::Result;
use crate::lru::LruSegment;
use crate::metrics::CacheMetrics;
use crate::size::ByteSize;
use core::fmt;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

type Shard = LruSegment<Vec<u8>, Vec<u8>, ByteSize>;

/// Folds `key` into one byte by XOR and masks it to a shard index.
///
/// `mask` must be the shard count minus one, with a power-of-two count.
#[inline]
pub(crate) fn shard_index(key: &[u8], mask: usize) -> usize {
    key.iter().fold(0u8, |hash, byte| hash ^ byte) as usize & mask
}

/// A sharded, byte-bounded LRU cache for byte keys and values.
///
/// Entries are charged `key.len() + value.len()` bytes against the budget of
/// the shard they hash to. An entry larger than a shard's budget is dropped.
/// See the [module documentation](self) for the sharding scheme.
pub struct ByteCache {
    shards: Box<[RwLock<Shard>]>,
    mask: usize,
    shard_capacity: u64,
    counters: StatsCounters,
}

impl ByteCache {
    /// Creates a cache holding up to `max_bytes` of keys and values across
    /// the default number of shards.
    pub fn new(max_bytes: u64) -> Self {
        Self::init(ByteCacheConfig::new(max_bytes))
    }

    /// Creates a cache from a configuration.
    ///
    /// The shard count is rounded up to a power of two within `[1, 256]` and
    /// each shard gets `max_bytes / shards` bytes, at least 1.
    pub fn init(config: ByteCacheConfig) -> Self {
        let shard_count = config.normalized_shards();
        let shard_capacity = config.shard_capacity();

        let shards: Vec<_> = (0..shard_count)
            .map(|_| {
                RwLock::new(LruSegment::with_hasher(
                    shard_capacity,
                    ByteSize,
                    None,
                    DefaultHashBuilder::default(),
                ))
            })
            .collect();

        debug!(
            max_bytes = config.max_bytes,
            shards = shard_count,
            shard_capacity,
            "created byte cache"
        );

        Self {
            shards: shards.into_boxed_slice(),
            mask: shard_count - 1,
            shard_capacity,
            counters: StatsCounters::default(),
        }
    }

    #[inline]
    fn shard(&self, key: &[u8]) -> &RwLock<Shard> {
        &self.shards[shard_index(key, self.mask)]
    }

    /// Returns the number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Returns the byte budget of each shard.
    pub fn shard_capacity(&self) -> u64 {
        self.shard_capacity
    }

    /// Returns the total byte budget actually enforced, the per-shard budget
    /// times the shard count.
    pub fn max_bytes(&self) -> u64 {
        self.shard_capacity * self.shards.len() as u64
    }

    /// Returns the number of entries across all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.read().len()).sum()
    }

    /// Returns `true` if no shard holds an entry.
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.read().is_empty())
    }

    /// Returns the bytes charged for all live entries.
    pub fn current_size(&self) -> u64 {
        self.shards.iter().map(|shard| shard.read().current_size()).sum()
    }

    /// Returns `current_size / max_bytes`.
    pub fn portion_filled(&self) -> f64 {
        self.current_size() as f64 / self.max_bytes() as f64
    }

    /// Stores a copy of `value` under a copy of `key`.
    pub fn set(&self, key: &[u8], value: &[u8]) {
        self.counters.record_set();
        self.shard(key).write().put(key.to_vec(), value.to_vec());
    }

    /// Same as [`set`](Self::set).
    pub fn set_big(&self, key: &[u8], value: &[u8]) {
        self.set(key, value)
    }

    /// Copies the value stored under `key` into `dst` and returns it.
    ///
    /// `dst` is cleared first, so on a miss it comes back empty. Its
    /// allocation is reused.
    pub fn get(&self, dst: Vec<u8>, key: &[u8]) -> Vec<u8> {
        self.has_get(dst, key).0
    }

    /// Same as [`get`](Self::get).
    pub fn get_big(&self, dst: Vec<u8>, key: &[u8]) -> Vec<u8> {
        self.get(dst, key)
    }

    /// Like [`get`](Self::get), but also reports whether `key` was present,
    /// which distinguishes a miss from a stored empty value.
    pub fn has_get(&self, mut dst: Vec<u8>, key: &[u8]) -> (Vec<u8>, bool) {
        dst.clear();
        let found = match self.shard(key).write().get(key) {
            Some(value) => {
                dst.extend_from_slice(value);
                true
            }
            None => false,
        };
        self.counters.record_get(found);
        (dst, found)
    }

    /// Checks whether `key` is present. Does not promote it and is not counted
    /// in the stats.
    pub fn has(&self, key: &[u8]) -> bool {
        self.shard(key).read().contains_key(key)
    }

    /// Removes `key` if present.
    pub fn del(&self, key: &[u8]) {
        self.shard(key).write().remove(key);
    }

    /// Removes every entry, one shard at a time.
    pub fn reset(&self) {
        for shard in self.shards.iter() {
            shard.write().clear();
        }
        debug!(shards = self.shards.len(), "reset byte cache");
    }

    /// Writes the current usage and call totals into `stats`.
    ///
    /// Every field is overwritten, so one value can be reused across calls.
    pub fn update_stats(&self, stats: &mut Stats) {
        let (mut entries, mut bytes) = (0u64, 0u64);
        for shard in self.shards.iter() {
            let shard = shard.read();
            entries += shard.len() as u64;
            bytes += shard.current_size();
        }
        stats.entries_count = entries;
        stats.bytes_size = bytes;
        stats.collisions = 0;
        self.counters.write_to(stats);
    }

    /// Returns a fresh stats snapshot.
    pub fn stats(&self) -> Stats {
        let mut stats = Stats::default();
        self.update_stats(&mut stats);
        stats
    }

    /// Accepts a snapshot request. Snapshots are not persisted; the cache is
    /// left untouched and nothing is written.
    pub fn save_to_file_concurrent<P: AsRef<Path>>(
        &self,
        path: P,
        concurrency: usize,
    ) -> Result<()> {
        debug!(
            path = %path.as_ref().display(),
            concurrency,
            "snapshot saving is not supported, skipping"
        );
        Ok(())
    }

    /// Accepts a restore request. Snapshots are not persisted; the cache is
    /// left untouched and nothing is read.
    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        debug!(
            path = %path.as_ref().display(),
            "snapshot loading is not supported, skipping"
        );
        Ok(())
    }
}

impl Default for ByteCache {
    fn default() -> Self {
        Self::init(ByteCacheConfig::default())
    }
}

impl Cacher<Vec<u8>, Vec<u8>> for ByteCache {
    fn put(&self, key: Vec<u8>, value: Vec<u8>) {
        self.counters.record_set();
        self.shard(&key).write().put(key, value);
    }

    fn get(&self, key: &Vec<u8>) -> Option<Vec<u8>> {
        let value = self.shard(key).write().get(key.as_slice()).cloned();
        self.counters.record_get(value.is_some());
        value
    }

    fn evict(&self, key: &Vec<u8>) {
        self.del(key)
    }

    fn flush(&self) {
        self.reset()
    }

    fn len(&self) -> usize {
        ByteCache::len(self)
    }

    fn portion_filled(&self) -> f64 {
        ByteCache::portion_filled(self)
    }
}

impl CacheMetrics for ByteCache {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let stats = self.stats();
        let mut metrics = BTreeMap::new();
        metrics.insert("bytes_size".to_string(), stats.bytes_size as f64);
        metrics.insert("entries_count".to_string(), stats.entries_count as f64);
        metrics.insert("get_calls".to_string(), stats.get_calls as f64);
        metrics.insert("hit_rate".to_string(), stats.hit_rate());
        metrics.insert("max_bytes".to_string(), self.max_bytes() as f64);
        metrics.insert("misses".to_string(), stats.misses as f64);
        metrics.insert(
            "portion_filled".to_string(),
            stats.bytes_size as f64 / self.max_bytes() as f64,
        );
        metrics.insert("set_calls".to_string(), stats.set_calls as f64);
        metrics.insert("shards".to_string(), self.shards.len() as f64);
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "ShardedLRU"
    }
}

impl fmt::Debug for ByteCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteCache")
            .field("shards", &self.shards.len())
            .field("shard_capacity", &self.shard_capacity)
            .field("counters", &self.counters)
            .finish()
    }
}
