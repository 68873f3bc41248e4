#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! ## Choosing a Cache
//!
//! | Type | Budget | Locking | Best Use Case |
//! |------|--------|---------|---------------|
//! | [`LruCache`] | entries, bytes or custom units | one `Mutex` | Typed keys and values, strict global recency |
//! | [`ByteCache`] | key + value bytes | `RwLock` per shard | Byte blobs under heavy concurrent traffic |
//! | [`MeteredCache`] | inherited | inherited | Observing any of the above |
//!
//! ## Performance Characteristics
//!
//! | Type | Get | Put | Remove | Flush |
//! |------|-----|-----|--------|-------|
//! | `LruCache` | O(1) | O(1) amortized | O(1) | O(n) |
//! | `ByteCache` | O(1) + value copy | O(1) amortized + copy | O(1) | O(n), shard by shard |
//!
//! ## Code Examples
//!
//! ### Eviction Callback
//!
//! ```rust
//! use recency_cache::LruCache;
//! use std::sync::{Arc, Mutex};
//!
//! let evicted = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&evicted);
//! let cache = LruCache::with_on_evict(2, move |key, _value| sink.lock().unwrap().push(key));
//!
//! cache.put("x", 1);
//! cache.put("y", 2);
//! cache.put("z", 3);
//! cache.remove(&"y"); // explicit removal: no callback
//!
//! assert_eq!(*evicted.lock().unwrap(), vec!["x"]);
//! ```
//!
//! ### Custom Size Policy
//!
//! ```rust
//! use recency_cache::LruCache;
//!
//! // Budget of 100 units, each entry weighs its value's length.
//! let cache = LruCache::with_size_policy(100, |_: &u32, v: &String| v.len() as u64);
//! cache.put(1, "x".repeat(60));
//! cache.put(2, "y".repeat(60));
//! assert_eq!(cache.len(), 1);
//! assert_eq!(cache.current_size(), 60);
//! ```
//!
//! ### Generic Over the Capability
//!
//! ```rust
//! use recency_cache::{ByteCache, Cacher, MeteredCache};
//!
//! fn remember<C: Cacher<Vec<u8>, Vec<u8>>>(cache: &C, key: &str, value: &str) {
//!     cache.put(key.as_bytes().to_vec(), value.as_bytes().to_vec());
//! }
//!
//! let cache = MeteredCache::new("blobs", ByteCache::new(1 << 20)).unwrap();
//! remember(&cache, "k", "v");
//! assert_eq!(cache.inner().len(), 1);
//! ```

#[cfg(test)]
extern crate scoped_threadpool;

/// Capability contract shared by every cache.
pub mod cacher;

/// Cache entry type.
///
/// Holds the key, the value and the size charged against the budget.
pub mod entry;

/// Arena-backed doubly linked recency list.
///
/// **Note**: This module is internal infrastructure. Nodes are addressed by
/// stable slot handles that are only meaningful to the list that issued them.
pub(crate) mod list;

/// Size policies deciding how much budget an entry consumes.
pub mod size;

/// Cache configuration structures.
pub mod config;

/// Least Recently Used (LRU) store implementation.
///
/// Provides a capacity-bounded store that evicts the least recently used
/// entries when its budget is exceeded.
pub mod lru;

/// Sharded cache implementations.
///
/// Provides the byte cache, which partitions the keyspace across shards, each
/// protected by its own lock.
pub mod concurrent;

/// Cache metrics system and the metered decorator.
pub mod metrics;

/// Error types.
pub mod error;

pub use cacher::Cacher;
pub use concurrent::{ByteCache, Stats};
pub use entry::CacheEntry;
pub use error::{CacheError, Result};
pub use lru::{EvictionCallback, LruCache};
pub use metrics::{CacheMetrics, MeteredCache};
pub use size::{ByteSize, EntryCount, SizePolicy};
