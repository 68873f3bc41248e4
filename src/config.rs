//! Cache Configuration Module
//!
//! Configuration structures for the cache implementations. Each config is a
//! plain struct with public fields plus a `new` constructor and `with_*`
//! helpers.
//!
//! # Normalization
//!
//! Configurations are never rejected. Degenerate values are normalized when
//! the cache is built:
//!
//! - a capacity or byte budget of 0 becomes 1
//! - a shard count is rounded up to a power of two and clamped to
//!   `1..=`[`MAX_SHARDS`](byte_cache::MAX_SHARDS)
//!
//! # Configs
//!
//! | Config | Cache | Budget unit |
//! |--------|-------|-------------|
//! | [`LruCacheConfig`] | [`LruCache`](crate::LruCache) | whatever the size policy reports |
//! | [`ByteCacheConfig`] | [`ByteCache`](crate::ByteCache) | key + value bytes, split across shards |
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::{ByteCacheConfig, LruCacheConfig};
//! use recency_cache::{ByteCache, LruCache};
//!
//! let cache: LruCache<String, u32> = LruCache::from_config(LruCacheConfig::new(1_000));
//! assert_eq!(cache.capacity(), 1_000);
//!
//! // 64MB byte cache over 64 shards
//! let config = ByteCacheConfig::new(64 * 1024 * 1024).with_shards(64);
//! let cache = ByteCache::init(config);
//! assert_eq!(cache.shard_count(), 64);
//! ```

pub mod byte_cache;
pub mod lru;

pub use byte_cache::ByteCacheConfig;
pub use lru::LruCacheConfig;
