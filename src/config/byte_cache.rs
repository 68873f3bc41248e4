//! Configuration for the sharded byte cache.
//!
//! The byte budget applies to the **entire cache** and is split evenly across
//! shards. Each shard gets `max_bytes / shards`, but never less than 1 byte, so
//! a tiny budget over many shards can hold more than `max_bytes` in total.
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::ByteCacheConfig;
//!
//! let config = ByteCacheConfig::new(1 << 20);
//! assert_eq!(config.shards, 256);
//! assert_eq!(config.shard_capacity(), 4096);
//!
//! // Non power-of-two shard counts are rounded up.
//! let config = ByteCacheConfig::new(1 << 20).with_shards(12);
//! assert_eq!(config.normalized_shards(), 16);
//! ```

use core::fmt;

/// Default number of shards.
pub const DEFAULT_SHARDS: usize = 256;

/// Upper bound on the shard count. The shard hash folds keys into one byte.
pub const MAX_SHARDS: usize = 256;

/// Configuration for a [`ByteCache`](crate::ByteCache).
///
/// # Fields
///
/// - `max_bytes`: Total budget in key + value bytes. 0 is treated as 1.
/// - `shards`: Number of independently locked shards.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct ByteCacheConfig {
    /// Total budget in key + value bytes across all shards.
    pub max_bytes: u64,
    /// Number of shards.
    pub shards: usize,
}

impl ByteCacheConfig {
    /// Creates a configuration with the given byte budget and
    /// [`DEFAULT_SHARDS`] shards.
    #[must_use]
    pub fn new(max_bytes: u64) -> Self {
        Self {
            max_bytes,
            shards: DEFAULT_SHARDS,
        }
    }

    /// Sets the number of shards.
    ///
    /// More shards means less lock contention but a smaller budget per shard,
    /// which also lowers the largest entry the cache can hold.
    #[must_use]
    pub fn with_shards(mut self, shards: usize) -> Self {
        self.shards = shards;
        self
    }

    /// Sets the total byte budget.
    #[must_use]
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Returns the total budget after normalization.
    #[inline]
    pub fn normalized_max_bytes(&self) -> u64 {
        self.max_bytes.max(1)
    }

    /// Returns the shard count a cache built from this config will use.
    #[inline]
    pub fn normalized_shards(&self) -> usize {
        self.shards.clamp(1, MAX_SHARDS).next_power_of_two()
    }

    /// Returns the byte budget of each shard.
    #[inline]
    pub fn shard_capacity(&self) -> u64 {
        (self.normalized_max_bytes() / self.normalized_shards() as u64).max(1)
    }
}

impl Default for ByteCacheConfig {
    fn default() -> Self {
        Self::new(32 * 1024 * 1024)
    }
}

impl fmt::Debug for ByteCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByteCacheConfig")
            .field("max_bytes", &self.max_bytes)
            .field("shards", &self.shards)
            .finish()
    }
}
