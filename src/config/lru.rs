//! Configuration for the Least Recently Used (LRU) store.
//!
//! # Sizing Guidelines
//!
//! `capacity` is expressed in the unit of the store's
//! [`SizePolicy`](crate::size::SizePolicy):
//!
//! - with [`EntryCount`](crate::size::EntryCount) it is a number of entries
//! - with [`ByteSize`](crate::size::ByteSize) it is a number of key + value bytes
//! - with a custom policy it is whatever that policy returns
//!
//! A single entry larger than `capacity` is never stored.
//!
//! # Examples
//!
//! ```
//! use recency_cache::config::LruCacheConfig;
//! use recency_cache::size::ByteSize;
//! use recency_cache::LruCache;
//!
//! // 1MB of key + value bytes
//! let config = LruCacheConfig::new(1024 * 1024);
//! let cache: LruCache<Vec<u8>, Vec<u8>, ByteSize> = LruCache::init(config, ByteSize, None);
//! assert_eq!(cache.capacity(), 1024 * 1024);
//! ```

use core::fmt;

/// Configuration for an LRU (Least Recently Used) store.
///
/// # Fields
///
/// - `capacity`: Budget in size-policy units. 0 is treated as 1.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct LruCacheConfig {
    /// Maximum total size of live entries, in size-policy units.
    pub capacity: u64,
}

impl LruCacheConfig {
    /// Creates a configuration with the given budget.
    #[must_use]
    pub fn new(capacity: u64) -> Self {
        Self { capacity }
    }

    /// Sets the budget.
    #[must_use]
    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    /// Returns the budget a store built from this config will enforce.
    #[inline]
    pub fn normalized_capacity(&self) -> u64 {
        self.capacity.max(1)
    }
}

impl fmt::Debug for LruCacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCacheConfig")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lru_config_creation() {
        let config = LruCacheConfig::new(1000);
        assert_eq!(config.capacity, 1000);
        assert_eq!(config.normalized_capacity(), 1000);
    }

    #[test]
    fn test_lru_config_zero_capacity_normalizes() {
        let config = LruCacheConfig::new(10).with_capacity(0);
        assert_eq!(config.capacity, 0);
        assert_eq!(config.normalized_capacity(), 1);
    }
}
