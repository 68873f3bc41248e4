//! Cache entry type.
//!
//! A [`CacheEntry`] is what a recency list node carries: the key (kept so the
//! tail can be unmapped on eviction), the value and the size charged against
//! the owning store's budget.
//!
//! # Sizes
//!
//! The size is whatever the store's [`SizePolicy`](crate::size::SizePolicy)
//! reports, clamped to at least 1 so every entry consumes budget. For
//! count-bounded stores it is always 1; for byte-bounded stores it is the
//! number of key and value bytes.

use core::fmt;

/// Key, value and charged size of a single cached item.
///
/// # Examples
///
/// ```
/// use recency_cache::entry::CacheEntry;
///
/// let entry = CacheEntry::new("key", vec![0u8; 16], 19);
/// assert_eq!(entry.key, "key");
/// assert_eq!(entry.size, 19);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct CacheEntry<K, V> {
    /// The cached key
    pub key: K,

    /// The cached value
    pub value: V,

    /// Size charged against the store's budget. Never zero.
    pub size: u64,
}

impl<K, V> CacheEntry<K, V> {
    /// Creates a new entry. A `size` of zero is charged as one.
    #[inline]
    pub fn new(key: K, value: V, size: u64) -> Self {
        Self {
            key,
            value,
            size: size.max(1),
        }
    }

    /// Consumes the entry and returns its key and value.
    #[inline]
    pub fn into_pair(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CacheEntry<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheEntry")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("size", &self.size)
            .finish()
    }
}
