//! Size policies.
//!
//! A [`SizePolicy`] decides how much of a store's budget an entry consumes,
//! which is the only thing that distinguishes an entry-count bounded store
//! from a byte-size bounded one. The eviction algorithm is the same for both.
//!
//! | Policy | Unit | Typical store |
//! |--------|------|---------------|
//! | [`EntryCount`] | entries | `LruCache::new(capacity)` |
//! | [`ByteSize`] | key bytes + value bytes | shards of [`ByteCache`](crate::ByteCache) |
//! | `Fn(&K, &V) -> u64` | caller defined | `LruCache::with_size_policy(max, f)` |
//!
//! # Examples
//!
//! ```
//! use recency_cache::size::{ByteSize, EntryCount, SizePolicy};
//!
//! assert_eq!(EntryCount.size_of(&"a", &"apple"), 1);
//! assert_eq!(ByteSize.size_of(&"a", &"apple"), 6);
//!
//! let by_value_len = |_: &&str, v: &String| v.len() as u64;
//! assert_eq!(by_value_len.size_of(&"a", &String::from("apple")), 5);
//! ```

/// Computes the budget weight of a key/value pair.
///
/// Stores charge `max(size_of(key, value), 1)`.
pub trait SizePolicy<K, V> {
    /// Returns the weight of `key` and `value`.
    fn size_of(&self, key: &K, value: &V) -> u64;
}

/// Every entry weighs one unit, so the budget is an entry count.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EntryCount;

impl<K, V> SizePolicy<K, V> for EntryCount {
    #[inline]
    fn size_of(&self, _key: &K, _value: &V) -> u64 {
        1
    }
}

/// An entry weighs the length of its key plus the length of its value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ByteSize;

impl<K, V> SizePolicy<K, V> for ByteSize
where
    K: AsRef<[u8]>,
    V: AsRef<[u8]>,
{
    #[inline]
    fn size_of(&self, key: &K, value: &V) -> u64 {
        (key.as_ref().len() + value.as_ref().len()) as u64
    }
}

impl<K, V, F> SizePolicy<K, V> for F
where
    F: Fn(&K, &V) -> u64,
{
    #[inline]
    fn size_of(&self, key: &K, value: &V) -> u64 {
        self(key, value)
    }
}
