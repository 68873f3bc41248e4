//! The capability contract shared by every cache in this crate.
//!
//! [`Cacher`] is a best-effort key-value store: `put` never fails, though the
//! entry may be evicted (or, if it is larger than the whole budget, never
//! stored). All methods take `&self`; implementations synchronize internally,
//! so a cache can be shared through an `Arc` without an outer lock.
//!
//! | Method | Contract |
//! |--------|----------|
//! | `put` | Insert or replace; may evict least recently used entries |
//! | `get` | Returns a copy of the value and promotes the entry on a hit |
//! | `evict` | Removes the key if present; never runs an eviction callback |
//! | `flush` | Removes everything; usage drops to zero |
//! | `len` | Current entry count |
//! | `portion_filled` | usage / capacity, in `[0, 1]` |
//!
//! # Example
//!
//! ```
//! use recency_cache::{Cacher, LruCache};
//!
//! fn warm<C: Cacher<u32, String>>(cache: &C) {
//!     for i in 0..4 {
//!         cache.put(i, i.to_string());
//!     }
//! }
//!
//! let cache = LruCache::new(3);
//! warm(&cache);
//! assert_eq!(cache.len(), 3);
//! assert_eq!(Cacher::get(&cache, &0), None);
//! assert_eq!(Cacher::get(&cache, &3), Some("3".to_string()));
//! ```

use std::sync::Arc;

/// A thread-safe, capacity-bounded key-value cache.
pub trait Cacher<K, V> {
    /// Inserts or replaces `key`, evicting older entries if needed.
    fn put(&self, key: K, value: V);

    /// Returns a copy of the value stored under `key`, marking it most
    /// recently used.
    fn get(&self, key: &K) -> Option<V>;

    /// Removes `key` if present.
    fn evict(&self, key: &K);

    /// Removes every entry.
    fn flush(&self);

    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the cache holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the fraction of the budget in use, from 0.0 to 1.0.
    fn portion_filled(&self) -> f64;
}

impl<K, V, C> Cacher<K, V> for Arc<C>
where
    C: Cacher<K, V> + ?Sized,
{
    #[inline]
    fn put(&self, key: K, value: V) {
        (**self).put(key, value)
    }

    #[inline]
    fn get(&self, key: &K) -> Option<V> {
        (**self).get(key)
    }

    #[inline]
    fn evict(&self, key: &K) {
        (**self).evict(key)
    }

    #[inline]
    fn flush(&self) {
        (**self).flush()
    }

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    #[inline]
    fn portion_filled(&self) -> f64 {
        (**self).portion_filled()
    }
}
