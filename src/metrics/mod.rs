//! Cache Metrics System
//!
//! Every cache in the crate reports its state through the [`CacheMetrics`]
//! trait as a `BTreeMap<String, f64>`. The map keeps keys sorted, so two
//! reports of the same cache always list metrics in the same order.
//!
//! | Reporter | Keys |
//! |----------|------|
//! | [`LruCache`](crate::LruCache) | `cache_size`, `cache_utilization`, `evictions`, `len`, `max_cache_size` |
//! | [`ByteCache`](crate::ByteCache) | `bytes_size`, `entries_count`, `get_calls`, `hit_rate`, `max_bytes`, `misses`, `portion_filled`, `set_calls`, `shards` |
//! | [`MeteredCache`] | `<namespace>_` + `put_count`, `put_time_ns`, `get_count_hit`, `get_count_miss`, `get_time_ns_hit`, `get_time_ns_miss`, `len`, `portion_filled` |
//!
//! [`MeteredCache`] adds call counts and timings on top of any
//! [`Cacher`](crate::Cacher) without changing its behavior.

use std::collections::BTreeMap;

mod metered;

pub use self::metered::MeteredCache;

/// Trait that all caches implement for metrics reporting.
pub trait CacheMetrics {
    /// Returns all metrics as key-value pairs, sorted by key.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Short name identifying the reporting cache, e.g. `"LRU"`.
    fn algorithm_name(&self) -> &'static str;
}
