//! Metered cache decorator.
//!
//! [`MeteredCache`] wraps any [`Cacher`] and records how it is used. It never
//! changes what the inner cache returns or evicts.
//!
//! - `put`: counts calls and accumulates their wall-clock time.
//! - `get`: counts and times calls, labeled hit or miss.
//! - `put`, `evict`, `flush`: republish `len` and `portion_filled` as gauges.
//!
//! Counters are relaxed atomics, so the decorator is as shareable as the
//! cache it wraps.
//!
//! # Example
//!
//! ```
//! use recency_cache::metrics::CacheMetrics;
//! use recency_cache::{Cacher, LruCache, MeteredCache};
//!
//! let cache = MeteredCache::new("sessions", LruCache::new(2)).unwrap();
//! cache.put(1, "a");
//! cache.put(2, "b");
//! assert_eq!(cache.get(&1), Some("a"));
//! assert_eq!(cache.get(&3), None);
//!
//! let metrics = cache.metrics();
//! assert_eq!(metrics["sessions_put_count"], 2.0);
//! assert_eq!(metrics["sessions_get_count_hit"], 1.0);
//! assert_eq!(metrics["sessions_get_count_miss"], 1.0);
//! assert_eq!(metrics["sessions_portion_filled"], 1.0);
//! ```

use super::CacheMetrics;
use crate::cacher::Cacher;
use crate::error::{CacheError, Result};
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};
use std::collections::BTreeMap;
use std::time::Instant;

/// A [`Cacher`] decorator that records call counts, timings and fill gauges.
pub struct MeteredCache<C> {
    namespace: String,
    inner: C,
    put_count: AtomicU64,
    put_time_ns: AtomicU64,
    get_count_hit: AtomicU64,
    get_count_miss: AtomicU64,
    get_time_ns_hit: AtomicU64,
    get_time_ns_miss: AtomicU64,
    len: AtomicU64,
    // f64 bits
    portion_filled: AtomicU64,
}

fn valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn elapsed_ns(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_nanos()).unwrap_or(u64::MAX)
}

impl<C> MeteredCache<C> {
    /// Wraps `inner`, reporting metrics under `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidNamespace`] if `namespace` is empty or
    /// contains anything other than ASCII letters, digits and `_`.
    pub fn new(namespace: impl Into<String>, inner: C) -> Result<Self> {
        let namespace = namespace.into();
        if !valid_namespace(&namespace) {
            return Err(CacheError::InvalidNamespace(namespace));
        }
        Ok(Self {
            namespace,
            inner,
            put_count: AtomicU64::new(0),
            put_time_ns: AtomicU64::new(0),
            get_count_hit: AtomicU64::new(0),
            get_count_miss: AtomicU64::new(0),
            get_time_ns_hit: AtomicU64::new(0),
            get_time_ns_miss: AtomicU64::new(0),
            len: AtomicU64::new(0),
            portion_filled: AtomicU64::new(0.0f64.to_bits()),
        })
    }

    /// Returns the metric namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the wrapped cache.
    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Unwraps the decorator, returning the wrapped cache.
    pub fn into_inner(self) -> C {
        self.inner
    }

    fn refresh_gauges<K, V>(&self)
    where
        C: Cacher<K, V>,
    {
        self.len.store(self.inner.len() as u64, Ordering::Relaxed);
        self.portion_filled
            .store(self.inner.portion_filled().to_bits(), Ordering::Relaxed);
    }

    fn key(&self, metric: &str) -> String {
        format!("{}_{}", self.namespace, metric)
    }
}

impl<K, V, C> Cacher<K, V> for MeteredCache<C>
where
    C: Cacher<K, V>,
{
    fn put(&self, key: K, value: V) {
        let start = Instant::now();
        self.inner.put(key, value);
        let elapsed = elapsed_ns(start);

        self.put_count.fetch_add(1, Ordering::Relaxed);
        self.put_time_ns.fetch_add(elapsed, Ordering::Relaxed);
        self.refresh_gauges::<K, V>();
    }

    fn get(&self, key: &K) -> Option<V> {
        let start = Instant::now();
        let value = self.inner.get(key);
        let elapsed = elapsed_ns(start);

        let (count, time) = if value.is_some() {
            (&self.get_count_hit, &self.get_time_ns_hit)
        } else {
            (&self.get_count_miss, &self.get_time_ns_miss)
        };
        count.fetch_add(1, Ordering::Relaxed);
        time.fetch_add(elapsed, Ordering::Relaxed);
        value
    }

    fn evict(&self, key: &K) {
        self.inner.evict(key);
        self.refresh_gauges::<K, V>();
    }

    fn flush(&self) {
        self.inner.flush();
        self.refresh_gauges::<K, V>();
    }

    fn len(&self) -> usize {
        self.inner.len()
    }

    fn portion_filled(&self) -> f64 {
        self.inner.portion_filled()
    }
}

impl<C> CacheMetrics for MeteredCache<C> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed) as f64;

        let mut metrics = BTreeMap::new();
        metrics.insert(self.key("get_count_hit"), load(&self.get_count_hit));
        metrics.insert(self.key("get_count_miss"), load(&self.get_count_miss));
        metrics.insert(self.key("get_time_ns_hit"), load(&self.get_time_ns_hit));
        metrics.insert(self.key("get_time_ns_miss"), load(&self.get_time_ns_miss));
        metrics.insert(self.key("len"), load(&self.len));
        metrics.insert(
            self.key("portion_filled"),
            f64::from_bits(self.portion_filled.load(Ordering::Relaxed)),
        );
        metrics.insert(self.key("put_count"), load(&self.put_count));
        metrics.insert(self.key("put_time_ns"), load(&self.put_time_ns));
        metrics
    }

    fn algorithm_name(&self) -> &'static str {
        "Metered"
    }
}

impl<C: fmt::Debug> fmt::Debug for MeteredCache<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeteredCache")
            .field("namespace", &self.namespace)
            .field("inner", &self.inner)
            .finish()
    }
}
