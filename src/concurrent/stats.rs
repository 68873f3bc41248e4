//! Usage statistics for the sharded byte cache.
//!
//! Entry and byte totals are read from the shards on demand. Call totals are
//! kept in relaxed atomic counters owned by the cache, so they can be slightly
//! stale under concurrent traffic and are never used to enforce capacity.

use core::sync::atomic::{AtomicU64, Ordering};

/// A point-in-time snapshot of [`ByteCache`](crate::ByteCache) usage.
///
/// The snapshot is assembled shard by shard and is not atomic across shards.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of live entries.
    pub entries_count: u64,
    /// Bytes charged for live entries (key + value lengths).
    pub bytes_size: u64,
    /// Number of lookups.
    pub get_calls: u64,
    /// Number of inserts and replacements.
    pub set_calls: u64,
    /// Number of lookups that found nothing.
    pub misses: u64,
    /// Hash collisions between distinct keys. Shards key their maps by the
    /// full byte string, so this is always 0.
    pub collisions: u64,
}

impl Stats {
    /// Zeroes every field so the value can be refilled.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Returns the fraction of lookups that hit, or 0.0 if there were none.
    pub fn hit_rate(&self) -> f64 {
        if self.get_calls == 0 {
            return 0.0;
        }
        self.get_calls.saturating_sub(self.misses) as f64 / self.get_calls as f64
    }
}

#[derive(Debug, Default)]
pub(crate) struct StatsCounters {
    get_calls: AtomicU64,
    set_calls: AtomicU64,
    misses: AtomicU64,
}

impl StatsCounters {
    #[inline]
    pub(crate) fn record_set(&self) {
        self.set_calls.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_get(&self, found: bool) {
        self.get_calls.fetch_add(1, Ordering::Relaxed);
        if !found {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Overwrites the call totals in `stats`.
    pub(crate) fn write_to(&self, stats: &mut Stats) {
        stats.get_calls = self.get_calls.load(Ordering::Relaxed);
        stats.set_calls = self.set_calls.load(Ordering::Relaxed);
        stats.misses = self.misses.load(Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate() {
        let mut stats = Stats::default();
        assert_eq!(stats.hit_rate(), 0.0);

        stats.get_calls = 4;
        stats.misses = 1;
        assert_eq!(stats.hit_rate(), 0.75);

        stats.reset();
        assert_eq!(stats, Stats::default());
    }

    #[test]
    fn test_counters_overwrite_call_totals() {
        let counters = StatsCounters::default();
        counters.record_set();
        counters.record_set();
        counters.record_get(true);
        counters.record_get(false);
        counters.record_get(false);

        let mut stats = Stats {
            entries_count: 7,
            set_calls: 40,
            misses: 9,
            ..Stats::default()
        };
        counters.write_to(&mut stats);
        assert_eq!(stats.entries_count, 7);
        assert_eq!(stats.set_calls, 2);
        assert_eq!(stats.get_calls, 3);
        assert_eq!(stats.misses, 2);

        counters.write_to(&mut stats);
        assert_eq!(stats.set_calls, 2);
    }
}
