//! Stress Tests for Shared Caches
//!
//! These tests verify thread safety and correctness under high contention.

use recency_cache::config::{ByteCacheConfig, LruCacheConfig};
use recency_cache::size::ByteSize;
use recency_cache::{ByteCache, LruCache, MeteredCache};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const NUM_THREADS: usize = 16;
const OPS_PER_THREAD: usize = 10_000;

fn byte_cache(max_bytes: u64, shards: usize) -> Arc<ByteCache> {
    Arc::new(ByteCache::init(
        ByteCacheConfig::new(max_bytes).with_shards(shards),
    ))
}

/// Test high contention with many threads hammering the same keys
#[test]
fn stress_lru_high_contention() {
    let cache: Arc<LruCache<usize, usize>> = Arc::new(LruCache::new(100));

    let mut handles = Vec::new();
    for t in 0..NUM_THREADS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..OPS_PER_THREAD {
                let key = i % 10; // Only 10 keys for high contention
                if t % 2 == 0 {
                    cache.put(key, t * OPS_PER_THREAD + i);
                } else {
                    let _ = cache.get(&key);
                }
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(cache.len(), 10);
    assert_eq!(cache.evictions(), 0);
}

/// Test capacity limits under concurrent access
#[test]
fn stress_lru_capacity_limits() {
    let capacity = 100;
    let cache: Arc<LruCache<usize, usize>> = Arc::new(LruCache::new(capacity));

    let mut handles = Vec::new();
    for t in 0..NUM_THREADS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..OPS_PER_THREAD {
                cache.put(t * OPS_PER_THREAD + i, i);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(cache.len() as u64, capacity);
    assert_eq!(
        cache.evictions(),
        (NUM_THREADS * OPS_PER_THREAD) as u64 - capacity
    );
}

/// Every capacity eviction reaches the callback exactly once
#[test]
fn stress_lru_callback_count_matches_evictions() {
    let callbacks = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&callbacks);
    let cache: Arc<LruCache<usize, usize>> = Arc::new(LruCache::with_on_evict(64, move |_, _| {
        counter.fetch_add(1, Ordering::Relaxed);
    }));

    let mut handles = Vec::new();
    for t in 0..8 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..2_000 {
                cache.put(t * 2_000 + i, i);
                if i % 7 == 0 {
                    cache.remove(&(t * 2_000 + i));
                }
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(callbacks.load(Ordering::Relaxed) as u64, cache.evictions());
    assert!(cache.len() <= 64);
}

/// Byte budget holds while threads write variable-sized values
#[test]
fn stress_lru_byte_budget() {
    let cache: Arc<LruCache<Vec<u8>, Vec<u8>, ByteSize>> = Arc::new(LruCache::init(
        LruCacheConfig::new(4096),
        ByteSize,
        None,
    ));

    let mut handles = Vec::new();
    for t in 0..8u8 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..1_000usize {
                let key = vec![t, (i % 251) as u8];
                cache.put(key.clone(), vec![0u8; i % 300]);
                assert!(cache.current_size() <= 4096);
                let _ = cache.get(&key);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert!(cache.current_size() <= 4096);
    assert!(cache.portion_filled() <= 1.0);
}

/// Test concurrent removes
#[test]
fn stress_concurrent_removes() {
    let cache: Arc<LruCache<usize, usize>> = Arc::new(LruCache::new(1000));

    for i in 0..1000 {
        cache.put(i, i);
    }

    let removed_count = Arc::new(AtomicUsize::new(0));
    let mut handles = Vec::new();

    for _ in 0..NUM_THREADS {
        let cache = Arc::clone(&cache);
        let removed = Arc::clone(&removed_count);
        handles.push(thread::spawn(move || {
            for i in 0..1000 {
                if cache.remove(&i).is_some() {
                    removed.fetch_add(1, Ordering::Relaxed);
                }
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    // Each item can only be removed once
    assert_eq!(removed_count.load(Ordering::Relaxed), 1000);
    assert!(cache.is_empty());
    assert_eq!(cache.current_size(), 0);
}

/// Set calls are counted exactly even when writes race
#[test]
fn stress_byte_cache_set_calls_exact() {
    let cache = byte_cache(1 << 20, 256);

    let mut handles = Vec::new();
    for t in 0..NUM_THREADS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            let mut buf = Vec::new();
            for i in 0..OPS_PER_THREAD {
                let key = format!("key-{}-{}", t, i % 500);
                cache.set(key.as_bytes(), b"value");
                buf = cache.get(buf, key.as_bytes());
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let stats = cache.stats();
    let total = (NUM_THREADS * OPS_PER_THREAD) as u64;
    assert_eq!(stats.set_calls, total);
    assert_eq!(stats.get_calls, total);
    assert!(stats.bytes_size <= cache.max_bytes());
    assert_eq!(stats.entries_count, cache.len() as u64);
}

/// Byte budget holds with every shard count
#[test]
fn stress_byte_cache_shard_counts() {
    for shards in [1, 2, 4, 8, 16, 64, 256] {
        let cache = byte_cache(16 * 1024, shards);

        let mut handles = Vec::new();
        for t in 0..8u8 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..2_000u16 {
                    let key = [t, (i >> 8) as u8, i as u8];
                    cache.set(&key, &[t; 24]);
                    let _ = cache.has_get(Vec::new(), &key);
                    if i % 3 == 0 {
                        cache.del(&key);
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        assert_eq!(cache.shard_count(), shards);
        assert!(cache.current_size() <= cache.max_bytes());
    }
}

/// A key written from many threads always lands in one shard
#[test]
fn stress_byte_cache_shard_stability() {
    let cache = byte_cache(1 << 20, 64);

    let mut handles = Vec::new();
    for t in 0..NUM_THREADS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..1_000 {
                cache.set(b"shared-key", format!("{t}-{i}").as_bytes());
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    // One entry, not one per shard the writers happened to hit.
    assert_eq!(cache.len(), 1);
    assert!(cache.has(b"shared-key"));
}

/// Test concurrent resets while writers are running
#[test]
fn stress_byte_cache_concurrent_reset() {
    let cache = byte_cache(1 << 16, 16);

    let mut handles = Vec::new();
    for t in 0..NUM_THREADS {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..1_000u32 {
                cache.set(&(t as u32 * 1_000 + i).to_be_bytes(), b"payload");
                if i % 100 == 0 {
                    cache.reset();
                }
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert!(cache.current_size() <= cache.max_bytes());
    cache.reset();
    assert!(cache.is_empty());
    assert_eq!(cache.portion_filled(), 0.0);
}

/// Metered decorator counts every call made through a shared handle
#[test]
fn stress_metered_counts() {
    use recency_cache::{CacheMetrics, Cacher};

    let cache = Arc::new(MeteredCache::new("stress", byte_cache(1 << 20, 16)).unwrap());

    let mut handles = Vec::new();
    for t in 0..8u8 {
        let cache = Arc::clone(&cache);
        handles.push(thread::spawn(move || {
            for i in 0..500u16 {
                let key = vec![t, (i % 50) as u8];
                cache.put(key.clone(), vec![1, 2, 3]);
                let _ = cache.get(&key);
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    let metrics = cache.metrics();
    assert_eq!(metrics["stress_put_count"], 4_000.0);
    assert_eq!(
        metrics["stress_get_count_hit"] + metrics["stress_get_count_miss"],
        4_000.0
    );
    assert_eq!(cache.inner().stats().set_calls, 4_000);
}
