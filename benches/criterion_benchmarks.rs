use criterion::{black_box, criterion_group, criterion_main, Criterion};
use recency_cache::config::{ByteCacheConfig, LruCacheConfig};
use recency_cache::size::ByteSize;
use recency_cache::{ByteCache, Cacher, LruCache, MeteredCache};

const CACHE_SIZE: usize = 1000;

fn make_lru(cap: usize) -> LruCache<usize, usize> {
    LruCache::from_config(LruCacheConfig::new(cap as u64))
}

fn byte_key(i: usize) -> [u8; 8] {
    (i as u64).to_le_bytes()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Cache Operations");

    // Entry-count LRU
    {
        let cache = make_lru(CACHE_SIZE);
        for i in 0..CACHE_SIZE {
            cache.put(i, i);
        }

        group.bench_function("LRU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU get miss", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(&(i + CACHE_SIZE)));
                }
            });
        });

        group.bench_function("LRU put existing", |b| {
            b.iter(|| {
                for i in 0..100 {
                    cache.put(i % CACHE_SIZE, black_box(i));
                }
            });
        });

        group.bench_function("LRU put evicting", |b| {
            let mut next = CACHE_SIZE;
            b.iter(|| {
                for _ in 0..100 {
                    cache.put(next, next);
                    next += 1;
                }
            });
        });
    }

    // Byte-bounded LRU
    {
        let cache: LruCache<Vec<u8>, Vec<u8>, ByteSize> =
            LruCache::init(LruCacheConfig::new(64 * 1024), ByteSize, None);
        for i in 0..CACHE_SIZE {
            cache.put(byte_key(i).to_vec(), vec![0u8; 32]);
        }

        group.bench_function("Sized LRU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.get(byte_key(i % CACHE_SIZE).as_slice()));
                }
            });
        });
    }

    // Sharded byte cache
    {
        let cache = ByteCache::init(ByteCacheConfig::new(1 << 20));
        for i in 0..CACHE_SIZE {
            cache.set(&byte_key(i), &[0u8; 64]);
        }

        group.bench_function("ByteCache get hit", |b| {
            let mut buf = Vec::with_capacity(64);
            b.iter(|| {
                for i in 0..100 {
                    buf = cache.get(std::mem::take(&mut buf), &byte_key(i % CACHE_SIZE));
                    black_box(&buf);
                }
            });
        });

        group.bench_function("ByteCache has", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(cache.has(&byte_key(i % CACHE_SIZE)));
                }
            });
        });

        group.bench_function("ByteCache set", |b| {
            b.iter(|| {
                for i in 0..100 {
                    cache.set(&byte_key(i % CACHE_SIZE), black_box(&[1u8; 64]));
                }
            });
        });
    }

    // Metered decorator overhead
    {
        let cache = MeteredCache::new("bench", make_lru(CACHE_SIZE)).unwrap();
        for i in 0..CACHE_SIZE {
            Cacher::put(&cache, i, i);
        }

        group.bench_function("Metered LRU get hit", |b| {
            b.iter(|| {
                for i in 0..100 {
                    black_box(Cacher::get(&cache, &(i % CACHE_SIZE)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
