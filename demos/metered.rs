use recency_cache::{ByteCache, CacheMetrics, Cacher, LruCache, MeteredCache};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn exercise<C: Cacher<Vec<u8>, Vec<u8>>>(cache: &C) {
    for i in 0..2_000u32 {
        let key = (i % 700).to_le_bytes().to_vec();
        if cache.get(&key).is_none() {
            cache.put(key, vec![0u8; 48]);
        }
        if i % 250 == 0 {
            cache.evict(&(i / 2).to_le_bytes().to_vec());
        }
    }
}

fn print_metrics(cache: &impl CacheMetrics) {
    println!("[{}]", cache.algorithm_name());
    for (name, value) in cache.metrics() {
        println!("  {name:<28} {value:>14.3}");
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recency_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let lru = MeteredCache::new("lru", LruCache::new(500)).unwrap();
    let bytes = MeteredCache::new("bytes", ByteCache::new(24 * 1024)).unwrap();

    exercise(&lru);
    exercise(&bytes);

    print_metrics(&lru);
    print_metrics(lru.inner());
    print_metrics(&bytes);
    print_metrics(bytes.inner());

    match MeteredCache::new("not valid!", LruCache::<u8, u8>::new(1)) {
        Ok(_) => println!("unexpectedly accepted"),
        Err(err) => println!("rejected: {err}"),
    }
}
