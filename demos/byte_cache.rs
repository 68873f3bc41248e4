use recency_cache::config::ByteCacheConfig;
use recency_cache::ByteCache;
use std::sync::Arc;
use std::thread;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recency_cache=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cache = Arc::new(ByteCache::init(
        ByteCacheConfig::new(256 * 1024).with_shards(64),
    ));
    println!(
        "{} shards of {} bytes each",
        cache.shard_count(),
        cache.shard_capacity()
    );

    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                let mut buf = Vec::new();
                for i in 0..10_000u32 {
                    let key = (t * 10_000 + i % 2_000).to_be_bytes();
                    let (out, found) = cache.has_get(buf, &key);
                    if !found {
                        cache.set(&key, format!("payload for {t}/{i}").as_bytes());
                    }
                    buf = out;
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = cache.stats();
    println!("{stats:#?}");
    println!("hit rate    -> {:.3}", stats.hit_rate());
    println!("filled      -> {:.3}", cache.portion_filled());

    cache.save_to_file_concurrent("byte_cache.snapshot", 4).unwrap();
    cache.reset();
    println!("after reset -> {} entries", cache.len());
}
