use recency_cache::config::LruCacheConfig;
use recency_cache::size::ByteSize;
use recency_cache::LruCache;
use std::sync::{Arc, Mutex};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recency_cache=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("Entry-count LRU");
    println!("===============");
    println!("Capacity 3. Add four fruits, touching 'apple' before the fourth.\n");

    let evicted = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&evicted);
    let cache = LruCache::with_on_evict(3, move |key, value| {
        sink.lock().unwrap().push((key, value));
    });

    cache.put("apple", 1);
    cache.put("banana", 2);
    cache.put("cherry", 3);
    println!("get(apple)  -> {:?}", cache.get(&"apple"));
    cache.put("date", 4);

    println!("recency     -> {:?}", cache.keys());
    println!("evicted     -> {:?}", evicted.lock().unwrap());
    println!("filled      -> {:.2}\n", cache.portion_filled());

    println!("Byte-bounded LRU");
    println!("================");
    println!("Budget 32 bytes of key + value.\n");

    let cache: LruCache<String, String, ByteSize> =
        LruCache::init(LruCacheConfig::new(32), ByteSize, None);

    for (key, value) in [
        ("greeting", "hello"),
        ("farewell", "goodbye"),
        ("question", "why?"),
        ("novel", "this value alone is longer than the budget"),
    ] {
        cache.put(key.to_string(), value.to_string());
        println!(
            "put {:<9} -> {} entries, {:>2}/{} bytes",
            key,
            cache.len(),
            cache.current_size(),
            cache.capacity()
        );
    }
    println!("recency     -> {:?}", cache.keys());
}
