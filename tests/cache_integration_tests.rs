//! Integration Tests for the public cache API
//!
//! Exercises `LruCache` through the crate root, including from many threads.

use std::sync::{Arc, Barrier};
use std::thread;

use mini_lru::{CacheError, Config, LruCache};

// == Helper Functions ==

fn create_test_cache(capacity: usize) -> LruCache<u32, String> {
    LruCache::new(capacity).unwrap()
}

// == Construction ==

#[test]
fn test_zero_capacity_is_a_configuration_error() {
    let result = LruCache::<u32, String>::new(0);
    assert_eq!(result.err(), Some(CacheError::InvalidCapacity(0)));
}

#[test]
fn test_from_default_config() {
    let cache: LruCache<u32, String> = LruCache::from_config(&Config::default()).unwrap();
    assert_eq!(cache.capacity(), 3);
    assert!(cache.is_empty());
}

// == Single-threaded Behaviour ==

#[test]
fn test_demonstration_scenario() {
    let cache = create_test_cache(3);

    cache.put(1, "A".to_string());
    cache.put(2, "B".to_string());
    cache.put(3, "C".to_string());
    assert_eq!(cache.get(&2).as_deref(), Some("B"));

    cache.put(4, "D".to_string());

    assert_eq!(cache.get(&1), None);
    assert_eq!(cache.get(&3).as_deref(), Some("C"));
    assert_eq!(cache.get(&4).as_deref(), Some("D"));

    let stats = cache.stats();
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 3);
}

#[test]
fn test_get_on_empty_cache_is_a_miss() {
    let cache = create_test_cache(2);

    assert_eq!(cache.get(&1), None);
    assert!(cache.is_empty());

    cache.put(1, "one".to_string());
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_overwrite_keeps_size_and_refreshes_recency() {
    let cache = create_test_cache(2);

    cache.put(1, "v1".to_string());
    cache.put(2, "other".to_string());
    cache.put(1, "v2".to_string());

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.keys(), vec![1, 2]);

    // 2 is now the least recently used
    cache.put(3, "new".to_string());
    assert_eq!(cache.get(&1).as_deref(), Some("v2"));
    assert!(!cache.contains_key(&2));
}

#[test]
fn test_eviction_follows_access_order() {
    let cache = create_test_cache(4);

    for key in 1..=4 {
        cache.put(key, format!("v{}", key));
    }
    cache.get(&1);
    cache.get(&3);

    // Order is now [3, 1, 4, 2]; new keys evict 2 then 4
    cache.put(5, "v5".to_string());
    assert!(!cache.contains_key(&2));
    cache.put(6, "v6".to_string());
    assert!(!cache.contains_key(&4));

    assert_eq!(cache.keys(), vec![6, 5, 3, 1]);
}

// == Concurrency ==

#[test]
fn test_concurrent_readers_and_writers() {
    let cache = Arc::new(create_test_cache(64));
    let barrier = Arc::new(Barrier::new(8));

    let handles: Vec<_> = (0..8u32)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..1_000u32 {
                    let key = (worker * 31 + i) % 128;
                    if i % 3 == 0 {
                        cache.put(key, format!("{}-{}", worker, i));
                    } else if let Some(value) = cache.get(&key) {
                        // Values are always complete writes from some worker
                        assert!(value.contains('-'));
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(cache.len() <= 64);
    assert_eq!(cache.keys().len(), cache.len());
    let stats = cache.stats();
    assert_eq!(stats.total_entries, cache.len());
}

#[test]
fn test_concurrent_inserts_within_capacity_are_all_kept() {
    let cache = Arc::new(create_test_cache(400));

    let writers: Vec<_> = (0..4u32)
        .map(|worker| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..100u32 {
                    cache.put(worker * 1_000 + i, format!("{}-{}", worker, i));
                }
            })
        })
        .collect();

    for handle in writers {
        handle.join().unwrap();
    }

    assert_eq!(cache.len(), 400);
    assert_eq!(cache.stats().evictions, 0);
    for worker in 0..4u32 {
        for i in 0..100u32 {
            let expected = format!("{}-{}", worker, i);
            assert_eq!(cache.get(&(worker * 1_000 + i)), Some(expected));
        }
    }
}
