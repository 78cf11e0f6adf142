//! Integration Tests for the public cache API
//!
//! Exercises the cache the way an embedding program would, including
//! concurrent use from several threads.

use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use access_cache::{
    estimate_size, impl_size_estimable, AccessCache, CacheError, Config, SizeEstimable,
};

// == Helper Types ==

#[derive(Debug, Clone, PartialEq)]
struct Profile {
    name: String,
    age: i64,
    scores: Vec<u32>,
    tags: HashMap<String, String>,
}

impl_size_estimable!(Profile { name, age, scores, tags });

fn profile(name: &str, scores: usize) -> Profile {
    Profile {
        name: name.to_string(),
        age: 42,
        scores: vec![7; scores],
        tags: HashMap::new(),
    }
}

// == Scenario Tests ==

#[test]
fn test_walkthrough_with_strings() {
    let string_header = std::mem::size_of::<String>() as u64;
    let cache = AccessCache::new(100);

    cache.set("key-a", "first string".to_string()).unwrap();
    assert_eq!(cache.current_size(), string_header + 12);

    cache.set("key-b", "second string".to_string()).unwrap();
    assert_eq!(cache.current_size(), 2 * string_header + 25);

    assert_eq!(cache.get("key-a").as_deref(), Some("first string"));
    assert_eq!(cache.most_recent_key().as_deref(), Some("key-a"));

    cache.set("key-c", "third string".to_string()).unwrap();
    assert_eq!(cache.recency_order(), vec!["key-a", "key-c"]);
    assert_eq!(cache.get("key-b"), None);
    assert_eq!(cache.current_size(), 2 * string_header + 24);
}

#[test]
fn test_struct_values() {
    let cache = AccessCache::new(4096);
    let alice = profile("alice", 10);
    let expected = std::mem::size_of::<Profile>() as u64 + 5 + 40;
    assert_eq!(estimate_size(&alice).unwrap(), expected);

    cache.set("alice", alice.clone()).unwrap();
    assert_eq!(cache.item_sizes().get("alice"), Some(&expected));
    assert_eq!(cache.get("alice"), Some(alice));
}

#[test]
fn test_struct_values_evicted_by_size() {
    let one = estimate_size(&profile("p", 100)).unwrap();
    let cache = AccessCache::new(one * 3);

    for i in 0..3 {
        cache.set(format!("p{i}"), profile("p", 100)).unwrap();
    }
    assert_eq!(cache.count(), 3);

    cache.set("p3", profile("p", 100)).unwrap();
    assert_eq!(cache.count(), 3);
    assert_eq!(cache.recency_order(), vec!["p1", "p2", "p3"]);
    assert_eq!(cache.stats().evictions, 1);
}

#[test]
fn test_rejection_error_reports_sizes() {
    let cache = AccessCache::new(64);
    let value = vec![0u8; 64];
    let size = estimate_size(&value).unwrap();

    match cache.set("blob", value) {
        Err(CacheError::CapacityExceeded {
            key,
            size: reported,
            max_bytes,
        }) => {
            assert_eq!(key, "blob");
            assert_eq!(reported, size);
            assert_eq!(max_bytes, 64);
        }
        other => panic!("expected capacity error, got {other:?}"),
    }
    assert!(cache.is_empty());
}

#[test]
fn test_shared_values_via_arc() {
    let cache: AccessCache<Arc<String>> = AccessCache::new(1024);
    let shared = Arc::new("payload".to_string());
    cache.set("shared", Arc::clone(&shared)).unwrap();

    let fetched = cache.get("shared").unwrap();
    assert!(Arc::ptr_eq(&fetched, &shared));
}

#[test]
fn test_from_config_verbose() {
    let cache: AccessCache<i64> = AccessCache::from_config(&Config {
        max_bytes: 16,
        verbose: true,
    })
    .unwrap();

    for i in 0..5 {
        cache.set(format!("k{i}"), i).unwrap();
    }
    assert_eq!(cache.recency_order(), vec!["k3", "k4"]);
}

#[test]
fn test_stats_json() {
    let cache = AccessCache::new(40);
    cache.set("a", 1i64).unwrap();
    cache.get("a");
    cache.get("b");

    let json = serde_json::to_value(cache.stats()).unwrap();
    assert_eq!(json["total_entries"], 1);
    assert_eq!(json["current_bytes"], 8);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["get_count"], 2);
    assert_eq!(json["set_count"], 1);
}

// == Concurrency Tests ==

#[test]
fn test_concurrent_writers_stay_within_budget() {
    let max_bytes = 4 * 1024;
    let cache: Arc<AccessCache<Vec<u8>>> = Arc::new(AccessCache::new(max_bytes));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                for i in 0..200 {
                    let key = format!("{}", (t * 7 + i) % 40);
                    cache.set(key.clone(), vec![t as u8; 256]).unwrap();
                    if let Some(value) = cache.get(&key) {
                        assert_eq!(value.len(), 256);
                    }
                    assert!(cache.current_size() <= max_bytes);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let order = cache.recency_order();
    let sizes = cache.item_sizes();
    assert_eq!(order.len(), sizes.len());
    assert!(order.iter().all(|k| sizes.contains_key(k)));
    assert!(cache.current_size() <= max_bytes);

    let stats = cache.stats();
    assert_eq!(stats.set_count, 8 * 200);
    assert_eq!(stats.get_count, 8 * 200);
    assert!(cache.average_set_latency() >= 0.0);
    assert!(cache.average_get_latency() >= 0.0);
}

#[test]
fn test_concurrent_reader_keeps_hot_key() {
    let cache: Arc<AccessCache<Vec<u8>>> = Arc::new(AccessCache::new(1024 * 1024 * 25));
    let hot = "9";

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let cache = Arc::clone(&cache);
            thread::spawn(move || {
                cache.set(i.to_string(), vec![b'x'; 1024 * 1024 * 5]).unwrap();
                cache.get(hot);
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Every value is slightly over 5 MiB, so at most four fit
    assert!(cache.count() <= 4);
    assert!(cache.current_size() <= 1024 * 1024 * 25);
}

// == Custom Estimators ==

#[derive(Clone)]
struct Fixed(u64);

impl SizeEstimable for Fixed {
    fn inline_size(&self) -> u64 {
        self.0
    }

    fn heap_size(&self, _depth: usize) -> access_cache::Result<u64> {
        Ok(0)
    }
}

#[test]
fn test_custom_estimator() {
    let cache = AccessCache::new(100);
    cache.set("a", Fixed(60)).unwrap();
    cache.set("b", Fixed(50)).unwrap();

    assert_eq!(cache.recency_order(), vec!["b"]);
    assert!(cache.set("c", Fixed(100)).is_err());
}
