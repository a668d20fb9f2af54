/*!
 * Tests for enhancement cache functionality
 */

use tenhance::enhance::cache::EnhancementCache;
use tenhance::enhance::{EnhancementKind, EnhancementOp};

fn ops(target: &str) -> Vec<EnhancementOp> {
    vec![EnhancementOp::new(EnhancementKind::Pause, target)]
}

#[test]
fn test_cache_new_withDisabled_shouldNeverReturnHits() {
    let cache = EnhancementCache::new(false);
    // Store something
    cache.store("hello", &ops("hello"), "hello...");
    // Get should return None because cache is disabled
    let result = cache.get("hello", &ops("hello"));
    assert!(result.is_none());
}

#[test]
fn test_cache_store_withEnabledCache_shouldStoreResult() {
    let cache = EnhancementCache::new(true);
    cache.store("hello", &ops("hello"), "hello...");

    let result = cache.get("hello", &ops("hello"));
    assert_eq!(result, Some("hello...".to_string()));
}

#[test]
fn test_cache_get_withMissingKey_shouldReturnNone() {
    let cache = EnhancementCache::new(true);
    let result = cache.get("nonexistent", &ops("x"));
    assert!(result.is_none());
}

#[test]
fn test_cache_get_withDifferentOps_shouldReturnNone() {
    let cache = EnhancementCache::new(true);
    cache.store("hello", &ops("hello"), "hello...");

    // Different target
    assert!(cache.get("hello", &ops("h")).is_none());

    // Different kind, same target
    let quote_ops = vec![EnhancementOp::new(EnhancementKind::Quote, "hello")];
    assert!(cache.get("hello", &quote_ops).is_none());

    // Same ops in a different order
    let ab = vec![
        EnhancementOp::new(EnhancementKind::Pause, "a"),
        EnhancementOp::new(EnhancementKind::Quote, "b"),
    ];
    let ba: Vec<_> = ab.iter().rev().cloned().collect();
    cache.store("text", &ab, "out");
    assert!(cache.get("text", &ba).is_none());
}

#[test]
fn test_cache_store_withMultipleEntries_shouldStoreAll() {
    let cache = EnhancementCache::new(true);

    cache.store("hello", &ops("hello"), "hello...");
    cache.store("goodbye", &ops("goodbye"), "goodbye...");
    cache.store("hello", &ops("h"), "h...ello");

    assert_eq!(cache.get("hello", &ops("hello")), Some("hello...".to_string()));
    assert_eq!(cache.get("goodbye", &ops("goodbye")), Some("goodbye...".to_string()));
    assert_eq!(cache.get("hello", &ops("h")), Some("h...ello".to_string()));
}

#[test]
fn test_cache_store_withSameKey_shouldOverwrite() {
    let cache = EnhancementCache::new(true);

    cache.store("hello", &ops("hello"), "first");
    cache.store("hello", &ops("hello"), "second");

    assert_eq!(cache.get("hello", &ops("hello")), Some("second".to_string()));
}

#[test]
fn test_cache_default_shouldBeEnabled() {
    let cache = EnhancementCache::default();
    cache.store("test", &ops("test"), "test...");

    let result = cache.get("test", &ops("test"));
    assert_eq!(result, Some("test...".to_string()));
}

#[test]
fn test_cache_clone_shouldShareStorage() {
    let cache1 = EnhancementCache::new(true);
    let cache2 = cache1.clone();

    cache1.store("hello", &ops("hello"), "hello...");

    // cache2 should see the same data (shared storage)
    let result = cache2.get("hello", &ops("hello"));
    assert_eq!(result, Some("hello...".to_string()));
}

#[test]
fn test_cache_stats_shouldCountHitsAndMisses() {
    let cache = EnhancementCache::new(true);

    cache.store("hello", &ops("hello"), "hello...");

    let _ = cache.get("hello", &ops("hello")); // hit
    let _ = cache.get("absent", &ops("absent")); // miss
    let _ = cache.get("hello", &ops("hello")); // hit

    let (hits, misses, hit_rate) = cache.stats();
    assert_eq!(hits, 2);
    assert_eq!(misses, 1);
    assert!((hit_rate - 2.0 / 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_cache_clear_shouldResetEntriesAndCounters() {
    let cache = EnhancementCache::new(true);

    cache.store("hello", &ops("hello"), "hello...");
    let _ = cache.get("hello", &ops("hello"));

    cache.clear();

    assert!(cache.is_empty());
    assert_eq!(cache.len(), 0);
    let (hits, misses, hit_rate) = cache.stats();
    assert_eq!((hits, misses), (0, 0));
    assert_eq!(hit_rate, 0.0);
}

#[test]
fn test_cache_withEmptyStrings_shouldHandleCorrectly() {
    let cache = EnhancementCache::new(true);

    cache.store("", &[], "");
    let result = cache.get("", &[]);
    assert_eq!(result, Some("".to_string()));
}

#[test]
fn test_cache_withUnicodeText_shouldHandleCorrectly() {
    let cache = EnhancementCache::new(true);

    let source = "こんにちは";
    let output = "\"こんにちは\"";

    cache.store(source, &ops(source), output);
    let result = cache.get(source, &ops(source));
    assert_eq!(result, Some(output.to_string()));
}

#[test]
fn test_cache_concurrent_access_shouldBeThreadSafe() {
    use std::sync::Arc;
    use std::thread;

    let cache = Arc::new(EnhancementCache::new(true));
    let mut handles = Vec::new();

    // Spawn multiple threads to write to the cache
    for i in 0..10 {
        let cache = cache.clone();
        handles.push(thread::spawn(move || {
            let text = format!("text{}", i);
            let output = format!("output{}", i);
            cache.store(&text, &ops("t"), &output);
        }));
    }

    // Wait for all writes
    for handle in handles {
        handle.join().unwrap();
    }

    // Verify all values are stored
    for i in 0..10 {
        let text = format!("text{}", i);
        let expected = format!("output{}", i);
        assert_eq!(cache.get(&text, &ops("t")), Some(expected));
    }
}
