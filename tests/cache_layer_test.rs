// ABOUTME: Unit tests for the in-memory cache layer
// ABOUTME: Tests TTL expiration, stale-write protection, capacity limits, and pattern invalidation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use recipe_catalog::cache::{CacheConfig, CacheLayer, SingleFlight};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Helper: Create in-memory cache with custom capacity
fn create_test_cache(max_entries: usize) -> CacheLayer<String> {
    CacheLayer::new(&CacheConfig {
        max_entries,
        cleanup_interval: Duration::from_secs(300),
        enable_background_cleanup: false,
    })
}

#[tokio::test]
async fn test_cache_put_and_get() -> Result<()> {
    let cache = create_test_cache(100);
    cache.put("trending:5", "soup".to_owned(), Duration::from_secs(60));

    assert_eq!(cache.get("trending:5"), Some("soup".to_owned()));
    assert_eq!(cache.get("latest:5"), None);
    Ok(())
}

#[tokio::test]
async fn test_cache_expiration() -> Result<()> {
    let cache = create_test_cache(100);
    cache.put("trending:5", "soup".to_owned(), Duration::from_millis(200));
    assert!(cache.get("trending:5").is_some());

    tokio::time::sleep(Duration::from_millis(300)).await;

    assert_eq!(cache.get("trending:5"), None);
    // Lazy eviction removed the expired entry
    assert!(cache.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_stale_fetch_does_not_overwrite_newer_entry() -> Result<()> {
    let cache = create_test_cache(100);
    let slow_fetch_started = Instant::now();
    tokio::time::sleep(Duration::from_millis(5)).await;
    let fast_fetch_started = Instant::now();

    let ttl = Duration::from_secs(60);
    assert!(cache.put_if_newer("search:pasta:10", "fast".to_owned(), ttl, fast_fetch_started));
    assert!(!cache.put_if_newer("search:pasta:10", "slow".to_owned(), ttl, slow_fetch_started));

    assert_eq!(cache.get("search:pasta:10"), Some("fast".to_owned()));
    Ok(())
}

#[tokio::test]
async fn test_invalidate_pattern() -> Result<()> {
    let cache = create_test_cache(100);
    let ttl = Duration::from_secs(60);
    cache.put("search:pasta:10", "a".to_owned(), ttl);
    cache.put("search:soup:10", "b".to_owned(), ttl);
    cache.put("trending:5", "c".to_owned(), ttl);

    let removed = cache.invalidate_pattern("search:*")?;

    assert_eq!(removed, 2);
    assert_eq!(cache.len(), 1);
    assert!(cache.get("trending:5").is_some());
    assert!(cache.invalidate_pattern("search:[").is_err());
    Ok(())
}

#[tokio::test]
async fn test_fetch_started_before_pattern_invalidation_is_refused() -> Result<()> {
    let cache = create_test_cache(100);
    let ttl = Duration::from_secs(60);
    let fetch_started = Instant::now();
    tokio::time::sleep(Duration::from_millis(5)).await;

    cache.invalidate_pattern("search:*")?;

    // Key was empty at invalidation time, the late write is still refused
    assert!(!cache.put_if_newer("search:pasta:10", "old".to_owned(), ttl, fetch_started));
    assert_eq!(cache.get("search:pasta:10"), None);
    assert!(cache.is_empty());

    // Keys outside the pattern are unaffected
    assert!(cache.put_if_newer("trending:5", "list".to_owned(), ttl, fetch_started));

    // A fetch started after the invalidation is stored
    assert!(cache.put_if_newer("search:pasta:10", "new".to_owned(), ttl, Instant::now()));
    assert_eq!(cache.get("search:pasta:10"), Some("new".to_owned()));
    Ok(())
}

#[tokio::test]
async fn test_fetch_started_before_invalidate_or_clear_is_refused() -> Result<()> {
    let cache = create_test_cache(100);
    let ttl = Duration::from_secs(60);
    let fetch_started = Instant::now();
    tokio::time::sleep(Duration::from_millis(5)).await;

    cache.invalidate("detail:local:abc");
    assert!(!cache.put_if_newer("detail:local:abc", "old".to_owned(), ttl, fetch_started));
    assert!(cache.put_if_newer("detail:local:xyz", "other".to_owned(), ttl, fetch_started));

    cache.clear();
    assert!(!cache.put_if_newer("detail:local:xyz", "old".to_owned(), ttl, fetch_started));
    assert!(cache.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_invalidate_and_clear() -> Result<()> {
    let cache = create_test_cache(100);
    let ttl = Duration::from_secs(60);
    cache.put("a", "1".to_owned(), ttl);
    cache.put("b", "2".to_owned(), ttl);

    cache.invalidate("a");
    assert_eq!(cache.get("a"), None);
    assert_eq!(cache.len(), 1);

    cache.clear();
    assert!(cache.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_capacity_evicts_oldest() -> Result<()> {
    let cache = create_test_cache(2);
    let ttl = Duration::from_secs(60);
    cache.put("first", "1".to_owned(), ttl);
    tokio::time::sleep(Duration::from_millis(2)).await;
    cache.put("second", "2".to_owned(), ttl);
    tokio::time::sleep(Duration::from_millis(2)).await;
    cache.put("third", "3".to_owned(), ttl);

    assert_eq!(cache.len(), 2);
    assert_eq!(cache.get("first"), None);
    assert!(cache.get("second").is_some());
    assert!(cache.get("third").is_some());
    Ok(())
}

#[tokio::test]
async fn test_capacity_reclaims_expired_first() -> Result<()> {
    let cache = create_test_cache(2);
    cache.put("short", "1".to_owned(), Duration::from_millis(50));
    cache.put("long", "2".to_owned(), Duration::from_secs(60));
    tokio::time::sleep(Duration::from_millis(100)).await;

    cache.put("new", "3".to_owned(), Duration::from_secs(60));

    assert_eq!(cache.len(), 2);
    assert!(cache.get("long").is_some());
    assert!(cache.get("new").is_some());
    Ok(())
}

#[tokio::test]
async fn test_sweep_expired() -> Result<()> {
    let cache = create_test_cache(100);
    cache.put("short", "1".to_owned(), Duration::from_millis(50));
    cache.put("long", "2".to_owned(), Duration::from_secs(60));
    tokio::time::sleep(Duration::from_millis(100)).await;

    assert_eq!(cache.sweep_expired(), 1);
    assert_eq!(cache.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_background_cleanup_removes_expired_entries() -> Result<()> {
    let cache: CacheLayer<String> = CacheLayer::new(&CacheConfig {
        max_entries: 100,
        cleanup_interval: Duration::from_millis(50),
        enable_background_cleanup: true,
    });
    cache.put("short", "1".to_owned(), Duration::from_millis(20));

    tokio::time::sleep(Duration::from_millis(200)).await;

    assert!(cache.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_single_flight_shares_one_fetch() -> Result<()> {
    let flights: Arc<SingleFlight<u32>> = Arc::new(SingleFlight::new());
    let fetches = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let flights = Arc::clone(&flights);
        let fetches = Arc::clone(&fetches);
        handles.push(tokio::spawn(async move {
            flights
                .run("trending:5", || async move {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    42
                })
                .await
        }));
    }
    for handle in handles {
        assert_eq!(handle.await?, 42);
    }

    assert_eq!(fetches.load(Ordering::SeqCst), 1);
    assert_eq!(flights.in_flight(), 0);
    Ok(())
}

#[tokio::test]
async fn test_single_flight_runs_again_after_completion() -> Result<()> {
    let flights: SingleFlight<usize> = SingleFlight::new();
    let first = flights.run("k", || async { 1 }).await;
    let second = flights.run("k", || async { 2 }).await;

    assert_eq!((first, second), (1, 2));
    Ok(())
}

#[tokio::test]
async fn test_single_flight_waiter_takes_over_from_dropped_caller() -> Result<()> {
    let flights: SingleFlight<usize> = SingleFlight::new();
    let counter = AtomicUsize::new(0);
    let fetches = &counter;
    let fetch = move || async move {
        let attempt = fetches.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(Duration::from_millis(100)).await;
        attempt
    };

    let (dropped, waiter) = tokio::join!(
        tokio::time::timeout(Duration::from_millis(20), flights.run("trending:5", fetch)),
        flights.run("trending:5", fetch),
    );

    assert!(dropped.is_err());
    assert_eq!(waiter, 2);
    assert_eq!(fetches.load(Ordering::SeqCst), 2);
    assert_eq!(flights.in_flight(), 0);
    Ok(())
}

#[tokio::test]
async fn test_single_flight_forget_matching_detaches_in_flight_fetch() -> Result<()> {
    let flights: SingleFlight<&str> = SingleFlight::new();

    let (first, second) = tokio::join!(
        flights.run("search:pasta:10", || async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            "before"
        }),
        async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            assert_eq!(flights.forget_matching("search:*").unwrap(), 1);
            assert_eq!(flights.in_flight(), 0);
            flights.run("search:pasta:10", || async { "after" }).await
        },
    );

    assert_eq!((first, second), ("before", "after"));
    assert_eq!(flights.in_flight(), 0);
    assert!(flights.forget_matching("search:[").is_err());
    Ok(())
}
