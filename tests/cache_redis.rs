//! Redis cache tests. They need a disposable Redis database; every test
//! flushes it first:
//!
//! ```bash
//! REDIS_TEST_URL=redis://127.0.0.1:6379/15 cargo test --test cache_redis -- --ignored
//! ```

use miniurl::infrastructure::cache::{CacheService, RedisCache};
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;
use serial_test::serial;
use std::time::Duration;

const DEFAULT_TTL: Duration = Duration::from_secs(3_600);

fn redis_url() -> String {
    std::env::var("REDIS_TEST_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379/15".to_string())
}

async fn raw_connection() -> MultiplexedConnection {
    redis::Client::open(redis_url())
        .unwrap()
        .get_multiplexed_async_connection()
        .await
        .unwrap()
}

async fn fresh_cache() -> (RedisCache, MultiplexedConnection) {
    let mut raw = raw_connection().await;
    redis::cmd("FLUSHDB")
        .query_async::<()>(&mut raw)
        .await
        .unwrap();

    let cache = RedisCache::connect(&redis_url(), DEFAULT_TTL).await.unwrap();
    (cache, raw)
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis"]
async fn test_set_and_get_with_ttl() {
    let (cache, mut raw) = fresh_cache().await;

    cache
        .set_url("ex1", "https://example.com", Some(Duration::from_secs(120)))
        .await
        .unwrap();

    assert_eq!(
        cache.get_url("ex1").await.unwrap().as_deref(),
        Some("https://example.com")
    );

    let ttl: i64 = raw.ttl("url:ex1").await.unwrap();
    assert!((1..=120).contains(&ttl), "unexpected TTL {}", ttl);
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis"]
async fn test_set_without_ttl_uses_default() {
    let (cache, mut raw) = fresh_cache().await;

    cache.set_url("dflt1", "https://example.com", None).await.unwrap();

    let ttl: i64 = raw.ttl("url:dflt1").await.unwrap();
    assert!(ttl > 120 && ttl <= DEFAULT_TTL.as_secs() as i64);
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis"]
async fn test_sub_second_ttl_is_rounded_up() {
    let (cache, mut raw) = fresh_cache().await;

    cache
        .set_url("tiny1", "https://example.com", Some(Duration::from_millis(200)))
        .await
        .unwrap();

    let ttl: i64 = raw.ttl("url:tiny1").await.unwrap();
    assert_eq!(ttl, 1);
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis"]
async fn test_get_unknown_alias_is_miss() {
    let (cache, _raw) = fresh_cache().await;

    assert_eq!(cache.get_url("nope1").await.unwrap(), None);
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis"]
async fn test_expired_entry_is_miss() {
    let (cache, _raw) = fresh_cache().await;

    cache
        .set_url("gone1", "https://example.com", Some(Duration::from_secs(1)))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(1_500)).await;

    assert_eq!(cache.get_url("gone1").await.unwrap(), None);
    assert!(cache.scan_all().await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis"]
async fn test_scan_all_returns_unprefixed_aliases() {
    let (cache, mut raw) = fresh_cache().await;

    for i in 0..250 {
        cache
            .set_url(&format!("a{:03}", i), &format!("https://example.com/{}", i), None)
            .await
            .unwrap();
    }
    assert!(cache.round_trip().await.unwrap());
    raw.set::<_, _, ()>("unrelated", "value").await.unwrap();

    let mut entries = cache.scan_all().await.unwrap();
    entries.sort();

    assert_eq!(entries.len(), 250);
    assert_eq!(
        entries[0],
        ("a000".to_string(), "https://example.com/0".to_string())
    );
    assert!(entries.iter().all(|(alias, _)| !alias.starts_with("url:")));
    assert!(entries.iter().all(|(alias, _)| alias != "health:check"));
    assert!(entries.iter().all(|(alias, _)| alias != "unrelated"));
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis"]
async fn test_round_trip_uses_probe_key() {
    let (cache, mut raw) = fresh_cache().await;

    assert!(cache.round_trip().await.unwrap());

    let value: Option<String> = raw.get("health:check").await.unwrap();
    assert_eq!(value.as_deref(), Some("ok"));
    let ttl: i64 = raw.ttl("health:check").await.unwrap();
    assert!((1..=5).contains(&ttl));

    assert_eq!(cache.get_url("health:check").await.unwrap(), None);
}

#[tokio::test]
#[serial]
#[ignore = "requires Redis"]
async fn test_ping() {
    let (cache, _raw) = fresh_cache().await;

    cache.ping().await.unwrap();
    assert_eq!(cache.backend(), "redis");
}
