mod common;

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use clicklink::application::services::{Registration, UrlRegistry};
use clicklink::domain::clock::SystemClock;
use clicklink::error::AppError;
use clicklink::infrastructure::persistence::MemoryUrlRepository;
use clicklink::utils::code_generator::CodeGenerator;
use tokio::task::JoinSet;

fn memory_registry() -> (Arc<UrlRegistry>, Arc<MemoryUrlRepository>) {
    let repository = Arc::new(MemoryUrlRepository::new());
    (common::create_registry(repository.clone()), repository)
}

#[tokio::test]
async fn test_create_is_idempotent() {
    let (registry, repo) = memory_registry();

    let first = registry.create_or_get("https://example.com").await.unwrap();
    let second = registry.create_or_get("https://example.com").await.unwrap();

    assert!(first.is_created());
    assert!(!second.is_created());
    assert_eq!(first.record(), second.record());
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_round_trip_returns_exact_url() {
    let (registry, _repo) = memory_registry();

    for url in [
        "https://example.com/page",
        "http://localhost:3000/a/b?c=d&e=f",
        "https://EXAMPLE.COM:443/Path?key=VALUE#anchor",
        "https://example.com/path%20with%20spaces",
    ] {
        let code = registry
            .create_or_get(url)
            .await
            .unwrap()
            .into_record()
            .short_code;

        assert_eq!(registry.resolve_and_track(&code).await.unwrap(), url);
    }
}

#[tokio::test]
async fn test_validation_errors() {
    let (registry, _repo) = memory_registry();

    assert!(matches!(
        registry.create_or_get("not a url").await,
        Err(AppError::InvalidInput { .. })
    ));
    assert!(matches!(
        registry.resolve_and_track("doesNotExist").await,
        Err(AppError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_distinct_urls_never_share_codes() {
    let (registry, repo) = memory_registry();

    let mut codes = HashSet::new();
    for i in 0..500 {
        let record = registry
            .create_or_get(&format!("https://example.com/{i}"))
            .await
            .unwrap()
            .into_record();
        assert!(codes.insert(record.short_code));
    }

    assert_eq!(repo.len().await, 500);
}

/// Returns `"AAAAAAAA"` for the first `repeat` calls, then unique codes.
struct CollidingCodes {
    repeat: usize,
    calls: AtomicUsize,
}

impl CodeGenerator for CollidingCodes {
    fn generate(&self) -> String {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n < self.repeat {
            "AAAAAAAA".to_string()
        } else {
            format!("code{n:04}")
        }
    }
}

#[tokio::test]
async fn test_collision_is_regenerated_not_failed() {
    let repository = Arc::new(MemoryUrlRepository::new());
    let registry = UrlRegistry::new(
        repository.clone(),
        Arc::new(CollidingCodes {
            repeat: 3,
            calls: AtomicUsize::new(0),
        }),
        Arc::new(SystemClock),
        common::BASE_URL,
        Duration::from_secs(5),
    );

    let first = registry.create_or_get("https://one.example").await.unwrap();
    let second = registry.create_or_get("https://two.example").await.unwrap();

    assert_eq!(first.record().short_code, "AAAAAAAA");
    assert_eq!(second.record().short_code, "code0003");
    assert_eq!(
        registry.resolve_and_track("AAAAAAAA").await.unwrap(),
        "https://one.example"
    );
    assert_eq!(repository.len().await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_redirects_lose_no_clicks() {
    let (registry, _repo) = memory_registry();

    let code = registry
        .create_or_get("https://example.com/hot")
        .await
        .unwrap()
        .into_record()
        .short_code;

    registry.resolve_and_track(&code).await.unwrap();
    let before = registry.lookup(&code).await.unwrap().clicks;

    let mut tasks = JoinSet::new();
    for _ in 0..100 {
        let registry = registry.clone();
        let code = code.clone();
        tasks.spawn(async move { registry.resolve_and_track(&code).await });
    }
    while let Some(result) = tasks.join_next().await {
        assert_eq!(result.unwrap().unwrap(), "https://example.com/hot");
    }

    assert_eq!(registry.lookup(&code).await.unwrap().clicks, before + 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_yield_one_record() {
    let (registry, repo) = memory_registry();

    let mut tasks = JoinSet::new();
    for _ in 0..50 {
        let registry = registry.clone();
        tasks.spawn(async move { registry.create_or_get("https://example.com/race").await });
    }

    let mut codes = HashSet::new();
    let mut created = 0;
    while let Some(result) = tasks.join_next().await {
        let registration = result.unwrap().unwrap();
        if let Registration::Created(_) = registration {
            created += 1;
        }
        codes.insert(registration.into_record().short_code);
    }

    assert_eq!(created, 1);
    assert_eq!(codes.len(), 1);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_lookup_does_not_touch_counter() {
    let (registry, _repo) = memory_registry();

    let code = registry
        .create_or_get("https://example.com")
        .await
        .unwrap()
        .into_record()
        .short_code;

    registry.lookup(&code).await.unwrap();
    registry.create_or_get("https://example.com").await.unwrap();

    assert_eq!(registry.lookup(&code).await.unwrap().clicks, 0);
}
